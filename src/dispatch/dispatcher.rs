use super::error::{DispatchError, ReactionError};
use super::mechanism::{Mechanism, Products};
use super::registry::{Registrar, Registry};
use super::requirement::Requirement;
use crate::conditions::Conditions;
use crate::mol::Molecule;

/// A production namespace and an isolated test namespace.
///
/// Each call takes an `is_test` flag choosing the namespace, so test suites
/// can register throwaway mechanisms without touching what production code
/// dispatches to. Build one at startup and pass it by reference.
pub struct Dispatcher<R = Molecule, P = Molecule> {
    production: Registry<R, P>,
    test: Registry<R, P>,
}

impl<R, P> Dispatcher<R, P> {
    pub fn new() -> Self {
        Self {
            production: Registry::with_label("production"),
            test: Registry::with_label("test"),
        }
    }

    pub fn namespace(&self, is_test: bool) -> &Registry<R, P> {
        if is_test {
            &self.test
        } else {
            &self.production
        }
    }

    pub fn production(&self) -> &Registry<R, P> {
        &self.production
    }

    pub fn test(&self) -> &Registry<R, P> {
        &self.test
    }

    pub fn register(
        &self,
        requirements: impl IntoIterator<Item = Requirement<R>>,
        is_test: bool,
    ) -> Result<Registrar<'_, R, P>, DispatchError> {
        self.namespace(is_test).register(requirements)
    }

    pub fn register_unconditional(&self, is_test: bool) -> Registrar<'_, R, P> {
        self.namespace(is_test).register_unconditional()
    }

    pub fn is_registered(&self, name: &str, is_test: bool) -> bool {
        self.namespace(is_test).is_registered(name)
    }

    pub fn is_registered_mechanism(&self, mechanism: &Mechanism<R, P>, is_test: bool) -> bool {
        self.namespace(is_test).is_registered_mechanism(mechanism)
    }

    pub fn generate_likely_reactions(
        &self,
        reactants: &[R],
        conditions: &Conditions,
        is_test: bool,
    ) -> Vec<Mechanism<R, P>> {
        self.namespace(is_test)
            .generate_likely_reactions(reactants, conditions)
    }

    pub fn react(
        &self,
        reactants: &[R],
        conditions: &Conditions,
        is_test: bool,
    ) -> Result<Products<P>, ReactionError> {
        self.namespace(is_test).react(reactants, conditions)
    }

    /// Empties the test namespace. The production namespace has no reset.
    pub fn clear_test_namespace(&self) {
        self.test.clear();
    }
}

impl<R, P> Default for Dispatcher<R, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> std::fmt::Debug for Dispatcher<R, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("production", &self.production)
            .field("test", &self.test)
            .finish()
    }
}
