use std::fmt;
use std::sync::Arc;

use crate::conditions::Conditions;

/// Ordered products of a reaction. A slot is `None` when that product is
/// not computed (a leftover salt, for instance).
pub type Products<P> = Vec<Option<P>>;

type MechanismFn<R, P> = dyn Fn(&[R], &Conditions) -> Option<Products<P>> + Send + Sync;

/// A named reaction mechanism.
///
/// The handle is cheap to clone; clones share the function and compare equal
/// under [`Mechanism::same_as`]. Calling it directly runs the bare function
/// with no requirement checks; dispatch only happens through a
/// [`Registry`](super::Registry).
///
/// A mechanism signals "does not apply" by returning `None` or an empty
/// product list.
pub struct Mechanism<R, P> {
    name: Arc<str>,
    func: Arc<MechanismFn<R, P>>,
}

impl<R, P> Mechanism<R, P> {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[R], &Conditions) -> Option<Products<P>> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, reactants: &[R], conditions: &Conditions) -> Option<Products<P>> {
        (self.func)(reactants, conditions)
    }

    /// Whether both handles wrap the very same function.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<R, P> Clone for Mechanism<R, P> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            func: Arc::clone(&self.func),
        }
    }
}

impl<R, P> fmt::Debug for Mechanism<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mechanism").field(&self.name).finish()
    }
}
