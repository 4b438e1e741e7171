use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info};

use super::error::{DispatchError, InvalidReaction, ReactionError};
use super::mechanism::{Mechanism, Products};
use super::requirement::Requirement;
use crate::conditions::Conditions;
use crate::mol::Molecule;

struct Registration<R, P> {
    mechanism: Mechanism<R, P>,
    requirements: Arc<[Requirement<R>]>,
}

impl<R, P> Clone for Registration<R, P> {
    fn clone(&self) -> Self {
        Self {
            mechanism: self.mechanism.clone(),
            requirements: Arc::clone(&self.requirements),
        }
    }
}

/// One mechanism namespace.
///
/// Mechanisms are registered once under a unique name together with their
/// requirements and are never updated. [`Registry::react`] picks among the
/// mechanisms whose requirements all pass. The order in which candidates
/// are considered is unspecified: when several could succeed, any one of
/// their results may come back.
///
/// Registration takes the write lock for the whole name check and insert.
/// Candidate generation copies the entries out under the read lock and runs
/// predicates and mechanisms with no lock held.
pub struct Registry<R = Molecule, P = Molecule> {
    label: &'static str,
    entries: RwLock<HashMap<String, Registration<R, P>>>,
}

impl<R, P> Registry<R, P> {
    pub fn new() -> Self {
        Self::with_label("default")
    }

    /// A registry whose diagnostics are tagged with `label`.
    pub fn with_label(label: &'static str) -> Self {
        Self {
            label,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Starts a registration gated by `requirements`, checked in order.
    ///
    /// Fails when the collection is empty or holds a requirement without a
    /// predicate. Nothing is added to the namespace until
    /// [`Registrar::apply`] succeeds.
    pub fn register(
        &self,
        requirements: impl IntoIterator<Item = Requirement<R>>,
    ) -> Result<Registrar<'_, R, P>, DispatchError> {
        let requirements: Arc<[Requirement<R>]> = requirements.into_iter().collect();
        if let Err(reason) = validate_requirements(&requirements) {
            error!("[{}] {reason}", self.label);
            return Err(reason.into());
        }
        Ok(Registrar {
            registry: self,
            requirements,
        })
    }

    /// Starts a registration with no requirements; the mechanism will be a
    /// candidate for every reaction.
    pub fn register_unconditional(&self) -> Registrar<'_, R, P> {
        Registrar {
            registry: self,
            requirements: Arc::from(Vec::new()),
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Looks a mechanism up by function identity rather than by name.
    pub fn is_registered_mechanism(&self, mechanism: &Mechanism<R, P>) -> bool {
        self.entries
            .read()
            .values()
            .any(|r| r.mechanism.same_as(mechanism))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Mechanisms whose requirements all pass for these reactants and
    /// conditions.
    ///
    /// Requirements are evaluated in registration order and evaluation of a
    /// mechanism stops at its first failing requirement. Nothing is cached:
    /// every call evaluates afresh.
    pub fn generate_likely_reactions(
        &self,
        reactants: &[R],
        conditions: &Conditions,
    ) -> Vec<Mechanism<R, P>> {
        let snapshot: Vec<Registration<R, P>> = self.entries.read().values().cloned().collect();

        snapshot
            .into_iter()
            .filter(|registration| self.passes(registration, reactants, conditions))
            .map(|registration| registration.mechanism)
            .collect()
    }

    /// Runs candidates until one yields a non-empty product list.
    ///
    /// Remaining candidates are not run once one succeeds. Fails with
    /// [`ReactionError::Failed`] when there is no candidate or every
    /// candidate declines.
    pub fn react(
        &self,
        reactants: &[R],
        conditions: &Conditions,
    ) -> Result<Products<P>, ReactionError> {
        let candidates = self.generate_likely_reactions(reactants, conditions);
        let mut tried = Vec::with_capacity(candidates.len());

        for mechanism in &candidates {
            debug!(
                "[{}] trying to react {} reactant(s) in conditions {} as a {} type reaction",
                self.label,
                reactants.len(),
                conditions,
                mechanism.name()
            );
            match mechanism.call(reactants, conditions) {
                Some(products) if !products.is_empty() => return Ok(products),
                _ => debug!("[{}] {} produced nothing", self.label, mechanism.name()),
            }
            tried.push(mechanism.name().to_string());
        }

        let err = ReactionError::Failed {
            reactant_count: reactants.len(),
            conditions: conditions.to_string(),
            tried,
        };
        info!("[{}] {err}", self.label);
        Err(err)
    }

    /// Empties the namespace. Only test harnesses reach this, through
    /// [`Dispatcher::clear_test_namespace`](super::Dispatcher::clear_test_namespace).
    pub(crate) fn clear(&self) {
        self.entries.write().clear();
    }

    fn passes(
        &self,
        registration: &Registration<R, P>,
        reactants: &[R],
        conditions: &Conditions,
    ) -> bool {
        let name = registration.mechanism.name();
        for requirement in registration.requirements.iter() {
            if requirement.evaluate(reactants, conditions) {
                debug!("[{}] {name}: requirement {requirement} passed", self.label);
            } else {
                debug!("[{}] {name}: requirement {requirement} failed", self.label);
                return false;
            }
        }
        true
    }

    fn insert(
        &self,
        mechanism: &Mechanism<R, P>,
        requirements: Arc<[Requirement<R>]>,
    ) -> Result<(), DispatchError> {
        let mut entries = self.entries.write();
        let name = mechanism.name();
        if entries.contains_key(name) {
            let err = DispatchError::ExistingReaction(name.to_string());
            error!("[{}] {err}", self.label);
            return Err(err);
        }
        let requirement_names: Vec<String> = requirements.iter().map(|r| r.to_string()).collect();
        entries.insert(
            name.to_string(),
            Registration {
                mechanism: mechanism.clone(),
                requirements,
            },
        );
        info!(
            "[{}] added mechanism {name} with requirements {requirement_names:?}",
            self.label
        );
        Ok(())
    }
}

impl<R, P> Default for Registry<R, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> std::fmt::Debug for Registry<R, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("label", &self.label)
            .field("mechanisms", &self.names())
            .finish()
    }
}

/// A pending registration bound to one registry and one requirement list.
#[must_use = "a registrar does nothing until applied to a mechanism"]
pub struct Registrar<'r, R, P> {
    registry: &'r Registry<R, P>,
    requirements: Arc<[Requirement<R>]>,
}

impl<'r, R, P> Registrar<'r, R, P> {
    /// Registers `mechanism` under its name and hands it back unchanged.
    ///
    /// ```
    /// use chemreact::dispatch::{Mechanism, Registry};
    ///
    /// let registry: Registry<(), &str> = Registry::new();
    /// let shout: Mechanism<(), &str> = Mechanism::new("shout", |_, _| Some(vec![Some("hi")]));
    /// let same = registry.register_unconditional().apply(shout.clone()).unwrap();
    /// assert!(same.same_as(&shout));
    /// assert!(registry.is_registered("shout"));
    /// ```
    pub fn apply(self, mechanism: Mechanism<R, P>) -> Result<Mechanism<R, P>, DispatchError> {
        self.registry.insert(&mechanism, self.requirements)?;
        Ok(mechanism)
    }

    pub fn requirements(&self) -> &[Requirement<R>] {
        &self.requirements
    }
}

fn validate_requirements<R>(requirements: &[Requirement<R>]) -> Result<(), InvalidReaction> {
    if requirements.is_empty() {
        return Err(InvalidReaction::NoRequirements);
    }
    for (position, requirement) in requirements.iter().enumerate() {
        if requirement.is_callable() {
            continue;
        }
        return Err(match requirement.name() {
            Some(name) => InvalidReaction::NotCallable {
                name: name.to_string(),
            },
            None => InvalidReaction::UnnamedNotCallable { position },
        });
    }
    Ok(())
}
