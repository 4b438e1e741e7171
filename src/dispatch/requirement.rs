use std::fmt;
use std::sync::Arc;

use crate::conditions::Conditions;

type Predicate<R> = dyn Fn(&[R], &Conditions) -> bool + Send + Sync;

/// A predicate gating whether a mechanism is a candidate for some reactants
/// under some conditions.
///
/// A requirement may carry a name for diagnostics. One built by
/// [`Requirement::unresolved`] has no predicate at all; it stands for a name
/// that could not be looked up, and registration refuses it.
pub struct Requirement<R> {
    name: Option<Arc<str>>,
    check: Option<Arc<Predicate<R>>>,
}

impl<R> Requirement<R> {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&[R], &Conditions) -> bool + Send + Sync + 'static,
    {
        Self {
            name: Some(Arc::from(name.into())),
            check: Some(Arc::new(check)),
        }
    }

    pub fn anonymous<F>(check: F) -> Self
    where
        F: Fn(&[R], &Conditions) -> bool + Send + Sync + 'static,
    {
        Self {
            name: None,
            check: Some(Arc::new(check)),
        }
    }

    pub fn unresolved(name: Option<String>) -> Self {
        Self {
            name: name.map(Arc::from),
            check: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_callable(&self) -> bool {
        self.check.is_some()
    }

    /// Runs the predicate. A requirement without one never passes.
    pub fn evaluate(&self, reactants: &[R], conditions: &Conditions) -> bool {
        match &self.check {
            Some(check) => check(reactants, conditions),
            None => false,
        }
    }
}

impl<R> Clone for Requirement<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            check: self.check.clone(),
        }
    }
}

impl<R> fmt::Debug for Requirement<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirement")
            .field("name", &self.name)
            .field("callable", &self.is_callable())
            .finish()
    }
}

impl<R> fmt::Display for Requirement<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("<unnamed>"))
    }
}
