//! Runtime selection of reaction mechanisms.
//!
//! Mechanisms are registered into a [`Registry`] with the requirements that
//! gate them. A reaction evaluates every registered mechanism's requirements
//! against the reactants and conditions, then runs the passing candidates
//! until one of them produces something. [`Dispatcher`] pairs a production
//! registry with a test registry.
//!
//! ```
//! use chemreact::dispatch::{Mechanism, Registry, Requirement};
//! use chemreact::Conditions;
//!
//! let registry: Registry<u32, u32> = Registry::new();
//! let even = Requirement::new("even", |r: &[u32], _: &Conditions| r.iter().all(|n| n % 2 == 0));
//! registry
//!     .register([even])
//!     .unwrap()
//!     .apply(Mechanism::new("halve", |r: &[u32], _: &Conditions| {
//!         Some(r.iter().map(|n| Some(n / 2)).collect())
//!     }))
//!     .unwrap();
//!
//! assert_eq!(registry.react(&[4, 8], &Conditions::new()).unwrap(), vec![Some(2), Some(4)]);
//! assert!(registry.react(&[3], &Conditions::new()).is_err());
//! ```

mod dispatcher;
pub mod error;
mod mechanism;
mod registry;
mod requirement;

pub use dispatcher::Dispatcher;
pub use error::{DispatchError, InvalidReaction, ReactionError};
pub use mechanism::{Mechanism, Products};
pub use registry::{Registrar, Registry};
pub use requirement::Requirement;
