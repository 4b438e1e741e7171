use thiserror::Error;

/// Why a requirement collection was refused at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReaction {
    /// `register` was given no requirements at all.
    #[error("no requirements given; use register_unconditional for a mechanism without any")]
    NoRequirements,
    /// A named requirement has no predicate behind it.
    #[error("requirement {name} is not a function")]
    NotCallable { name: String },
    /// An unnamed requirement has no predicate behind it.
    #[error("unnamed requirement at position {position} is not a function")]
    UnnamedNotCallable { position: usize },
}

/// Error returned while registering a mechanism.
///
/// A failed registration leaves the namespace exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The target namespace already holds a mechanism with this name.
    #[error("a mechanism named {0} already exists")]
    ExistingReaction(String),
    /// The requirement collection is malformed.
    #[error("invalid reaction: {0}")]
    InvalidReaction(#[from] InvalidReaction),
}

/// Error returned by a reaction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactionError {
    /// No registered mechanism both matched every requirement and produced
    /// a non-empty result.
    #[error(
        "couldn't react {reactant_count} reactant(s) in conditions {conditions} ({} candidate(s) tried)",
        .tried.len()
    )]
    Failed {
        reactant_count: usize,
        conditions: String,
        /// Names of the candidates that were run and declined, in trial order.
        tried: Vec<String>,
    },
}
