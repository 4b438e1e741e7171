//! Errors raised while building or mutating a [`Molecule`](crate::Molecule).

use thiserror::Error;

/// Error returned by molecule construction and mutation.
///
/// Every failing call leaves the molecule exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoleculeError {
    /// An atom with this id already exists; insertion never overwrites.
    #[error("atom {symbol} exists in the molecule as id {id}")]
    DuplicateAtom { id: String, symbol: String },
    /// A bond with this id already exists; insertion never overwrites.
    #[error("bond ({first}, {second}) exists in the molecule as id {id}")]
    DuplicateBond {
        id: String,
        first: String,
        second: String,
    },
    /// A bond endpoint, or an atom named for removal, is not in the molecule.
    #[error("no atom with id {0} in the molecule")]
    UnknownAtom(String),
    /// A bond named for removal is not in the molecule.
    #[error("no bond with id {0} in the molecule")]
    UnknownBond(String),
    /// Id allocation was asked for something other than an atom or a bond.
    #[error("unknown id kind {0:?}: must be an atom ('a') or a bond ('b')")]
    UnknownIdKind(char),
    /// The debug text form could not be read back.
    #[error("malformed molecule text: {0}")]
    Text(String),
}
