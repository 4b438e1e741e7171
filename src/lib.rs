pub mod atom;
pub mod bond;
pub mod conditions;
pub mod dispatch;
pub mod error;
pub mod isomorphism;
pub mod logging;
pub mod mechanisms;
pub mod mol;
pub mod text;
pub mod traits;

pub use atom::Atom;
pub use bond::{Bond, BondSpec};
pub use conditions::Conditions;
pub use dispatch::{
    DispatchError, Dispatcher, InvalidReaction, Mechanism, Products, ReactionError, Registrar,
    Registry, Requirement,
};
pub use error::MoleculeError;
pub use isomorphism::{
    find_isomorphism, find_isomorphism_with, is_isomorphic, is_isomorphic_with, AtomMapping,
    BondMatch,
};
pub use mol::Molecule;
pub use traits::{HasBondOrder, HasSymbol};
