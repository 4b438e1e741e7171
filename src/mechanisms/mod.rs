//! Built-in mechanisms and the requirements they are gated by.
//!
//! Each catalog entry names its requirements; the names are resolved
//! through [`resolve_requirement`] when the entry is installed, so a
//! misspelled requirement surfaces as a registration error.

mod acid_base;
pub mod requirements;

pub use acid_base::acid_base_reaction;

use crate::conditions::Conditions;
use crate::dispatch::{DispatchError, Mechanism, Products, Registry, Requirement};
use crate::mol::Molecule;

/// A built-in mechanism before registration.
#[derive(Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub requirements: &'static [&'static str],
    pub function: fn(&[Molecule], &Conditions) -> Option<Products<Molecule>>,
}

const CATALOG: &[CatalogEntry] = &[CatalogEntry {
    name: "acid_base",
    requirements: &["pka"],
    function: acid_base_reaction,
}];

pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG
}

/// Looks a requirement up by name. Unknown names resolve to a requirement
/// without a predicate, which registration rejects.
pub fn resolve_requirement(name: &str) -> Requirement<Molecule> {
    match name {
        "pka" => Requirement::new("pka", requirements::pka),
        other => Requirement::unresolved(Some(other.to_string())),
    }
}

/// Registers `entry` into `registry`.
pub fn install_entry(
    registry: &Registry<Molecule, Molecule>,
    entry: &CatalogEntry,
) -> Result<Mechanism<Molecule, Molecule>, DispatchError> {
    let requirements = entry.requirements.iter().map(|name| resolve_requirement(name));
    let registrar = if entry.requirements.is_empty() {
        registry.register_unconditional()
    } else {
        registry.register(requirements)?
    };
    registrar.apply(Mechanism::new(entry.name, entry.function))
}

/// Registers every catalog entry into `registry`, stopping at the first
/// failure.
pub fn install(
    registry: &Registry<Molecule, Molecule>,
) -> Result<Vec<Mechanism<Molecule, Molecule>>, DispatchError> {
    catalog()
        .iter()
        .map(|entry| install_entry(registry, entry))
        .collect()
}
