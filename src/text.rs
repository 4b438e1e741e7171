//! Two-line debug text for molecules.
//!
//! The first line is the atom mapping and the second the bond mapping, both
//! as JSON objects keyed by id. Keys come out sorted, so the text is stable
//! for a given molecule. It is meant for logs and test failure output, not as
//! an interchange format; the molecule name is not part of it.

use std::collections::BTreeMap;
use std::fmt;

use crate::bond::BondSpec;
use crate::error::MoleculeError;
use crate::mol::Molecule;

impl Molecule {
    pub fn to_text(&self) -> String {
        // Maps of strings and serde-derived bonds always serialize.
        let atoms = serde_json::to_string(&self.atom_map()).unwrap_or_default();
        let bonds = serde_json::to_string(&self.bond_map()).unwrap_or_default();
        format!("{atoms}\n{bonds}")
    }

    pub fn from_text(text: &str) -> Result<Self, MoleculeError> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let (Some(atom_line), Some(bond_line), None) = (lines.next(), lines.next(), lines.next())
        else {
            return Err(MoleculeError::Text(
                "expected an atom line and a bond line".into(),
            ));
        };
        let atoms: BTreeMap<String, String> = serde_json::from_str(atom_line)
            .map_err(|e| MoleculeError::Text(format!("atoms: {e}")))?;
        let bonds: BTreeMap<String, BondSpec> = serde_json::from_str(bond_line)
            .map_err(|e| MoleculeError::Text(format!("bonds: {e}")))?;
        Molecule::new(atoms, bonds)
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
