//! Requirement predicates for the built-in mechanisms.

use std::collections::HashMap;

use crate::conditions::Conditions;
use crate::mol::Molecule;

/// Conditions key: reactant name → pKa.
pub const PKAS: &str = "pkas";
/// Conditions key: reactant name → id of the atom the pKa refers to.
pub const PKA_POINTS: &str = "pka_points";

/// pKa data for a set of reactants, read from the conditions.
///
/// The pKa point of an acid is the hydrogen most likely to be donated; for a
/// base it is the atom most likely to accept one. Nothing is computed here:
/// the values come straight from [`PKAS`] and [`PKA_POINTS`].
#[derive(Debug, Clone, PartialEq)]
pub struct PkaTable {
    pkas: HashMap<String, f64>,
    points: HashMap<String, String>,
}

impl PkaTable {
    pub fn from_conditions(conditions: &Conditions) -> Option<Self> {
        Some(Self {
            pkas: conditions.get_as(PKAS)?,
            points: conditions.get_as(PKA_POINTS)?,
        })
    }

    /// The reactant's pKa and pKa point, if both are known and the point is
    /// an atom of the reactant.
    pub fn lookup<'a>(&'a self, reactant: &Molecule) -> Option<(f64, &'a str)> {
        let name = reactant.name()?;
        let pka = *self.pkas.get(name)?;
        let point = self.points.get(name)?;
        reactant
            .contains_atom(point)
            .then_some((pka, point.as_str()))
    }
}

/// Passes when every reactant has a usable pKa and pKa point.
pub fn pka(reactants: &[Molecule], conditions: &Conditions) -> bool {
    match PkaTable::from_conditions(conditions) {
        Some(table) => reactants.iter().all(|r| table.lookup(r).is_some()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondSpec;
    use serde_json::json;

    fn hydroxide() -> Molecule {
        Molecule::new([("a1", "H"), ("a2", "O")], [("b1", BondSpec::new("a1", "a2"))])
            .unwrap()
            .with_name("Hydroxide")
    }

    #[test]
    fn needs_both_keys() {
        let reactants = [hydroxide()];
        let only_pkas = Conditions::new().with(PKAS, json!({"Hydroxide": 16}));
        assert!(!pka(&reactants, &only_pkas));
        let both = only_pkas.with(PKA_POINTS, json!({"Hydroxide": "a2"}));
        assert!(pka(&reactants, &both));
    }

    #[test]
    fn every_reactant_must_be_covered() {
        let other = hydroxide().with_name("Mystery");
        let conditions = Conditions::new()
            .with(PKAS, json!({"Hydroxide": 16}))
            .with(PKA_POINTS, json!({"Hydroxide": "a2"}));
        assert!(!pka(&[hydroxide(), other], &conditions));
        assert!(!pka(&[Molecule::empty()], &conditions));
    }

    #[test]
    fn point_must_be_an_atom() {
        let conditions = Conditions::new()
            .with(PKAS, json!({"Hydroxide": 16}))
            .with(PKA_POINTS, json!({"Hydroxide": "a7"}));
        assert!(!pka(&[hydroxide()], &conditions));
    }
}
