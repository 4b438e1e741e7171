//! Proton transfer between the strongest acid and the strongest base.

use tracing::warn;

use super::requirements::PkaTable;
use crate::bond::BondSpec;
use crate::conditions::Conditions;
use crate::dispatch::Products;
use crate::error::MoleculeError;
use crate::mol::Molecule;

/// Moves a hydrogen from the reactant with the lowest pKa (the acid) to the
/// reactant with the highest pKa (the base).
///
/// The first two reactants seed the acid and the base; a later reactant
/// replaces them only with a strictly lower or higher pKa.
///
/// Returns `[conjugate_acid, conjugate_base, salt]`. The salt is not
/// computed and is always `None`. Declines when there are fewer than two
/// reactants with pKa data, when acid and base are the same reactant, or
/// when the acid's pKa point is not a hydrogen.
pub fn acid_base_reaction(
    reactants: &[Molecule],
    conditions: &Conditions,
) -> Option<Products<Molecule>> {
    let table = PkaTable::from_conditions(conditions)?;

    let data: Vec<(f64, &str)> = reactants
        .iter()
        .map(|reactant| table.lookup(reactant))
        .collect::<Option<_>>()?;
    if data.len() < 2 {
        return None;
    }

    // Ties keep the seeds, so equal pKas move a proton from the first
    // reactant to the second.
    let (mut acid_idx, mut base_idx) = (0, 1);
    for (i, &(pka, _)) in data.iter().enumerate() {
        if pka < data[acid_idx].0 {
            acid_idx = i;
        }
        if pka > data[base_idx].0 {
            base_idx = i;
        }
    }
    if acid_idx == base_idx {
        return None;
    }
    let donor_id = data[acid_idx].1;
    let acceptor_id = data[base_idx].1;

    let mut conjugate_base = reactants[acid_idx].clone();
    let mut conjugate_acid = reactants[base_idx].clone();
    conjugate_base.set_name(None);
    conjugate_acid.set_name(None);

    if conjugate_base.symbol(donor_id) != Some("H") {
        warn!("acid pKa point {donor_id} is not a hydrogen; declining");
        return None;
    }
    if let Err(err) = move_hydrogen(
        &mut conjugate_base,
        donor_id,
        &mut conjugate_acid,
        acceptor_id,
    ) {
        warn!("proton transfer failed: {err}");
        return None;
    }

    Some(vec![Some(conjugate_acid), Some(conjugate_base), None])
}

fn move_hydrogen(
    donor: &mut Molecule,
    donor_id: &str,
    acceptor: &mut Molecule,
    acceptor_id: &str,
) -> Result<(), MoleculeError> {
    donor.remove_atom(donor_id)?;
    let hydrogen = acceptor.next_free_atom_id();
    acceptor.add_atom(hydrogen.clone(), "H")?;
    let bond = acceptor.next_free_bond_id();
    acceptor.add_bond(bond, BondSpec::new(hydrogen, acceptor_id))
}
