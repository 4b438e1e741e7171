use std::collections::{BTreeMap, BTreeSet};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use tracing::debug;

use crate::atom::Atom;
use crate::bond::{Bond, BondSpec};
use crate::error::MoleculeError;

/// Prefix of generated atom ids (`a0`, `a1`, …).
pub const ATOM_ID_PREFIX: char = 'a';
/// Prefix of generated bond ids (`b0`, `b1`, …).
pub const BOND_ID_PREFIX: char = 'b';

/// A molecule as a labeled undirected graph.
///
/// Atoms are nodes carrying an element symbol, bonds are edges carrying an
/// order and free-form extras. Both are addressed by string ids that are
/// unique within the molecule; inserting an id twice is an error, never an
/// overwrite. The id indexes and the graph are updated together by every
/// mutation, so they cannot drift apart.
///
/// Equality (`==`) is graph isomorphism over element symbols; see
/// [`Molecule::equals_with`] for a bond-order sensitive comparison.
///
/// # Examples
///
/// ```
/// use chemreact::{BondSpec, Molecule};
///
/// let water = Molecule::new(
///     [("a1", "H"), ("a2", "H"), ("a3", "O")],
///     [("b1", BondSpec::new("a1", "a3")), ("b2", BondSpec::new("a2", "a3"))],
/// )
/// .unwrap();
/// assert_eq!(water.atom_count(), 3);
/// assert_eq!(water.next_free_atom_id(), "a0");
/// ```
#[derive(Clone, Default)]
pub struct Molecule {
    name: Option<String>,
    graph: StableUnGraph<Atom, Bond>,
    atom_index: BTreeMap<String, NodeIndex>,
    bond_index: BTreeMap<String, EdgeIndex>,
}

impl Molecule {
    /// Builds a molecule from an atom mapping and a bond mapping.
    ///
    /// All atoms are inserted before any bond. The first rejected insertion
    /// aborts construction and its error is returned.
    pub fn new<AI, AK, AV, BI, BK>(atoms: AI, bonds: BI) -> Result<Self, MoleculeError>
    where
        AI: IntoIterator<Item = (AK, AV)>,
        AK: Into<String>,
        AV: Into<String>,
        BI: IntoIterator<Item = (BK, BondSpec)>,
        BK: Into<String>,
    {
        let mut mol = Self::empty();
        for (id, symbol) in atoms {
            mol.add_atom(id, symbol)?;
        }
        for (id, spec) in bonds {
            mol.add_bond(id, spec)?;
        }
        Ok(mol)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Attaches a reactant name, used to look the molecule up in reaction
    /// conditions.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn graph(&self) -> &StableUnGraph<Atom, Bond> {
        &self.graph
    }

    pub fn add_atom(
        &mut self,
        id: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Result<(), MoleculeError> {
        let id = id.into();
        let symbol = symbol.into();
        if self.atom_index.contains_key(&id) {
            let err = MoleculeError::DuplicateAtom { id, symbol };
            debug!("{err}");
            return Err(err);
        }
        let idx = self.graph.add_node(Atom::new(id.clone(), symbol));
        self.atom_index.insert(id, idx);
        Ok(())
    }

    /// Inserts a bond between two existing atoms.
    ///
    /// The stored [`Bond`] carries `id` alongside the fields of `spec`. Parallel
    /// bonds between the same pair of atoms are kept as separate edges.
    pub fn add_bond(&mut self, id: impl Into<String>, spec: BondSpec) -> Result<(), MoleculeError> {
        let id = id.into();
        if self.bond_index.contains_key(&id) {
            let (first, second) = spec.atoms;
            let err = MoleculeError::DuplicateBond { id, first, second };
            debug!("{err}");
            return Err(err);
        }
        let a = self.node_of(&spec.atoms.0)?;
        let b = self.node_of(&spec.atoms.1)?;
        let idx = self.graph.add_edge(a, b, Bond::from_spec(id.clone(), spec));
        self.bond_index.insert(id, idx);
        Ok(())
    }

    /// Removes an atom together with every bond attached to it, returning
    /// the atom's symbol.
    pub fn remove_atom(&mut self, id: &str) -> Result<String, MoleculeError> {
        let idx = self.node_of(id)?;
        let incident: Vec<String> = self
            .graph
            .edges(idx)
            .map(|e| e.weight().id.clone())
            .collect();
        for bond_id in &incident {
            self.bond_index.remove(bond_id);
        }
        self.atom_index.remove(id);
        let atom = self
            .graph
            .remove_node(idx)
            .ok_or_else(|| MoleculeError::UnknownAtom(id.to_string()))?;
        Ok(atom.symbol)
    }

    pub fn remove_bond(&mut self, id: &str) -> Result<Bond, MoleculeError> {
        let idx = self
            .bond_index
            .remove(id)
            .ok_or_else(|| MoleculeError::UnknownBond(id.to_string()))?;
        self.graph
            .remove_edge(idx)
            .ok_or_else(|| MoleculeError::UnknownBond(id.to_string()))
    }

    pub fn next_free_atom_id(&self) -> String {
        next_id(ATOM_ID_PREFIX, self.atom_index.keys())
    }

    pub fn next_free_bond_id(&self) -> String {
        next_id(BOND_ID_PREFIX, self.bond_index.keys())
    }

    /// Smallest unused `"{kind}{n}"` id for atoms (`'a'`) or bonds (`'b'`).
    pub fn next_free_id(&self, kind: char) -> Result<String, MoleculeError> {
        match kind {
            ATOM_ID_PREFIX => Ok(self.next_free_atom_id()),
            BOND_ID_PREFIX => Ok(self.next_free_bond_id()),
            other => Err(MoleculeError::UnknownIdKind(other)),
        }
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_atom(&self, id: &str) -> bool {
        self.atom_index.contains_key(id)
    }

    pub fn contains_bond(&self, id: &str) -> bool {
        self.bond_index.contains_key(id)
    }

    pub fn symbol(&self, id: &str) -> Option<&str> {
        self.atom_index
            .get(id)
            .map(|&idx| self.graph[idx].symbol.as_str())
    }

    pub fn bond(&self, id: &str) -> Option<&Bond> {
        self.bond_index.get(id).map(|&idx| &self.graph[idx])
    }

    /// `(id, symbol)` pairs in id order.
    pub fn atoms(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.atom_index
            .iter()
            .map(|(id, &idx)| (id.as_str(), self.graph[idx].symbol.as_str()))
    }

    /// Bonds in id order.
    pub fn bonds(&self) -> impl Iterator<Item = &Bond> + '_ {
        self.bond_index.values().map(|&idx| &self.graph[idx])
    }

    /// Ids of the atoms bonded to `id`, once per bond.
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.atom_index
            .get(id)
            .copied()
            .into_iter()
            .flat_map(move |idx| self.graph.neighbors(idx))
            .map(move |n| self.graph[n].id.as_str())
    }

    pub fn atom_map(&self) -> BTreeMap<String, String> {
        self.atoms()
            .map(|(id, symbol)| (id.to_string(), symbol.to_string()))
            .collect()
    }

    pub fn bond_map(&self) -> BTreeMap<String, Bond> {
        self.bonds().map(|b| (b.id.clone(), b.clone())).collect()
    }

    fn node_of(&self, id: &str) -> Result<NodeIndex, MoleculeError> {
        self.atom_index
            .get(id)
            .copied()
            .ok_or_else(|| MoleculeError::UnknownAtom(id.to_string()))
    }
}

fn next_id<'a>(prefix: char, ids: impl Iterator<Item = &'a String>) -> String {
    let used: BTreeSet<usize> = ids
        .filter_map(|id| id.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|rest| rest.parse().ok())
        .collect();
    let mut n = 0;
    while used.contains(&n) {
        n += 1;
    }
    format!("{prefix}{n}")
}

impl std::fmt::Debug for Molecule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Molecule")
            .field("name", &self.name)
            .field("atoms", &self.atom_map())
            .field("bonds", &self.bond_map())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydroxide() -> Molecule {
        Molecule::new([("a1", "H"), ("a2", "O")], [("b1", BondSpec::new("a1", "a2"))]).unwrap()
    }

    #[test]
    fn add_atom() {
        let mut mol = hydroxide();
        mol.add_atom("a3", "H").unwrap();
        assert!(mol.contains_atom("a3"));
        assert_eq!(mol.symbol("a3"), Some("H"));
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.graph().node_count(), 3);
    }

    #[test]
    fn add_existing_atom_is_rejected() {
        let mut mol = hydroxide();
        let err = mol.add_atom("a2", "H").unwrap_err();
        assert!(matches!(err, MoleculeError::DuplicateAtom { ref id, .. } if id == "a2"));
        assert_eq!(mol.symbol("a2"), Some("O"));
        assert_eq!(mol.atom_count(), 2);
    }

    #[test]
    fn add_bond_stores_its_id() {
        let mut mol = hydroxide();
        mol.add_bond("b2", BondSpec::new("a1", "a2")).unwrap();
        let bond = mol.bond("b2").unwrap();
        assert_eq!(bond.id, "b2");
        assert_eq!(bond.atoms, ("a1".to_string(), "a2".to_string()));
        assert_eq!(bond.order, 1);
        assert_eq!(mol.bond_count(), 2);
    }

    #[test]
    fn add_existing_bond_is_rejected() {
        let mut mol = hydroxide();
        let err = mol
            .add_bond("b1", BondSpec::new("a1", "a2").with_order(2))
            .unwrap_err();
        assert!(matches!(err, MoleculeError::DuplicateBond { ref id, .. } if id == "b1"));
        assert_eq!(mol.bond("b1").unwrap().order, 1);
        assert_eq!(mol.bond_count(), 1);
    }

    #[test]
    fn bond_to_missing_atom_is_rejected() {
        let mut mol = hydroxide();
        let err = mol.add_bond("b2", BondSpec::new("a1", "a9")).unwrap_err();
        assert_eq!(err, MoleculeError::UnknownAtom("a9".into()));
        assert!(!mol.contains_bond("b2"));
        assert_eq!(mol.graph().edge_count(), 1);
    }

    #[test]
    fn construction_rejects_duplicate_bond_ids() {
        let result = Molecule::new(
            [("a1", "H"), ("a2", "O")],
            vec![
                ("b1", BondSpec::new("a1", "a2")),
                ("b1", BondSpec::new("a2", "a1")),
            ],
        );
        assert!(matches!(result, Err(MoleculeError::DuplicateBond { .. })));
    }

    #[test]
    fn construction_rejects_duplicate_atom_ids() {
        let result = Molecule::new(vec![("a1", "H"), ("a1", "O")], Vec::<(&str, BondSpec)>::new());
        assert!(matches!(result, Err(MoleculeError::DuplicateAtom { .. })));
    }

    #[test]
    fn remove_atom_drops_incident_bonds() {
        let mut water = Molecule::new(
            [("a1", "H"), ("a2", "H"), ("a3", "O")],
            [("b1", BondSpec::new("a1", "a3")), ("b2", BondSpec::new("a2", "a3"))],
        )
        .unwrap();
        assert_eq!(water.remove_atom("a1").unwrap(), "H");
        assert!(!water.contains_atom("a1"));
        assert!(!water.contains_bond("b1"));
        assert!(water.contains_bond("b2"));
        assert_eq!(water.graph().edge_count(), 1);
        assert_eq!(water.next_free_atom_id(), "a0");
        assert_eq!(
            water.remove_atom("a1"),
            Err(MoleculeError::UnknownAtom("a1".into()))
        );
    }

    #[test]
    fn remove_bond() {
        let mut mol = hydroxide();
        let bond = mol.remove_bond("b1").unwrap();
        assert_eq!(bond.id, "b1");
        assert_eq!(mol.bond_count(), 0);
        assert!(mol.remove_bond("b1").is_err());
    }

    #[test]
    fn next_free_ids_reuse_gaps() {
        let mol = Molecule::new(
            [("a0", "C"), ("a2", "C")],
            [("b0", BondSpec::new("a0", "a2"))],
        )
        .unwrap();
        assert_eq!(mol.next_free_atom_id(), "a1");
        assert_eq!(mol.next_free_bond_id(), "b1");
        assert_eq!(mol.next_free_id('a').unwrap(), "a1");
        assert_eq!(mol.next_free_id('b').unwrap(), "b1");
    }

    #[test]
    fn next_free_id_ignores_foreign_ids() {
        let mol = Molecule::new(
            [("a0", "C"), ("x1", "C"), ("a", "C"), ("a+1", "C")],
            Vec::<(&str, BondSpec)>::new(),
        )
        .unwrap();
        assert_eq!(mol.next_free_atom_id(), "a1");
    }

    #[test]
    fn next_free_id_unknown_kind() {
        let mol = hydroxide();
        assert_eq!(
            mol.next_free_id('c'),
            Err(MoleculeError::UnknownIdKind('c'))
        );
    }

    #[test]
    fn empty_molecule_ids_start_at_zero() {
        let mol = Molecule::empty();
        assert_eq!(mol.next_free_atom_id(), "a0");
        assert_eq!(mol.next_free_bond_id(), "b0");
    }

    #[test]
    fn neighbors_by_id() {
        let mol = hydroxide();
        let n: Vec<_> = mol.neighbors("a2").collect();
        assert_eq!(n, vec!["a1"]);
        assert_eq!(mol.neighbors("a9").count(), 0);
    }

    #[test]
    fn name_round_trip() {
        let mol = hydroxide().with_name("Hydroxide");
        assert_eq!(mol.name(), Some("Hydroxide"));
    }
}
