use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, NodeIndexable};

use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::Molecule;
use crate::traits::{HasBondOrder, HasSymbol};

/// `(atom id in the first molecule, atom id in the second)` for every atom.
pub type AtomMapping = Vec<(String, String)>;

/// Which bond attributes take part in molecule equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondMatch {
    /// Only adjacency matters; this is what `==` uses.
    #[default]
    Ignore,
    /// Matched bonds must also have the same order.
    Order,
}

pub fn is_isomorphic(first: &Molecule, second: &Molecule) -> bool {
    find_isomorphism(first, second).is_some()
}

pub fn find_isomorphism(first: &Molecule, second: &Molecule) -> Option<AtomMapping> {
    find_isomorphism_with(first, second, symbol_match::<Atom>, |_: &Bond, _: &Bond| true)
}

/// Like [`find_isomorphism_with`], without returning the mapping.
pub fn is_isomorphic_with(
    first: &Molecule,
    second: &Molecule,
    atom_match: impl Fn(&Atom, &Atom) -> bool,
    bond_match: impl Fn(&Bond, &Bond) -> bool,
) -> bool {
    find_isomorphism_with(first, second, atom_match, bond_match).is_some()
}

/// Searches for an atom bijection between the two molecules that preserves
/// bonds, accepting atom and bond pairs only when the matchers agree.
///
/// Parallel bonds are compared as a multiset per atom pair: every bond on
/// the first side must pair with a distinct bond on the second for which
/// `bond_match(first, second)` holds. Any relation works; it need not be an
/// equivalence.
pub fn find_isomorphism_with(
    first: &Molecule,
    second: &Molecule,
    atom_match: impl Fn(&Atom, &Atom) -> bool,
    bond_match: impl Fn(&Bond, &Bond) -> bool,
) -> Option<AtomMapping> {
    if first.atom_count() != second.atom_count() || first.bond_count() != second.bond_count() {
        return None;
    }
    Vf2::new(first.graph(), second.graph(), atom_match, bond_match).find_first()
}

pub fn symbol_match<A: HasSymbol>(a: &A, b: &A) -> bool {
    a.symbol() == b.symbol()
}

pub fn order_match<B: HasBondOrder>(a: &B, b: &B) -> bool {
    a.bond_order() == b.bond_order()
}

impl Molecule {
    /// Isomorphism equality with a configurable bond comparison.
    ///
    /// ```
    /// use chemreact::{BondMatch, BondSpec, Molecule};
    ///
    /// let single =
    ///     Molecule::new([("a1", "C"), ("a2", "O")], [("b1", BondSpec::new("a1", "a2"))]).unwrap();
    /// let double = Molecule::new(
    ///     [("a1", "C"), ("a2", "O")],
    ///     [("b1", BondSpec::new("a1", "a2").with_order(2))],
    /// )
    /// .unwrap();
    /// assert!(single.equals_with(&double, BondMatch::Ignore));
    /// assert!(!single.equals_with(&double, BondMatch::Order));
    /// ```
    pub fn equals_with(&self, other: &Molecule, bonds: BondMatch) -> bool {
        match bonds {
            BondMatch::Ignore => is_isomorphic(self, other),
            BondMatch::Order => {
                is_isomorphic_with(self, other, symbol_match::<Atom>, order_match::<Bond>)
            }
        }
    }
}

impl PartialEq for Molecule {
    fn eq(&self, other: &Self) -> bool {
        is_isomorphic(self, other)
    }
}

impl Eq for Molecule {}

struct Vf2<'a, FA, FB> {
    query: &'a StableUnGraph<Atom, Bond>,
    target: &'a StableUnGraph<Atom, Bond>,
    atom_match: FA,
    bond_match: FB,
    query_order: Vec<NodeIndex>,
    query_map: Vec<Option<NodeIndex>>,
    target_used: Vec<bool>,
}

impl<'a, FA, FB> Vf2<'a, FA, FB>
where
    FA: Fn(&Atom, &Atom) -> bool,
    FB: Fn(&Bond, &Bond) -> bool,
{
    fn new(
        query: &'a StableUnGraph<Atom, Bond>,
        target: &'a StableUnGraph<Atom, Bond>,
        atom_match: FA,
        bond_match: FB,
    ) -> Self {
        let mut query_order: Vec<NodeIndex> = query.node_indices().collect();
        query_order.sort_by(|&a, &b| degree(query, b).cmp(&degree(query, a)));
        Self {
            query,
            target,
            atom_match,
            bond_match,
            query_order,
            query_map: vec![None; query.node_bound()],
            target_used: vec![false; target.node_bound()],
        }
    }

    fn find_first(&mut self) -> Option<AtomMapping> {
        if !self.recurse(0) {
            return None;
        }
        let mapping = self
            .query_order
            .iter()
            .filter_map(|&qn| {
                let tn = self.query_map[qn.index()]?;
                Some((self.query[qn].id.clone(), self.target[tn].id.clone()))
            })
            .collect();
        Some(mapping)
    }

    fn recurse(&mut self, depth: usize) -> bool {
        if depth == self.query_order.len() {
            return true;
        }

        let query_node = self.query_order[depth];
        let candidates: Vec<NodeIndex> = self.target.node_indices().collect();

        for target_node in candidates {
            if self.target_used[target_node.index()] {
                continue;
            }
            if !self.is_feasible(query_node, target_node) {
                continue;
            }

            self.query_map[query_node.index()] = Some(target_node);
            self.target_used[target_node.index()] = true;

            if self.recurse(depth + 1) {
                return true;
            }

            self.query_map[query_node.index()] = None;
            self.target_used[target_node.index()] = false;
        }

        false
    }

    fn is_feasible(&self, query_node: NodeIndex, target_node: NodeIndex) -> bool {
        if !(self.atom_match)(&self.query[query_node], &self.target[target_node]) {
            return false;
        }
        if degree(self.query, query_node) != degree(self.target, target_node) {
            return false;
        }

        let mut seen: Vec<NodeIndex> = Vec::new();
        for q_neighbor in self.query.neighbors(query_node) {
            if seen.contains(&q_neighbor) {
                continue;
            }
            seen.push(q_neighbor);

            let t_mapped = if q_neighbor == query_node {
                target_node
            } else {
                match self.query_map[q_neighbor.index()] {
                    Some(t) => t,
                    None => continue,
                }
            };
            let q_bonds = bonds_between(self.query, query_node, q_neighbor);
            let t_bonds = bonds_between(self.target, target_node, t_mapped);
            if !self.bonds_pair_up(&q_bonds, &t_bonds) {
                return false;
            }
        }

        true
    }

    // Bipartite matching over augmenting paths, so the matcher need not be
    // symmetric or transitive.
    fn bonds_pair_up(&self, query: &[&Bond], target: &[&Bond]) -> bool {
        if query.len() != target.len() {
            return false;
        }
        let mut owner: Vec<Option<usize>> = vec![None; target.len()];
        (0..query.len()).all(|q| {
            let mut visited = vec![false; target.len()];
            self.augment(q, query, target, &mut owner, &mut visited)
        })
    }

    fn augment(
        &self,
        q: usize,
        query: &[&Bond],
        target: &[&Bond],
        owner: &mut [Option<usize>],
        visited: &mut [bool],
    ) -> bool {
        for t in 0..target.len() {
            if visited[t] || !(self.bond_match)(query[q], target[t]) {
                continue;
            }
            visited[t] = true;
            let free = match owner[t] {
                None => true,
                Some(previous) => self.augment(previous, query, target, owner, visited),
            };
            if free {
                owner[t] = Some(q);
                return true;
            }
        }
        false
    }
}

fn degree(graph: &StableUnGraph<Atom, Bond>, node: NodeIndex) -> usize {
    graph.edges(node).count()
}

fn bonds_between<'g>(
    graph: &'g StableUnGraph<Atom, Bond>,
    a: NodeIndex,
    b: NodeIndex,
) -> Vec<&'g Bond> {
    graph
        .edges(a)
        .filter(|e| {
            let other = if e.source() == a { e.target() } else { e.source() };
            other == b
        })
        .map(|e| e.weight())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondSpec;

    fn mol(atoms: &[(&str, &str)], bonds: &[(&str, &str, &str)]) -> Molecule {
        Molecule::new(
            atoms.iter().copied(),
            bonds.iter().map(|&(id, a, b)| (id, BondSpec::new(a, b))),
        )
        .unwrap()
    }

    #[test]
    fn simple_equality() {
        let a = mol(&[("a1", "H"), ("a2", "O")], &[("b1", "a1", "a2")]);
        let b = mol(&[("a1", "H"), ("a2", "O")], &[("b1", "a1", "a2")]);
        assert_eq!(a, b);
    }

    #[test]
    fn relabeled_molecules_are_equal() {
        let a = mol(&[("a1", "H"), ("a2", "O")], &[("b1", "a1", "a2")]);
        let b = mol(&[("a2", "H"), ("a1", "O")], &[("b2", "a1", "a2")]);
        assert_eq!(a, b);
        let mapping = find_isomorphism(&a, &b).unwrap();
        assert!(mapping.contains(&("a1".to_string(), "a2".to_string())));
        assert!(mapping.contains(&("a2".to_string(), "a1".to_string())));
    }

    #[test]
    fn different_symbols_are_not_equal() {
        let a = mol(&[("a1", "H"), ("a2", "O")], &[("b1", "a1", "a2")]);
        let b = mol(&[("a1", "N"), ("a2", "O")], &[("b1", "a1", "a2")]);
        assert_ne!(a, b);
    }

    #[test]
    fn same_atoms_different_topology() {
        // H-O-H vs H-H-O
        let water = mol(
            &[("a1", "H"), ("a2", "O"), ("a3", "H")],
            &[("b1", "a1", "a2"), ("b2", "a2", "a3")],
        );
        let chain = mol(
            &[("a1", "H"), ("a2", "H"), ("a3", "O")],
            &[("b1", "a1", "a2"), ("b2", "a2", "a3")],
        );
        assert_ne!(water, chain);
    }

    #[test]
    fn bond_count_mismatch() {
        let bonded = mol(&[("a1", "H"), ("a2", "H")], &[("b1", "a1", "a2")]);
        let apart = mol(&[("a1", "H"), ("a2", "H")], &[]);
        assert_ne!(bonded, apart);
    }

    #[test]
    fn empty_molecules_are_equal() {
        assert_eq!(Molecule::empty(), Molecule::empty());
    }

    #[test]
    fn bond_order_only_counts_when_asked() {
        let single = mol(&[("a1", "C"), ("a2", "C")], &[("b1", "a1", "a2")]);
        let double = Molecule::new(
            [("a1", "C"), ("a2", "C")],
            [("b1", BondSpec::new("a1", "a2").with_order(2))],
        )
        .unwrap();
        assert_eq!(single, double);
        assert!(single.equals_with(&double, BondMatch::Ignore));
        assert!(!single.equals_with(&double, BondMatch::Order));
        assert!(double.equals_with(&double.clone(), BondMatch::Order));
    }

    #[test]
    fn parallel_bonds_compare_by_multiplicity() {
        let one = mol(
            &[("a1", "C"), ("a2", "C"), ("a3", "C")],
            &[("b1", "a1", "a2"), ("b2", "a2", "a3")],
        );
        let doubled = mol(
            &[("a1", "C"), ("a2", "C"), ("a3", "C")],
            &[("b1", "a1", "a2"), ("b2", "a1", "a2")],
        );
        assert_ne!(one, doubled);
        let doubled_again = mol(
            &[("a7", "C"), ("a8", "C"), ("a9", "C")],
            &[("b4", "a9", "a8"), ("b5", "a8", "a9")],
        );
        assert_eq!(doubled, doubled_again);
    }

    #[test]
    fn cycle_is_not_a_chain() {
        let ring = mol(
            &[("a1", "C"), ("a2", "C"), ("a3", "C"), ("a4", "C")],
            &[("b1", "a1", "a2"), ("b2", "a2", "a3"), ("b3", "a3", "a4"), ("b4", "a4", "a1")],
        );
        let star = mol(
            &[("a1", "C"), ("a2", "C"), ("a3", "C"), ("a4", "C")],
            &[("b1", "a1", "a2"), ("b2", "a1", "a3"), ("b3", "a1", "a4"), ("b4", "a2", "a3")],
        );
        assert_ne!(ring, star);
    }

    #[test]
    fn survives_removal_gaps() {
        let mut a = mol(
            &[("a1", "H"), ("a2", "H"), ("a3", "O")],
            &[("b1", "a1", "a3"), ("b2", "a2", "a3")],
        );
        a.remove_atom("a1").unwrap();
        let b = mol(&[("a5", "O"), ("a6", "H")], &[("b9", "a6", "a5")]);
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_bonds_pair_under_an_ordering_matcher() {
        let orders = |first: u8, second: u8| {
            Molecule::new(
                [("a1", "C"), ("a2", "C")],
                [
                    ("b1", BondSpec::new("a1", "a2").with_order(first)),
                    ("b2", BondSpec::new("a1", "a2").with_order(second)),
                ],
            )
            .unwrap()
        };
        let at_most = |q: &Bond, t: &Bond| q.order <= t.order;
        let pairs =
            |q: &Molecule, t: &Molecule| is_isomorphic_with(q, t, symbol_match::<Atom>, at_most);

        assert!(pairs(&orders(1, 2), &orders(2, 1)));
        assert!(pairs(&orders(2, 1), &orders(1, 2)));
        assert!(!pairs(&orders(2, 2), &orders(1, 2)));
    }

    #[test]
    fn custom_atom_matcher() {
        let a = mol(&[("a1", "H"), ("a2", "O")], &[("b1", "a1", "a2")]);
        let b = mol(&[("a1", "N"), ("a2", "O")], &[("b1", "a1", "a2")]);
        assert!(is_isomorphic_with(&a, &b, |_, _| true, |_, _| true));
    }
}
