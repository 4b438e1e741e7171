use serde::{Deserialize, Serialize};

/// Node weight of a molecule graph.
///
/// An atom only exists inside the [`Molecule`](crate::Molecule) that owns it;
/// `id` is unique within that molecule and `symbol` is the element symbol
/// (`"H"`, `"O"`, …) that isomorphism compares.
///
/// # Examples
///
/// ```
/// use chemreact::Atom;
///
/// let oxygen = Atom::new("a3", "O");
/// assert_eq!(oxygen.symbol, "O");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub id: String,
    pub symbol: String,
}

impl Atom {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
        }
    }
}

impl crate::traits::HasSymbol for Atom {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}
