use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_order() -> u8 {
    1
}

/// Insertion input for a bond: which atoms it joins, its order and any
/// extra attributes.
///
/// # Examples
///
/// ```
/// use chemreact::BondSpec;
///
/// let double = BondSpec::new("a1", "a2").with_order(2);
/// assert_eq!(double.order, 2);
/// assert_eq!(BondSpec::new("a1", "a2").order, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSpec {
    pub atoms: (String, String),
    #[serde(default = "default_order")]
    pub order: u8,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl BondSpec {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            atoms: (first.into(), second.into()),
            order: default_order(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_order(mut self, order: u8) -> Self {
        self.order = order;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Stored bond record. Unlike [`BondSpec`] it always carries its own id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub id: String,
    pub atoms: (String, String),
    #[serde(default = "default_order")]
    pub order: u8,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl Bond {
    pub(crate) fn from_spec(id: String, spec: BondSpec) -> Self {
        Self {
            id,
            atoms: spec.atoms,
            order: spec.order,
            extra: spec.extra,
        }
    }

    /// The insertion input that would recreate this bond under its id.
    pub fn to_spec(&self) -> BondSpec {
        BondSpec {
            atoms: self.atoms.clone(),
            order: self.order,
            extra: self.extra.clone(),
        }
    }
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> u8 {
        self.order
    }
}
