pub trait HasSymbol {
    fn symbol(&self) -> &str;
}

pub trait HasBondOrder {
    fn bond_order(&self) -> u8;
}
