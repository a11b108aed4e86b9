use serde::{Deserialize, Serialize};

/// Which categorical field of a sales record a selection or an option search applies to.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Filter on the `SUPPLIER` column.
    #[default]
    Supplier,
    /// Filter on the `ITEM DESCRIPTION` column.
    Item,
}

serde_plain::derive_display_from_serialize!(FilterKind);
serde_plain::derive_fromstr_from_deserialize!(FilterKind);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_kind_string_forms() {
        assert_eq!(FilterKind::Supplier.to_string(), "supplier");
        assert_eq!(FilterKind::Item.to_string(), "item");
        assert_eq!("item".parse::<FilterKind>().unwrap(), FilterKind::Item);
        assert!("vendor".parse::<FilterKind>().is_err());
    }
}
