use crate::model::FilterKind;
use crate::pipeline::FilterDomain;

/// The default maximum number of options returned by [`filter_options`].
pub const OPTION_LIMIT: usize = 100;

/// Returns the selectable values of `kind` that contain `search`, ignoring case, in the domain's
/// sorted order and capped at `limit`. An empty `search` matches everything.
///
/// The cap only bounds what is listed; aggregation always takes one exact value.
pub fn filter_options<'a>(
    domain: &'a FilterDomain,
    kind: FilterKind,
    search: &str,
    limit: usize,
) -> Vec<&'a str> {
    let values = domain.values(kind).iter().map(String::as_str);
    if search.is_empty() {
        return values.take(limit).collect();
    }
    let needle = search.to_lowercase();
    values
        .filter(|v| v.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::derive_filter_domain;
    use crate::test::record;

    fn domain_of(suppliers: &[&str]) -> FilterDomain {
        let records: Vec<_> = suppliers
            .iter()
            .map(|s| record(s, "Beer", "2019", "1", "", "", ""))
            .collect();
        derive_filter_domain(&records)
    }

    #[test]
    fn test_substring_case_insensitive() {
        let domain = domain_of(&["Beta", "Ajax", "Acme"]);
        let options = filter_options(&domain, FilterKind::Supplier, "ac", OPTION_LIMIT);
        assert_eq!(options, ["Acme"]);

        let options = filter_options(&domain, FilterKind::Supplier, "A", OPTION_LIMIT);
        assert_eq!(options, ["Acme", "Ajax", "Beta"]);

        let options = filter_options(&domain, FilterKind::Supplier, "J", OPTION_LIMIT);
        assert_eq!(options, ["Ajax"]);
    }

    #[test]
    fn test_substring_not_prefix() {
        let domain = domain_of(&["Acme", "Ajax", "Beta"]);
        let options = filter_options(&domain, FilterKind::Supplier, "ET", OPTION_LIMIT);
        assert_eq!(options, ["Beta"]);
    }

    #[test]
    fn test_empty_search_returns_head() {
        let domain = domain_of(&["Acme", "Ajax", "Beta"]);
        let options = filter_options(&domain, FilterKind::Supplier, "", 2);
        assert_eq!(options, ["Acme", "Ajax"]);
    }

    #[test]
    fn test_cap_applies_to_matches() {
        let names: Vec<String> = (0..250).map(|i| format!("Supplier {i:03}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let domain = domain_of(&refs);

        let all = filter_options(&domain, FilterKind::Supplier, "", OPTION_LIMIT);
        assert_eq!(all.len(), OPTION_LIMIT);
        assert_eq!(all[0], "Supplier 000");
        assert_eq!(all[99], "Supplier 099");

        let some = filter_options(&domain, FilterKind::Supplier, "supplier 1", OPTION_LIMIT);
        assert_eq!(some.len(), 100);
        assert_eq!(some[0], "Supplier 100");
    }

    #[test]
    fn test_item_kind_uses_items() {
        let domain = domain_of(&["Acme"]);
        assert_eq!(
            filter_options(&domain, FilterKind::Item, "bee", OPTION_LIMIT),
            ["Beer"]
        );
        assert!(filter_options(&domain, FilterKind::Item, "acme", OPTION_LIMIT).is_empty());
    }
}
