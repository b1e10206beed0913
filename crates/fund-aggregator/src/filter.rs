//! Project record filters.
//!
//! Invoices belong to a project when their order id is the project slug,
//! or the slug with the static-invoice suffix. Charges belong to a project
//! when their `project_slug` metadata is exactly the slug. All comparisons
//! are exact: no case folding, no prefix or substring matching. Records
//! without the identifier never match.

use fund_ingestion::{Charge, Invoice};

/// Suffix carried by the order id of long-lived, reusable invoices.
pub const STATIC_SUFFIX: &str = "_STATIC";

/// Check whether an invoice order id belongs to `project_slug`.
pub fn is_project_order_id(order_id: &str, project_slug: &str) -> bool {
    order_id == project_slug
        || order_id
            .strip_suffix(STATIC_SUFFIX)
            .map_or(false, |base| base == project_slug)
}

/// Select the invoices that belong to `project_slug`, preserving order.
pub fn filter_invoices_by_project<'a>(invoices: &'a [Invoice], project_slug: &str) -> Vec<&'a Invoice> {
    invoices
        .iter()
        .filter(|invoice| {
            invoice
                .order_id()
                .map_or(false, |order_id| is_project_order_id(order_id, project_slug))
        })
        .collect()
}

/// Select the charges tagged with `project_slug`, preserving order.
pub fn filter_charges_by_project<'a>(charges: &'a [Charge], project_slug: &str) -> Vec<&'a Charge> {
    charges
        .iter()
        .filter(|charge| charge.project_slug() == Some(project_slug))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fund_ingestion::mock::{charge, invoice};

    #[test]
    fn test_order_id_matching() {
        assert!(is_project_order_id("proj1", "proj1"));
        assert!(is_project_order_id("proj1_STATIC", "proj1"));

        assert!(!is_project_order_id("proj2", "proj1"));
        assert!(!is_project_order_id("PROJ1", "proj1"));
        assert!(!is_project_order_id("proj1_static", "proj1"));
        assert!(!is_project_order_id("proj1_STATIC_STATIC", "proj1"));
        assert!(!is_project_order_id("proj10", "proj1"));
        assert!(!is_project_order_id("xproj1", "proj1"));
        assert!(!is_project_order_id("_STATIC", "proj1"));
    }

    #[test]
    fn test_slug_that_itself_ends_in_static() {
        assert!(is_project_order_id("foo_STATIC", "foo_STATIC"));
        assert!(is_project_order_id("foo_STATIC_STATIC", "foo_STATIC"));
        assert!(!is_project_order_id("foo", "foo_STATIC"));
    }

    #[test]
    fn test_filter_invoices() {
        let invoices = vec![
            invoice("A", Some("proj1")),
            invoice("B", Some("proj1_STATIC")),
            invoice("C", Some("proj2")),
            invoice("D", None),
        ];

        let ids: Vec<&str> = filter_invoices_by_project(&invoices, "proj1")
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();

        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_filter_charges_has_no_static_variant() {
        let charges = vec![
            charge("ch_1", 2500, Some("proj1")),
            charge("ch_2", 1000, Some("proj1_STATIC")),
            charge("ch_3", 1000, Some("Proj1")),
            charge("ch_4", 1000, None),
        ];

        let matched = filter_charges_by_project(&charges, "proj1");

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "ch_1");
    }
}
