//! Route-id ordering for the route selector.
//!
//! The selector shows route ids sorted numerically where possible: `"2"`
//! before `"10"`, and any non-numeric id after every numeric one. Two
//! non-numeric ids keep their relative fetch order, so the comparator reports
//! them as equal and relies on a stable sort. The ordering is a visible UI
//! contract and must not be changed to a plain lexical sort.

use std::cmp::Ordering;

/// Compare two route ids for selector ordering.
///
/// - Both parse as integers: numeric order.
/// - Only one parses: the numeric id sorts first.
/// - Neither parses: `Ordering::Equal`, preserving fetch order under a
///   stable sort.
pub fn compare_route_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(na), Ok(nb)) => na.cmp(&nb),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

/// Sort route ids in place with [`compare_route_ids`].
///
/// Uses the standard library's stable sort so that non-numeric ids keep
/// their fetch order.
pub fn sort_route_ids(ids: &mut [String]) {
    ids.sort_by(|a, b| compare_route_ids(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(ids: &[&str]) -> Vec<String> {
        let mut ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        sort_route_ids(&mut ids);
        ids
    }

    #[test]
    fn test_numeric_ids_sort_numerically() {
        assert_eq!(sorted(&["10", "2", "9", "rail"]), ["2", "9", "10", "rail"]);
    }

    #[test]
    fn test_non_numeric_after_numeric() {
        assert_eq!(sorted(&["tram", "1"]), ["1", "tram"]);
        assert_eq!(compare_route_ids("7", "metro"), Ordering::Less);
        assert_eq!(compare_route_ids("metro", "7"), Ordering::Greater);
    }

    #[test]
    fn test_non_numeric_pairs_keep_fetch_order() {
        // No lexical reordering: "zulu" stays ahead of "alpha".
        assert_eq!(
            sorted(&["zulu", "alpha", "5", "mike"]),
            ["5", "zulu", "alpha", "mike"]
        );
        assert_eq!(compare_route_ids("zulu", "alpha"), Ordering::Equal);
    }

    #[test]
    fn test_negative_and_large_numerics() {
        assert_eq!(sorted(&["3", "-2", "100"]), ["-2", "3", "100"]);
    }
}
