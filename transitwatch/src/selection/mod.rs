//! Selection hierarchy: country → dataset → routes.
//!
//! Exactly one country and one dataset can be selected at a time; routes are
//! multi-select. Each level's option list depends on its parent, so choosing
//! a new parent cascade-clears every descendant, both in memory and in the
//! persisted mirror. The hierarchy is the sole writer of the selection; the
//! selector UI is a view over it and is never read back from.
//!
//! Restoration at startup walks the same order (country, then dataset, then
//! routes) through the non-cascading `restore_*` setters, after the caller
//! has validated each persisted id against the freshly fetched option list.
//! Stale ids are dropped silently.

use std::collections::BTreeSet;

use crate::store::{SelectionStore, KEY_COUNTRY, KEY_DATASET, KEY_ROUTES};

/// The current selection. Invariants, upheld by [`SelectionHierarchy`]:
/// `dataset_id` is `Some` only when `country` is, and `route_ids` is
/// non-empty only when `dataset_id` is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected country, if any.
    pub country: Option<String>,
    /// Selected dataset (city feed), if any.
    pub dataset_id: Option<String>,
    /// Selected routes within the dataset. Empty means "all routes".
    pub route_ids: BTreeSet<String>,
}

/// What a mutator changed, so the caller knows which option lists to refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Country changed; dataset list must be refetched.
    Country,
    /// Dataset changed; route info must be refetched.
    Dataset,
    /// Route set changed; a refresh is due.
    Routes,
    /// Nothing changed (missing precondition, or a no-op toggle).
    None,
}

/// Owner of the [`Selection`] and its persisted mirror.
#[derive(Debug)]
pub struct SelectionHierarchy<P: SelectionStore> {
    selection: Selection,
    store: P,
}

impl<P: SelectionStore> SelectionHierarchy<P> {
    /// Create a hierarchy over the given store. Nothing is selected yet;
    /// call the `persisted_*` accessors and `restore_*` setters to bring
    /// back the previous session.
    pub fn new(store: P) -> Self {
        Self {
            selection: Selection::default(),
            store,
        }
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Select a country, cascade-clearing dataset and routes.
    pub fn select_country(&mut self, country: &str) -> SelectionChange {
        self.selection.country = Some(country.to_string());
        self.selection.dataset_id = None;
        self.selection.route_ids.clear();

        self.store.set(KEY_COUNTRY, country);
        self.store.remove(KEY_DATASET);
        self.store.remove(KEY_ROUTES);

        SelectionChange::Country
    }

    /// Select a dataset, cascade-clearing routes.
    ///
    /// A no-op when no country is selected: the selector UI guards this, so
    /// it is not an error.
    pub fn select_dataset(&mut self, dataset_id: &str) -> SelectionChange {
        if self.selection.country.is_none() {
            return SelectionChange::None;
        }
        self.selection.dataset_id = Some(dataset_id.to_string());
        self.selection.route_ids.clear();

        self.store.set(KEY_DATASET, dataset_id);
        self.store.remove(KEY_ROUTES);

        SelectionChange::Dataset
    }

    /// Add or remove a route from the selection.
    ///
    /// A no-op without a selected dataset, and when the toggle would not
    /// change the set.
    pub fn toggle_route(&mut self, route_id: &str, selected: bool) -> SelectionChange {
        if self.selection.dataset_id.is_none() {
            return SelectionChange::None;
        }
        let changed = if selected {
            self.selection.route_ids.insert(route_id.to_string())
        } else {
            self.selection.route_ids.remove(route_id)
        };
        if !changed {
            return SelectionChange::None;
        }
        self.persist_routes();
        SelectionChange::Routes
    }

    /// Persisted country from the previous session, if any.
    pub fn persisted_country(&self) -> Option<String> {
        self.store.get(KEY_COUNTRY).filter(|v| !v.is_empty())
    }

    /// Persisted dataset from the previous session, if any.
    pub fn persisted_dataset(&self) -> Option<String> {
        self.store.get(KEY_DATASET).filter(|v| !v.is_empty())
    }

    /// Persisted route set from the previous session, comma-split.
    pub fn persisted_routes(&self) -> Vec<String> {
        match self.store.get(KEY_ROUTES) {
            Some(joined) => joined
                .split(',')
                .filter(|part| !part.is_empty())
                .map(|part| part.to_string())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Re-apply a validated country without cascade-clearing the persisted
    /// descendants (they are restored next, in order).
    pub fn restore_country(&mut self, country: String) {
        self.selection.country = Some(country);
    }

    /// Re-apply a validated dataset without clearing persisted routes.
    ///
    /// Ignored when no country was restored first, preserving the
    /// dataset-implies-country invariant.
    pub fn restore_dataset(&mut self, dataset_id: String) {
        if self.selection.country.is_none() {
            return;
        }
        self.selection.dataset_id = Some(dataset_id);
    }

    /// Re-apply the surviving route set after the caller filtered out ids
    /// that no longer exist, and persist the filtered result.
    ///
    /// Ignored when no dataset was restored first.
    pub fn restore_routes(&mut self, route_ids: BTreeSet<String>) {
        if self.selection.dataset_id.is_none() {
            return;
        }
        self.selection.route_ids = route_ids;
        self.persist_routes();
    }

    /// Drop a persisted country that no longer exists, descendants included.
    pub fn drop_persisted_country(&mut self) {
        self.store.remove(KEY_COUNTRY);
        self.store.remove(KEY_DATASET);
        self.store.remove(KEY_ROUTES);
    }

    /// Drop a persisted dataset that no longer exists, routes included.
    pub fn drop_persisted_dataset(&mut self) {
        self.store.remove(KEY_DATASET);
        self.store.remove(KEY_ROUTES);
    }

    fn persist_routes(&mut self) {
        if self.selection.route_ids.is_empty() {
            self.store.remove(KEY_ROUTES);
        } else {
            let joined: Vec<&str> = self
                .selection
                .route_ids
                .iter()
                .map(|id| id.as_str())
                .collect();
            self.store.set(KEY_ROUTES, &joined.join(","));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySelectionStore;

    fn hierarchy() -> SelectionHierarchy<MemorySelectionStore> {
        SelectionHierarchy::new(MemorySelectionStore::new())
    }

    fn assert_invariants(selection: &Selection) {
        if selection.dataset_id.is_some() {
            assert!(selection.country.is_some(), "dataset without country");
        }
        if !selection.route_ids.is_empty() {
            assert!(selection.dataset_id.is_some(), "routes without dataset");
        }
    }

    #[test]
    fn test_dataset_requires_country() {
        let mut h = hierarchy();
        assert_eq!(h.select_dataset("roma"), SelectionChange::None);
        assert!(h.selection().dataset_id.is_none());
    }

    #[test]
    fn test_route_requires_dataset() {
        let mut h = hierarchy();
        h.select_country("Italy");
        assert_eq!(h.toggle_route("64", true), SelectionChange::None);
        assert!(h.selection().route_ids.is_empty());
    }

    #[test]
    fn test_country_cascade_clears_descendants() {
        let mut h = hierarchy();
        h.select_country("Italy");
        h.select_dataset("roma");
        h.toggle_route("64", true);

        assert_eq!(h.select_country("France"), SelectionChange::Country);
        assert!(h.selection().dataset_id.is_none());
        assert!(h.selection().route_ids.is_empty());
        // Persisted mirror cleared too.
        assert!(h.persisted_dataset().is_none());
        assert!(h.persisted_routes().is_empty());
        assert_eq!(h.persisted_country().as_deref(), Some("France"));
    }

    #[test]
    fn test_dataset_cascade_clears_routes() {
        let mut h = hierarchy();
        h.select_country("Italy");
        h.select_dataset("roma");
        h.toggle_route("64", true);

        assert_eq!(h.select_dataset("milano"), SelectionChange::Dataset);
        assert!(h.selection().route_ids.is_empty());
        assert!(h.persisted_routes().is_empty());
    }

    #[test]
    fn test_invariants_hold_after_every_call() {
        let mut h = hierarchy();
        assert_invariants(h.selection());
        h.toggle_route("1", true);
        assert_invariants(h.selection());
        h.select_dataset("roma");
        assert_invariants(h.selection());
        h.select_country("Italy");
        assert_invariants(h.selection());
        h.select_dataset("roma");
        assert_invariants(h.selection());
        h.toggle_route("1", true);
        assert_invariants(h.selection());
        h.toggle_route("1", false);
        assert_invariants(h.selection());
        h.select_country("France");
        assert_invariants(h.selection());
    }

    #[test]
    fn test_routes_persist_comma_joined() {
        let mut h = hierarchy();
        h.select_country("Italy");
        h.select_dataset("roma");
        h.toggle_route("9", true);
        h.toggle_route("2", true);

        assert_eq!(h.persisted_routes().len(), 2);
        assert!(h.persisted_routes().contains(&"9".to_string()));

        h.toggle_route("9", false);
        assert_eq!(h.persisted_routes(), vec!["2".to_string()]);
    }

    #[test]
    fn test_redundant_toggle_is_noop() {
        let mut h = hierarchy();
        h.select_country("Italy");
        h.select_dataset("roma");
        h.toggle_route("2", true);
        assert_eq!(h.toggle_route("2", true), SelectionChange::None);
        assert_eq!(h.toggle_route("99", false), SelectionChange::None);
    }

    #[test]
    fn test_restore_does_not_cascade() {
        let mut store = MemorySelectionStore::new();
        store.set(KEY_COUNTRY, "Italy");
        store.set(KEY_DATASET, "roma");
        store.set(KEY_ROUTES, "2,9");

        let mut h = SelectionHierarchy::new(store);
        let country = h.persisted_country().unwrap();
        h.restore_country(country);
        // Persisted descendants must survive the country restore.
        assert_eq!(h.persisted_dataset().as_deref(), Some("roma"));

        let dataset = h.persisted_dataset().unwrap();
        h.restore_dataset(dataset);
        assert_eq!(h.persisted_routes(), vec!["2".to_string(), "9".to_string()]);

        let routes: BTreeSet<String> = h.persisted_routes().into_iter().collect();
        h.restore_routes(routes);
        assert_eq!(h.selection().route_ids.len(), 2);
        assert_invariants(h.selection());
    }

    #[test]
    fn test_restore_out_of_order_is_ignored() {
        let mut h = hierarchy();
        h.restore_dataset("roma".to_string());
        assert!(h.selection().dataset_id.is_none());
        h.restore_routes(["2".to_string()].into_iter().collect());
        assert!(h.selection().route_ids.is_empty());
    }

    #[test]
    fn test_drop_persisted_dataset_clears_routes() {
        let mut store = MemorySelectionStore::new();
        store.set(KEY_COUNTRY, "Italy");
        store.set(KEY_DATASET, "gone");
        store.set(KEY_ROUTES, "2,9");

        let mut h = SelectionHierarchy::new(store);
        h.drop_persisted_dataset();
        assert!(h.persisted_dataset().is_none());
        assert!(h.persisted_routes().is_empty());
        assert_eq!(h.persisted_country().as_deref(), Some("Italy"));
    }
}
