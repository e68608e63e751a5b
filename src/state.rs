use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{self, BreakdownSlice};
use crate::data::model::LaunchDataset;
use crate::data::select::{PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is immutable after load; the two control values are the only
/// mutable inputs, and each change runs through exactly one of the trigger
/// methods below, which keep the cached aggregation rows current.
pub struct AppState {
    /// The loaded dataset, shared read-only.
    pub dataset: Arc<LaunchDataset>,

    /// Current site selection.
    pub site: SiteSelection,

    /// Current payload-mass range.
    pub payload_range: PayloadRange,

    /// Proportion-chart rows for the current site selection (cached).
    pub breakdown: Vec<BreakdownSlice>,

    /// Indices of records feeding the scatter chart (cached).
    pub correlation: Vec<usize>,

    /// Colours for the all-sites breakdown slices.
    pub site_colors: ColorMap,

    /// Colours for the single-site Success/Failure slices.
    pub outcome_colors: ColorMap,

    /// Colours for the scatter's booster version categories.
    pub booster_colors: ColorMap,

    /// Whether the records table panel is shown.
    pub show_records: bool,
}

impl AppState {
    /// Seed the controls and caches from a freshly loaded dataset:
    /// site selector at "All Sites", payload range at the global bounds.
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let site = SiteSelection::AllSites;
        let payload_range = PayloadRange::new(dataset.payload_min, dataset.payload_max);

        let breakdown = aggregate::outcome_breakdown(&dataset, &site);
        let correlation = aggregate::payload_correlation(&dataset, &site, Some(payload_range));

        let site_colors = ColorMap::new(&dataset.sites);
        let booster_colors = ColorMap::new(&dataset.booster_categories);

        Self {
            dataset,
            site,
            payload_range,
            breakdown,
            correlation,
            site_colors,
            outcome_colors: ColorMap::outcomes(),
            booster_colors,
            show_records: false,
        }
    }

    /// The dataset's global payload bounds, the range control's extent.
    pub fn global_range(&self) -> PayloadRange {
        PayloadRange::new(self.dataset.payload_min, self.dataset.payload_max)
    }

    /// Colours for the current breakdown rows: per-site colours when all
    /// sites are shown, fixed Success/Failure colours otherwise.
    pub fn breakdown_colors(&self) -> &ColorMap {
        match self.site {
            SiteSelection::AllSites => &self.site_colors,
            SiteSelection::Site(_) => &self.outcome_colors,
        }
    }

    /// Trigger: site-selection-changed. Recomputes both caches.
    pub fn select_site(&mut self, selection: SiteSelection) {
        if selection == self.site {
            return;
        }
        log::debug!("site selection changed to {selection}");
        self.site = selection;
        self.breakdown = aggregate::outcome_breakdown(&self.dataset, &self.site);
        self.refresh_correlation();
    }

    /// Trigger: payload-range-changed. Recomputes the correlation cache
    /// only; the breakdown is independent of the payload range.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        log::debug!("payload range changed to [{}, {}]", range.low, range.high);
        self.payload_range = range;
        self.refresh_correlation();
    }

    fn refresh_correlation(&mut self) {
        self.correlation =
            aggregate::payload_correlation(&self.dataset, &self.site, Some(self.payload_range));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn record(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass: payload,
            outcome,
            booster_category: booster.to_string(),
            details: Default::default(),
        }
    }

    fn state() -> AppState {
        AppState::new(Arc::new(LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success, "v1.0"),
            record("A", 1500.0, Outcome::Failure, "v1.1"),
            record("B", 2500.0, Outcome::Success, "FT"),
        ])))
    }

    #[test]
    fn seeding_defaults_to_all_sites_and_the_full_range() {
        let state = state();
        assert_eq!(state.site, SiteSelection::AllSites);
        assert_eq!(state.payload_range, PayloadRange::new(500.0, 2500.0));
        assert_eq!(state.breakdown.len(), 2);
        assert_eq!(state.correlation, vec![0, 1, 2]);
    }

    #[test]
    fn site_trigger_refreshes_both_caches() {
        let mut state = state();
        state.select_site(SiteSelection::Site("A".to_string()));

        assert_eq!(state.breakdown.len(), 2);
        assert_eq!(state.breakdown[0].label, "Success");
        assert_eq!(state.breakdown[1].label, "Failure");
        assert_eq!(state.correlation, vec![0, 1]);
    }

    #[test]
    fn range_trigger_leaves_the_breakdown_alone() {
        let mut state = state();
        let before = state.breakdown.clone();

        state.set_payload_range(PayloadRange::new(1000.0, 3000.0));
        assert_eq!(state.breakdown, before);
        assert_eq!(state.correlation, vec![1, 2]);
    }

    #[test]
    fn equal_values_do_not_disturb_the_caches() {
        let mut state = state();
        let breakdown = state.breakdown.clone();
        let correlation = state.correlation.clone();

        state.select_site(SiteSelection::AllSites);
        state.set_payload_range(state.payload_range);

        assert_eq!(state.breakdown, breakdown);
        assert_eq!(state.correlation, correlation);
    }

    #[test]
    fn breakdown_colors_switch_with_the_selection() {
        let mut state = state();
        let all_color = state.breakdown_colors().color_for("A");

        state.select_site(SiteSelection::Site("A".to_string()));
        let success = state.breakdown_colors().color_for("Success");
        let failure = state.breakdown_colors().color_for("Failure");

        assert_ne!(success, failure);
        assert_ne!(success, all_color);
    }
}
