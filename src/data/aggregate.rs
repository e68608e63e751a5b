use std::collections::BTreeMap;

use super::model::{LaunchDataset, Outcome};
use super::select::{PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Breakdown: success counts for the proportion chart
// ---------------------------------------------------------------------------

/// One row of the proportion chart input: a category label and its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownSlice {
    pub label: String,
    pub count: u64,
}

/// Compute the proportion-chart rows for the current site selection.
///
/// * `AllSites`: one row per launch site with that site's success count,
///   sorted by site. Every site present in the dataset appears, including
///   sites without a single success.
/// * `Site(s)`: exactly two rows, `(Success, n)` and `(Failure, m)`, where
///   `n + m` equals the number of records at that site.
pub fn outcome_breakdown(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
) -> Vec<BreakdownSlice> {
    match selection {
        SiteSelection::AllSites => {
            let mut successes_by_site: BTreeMap<&str, u64> = BTreeMap::new();
            for rec in &dataset.records {
                let successes = successes_by_site.entry(rec.site.as_str()).or_insert(0);
                if rec.outcome.is_success() {
                    *successes += 1;
                }
            }
            successes_by_site
                .into_iter()
                .map(|(site, count)| BreakdownSlice {
                    label: site.to_string(),
                    count,
                })
                .collect()
        }
        SiteSelection::Site(site) => {
            let mut successes = 0;
            let mut failures = 0;
            for rec in dataset.records.iter().filter(|r| &r.site == site) {
                match rec.outcome {
                    Outcome::Success => successes += 1,
                    Outcome::Failure => failures += 1,
                }
            }
            vec![
                BreakdownSlice {
                    label: Outcome::Success.label().to_string(),
                    count: successes,
                },
                BreakdownSlice {
                    label: Outcome::Failure.label().to_string(),
                    count: failures,
                },
            ]
        }
    }
}

// ---------------------------------------------------------------------------
// Correlation: filtered record indices for the scatter chart
// ---------------------------------------------------------------------------

/// Return indices of the records feeding the payload/outcome scatter:
/// payload mass within `range` (both bounds inclusive), further narrowed to
/// the selected site unless the selection is `AllSites`.
///
/// An absent or invalid range falls back to the dataset's global payload
/// bounds, so the caller never has to special-case a missing selection. An
/// empty result is a valid outcome and renders as an empty chart.
pub fn payload_correlation(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: Option<PayloadRange>,
) -> Vec<usize> {
    let range = range
        .filter(PayloadRange::is_valid)
        .unwrap_or_else(|| PayloadRange::new(dataset.payload_min, dataset.payload_max));

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass) && selection.matches(&rec.site))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;
    use std::collections::BTreeMap;

    fn record(site: &str, payload: f64, outcome: Outcome) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass: payload,
            outcome,
            booster_category: "FT".to_string(),
            details: BTreeMap::new(),
        }
    }

    /// The three-record table used across the scenario tests.
    fn scenario_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success),
            record("A", 1500.0, Outcome::Failure),
            record("B", 2500.0, Outcome::Success),
        ])
    }

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    fn slice(label: &str, count: u64) -> BreakdownSlice {
        BreakdownSlice {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn all_sites_breakdown_counts_successes_per_site() {
        let ds = scenario_dataset();
        let rows = outcome_breakdown(&ds, &SiteSelection::AllSites);
        assert_eq!(rows, vec![slice("A", 1), slice("B", 1)]);
    }

    #[test]
    fn single_site_breakdown_splits_success_and_failure() {
        let ds = scenario_dataset();
        let rows = outcome_breakdown(&ds, &site("A"));
        assert_eq!(rows, vec![slice("Success", 1), slice("Failure", 1)]);
    }

    #[test]
    fn sites_with_zero_successes_still_appear() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Failure),
            record("A", 700.0, Outcome::Failure),
            record("B", 2500.0, Outcome::Success),
        ]);
        let rows = outcome_breakdown(&ds, &SiteSelection::AllSites);
        assert_eq!(rows, vec![slice("A", 0), slice("B", 1)]);
    }

    #[test]
    fn per_site_successes_sum_to_the_dataset_total() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success),
            record("A", 900.0, Outcome::Success),
            record("B", 1500.0, Outcome::Failure),
            record("C", 2500.0, Outcome::Success),
            record("C", 4500.0, Outcome::Failure),
        ]);
        let total_successes: u64 = ds
            .records
            .iter()
            .map(|r| u64::from(r.outcome.class()))
            .sum();

        let rows = outcome_breakdown(&ds, &SiteSelection::AllSites);
        let summed: u64 = rows.iter().map(|row| row.count).sum();
        assert_eq!(summed, total_successes);
    }

    #[test]
    fn single_site_counts_cover_every_record_of_the_site() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success),
            record("A", 900.0, Outcome::Failure),
            record("A", 1200.0, Outcome::Failure),
            record("B", 1500.0, Outcome::Success),
        ]);
        for name in &ds.sites {
            let rows = outcome_breakdown(&ds, &site(name));
            let site_records = ds.records.iter().filter(|r| &r.site == name).count() as u64;
            assert_eq!(rows[0].count + rows[1].count, site_records, "site {name}");
        }
    }

    #[test]
    fn scenario_range_filter_keeps_the_middle_records() {
        let ds = scenario_dataset();
        let indices = payload_correlation(
            &ds,
            &SiteSelection::AllSites,
            Some(PayloadRange::new(1000.0, 3000.0)),
        );
        let rows: Vec<(&str, f64, u8)> = indices
            .iter()
            .map(|&i| {
                let r = &ds.records[i];
                (r.site.as_str(), r.payload_mass, r.outcome.class())
            })
            .collect();
        assert_eq!(rows, vec![("A", 1500.0, 0), ("B", 2500.0, 1)]);
    }

    #[test]
    fn global_bounds_are_a_no_op_filter() {
        let ds = scenario_dataset();
        let bounds = PayloadRange::new(ds.payload_min, ds.payload_max);
        for selection in [SiteSelection::AllSites, site("A"), site("B")] {
            let with_range = payload_correlation(&ds, &selection, Some(bounds));
            let site_only: Vec<usize> = ds
                .records
                .iter()
                .enumerate()
                .filter(|(_, r)| selection.matches(&r.site))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(with_range, site_only);
        }
    }

    #[test]
    fn narrowing_the_range_only_removes_rows() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success),
            record("B", 1500.0, Outcome::Failure),
            record("A", 2500.0, Outcome::Success),
            record("B", 4500.0, Outcome::Success),
            record("A", 9000.0, Outcome::Failure),
        ]);
        let full = payload_correlation(
            &ds,
            &SiteSelection::AllSites,
            Some(PayloadRange::new(ds.payload_min, ds.payload_max)),
        );
        for (low, high) in [(1000.0, 5000.0), (2500.0, 2500.0), (6000.0, 8000.0)] {
            let narrowed = payload_correlation(
                &ds,
                &SiteSelection::AllSites,
                Some(PayloadRange::new(low, high)),
            );
            assert!(
                narrowed.iter().all(|idx| full.contains(idx)),
                "[{low}, {high}] produced rows outside the full range"
            );
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = scenario_dataset();
        let indices = payload_correlation(
            &ds,
            &SiteSelection::AllSites,
            Some(PayloadRange::new(500.0, 2500.0)),
        );
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn absent_range_falls_back_to_global_bounds() {
        let ds = scenario_dataset();
        let without = payload_correlation(&ds, &SiteSelection::AllSites, None);
        assert_eq!(without, vec![0, 1, 2]);
    }

    #[test]
    fn invalid_range_falls_back_to_global_bounds() {
        let ds = scenario_dataset();
        let invalid = PayloadRange {
            low: f64::NAN,
            high: 100.0,
        };
        let indices = payload_correlation(&ds, &SiteSelection::AllSites, Some(invalid));
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn empty_result_is_valid() {
        let ds = scenario_dataset();
        let indices = payload_correlation(
            &ds,
            &SiteSelection::AllSites,
            Some(PayloadRange::new(10_000.0, 20_000.0)),
        );
        assert!(indices.is_empty());
    }

    #[test]
    fn aggregations_are_idempotent() {
        let ds = scenario_dataset();
        let selection = site("A");
        let range = Some(PayloadRange::new(400.0, 2000.0));

        assert_eq!(
            outcome_breakdown(&ds, &selection),
            outcome_breakdown(&ds, &selection)
        );
        assert_eq!(
            payload_correlation(&ds, &selection, range),
            payload_correlation(&ds, &selection, range)
        );
    }
}
