use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::data::aggregate::BreakdownSlice;
use crate::data::model::LaunchDataset;
use crate::data::select::SiteSelection;

// ---------------------------------------------------------------------------
// Chart titles
// ---------------------------------------------------------------------------

/// Title of the proportion chart for the current site selection.
pub fn breakdown_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::AllSites => "Total Successful Launches by Site".to_string(),
        SiteSelection::Site(site) => format!("Success vs Failures for: {site}"),
    }
}

/// Title of the payload/outcome scatter for the current site selection.
pub fn correlation_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::AllSites => "Payload vs Success (All Sites)".to_string(),
        SiteSelection::Site(site) => format!("Payload vs Success ({site})"),
    }
}

// ---------------------------------------------------------------------------
// Pie layout: breakdown rows → slice geometry
// ---------------------------------------------------------------------------

/// One slice of the proportion chart, with its share of the whole and the
/// angle range it occupies on the unit circle.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: u64,
    /// `count / total`, in `(0, 1]`.
    pub fraction: f64,
    /// Start angle in radians. Slices run clockwise from twelve o'clock.
    pub start_angle: f64,
    /// End angle in radians, always less than `start_angle`.
    pub end_angle: f64,
}

/// Lay the breakdown rows out as contiguous pie slices.
///
/// Zero-count rows take no angle and are skipped; rows with all-zero counts
/// produce an empty layout, which the painter renders as an empty chart.
pub fn pie_layout(slices: &[BreakdownSlice]) -> Vec<PieSlice> {
    let total: u64 = slices.iter().map(|s| s.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut layout = Vec::new();
    let mut angle = TAU / 4.0;
    for slice in slices {
        if slice.count == 0 {
            continue;
        }
        let fraction = slice.count as f64 / total as f64;
        let end = angle - fraction * TAU;
        layout.push(PieSlice {
            label: slice.label.clone(),
            count: slice.count,
            fraction,
            start_angle: angle,
            end_angle: end,
        });
        angle = end;
    }
    layout
}

/// Vertices of one slice as a closed fan on the unit circle: the center
/// followed by `segments + 1` arc points.
pub fn slice_points(slice: &PieSlice, segments: usize) -> Vec<[f64; 2]> {
    let mut points = Vec::with_capacity(segments + 2);
    points.push([0.0, 0.0]);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let angle = slice.start_angle + t * (slice.end_angle - slice.start_angle);
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

/// Position for the slice's percentage label, at the angular midpoint.
pub fn slice_label_pos(slice: &PieSlice) -> [f64; 2] {
    let mid = (slice.start_angle + slice.end_angle) / 2.0;
    [0.62 * mid.cos(), 0.62 * mid.sin()]
}

// ---------------------------------------------------------------------------
// Scatter groups: correlation rows → per-category point series
// ---------------------------------------------------------------------------

/// One point of the payload/outcome scatter, remembering its source record
/// so the hover tooltip can reach every field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub record: usize,
    pub payload_mass: f64,
    pub outcome: u8,
}

/// One scatter series: all points sharing a booster version category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub category: String,
    pub points: Vec<ScatterPoint>,
}

/// Group the filtered record indices by booster version category, the
/// scatter's color encoding. Groups come out sorted by category.
pub fn scatter_groups(dataset: &LaunchDataset, indices: &[usize]) -> Vec<ScatterGroup> {
    let mut by_category: BTreeMap<&str, Vec<ScatterPoint>> = BTreeMap::new();
    for &idx in indices {
        let rec = &dataset.records[idx];
        by_category
            .entry(rec.booster_category.as_str())
            .or_default()
            .push(ScatterPoint {
                record: idx,
                payload_mass: rec.payload_mass,
                outcome: rec.outcome.class(),
            });
    }
    by_category
        .into_iter()
        .map(|(category, points)| ScatterGroup {
            category: category.to_string(),
            points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn slice(label: &str, count: u64) -> BreakdownSlice {
        BreakdownSlice {
            label: label.to_string(),
            count,
        }
    }

    fn record(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass: payload,
            outcome,
            booster_category: booster.to_string(),
            details: Default::default(),
        }
    }

    #[test]
    fn titles_reflect_the_selection() {
        assert_eq!(
            breakdown_title(&SiteSelection::AllSites),
            "Total Successful Launches by Site"
        );
        assert_eq!(
            breakdown_title(&SiteSelection::Site("KSC LC-39A".to_string())),
            "Success vs Failures for: KSC LC-39A"
        );
        assert_eq!(
            correlation_title(&SiteSelection::AllSites),
            "Payload vs Success (All Sites)"
        );
        assert_eq!(
            correlation_title(&SiteSelection::Site("VAFB SLC-4E".to_string())),
            "Payload vs Success (VAFB SLC-4E)"
        );
    }

    #[test]
    fn pie_fractions_sum_to_one_and_slices_are_contiguous() {
        let layout = pie_layout(&[slice("A", 3), slice("B", 1), slice("C", 4)]);
        assert_eq!(layout.len(), 3);

        let total_fraction: f64 = layout.iter().map(|s| s.fraction).sum();
        assert!((total_fraction - 1.0).abs() < 1e-12);

        for pair in layout.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        let swept: f64 = layout.iter().map(|s| s.start_angle - s.end_angle).sum();
        assert!((swept - TAU).abs() < 1e-9);
    }

    #[test]
    fn zero_count_slices_are_skipped() {
        let layout = pie_layout(&[slice("A", 0), slice("B", 2)]);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout[0].label, "B");
        assert_eq!(layout[0].fraction, 1.0);
    }

    #[test]
    fn all_zero_breakdown_yields_an_empty_layout() {
        assert!(pie_layout(&[slice("A", 0), slice("B", 0)]).is_empty());
        assert!(pie_layout(&[]).is_empty());
    }

    #[test]
    fn slice_points_form_a_fan_on_the_unit_circle() {
        let layout = pie_layout(&[slice("A", 1), slice("B", 1)]);
        let points = slice_points(&layout[0], 16);

        assert_eq!(points.len(), 18);
        assert_eq!(points[0], [0.0, 0.0]);
        for p in &points[1..] {
            let radius = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!((radius - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn label_position_sits_inside_the_slice() {
        let layout = pie_layout(&[slice("A", 1)]);
        let [x, y] = slice_label_pos(&layout[0]);
        let radius = (x * x + y * y).sqrt();
        assert!(radius > 0.0 && radius < 1.0);
    }

    #[test]
    fn scatter_groups_split_by_booster_category() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success, "FT"),
            record("B", 1500.0, Outcome::Failure, "v1.0"),
            record("A", 2500.0, Outcome::Success, "FT"),
        ]);
        let groups = scatter_groups(&ds, &[0, 1, 2]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "FT");
        assert_eq!(groups[0].points.len(), 2);
        assert_eq!(groups[1].category, "v1.0");
        assert_eq!(
            groups[1].points[0],
            ScatterPoint {
                record: 1,
                payload_mass: 1500.0,
                outcome: 0
            }
        );
    }

    #[test]
    fn scatter_groups_respect_the_index_subset() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success, "FT"),
            record("B", 1500.0, Outcome::Failure, "v1.0"),
        ]);
        let groups = scatter_groups(&ds, &[1]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "v1.0");

        assert!(scatter_groups(&ds, &[]).is_empty());
    }
}
