use std::fmt;

// ---------------------------------------------------------------------------
// SiteSelection – the launch-site control value
// ---------------------------------------------------------------------------

/// Value of the site selector. `AllSites` means no site filter is applied;
/// `Site` values are drawn from [`super::model::LaunchDataset::sites`], so a
/// selected site always exists in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    AllSites,
    Site(String),
}

impl SiteSelection {
    /// Whether a record at `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::AllSites => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }

    /// Label shown in the selector and in chart titles.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::AllSites => "All Sites",
            SiteSelection::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – the payload-mass control value
// ---------------------------------------------------------------------------

/// Closed payload-mass interval in kilograms. Constructed values always
/// satisfy `low <= high`; both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Build a range from two bounds in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    /// Whether `payload_mass` lies within the range, bounds included.
    pub fn contains(&self, payload_mass: f64) -> bool {
        payload_mass >= self.low && payload_mass <= self.high
    }

    /// A range is usable when both bounds are finite and ordered. Values
    /// built through [`PayloadRange::new`] are ordered by construction, but
    /// non-finite bounds can still sneak in from arithmetic on an empty
    /// table.
    pub fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low <= self.high
    }

    /// Width of the range in kilograms.
    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sites_matches_everything() {
        let sel = SiteSelection::AllSites;
        assert!(sel.matches("CCAFS LC-40"));
        assert!(sel.matches("VAFB SLC-4E"));
        assert_eq!(sel.label(), "All Sites");
    }

    #[test]
    fn single_site_matches_only_itself() {
        let sel = SiteSelection::Site("KSC LC-39A".to_string());
        assert!(sel.matches("KSC LC-39A"));
        assert!(!sel.matches("CCAFS LC-40"));
        assert_eq!(sel.label(), "KSC LC-39A");
    }

    #[test]
    fn range_orders_its_bounds() {
        let range = PayloadRange::new(6000.0, 1000.0);
        assert_eq!(range.low, 1000.0);
        assert_eq!(range.high, 6000.0);
        assert!(range.is_valid());
    }

    #[test]
    fn containment_includes_both_bounds() {
        let range = PayloadRange::new(1000.0, 3000.0);
        assert!(range.contains(1000.0));
        assert!(range.contains(3000.0));
        assert!(range.contains(2000.0));
        assert!(!range.contains(999.9));
        assert!(!range.contains(3000.1));
    }

    #[test]
    fn non_finite_bounds_are_invalid() {
        let range = PayloadRange {
            low: f64::INFINITY,
            high: f64::NEG_INFINITY,
        };
        assert!(!range.is_valid());
        assert!(!PayloadRange::new(f64::NAN, 10.0).is_valid());
    }

    #[test]
    fn span_is_the_range_width() {
        assert_eq!(PayloadRange::new(500.0, 2500.0).span(), 2000.0);
        assert_eq!(PayloadRange::new(500.0, 500.0).span(), 0.0);
    }
}
