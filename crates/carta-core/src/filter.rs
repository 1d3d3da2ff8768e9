use crate::asset::AssetStatus;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sentinel filter value meaning "no constraint" for single-choice filters.
pub const ALL: &str = "__all__";

/// Active filter set for the catalog explorer.
///
/// Every field is optional. For the string axes a `None`, an empty string,
/// and the [`ALL`] sentinel all leave the axis unconstrained; the accessors
/// apply that normalization so evaluation never sees the sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub selected_database: Option<String>,

    #[serde(default)]
    pub selected_schema: Option<String>,

    #[serde(default)]
    pub selected_tag: Option<String>,

    #[serde(default)]
    pub selected_status: Option<StatusFilter>,

    /// Free-text query for the legacy substring search path.
    #[serde(default)]
    pub search_query: Option<String>,

    /// Precomputed full-text matches supplied by an external search
    /// collaborator. When present, membership in this set replaces the
    /// free-text scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_ids: Option<HashSet<String>>,
}

impl FilterState {
    /// Database constraint with sentinel and empty values normalized away.
    pub fn database(&self) -> Option<&str> {
        constraint(self.selected_database.as_deref())
    }

    /// Schema constraint with sentinel and empty values normalized away.
    pub fn schema(&self) -> Option<&str> {
        constraint(self.selected_schema.as_deref())
    }

    /// Tag constraint with sentinel and empty values normalized away.
    pub fn tag(&self) -> Option<&str> {
        constraint(self.selected_tag.as_deref())
    }

    pub fn status(&self) -> Option<StatusFilter> {
        self.selected_status
    }

    /// Trimmed free-text query; `None` when blank.
    pub fn query(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }

    /// `true` when a search path is engaged: a precomputed id set or a
    /// non-blank query.
    pub fn search_active(&self) -> bool {
        self.matching_ids.is_some() || self.query().is_some()
    }

    /// `true` when no axis constrains anything.
    pub fn is_empty(&self) -> bool {
        self.database().is_none()
            && self.schema().is_none()
            && self.tag().is_none()
            && self.selected_status.is_none()
            && !self.search_active()
    }
}

/// Status axis filter.
///
/// `Unverified` matches assets whose status is absent; `Is` requires an
/// exact status match. Wire names are `"unverified"` and the status
/// snake_case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Unverified,
    #[serde(untagged)]
    Is(AssetStatus),
}

fn constraint(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty() && *value != ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sentinel_and_empty_mean_unconstrained() {
        let filter = FilterState {
            selected_database: Some(ALL.into()),
            selected_schema: Some(String::new()),
            selected_tag: Some("tag1".into()),
            ..Default::default()
        };

        assert_eq!(filter.database(), None);
        assert_eq!(filter.schema(), None);
        assert_eq!(filter.tag(), Some("tag1"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn blank_query_is_not_a_search() {
        let mut filter = FilterState {
            search_query: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(filter.query(), None);
        assert!(!filter.search_active());
        assert!(filter.is_empty());

        filter.search_query = Some("  orders ".into());
        assert_eq!(filter.query(), Some("orders"));
        assert!(filter.search_active());
    }

    #[test]
    fn matching_ids_engage_search_even_when_empty() {
        let filter = FilterState {
            matching_ids: Some(HashSet::new()),
            ..Default::default()
        };
        assert!(filter.search_active());
    }

    #[test]
    fn status_filter_wire_names() {
        let unverified: StatusFilter = serde_json::from_str("\"unverified\"").unwrap();
        assert_eq!(unverified, StatusFilter::Unverified);

        let validated: StatusFilter = serde_json::from_str("\"validated\"").unwrap();
        assert_eq!(validated, StatusFilter::Is(AssetStatus::Validated));

        assert_eq!(
            serde_json::to_string(&StatusFilter::Is(AssetStatus::NeedsReview)).unwrap(),
            "\"needs_review\""
        );
    }
}
