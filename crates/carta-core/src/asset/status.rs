use serde::{Deserialize, Serialize};
use std::fmt;

/// Documentation status of an asset.
///
/// Absence (`None` on [`Asset`](super::Asset)) models the backend's `null`
/// status, surfaced to filters as "unverified".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Validated,
    HumanAuthored,
    PublishedByAi,
    NeedsReview,
    RequiresValidation,
}

impl AssetStatus {
    /// Wire name of the status, also used as the grouping key in the status
    /// index.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Validated => "validated",
            AssetStatus::HumanAuthored => "human_authored",
            AssetStatus::PublishedByAi => "published_by_ai",
            AssetStatus::NeedsReview => "needs_review",
            AssetStatus::RequiresValidation => "requires_validation",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}
