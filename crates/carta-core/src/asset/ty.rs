use serde::{Deserialize, Serialize};

/// Closed set of catalog entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Database,
    Schema,
    Table,
    Column,
}
