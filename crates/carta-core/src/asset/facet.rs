use serde::{Deserialize, Serialize};

/// Type-specific metadata attached to an asset.
///
/// Exactly one variant exists per asset and it always matches the asset's
/// declared type. Facet fields mirror the backend payload and are optional
/// wherever real payloads omit them; accessors on [`Asset`](super::Asset)
/// apply the empty-string defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum Facet {
    Database(DatabaseFacet),
    Schema(SchemaFacet),
    Table(TableFacet),
    Column(ColumnFacet),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseFacet {
    #[serde(default)]
    pub database_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaFacet {
    #[serde(default)]
    pub schema_name: Option<String>,

    /// Database name, denormalized for placement when the parent id is
    /// missing or stale.
    #[serde(default)]
    pub database_name: Option<String>,

    /// Id of the DATABASE asset this schema belongs to.
    #[serde(default)]
    pub parent_database_asset_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableFacet {
    #[serde(default)]
    pub schema: Option<String>,

    #[serde(default)]
    pub table_name: Option<String>,

    #[serde(default)]
    pub database_name: Option<String>,

    /// Id of the SCHEMA asset this table belongs to.
    #[serde(default)]
    pub parent_schema_asset_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnFacet {
    /// Id of the TABLE asset this column belongs to. Absent or empty means
    /// the column is an orphan and never appears in relational output.
    #[serde(default)]
    pub parent_table_asset_id: Option<String>,

    #[serde(default)]
    pub column_name: String,

    /// Position within the table. Columns without an ordinal sort last.
    #[serde(default)]
    pub ordinal: Option<u32>,

    #[serde(default)]
    pub data_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,

    /// Denormalized copy of the parent table's facet, used to resolve the
    /// column's schema and database without an extra lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_table_facet: Option<TableFacet>,
}

impl ColumnFacet {
    /// Parent table id, treating the empty string as unset.
    pub fn parent_table_id(&self) -> Option<&str> {
        self.parent_table_asset_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}

/// Column privacy annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Privacy {
    pub llm: PrivacyLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivacyLevel {
    Encrypted,
    Default,
}
