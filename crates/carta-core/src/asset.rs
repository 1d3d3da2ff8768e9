mod facet;
pub use facet::{ColumnFacet, DatabaseFacet, Facet, Privacy, PrivacyLevel, SchemaFacet, TableFacet};

mod raw;

mod status;
pub use status::AssetStatus;

mod tag;
pub use tag::Tag;

mod ty;
pub use ty::AssetType;

use serde::{Deserialize, Serialize};

/// A cataloged database object: a database, schema, table, or column,
/// together with its documentation metadata.
///
/// Assets are immutable snapshots fetched from the backend. The facet always
/// matches the asset's type; the pairing is established when the asset is
/// built from its wire form, so downstream code never re-checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "raw::RawAsset", into = "raw::RawAsset")]
pub struct Asset {
    /// Opaque unique identifier.
    pub id: String,

    /// Backend resource name.
    pub urn: Option<String>,

    /// Display name.
    pub name: Option<String>,

    /// Free-text documentation. A non-blank description marks the asset as
    /// documented for completion metrics.
    pub description: Option<String>,

    /// Documentation status. `None` models the backend's `null` status.
    pub status: Option<AssetStatus>,

    /// User-defined labels, many-to-many.
    pub tags: Vec<Tag>,

    /// Whether a human has reviewed this asset.
    pub reviewed: bool,

    /// Pending AI-suggested description, if any.
    pub ai_suggestion: Option<String>,

    /// Reason an AI flagged this asset for attention.
    pub ai_flag_reason: Option<String>,

    /// Tag names an AI proposed for this asset.
    pub ai_suggested_tags: Option<Vec<String>>,

    /// Backend id of the database this asset belongs to.
    pub database_id: Option<String>,

    /// User that created the asset.
    pub created_by: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    /// Type-specific metadata.
    pub facet: Facet,
}

impl Asset {
    /// Creates an asset with the given id and facet and no metadata.
    pub fn new(id: impl Into<String>, facet: Facet) -> Self {
        Self {
            id: id.into(),
            urn: None,
            name: None,
            description: None,
            status: None,
            tags: vec![],
            reviewed: false,
            ai_suggestion: None,
            ai_flag_reason: None,
            ai_suggested_tags: None,
            database_id: None,
            created_by: None,
            created_at: None,
            updated_at: None,
            facet,
        }
    }

    /// The discriminant type, derived from the facet variant.
    pub fn ty(&self) -> AssetType {
        match &self.facet {
            Facet::Database(_) => AssetType::Database,
            Facet::Schema(_) => AssetType::Schema,
            Facet::Table(_) => AssetType::Table,
            Facet::Column(_) => AssetType::Column,
        }
    }

    pub fn database_facet(&self) -> Option<&DatabaseFacet> {
        match &self.facet {
            Facet::Database(facet) => Some(facet),
            _ => None,
        }
    }

    pub fn schema_facet(&self) -> Option<&SchemaFacet> {
        match &self.facet {
            Facet::Schema(facet) => Some(facet),
            _ => None,
        }
    }

    pub fn table_facet(&self) -> Option<&TableFacet> {
        match &self.facet {
            Facet::Table(facet) => Some(facet),
            _ => None,
        }
    }

    pub fn column_facet(&self) -> Option<&ColumnFacet> {
        match &self.facet {
            Facet::Column(facet) => Some(facet),
            _ => None,
        }
    }

    /// Schema this asset belongs to, resolved through its facet.
    ///
    /// Columns resolve through the denormalized parent table facet when the
    /// backend supplied one. Assets with no schema resolve to the empty
    /// string, which is a valid grouping key throughout the catalog.
    pub fn schema_name(&self) -> &str {
        match &self.facet {
            Facet::Database(_) => "",
            Facet::Schema(facet) => facet.schema_name.as_deref().unwrap_or(""),
            Facet::Table(facet) => facet.schema.as_deref().unwrap_or(""),
            Facet::Column(facet) => facet
                .parent_table_facet
                .as_ref()
                .and_then(|table| table.schema.as_deref())
                .unwrap_or(""),
        }
    }

    /// Database this asset belongs to, resolved through its facet.
    pub fn database_name(&self) -> &str {
        match &self.facet {
            Facet::Database(facet) => facet.database_name.as_deref().unwrap_or(""),
            Facet::Schema(facet) => facet.database_name.as_deref().unwrap_or(""),
            Facet::Table(facet) => facet.database_name.as_deref().unwrap_or(""),
            Facet::Column(facet) => facet
                .parent_table_facet
                .as_ref()
                .and_then(|table| table.database_name.as_deref())
                .unwrap_or(""),
        }
    }

    /// Display name: the asset's own name, falling back to the name carried
    /// by its facet.
    pub fn display_name(&self) -> &str {
        if let Some(name) = self.name.as_deref() {
            if !name.is_empty() {
                return name;
            }
        }
        match &self.facet {
            Facet::Database(facet) => facet.database_name.as_deref().unwrap_or(""),
            Facet::Schema(facet) => facet.schema_name.as_deref().unwrap_or(""),
            Facet::Table(facet) => facet.table_name.as_deref().unwrap_or(""),
            Facet::Column(facet) => &facet.column_name,
        }
    }

    /// `true` when the description is present and non-blank.
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|description| !description.trim().is_empty())
    }

    /// `true` when any of the asset's tags has the given id.
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|tag| tag.id == tag_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column_with_parent(schema: &str, database: &str) -> Asset {
        Asset::new(
            "c1",
            Facet::Column(ColumnFacet {
                parent_table_asset_id: Some("t1".into()),
                column_name: "amount".into(),
                parent_table_facet: Some(TableFacet {
                    schema: Some(schema.into()),
                    table_name: Some("orders".into()),
                    database_name: Some(database.into()),
                    parent_schema_asset_id: None,
                }),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn ty_follows_facet() {
        let asset = Asset::new("db1", Facet::Database(DatabaseFacet::default()));
        assert_eq!(asset.ty(), AssetType::Database);
        assert_eq!(column_with_parent("public", "sales").ty(), AssetType::Column);
    }

    #[test]
    fn column_resolves_through_parent_table_facet() {
        let column = column_with_parent("public", "sales");
        assert_eq!(column.schema_name(), "public");
        assert_eq!(column.database_name(), "sales");
    }

    #[test]
    fn missing_facet_fields_resolve_to_empty() {
        let table = Asset::new("t1", Facet::Table(TableFacet::default()));
        assert_eq!(table.schema_name(), "");
        assert_eq!(table.database_name(), "");
        assert_eq!(table.display_name(), "");
    }

    #[test]
    fn display_name_prefers_asset_name() {
        let mut table = Asset::new(
            "t1",
            Facet::Table(TableFacet {
                table_name: Some("orders_raw".into()),
                ..Default::default()
            }),
        );
        assert_eq!(table.display_name(), "orders_raw");

        table.name = Some("Orders".into());
        assert_eq!(table.display_name(), "Orders");
    }

    #[test]
    fn blank_description_is_not_documented() {
        let mut asset = Asset::new("t1", Facet::Table(TableFacet::default()));
        assert!(!asset.has_description());

        asset.description = Some("   ".into());
        assert!(!asset.has_description());

        asset.description = Some("Fact table for orders".into());
        assert!(asset.has_description());
    }
}
