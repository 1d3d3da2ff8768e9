use super::{
    Asset, AssetStatus, AssetType, ColumnFacet, DatabaseFacet, Facet, SchemaFacet, TableFacet, Tag,
};
use serde::{Deserialize, Serialize};

/// Backend wire shape of an asset: a `type` discriminator plus optional
/// facet objects.
///
/// Exactly one facet is meaningful; [`Asset`] takes the one matching the
/// declared type when it is built from this form and drops the rest. A
/// missing facet degrades to an empty one so partial payloads load instead
/// of failing.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RawAsset {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type")]
    pub ty: AssetType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<AssetStatus>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub reviewed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestion: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_flag_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggested_tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(
        default,
        rename = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(
        default,
        rename = "updatedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_facet: Option<DatabaseFacet>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_facet: Option<SchemaFacet>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_facet: Option<TableFacet>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_facet: Option<ColumnFacet>,
}

impl From<RawAsset> for Asset {
    fn from(raw: RawAsset) -> Self {
        let facet = match raw.ty {
            AssetType::Database => Facet::Database(raw.database_facet.unwrap_or_default()),
            AssetType::Schema => Facet::Schema(raw.schema_facet.unwrap_or_default()),
            AssetType::Table => Facet::Table(raw.table_facet.unwrap_or_default()),
            AssetType::Column => Facet::Column(raw.column_facet.unwrap_or_default()),
        };

        Asset {
            id: raw.id,
            urn: raw.urn,
            name: raw.name,
            description: raw.description,
            status: raw.status,
            tags: raw.tags,
            reviewed: raw.reviewed,
            ai_suggestion: raw.ai_suggestion,
            ai_flag_reason: raw.ai_flag_reason,
            ai_suggested_tags: raw.ai_suggested_tags,
            database_id: raw.database_id,
            created_by: raw.created_by,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            facet,
        }
    }
}

impl From<Asset> for RawAsset {
    fn from(asset: Asset) -> Self {
        let ty = asset.ty();

        let mut raw = RawAsset {
            id: asset.id,
            ty,
            urn: asset.urn,
            name: asset.name,
            description: asset.description,
            status: asset.status,
            tags: asset.tags,
            reviewed: asset.reviewed,
            ai_suggestion: asset.ai_suggestion,
            ai_flag_reason: asset.ai_flag_reason,
            ai_suggested_tags: asset.ai_suggested_tags,
            database_id: asset.database_id,
            created_by: asset.created_by,
            created_at: asset.created_at,
            updated_at: asset.updated_at,
            database_facet: None,
            schema_facet: None,
            table_facet: None,
            column_facet: None,
        };

        match asset.facet {
            Facet::Database(facet) => raw.database_facet = Some(facet),
            Facet::Schema(facet) => raw.schema_facet = Some(facet),
            Facet::Table(facet) => raw.table_facet = Some(facet),
            Facet::Column(facet) => raw.column_facet = Some(facet),
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn facet_follows_declared_type() {
        let asset: Asset = serde_json::from_str(
            r#"{
                "id": "t1",
                "type": "TABLE",
                "table_facet": { "schema": "public", "table_name": "orders" },
                "column_facet": { "column_name": "stray" }
            }"#,
        )
        .unwrap();

        assert_eq!(asset.ty(), AssetType::Table);
        assert_eq!(asset.table_facet().unwrap().schema.as_deref(), Some("public"));
        // The mismatched facet is dropped, not kept around.
        assert_eq!(asset.column_facet(), None);
    }

    #[test]
    fn missing_facet_defaults_to_empty() {
        let asset: Asset = serde_json::from_str(r#"{ "id": "t1", "type": "TABLE" }"#).unwrap();
        assert_eq!(asset.facet, Facet::Table(TableFacet::default()));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let result = serde_json::from_str::<Asset>(r#"{ "id": "x", "type": "VIEW" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn round_trips_through_the_wire_shape() {
        let payload = r#"{
            "id": "c1",
            "type": "COLUMN",
            "name": "amount",
            "status": "needs_review",
            "tags": [{ "id": "tag1", "name": "finance" }],
            "createdAt": "2025-01-02T03:04:05Z",
            "column_facet": {
                "parent_table_asset_id": "t1",
                "column_name": "amount",
                "ordinal": 1,
                "data_type": "decimal"
            }
        }"#;

        let asset: Asset = serde_json::from_str(payload).unwrap();
        assert_eq!(asset.status, Some(AssetStatus::NeedsReview));
        assert_eq!(asset.created_at.as_deref(), Some("2025-01-02T03:04:05Z"));

        let encoded = serde_json::to_string(&asset).unwrap();
        let decoded: Asset = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, asset);
    }
}
