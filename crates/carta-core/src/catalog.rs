mod index;
pub use index::Indexes;

use crate::{asset::Asset, Result};
use tracing::debug;

/// An immutable snapshot of catalog assets together with the derived lookup
/// indexes.
///
/// The index set is rebuilt in full whenever the snapshot is replaced; there
/// is no incremental update path. A version counter identifies the current
/// snapshot so downstream caches can key off it instead of comparing asset
/// arrays.
#[derive(Debug, Default)]
pub struct Catalog {
    assets: Vec<Asset>,
    indexes: Indexes,
    version: u64,
}

impl Catalog {
    pub fn new(assets: Vec<Asset>) -> Self {
        let indexes = Indexes::build(&assets);
        debug!(
            assets = assets.len(),
            tables = indexes.tables().len(),
            columns = indexes.columns().len(),
            "catalog indexed"
        );
        Self {
            assets,
            indexes,
            version: 0,
        }
    }

    /// Parses a backend asset payload: a flat JSON array of assets.
    pub fn from_json_slice(payload: &[u8]) -> Result<Self> {
        let assets: Vec<Asset> = serde_json::from_slice(payload)?;
        Ok(Self::new(assets))
    }

    pub fn from_json_str(payload: &str) -> Result<Self> {
        let assets: Vec<Asset> = serde_json::from_str(payload)?;
        Ok(Self::new(assets))
    }

    /// Replaces the snapshot and rebuilds every index.
    pub fn replace(&mut self, assets: Vec<Asset>) {
        self.indexes = Indexes::build(&assets);
        self.assets = assets;
        self.version += 1;
        debug!(
            version = self.version,
            assets = self.assets.len(),
            "catalog snapshot replaced"
        );
    }

    /// Monotonically increasing snapshot identity.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The raw snapshot, duplicates included, in payload order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Number of assets in the raw snapshot, duplicates included.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn indexes(&self) -> &Indexes {
        &self.indexes
    }

    /// Deduplicated assets in first-occurrence order; for duplicate ids the
    /// last occurrence supplies the asset.
    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.indexes.ordered().map(move |pos| &self.assets[pos])
    }

    /// O(1) lookup by asset id.
    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.indexes.asset_by_id(id).map(|pos| &self.assets[pos])
    }

    /// O(1) lookup of a TABLE asset by id.
    pub fn table(&self, id: &str) -> Option<&Asset> {
        self.indexes.table_by_id(id).map(|pos| &self.assets[pos])
    }

    /// All TABLE assets in deduplicated snapshot order.
    pub fn tables(&self) -> impl Iterator<Item = &Asset> {
        self.indexes.tables().iter().map(move |&pos| &self.assets[pos])
    }

    /// All COLUMN assets in deduplicated snapshot order.
    pub fn columns(&self) -> impl Iterator<Item = &Asset> {
        self.indexes
            .columns()
            .iter()
            .map(move |&pos| &self.assets[pos])
    }

    /// A table's columns in display order: ascending ordinal, missing
    /// ordinals last, column name as the tiebreak. Empty for unknown tables
    /// and for tables whose columns were all orphaned.
    pub fn columns_of(&self, table_id: &str) -> impl Iterator<Item = &Asset> {
        self.indexes
            .columns_of(table_id)
            .iter()
            .map(move |&pos| &self.assets[pos])
    }

    /// TABLE assets grouped under a schema name; the empty string groups
    /// tables with no schema.
    pub fn tables_in_schema(&self, schema: &str) -> impl Iterator<Item = &Asset> {
        self.indexes
            .tables_in_schema(schema)
            .iter()
            .map(move |&pos| &self.assets[pos])
    }

    /// Assets grouped by status wire name; `"null"` groups unverified
    /// assets.
    pub fn assets_with_status(&self, status: &str) -> impl Iterator<Item = &Asset> {
        self.indexes
            .assets_with_status(status)
            .iter()
            .map(move |&pos| &self.assets[pos])
    }

    /// Assets carrying the given tag. An asset with several tags shows up
    /// under each of them.
    pub fn assets_with_tag(&self, tag_id: &str) -> impl Iterator<Item = &Asset> {
        self.indexes
            .assets_with_tag(tag_id)
            .iter()
            .map(move |&pos| &self.assets[pos])
    }

    /// Distinct schema names across TABLE assets, sorted ascending. The
    /// empty string is a valid option when any table lacks a schema.
    pub fn schema_options(&self) -> &[String] {
        self.indexes.schema_options()
    }

    /// Distinct database names across TABLE assets, sorted ascending.
    pub fn database_options(&self) -> &[String] {
        self.indexes.database_options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{ColumnFacet, Facet, TableFacet};
    use crate::Tag;
    use pretty_assertions::assert_eq;

    fn fixture() -> Vec<Asset> {
        let mut table = Asset::new(
            "t1",
            Facet::Table(TableFacet {
                schema: Some("public".into()),
                table_name: Some("orders".into()),
                database_name: Some("sales".into()),
                parent_schema_asset_id: None,
            }),
        );
        table.tags = vec![Tag::new("tag1", "finance")];

        let column = Asset::new(
            "c1",
            Facet::Column(ColumnFacet {
                parent_table_asset_id: Some("t1".into()),
                column_name: "amount".into(),
                ordinal: Some(0),
                data_type: Some("decimal".into()),
                ..Default::default()
            }),
        );

        vec![table, column]
    }

    #[test]
    fn lookups_resolve_through_the_indexes() {
        let catalog = Catalog::new(fixture());

        assert_eq!(catalog.asset("t1").map(|a| a.id.as_str()), Some("t1"));
        assert_eq!(catalog.table("t1").map(|a| a.id.as_str()), Some("t1"));
        assert_eq!(catalog.table("c1"), None);
        assert_eq!(catalog.columns_of("t1").count(), 1);
        assert_eq!(catalog.tables_in_schema("public").count(), 1);
        assert_eq!(catalog.assets_with_tag("tag1").count(), 1);
        assert_eq!(catalog.assets_with_status("null").count(), 2);
        assert_eq!(catalog.schema_options(), ["public"]);
        assert_eq!(catalog.database_options(), ["sales"]);
    }

    #[test]
    fn replace_rebuilds_and_bumps_the_version() {
        let mut catalog = Catalog::new(fixture());
        assert_eq!(catalog.version(), 0);

        catalog.replace(vec![]);
        assert_eq!(catalog.version(), 1);
        assert!(catalog.is_empty());
        assert_eq!(catalog.asset("t1"), None);
        assert_eq!(catalog.schema_options(), &[] as &[String]);
    }

    #[test]
    fn json_payload_errors_surface() {
        let err = Catalog::from_json_str("not json").unwrap_err();
        assert!(err.is_json());
    }
}

