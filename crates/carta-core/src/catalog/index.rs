use crate::asset::{Asset, AssetStatus, ColumnFacet, Facet};

use indexmap::IndexMap;
use std::cmp::Ordering;

/// Lookup indexes derived from a flat asset snapshot.
///
/// Values are positions into the snapshot the indexes were built from.
/// Every map preserves insertion order, so rebuilding over the same
/// snapshot reproduces identical iteration order everywhere.
#[derive(Debug, Default, PartialEq)]
pub struct Indexes {
    assets_by_id: IndexMap<String, usize>,
    tables_by_id: IndexMap<String, usize>,
    columns_by_table_id: IndexMap<String, Vec<usize>>,
    tables_by_schema: IndexMap<String, Vec<usize>>,
    assets_by_status: IndexMap<String, Vec<usize>>,
    assets_by_tag_id: IndexMap<String, Vec<usize>>,
    tables: Vec<usize>,
    columns: Vec<usize>,
    schema_options: Vec<String>,
    database_options: Vec<String>,
}

impl Indexes {
    /// Builds the full index set over an asset slice.
    ///
    /// Duplicate ids keep their first position in iteration order while the
    /// last occurrence supplies the asset, mirroring how the upstream store
    /// keys snapshots by id. Orphan columns (no parent table id) stay out of
    /// the relational index entirely.
    pub fn build(assets: &[Asset]) -> Self {
        let mut assets_by_id: IndexMap<String, usize> = IndexMap::with_capacity(assets.len());
        for (pos, asset) in assets.iter().enumerate() {
            // IndexMap keeps the original slot on re-insert: the first
            // occurrence fixes the order, the last fixes the value.
            assets_by_id.insert(asset.id.clone(), pos);
        }

        let mut tables = Vec::new();
        let mut columns = Vec::new();
        let mut tables_by_id = IndexMap::new();
        let mut columns_by_table_id: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut tables_by_schema: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut assets_by_status: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut assets_by_tag_id: IndexMap<String, Vec<usize>> = IndexMap::new();

        for &pos in assets_by_id.values() {
            let asset = &assets[pos];

            match &asset.facet {
                Facet::Table(facet) => {
                    tables.push(pos);
                    tables_by_id.insert(asset.id.clone(), pos);
                    tables_by_schema
                        .entry(facet.schema.clone().unwrap_or_default())
                        .or_default()
                        .push(pos);
                }
                Facet::Column(facet) => {
                    columns.push(pos);
                    if let Some(table_id) = facet.parent_table_id() {
                        columns_by_table_id
                            .entry(table_id.to_string())
                            .or_default()
                            .push(pos);
                    }
                }
                Facet::Database(_) | Facet::Schema(_) => {}
            }

            let status = asset.status.map_or("null", AssetStatus::as_str);
            assets_by_status
                .entry(status.to_string())
                .or_default()
                .push(pos);

            for tag in &asset.tags {
                assets_by_tag_id
                    .entry(tag.id.clone())
                    .or_default()
                    .push(pos);
            }
        }

        for positions in columns_by_table_id.values_mut() {
            positions.sort_by(|&a, &b| column_order(&assets[a], &assets[b]));
        }

        let schema_options = distinct_sorted(tables.iter().map(|&pos| assets[pos].schema_name()));
        let database_options =
            distinct_sorted(tables.iter().map(|&pos| assets[pos].database_name()));

        Self {
            assets_by_id,
            tables_by_id,
            columns_by_table_id,
            tables_by_schema,
            assets_by_status,
            assets_by_tag_id,
            tables,
            columns,
            schema_options,
            database_options,
        }
    }

    /// Positions of deduplicated assets in first-occurrence order.
    pub fn ordered(&self) -> impl Iterator<Item = usize> + '_ {
        self.assets_by_id.values().copied()
    }

    pub fn asset_by_id(&self, id: &str) -> Option<usize> {
        self.assets_by_id.get(id).copied()
    }

    pub fn table_by_id(&self, id: &str) -> Option<usize> {
        self.tables_by_id.get(id).copied()
    }

    pub fn columns_of(&self, table_id: &str) -> &[usize] {
        self.columns_by_table_id
            .get(table_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn tables_in_schema(&self, schema: &str) -> &[usize] {
        self.tables_by_schema
            .get(schema)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn assets_with_status(&self, status: &str) -> &[usize] {
        self.assets_by_status
            .get(status)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn assets_with_tag(&self, tag_id: &str) -> &[usize] {
        self.assets_by_tag_id
            .get(tag_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn tables(&self) -> &[usize] {
        &self.tables
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn schema_options(&self) -> &[String] {
        &self.schema_options
    }

    pub fn database_options(&self) -> &[String] {
        &self.database_options
    }
}

/// Display order within a table: ascending ordinal, missing ordinals last,
/// case-sensitive column name as the tiebreak.
fn column_order(a: &Asset, b: &Asset) -> Ordering {
    let (a, b) = match (a.column_facet(), b.column_facet()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Ordering::Equal,
    };
    sort_ordinal(a)
        .cmp(&sort_ordinal(b))
        .then_with(|| a.column_name.cmp(&b.column_name))
}

fn sort_ordinal(facet: &ColumnFacet) -> u32 {
    facet.ordinal.unwrap_or(u32::MAX)
}

fn distinct_sorted<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = names.map(str::to_string).collect();
    out.sort();
    out.dedup();
    out
}
