use crate::engine::{caseless_cmp, eval::matches, stats::documentation_score};

use carta_core::{Asset, Catalog, FilterState};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Bucket name for assets whose database cannot be resolved.
pub const UNKNOWN_DATABASE: &str = "unknown";

/// Tunables for tree construction.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Number of unfiltered columns surfaced under a table that matched a
    /// search on its own, so a hit table never renders an empty column
    /// list.
    pub context_columns: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self { context_columns: 5 }
    }
}

/// Top level of the explorer tree. `asset` is absent for the synthetic
/// bucket that collects tables with no resolvable database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseNode<'a> {
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<&'a Asset>,
    pub schemas: Vec<SchemaNode<'a>>,
}

/// `asset` is absent for schema slots created on demand from table facets
/// (partial metadata); `name` is absent for the empty schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode<'a> {
    pub key: String,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<&'a Asset>,
    pub tables: Vec<TableNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableNode<'a> {
    pub key: String,
    pub asset: &'a Asset,
    pub columns: Vec<ColumnNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnNode<'a> {
    pub asset: &'a Asset,
    pub label: String,
    pub meta: String,
    pub score: u8,
}

/// Builds the filtered explorer tree.
///
/// Databases come from DATABASE assets, schemas from SCHEMA assets (parent
/// resolved by id, then by name, then the synthetic bucket), tables attach
/// in caseless `(database, schema, display name)` order. A table is emitted
/// iff it matches the filter itself or at least one of its columns does.
/// Node keys are stable across rebuilds for the same input.
pub fn build_filtered_tree<'a>(
    catalog: &'a Catalog,
    filter: &FilterState,
    options: &TreeOptions,
) -> Vec<DatabaseNode<'a>> {
    let mut builder = TreeBuilder::default();

    // Declared databases first so schemas and tables have something to
    // resolve into.
    for asset in catalog.iter() {
        if let Some(facet) = asset.database_facet() {
            let name = facet
                .database_name
                .as_deref()
                .and_then(nonempty)
                .unwrap_or(UNKNOWN_DATABASE);
            let slot = builder.ensure_database(name);
            if slot.asset.is_none() {
                slot.asset = Some(asset);
            }
        }
    }

    for asset in catalog.iter() {
        if asset.schema_facet().is_some() {
            builder.add_schema(catalog, asset);
        }
    }

    // Tables walk in display order. Schema resolution happens before
    // filtering, so schema slots exist even when everything under them is
    // filtered out.
    let mut tables: Vec<&Asset> = catalog.tables().collect();
    tables.sort_by(|a, b| {
        caseless_cmp(a.database_name(), b.database_name())
            .then_with(|| caseless_cmp(a.schema_name(), b.schema_name()))
            .then_with(|| caseless_cmp(a.display_name(), b.display_name()))
    });

    for table in tables {
        let (database, schema_key) = builder.resolve_schema(table);
        if let Some(node) = build_table_node(catalog, table, filter, options) {
            builder.push_table(&database, &schema_key, node);
        }
    }

    let tree = builder.finish();
    debug!(databases = tree.len(), "filtered tree built");
    tree
}

#[derive(Default)]
struct TreeBuilder<'a> {
    databases: IndexMap<String, DatabaseSlot<'a>>,
    /// SCHEMA asset id → (database name, schema key) for O(1) parent
    /// lookups from tables.
    schema_ids: HashMap<&'a str, (String, String)>,
}

#[derive(Default)]
struct DatabaseSlot<'a> {
    asset: Option<&'a Asset>,
    schemas: IndexMap<String, SchemaNode<'a>>,
}

impl<'a> TreeBuilder<'a> {
    fn ensure_database(&mut self, name: &str) -> &mut DatabaseSlot<'a> {
        self.databases.entry(name.to_string()).or_default()
    }

    fn add_schema(&mut self, catalog: &'a Catalog, asset: &'a Asset) {
        let Some(facet) = asset.schema_facet() else {
            return;
        };

        // Parent database: explicit id first, then the denormalized name,
        // then the synthetic bucket.
        let parent_name = facet
            .parent_database_asset_id
            .as_deref()
            .and_then(nonempty)
            .and_then(|id| catalog.asset(id))
            .and_then(|database| database.database_facet())
            .and_then(|database| database.database_name.as_deref())
            .and_then(nonempty);
        let database = parent_name
            .or_else(|| facet.database_name.as_deref().and_then(nonempty))
            .unwrap_or(UNKNOWN_DATABASE)
            .to_string();

        let schema_name = facet.schema_name.as_deref().and_then(nonempty);
        let key = schema_key(&database, schema_name.unwrap_or(""));
        let name = schema_name.map(str::to_string);

        let slot = self.ensure_database(&database);
        let node = slot
            .schemas
            .entry(key.clone())
            .or_insert_with(|| SchemaNode {
                key: key.clone(),
                name,
                asset: None,
                tables: Vec::new(),
            });
        if node.asset.is_none() {
            node.asset = Some(asset);
        }

        self.schema_ids.insert(asset.id.as_str(), (database, key));
    }

    /// Places a table: exact lookup through the parent schema id when it
    /// resolves, otherwise by the names on the table's own facet, creating
    /// asset-less slots on demand.
    fn resolve_schema(&mut self, table: &'a Asset) -> (String, String) {
        if let Some(parent_id) = table
            .table_facet()
            .and_then(|facet| facet.parent_schema_asset_id.as_deref())
            .and_then(nonempty)
        {
            if let Some(placement) = self.schema_ids.get(parent_id) {
                return placement.clone();
            }
        }

        let database = nonempty(table.database_name())
            .unwrap_or(UNKNOWN_DATABASE)
            .to_string();
        let schema = table.schema_name();
        let key = schema_key(&database, schema);
        let name = nonempty(schema).map(str::to_string);

        let slot = self.ensure_database(&database);
        slot.schemas
            .entry(key.clone())
            .or_insert_with(|| SchemaNode {
                key: key.clone(),
                name,
                asset: None,
                tables: Vec::new(),
            });

        (database, key)
    }

    fn push_table(&mut self, database: &str, schema_key: &str, node: TableNode<'a>) {
        if let Some(schema) = self
            .databases
            .get_mut(database)
            .and_then(|slot| slot.schemas.get_mut(schema_key))
        {
            schema.tables.push(node);
        }
    }

    fn finish(self) -> Vec<DatabaseNode<'a>> {
        let mut databases: Vec<DatabaseNode<'a>> = self
            .databases
            .into_iter()
            .map(|(name, slot)| {
                let mut schemas: Vec<SchemaNode<'a>> = slot.schemas.into_values().collect();
                schemas.sort_by(|a, b| {
                    caseless_cmp(
                        a.name.as_deref().unwrap_or(""),
                        b.name.as_deref().unwrap_or(""),
                    )
                });
                DatabaseNode {
                    key: database_key(&name),
                    name,
                    asset: slot.asset,
                    schemas,
                }
            })
            .collect();
        databases.sort_by(|a, b| caseless_cmp(&a.name, &b.name));
        databases
    }
}

fn build_table_node<'a>(
    catalog: &'a Catalog,
    table: &'a Asset,
    filter: &FilterState,
    options: &TreeOptions,
) -> Option<TableNode<'a>> {
    let columns: Vec<&Asset> = catalog.columns_of(&table.id).collect();
    let matched: Vec<&Asset> = columns
        .iter()
        .copied()
        .filter(|column| matches(column, filter))
        .collect();
    let table_matches = matches(table, filter);

    if !table_matches && matched.is_empty() {
        return None;
    }

    // A table that is itself the search hit still shows a few columns for
    // context instead of an empty list.
    let surface_context =
        matched.is_empty() && filter.search_active() && table_matches && !columns.is_empty();
    let column_nodes: Vec<ColumnNode<'a>> = if surface_context {
        columns
            .iter()
            .take(options.context_columns)
            .map(|&column| column_node(column))
            .collect()
    } else {
        matched.iter().map(|&column| column_node(column)).collect()
    };

    Some(TableNode {
        key: table_key(&table.id),
        asset: table,
        columns: column_nodes,
    })
}

fn column_node(asset: &Asset) -> ColumnNode<'_> {
    let facet = asset.column_facet();
    let label = facet
        .map(|facet| facet.column_name.as_str())
        .filter(|name| !name.is_empty())
        .or(asset.name.as_deref())
        .unwrap_or("Unnamed column")
        .to_string();
    let meta = facet
        .and_then(|facet| facet.data_type.as_deref())
        .unwrap_or("")
        .to_string();

    ColumnNode {
        asset,
        label,
        meta,
        score: documentation_score(asset),
    }
}

fn database_key(name: &str) -> String {
    format!("database:{name}")
}

fn schema_key(database: &str, schema: &str) -> String {
    format!("schema:{database}:{schema}")
}

fn table_key(asset_id: &str) -> String {
    format!("table:{asset_id}")
}

fn nonempty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
