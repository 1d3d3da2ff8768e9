use crate::engine::caseless_cmp;

use carta_core::{Asset, AssetStatus, AssetType, Catalog};
use indexmap::IndexMap;
use serde::Serialize;

/// Catalog-wide rollup in the dashboard response shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub overall: OverallStats,
    pub databases: Vec<DatabaseStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallStats {
    pub total_assets: usize,
    pub completion_percentage: f64,
    pub assets_validated: usize,
    pub assets_ai_generated: usize,
    pub assets_to_review: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseStats {
    pub database_id: String,
    pub database_name: String,
    pub total_schemas: usize,
    pub total_tables: usize,
    pub total_columns: usize,
    pub completion_percentage: f64,
    pub last_updated: Option<String>,
    pub schemas: Vec<SchemaStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaStats {
    pub schema_name: String,
    pub schema_asset_id: String,
    pub table_count: usize,
    pub completion_percentage: f64,
}

/// Statistics over an arbitrary asset slice, usable at database, schema, or
/// table granularity. Columns count toward totals but are excluded from the
/// completion rate; they are low-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total_assets: usize,
    pub completion_score: f64,
    pub assets_to_review: usize,
    pub assets_validated: usize,
    pub assets_with_ai_suggestions: usize,
    pub assets_with_description: usize,
}

/// Weighted documentation score: description 40, tags 30, review 30.
pub fn documentation_score(asset: &Asset) -> u8 {
    let mut score = 0u8;
    if asset.has_description() {
        score += 40;
    }
    if !asset.tags.is_empty() {
        score += 30;
    }
    if asset.reviewed {
        score += 30;
    }
    score.min(100)
}

/// Reduces an asset slice to its stat record. An empty slice yields the
/// zero record.
pub fn compute_catalog_stats<'a>(assets: impl IntoIterator<Item = &'a Asset>) -> CatalogStats {
    let mut stats = CatalogStats::default();
    let mut completion_pool = 0;

    for asset in assets {
        stats.total_assets += 1;

        if asset.ty() != AssetType::Column {
            completion_pool += 1;
            if asset.has_description() {
                stats.assets_with_description += 1;
            }
        }

        match asset.status {
            Some(AssetStatus::NeedsReview) | Some(AssetStatus::RequiresValidation) => {
                stats.assets_to_review += 1;
            }
            Some(AssetStatus::Validated) => stats.assets_validated += 1,
            _ => {}
        }

        if asset
            .ai_suggestion
            .as_deref()
            .is_some_and(|suggestion| !suggestion.is_empty())
        {
            stats.assets_with_ai_suggestions += 1;
        }
    }

    stats.completion_score = percentage(stats.assets_with_description, completion_pool);
    stats
}

/// Computes the dashboard rollup: overall counters plus per-database and
/// per-schema completion, grouped through the declared parent ids.
///
/// `validated` feeds both `assets_validated` and `assets_ai_generated`;
/// `published_by_ai` feeds only the latter. Databases and schemas come out
/// sorted by name so the rollup is reproducible.
pub fn compute_dashboard_stats(catalog: &Catalog) -> DashboardStats {
    let mut overall = OverallStats::default();
    let mut described_non_columns = 0;
    let mut non_columns = 0;

    for asset in catalog.iter() {
        overall.total_assets += 1;

        if asset.ty() != AssetType::Column {
            non_columns += 1;
            if asset.has_description() {
                described_non_columns += 1;
            }
        }

        match asset.status {
            Some(AssetStatus::Validated) => {
                overall.assets_validated += 1;
                overall.assets_ai_generated += 1;
            }
            Some(AssetStatus::PublishedByAi) => overall.assets_ai_generated += 1,
            Some(AssetStatus::NeedsReview) | Some(AssetStatus::RequiresValidation) => {
                overall.assets_to_review += 1;
            }
            _ => {}
        }
    }
    overall.completion_percentage = percentage(described_non_columns, non_columns);

    // Tables keyed by their declared parent schema; tables without one stay
    // out of the rollup.
    let mut tables_by_schema_id: IndexMap<&str, Vec<&Asset>> = IndexMap::new();
    for table in catalog.tables() {
        let Some(schema_id) = table
            .table_facet()
            .and_then(|facet| facet.parent_schema_asset_id.as_deref())
            .filter(|id| !id.is_empty())
        else {
            continue;
        };
        tables_by_schema_id.entry(schema_id).or_default().push(table);
    }

    let mut databases: Vec<DatabaseStats> = catalog
        .iter()
        .filter(|asset| asset.ty() == AssetType::Database)
        .map(|database| database_stats(catalog, database, &tables_by_schema_id))
        .collect();
    databases.sort_by(|a, b| caseless_cmp(&a.database_name, &b.database_name));

    DashboardStats { overall, databases }
}

fn database_stats(
    catalog: &Catalog,
    database: &Asset,
    tables_by_schema_id: &IndexMap<&str, Vec<&Asset>>,
) -> DatabaseStats {
    let mut schemas = Vec::new();
    let mut total_tables = 0;
    let mut total_columns = 0;
    let mut described_tables = 0;
    let mut last_updated = database.updated_at.clone();

    for schema in catalog.iter() {
        let Some(facet) = schema.schema_facet() else {
            continue;
        };
        if facet.parent_database_asset_id.as_deref() != Some(database.id.as_str()) {
            continue;
        }

        fold_max_update(&mut last_updated, schema.updated_at.as_deref());

        let tables = tables_by_schema_id
            .get(schema.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let described = tables.iter().filter(|table| table.has_description()).count();

        for table in tables {
            fold_max_update(&mut last_updated, table.updated_at.as_deref());
            for column in catalog.columns_of(&table.id) {
                fold_max_update(&mut last_updated, column.updated_at.as_deref());
                total_columns += 1;
            }
        }

        total_tables += tables.len();
        described_tables += described;

        schemas.push(SchemaStats {
            schema_name: schema.schema_name().to_string(),
            schema_asset_id: schema.id.clone(),
            table_count: tables.len(),
            completion_percentage: percentage(described, tables.len()),
        });
    }

    schemas.sort_by(|a, b| caseless_cmp(&a.schema_name, &b.schema_name));

    DatabaseStats {
        database_id: database
            .database_id
            .clone()
            .unwrap_or_else(|| database.id.clone()),
        database_name: database.database_name().to_string(),
        total_schemas: schemas.len(),
        total_tables,
        total_columns,
        completion_percentage: percentage(described_tables, total_tables),
        last_updated,
        schemas,
    }
}

/// Percentage rounded to one decimal place; `0.0` when the pool is empty.
fn percentage(count: usize, pool: usize) -> f64 {
    if pool == 0 {
        return 0.0;
    }
    (count as f64 / pool as f64 * 1000.0).round() / 10.0
}

/// ISO-8601 timestamps compare lexicographically, so a plain string max
/// tracks the most recent update.
fn fold_max_update(current: &mut Option<String>, candidate: Option<&str>) {
    let Some(candidate) = candidate else { return };
    match current {
        Some(existing) if existing.as_str() >= candidate => {}
        _ => *current = Some(candidate.to_string()),
    }
}
