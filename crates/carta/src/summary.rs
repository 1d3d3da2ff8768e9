use carta_core::{Asset, Catalog};
use serde::Serialize;

/// Flattened table-with-columns projection handed to SQL-context consumers,
/// which want plain names rather than the asset graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub schema: String,
    pub database_name: Option<String>,
    pub description: String,
    pub columns: Vec<ColumnSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub description: String,
}

/// One summary per TABLE asset in catalog order, columns resolved through
/// the relational index (ordinal order, orphans absent).
pub fn table_summaries(catalog: &Catalog) -> Vec<TableSummary> {
    catalog
        .tables()
        .map(|table| {
            let facet = table.table_facet();
            TableSummary {
                name: facet
                    .and_then(|facet| facet.table_name.as_deref())
                    .or(table.name.as_deref())
                    .unwrap_or("")
                    .to_string(),
                schema: facet
                    .and_then(|facet| facet.schema.as_deref())
                    .unwrap_or("")
                    .to_string(),
                database_name: facet.and_then(|facet| facet.database_name.clone()),
                description: table.description.clone().unwrap_or_default(),
                columns: catalog.columns_of(&table.id).map(column_summary).collect(),
            }
        })
        .collect()
}

fn column_summary(asset: &Asset) -> ColumnSummary {
    let facet = asset.column_facet();
    ColumnSummary {
        id: asset.id.clone(),
        name: facet
            .map(|facet| facet.column_name.as_str())
            .filter(|name| !name.is_empty())
            .or(asset.name.as_deref())
            .unwrap_or("")
            .to_string(),
        data_type: facet
            .and_then(|facet| facet.data_type.as_deref())
            .unwrap_or("")
            .to_string(),
        description: asset.description.clone().unwrap_or_default(),
    }
}
