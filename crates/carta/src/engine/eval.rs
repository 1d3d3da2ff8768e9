use carta_core::{filter::StatusFilter, Asset, FilterState};

/// Evaluates an asset against the active filter set.
///
/// Structural axes (database, schema) are checked first; any failing axis
/// short-circuits to `false`. Pure boolean function of the asset and the
/// filter.
pub fn matches(asset: &Asset, filter: &FilterState) -> bool {
    if let Some(database) = filter.database() {
        if asset.database_name() != database {
            return false;
        }
    }

    if let Some(schema) = filter.schema() {
        if asset.schema_name() != schema {
            return false;
        }
    }

    if let Some(tag_id) = filter.tag() {
        if !asset.has_tag(tag_id) {
            return false;
        }
    }

    if let Some(status) = filter.status() {
        let matched = match status {
            StatusFilter::Unverified => asset.status.is_none(),
            StatusFilter::Is(expected) => asset.status == Some(expected),
        };
        if !matched {
            return false;
        }
    }

    matches_search(asset, filter)
}

fn matches_search(asset: &Asset, filter: &FilterState) -> bool {
    // A precomputed id set replaces the free-text scan entirely.
    if let Some(ids) = &filter.matching_ids {
        return ids.contains(asset.id.as_str());
    }

    let Some(query) = filter.query() else {
        return true;
    };

    let needle = query.to_lowercase();
    search_targets(asset).any(|target| target.to_lowercase().contains(&needle))
}

/// The fields the legacy substring search looks at: name, description,
/// table name, column name, data type, and tag names.
fn search_targets(asset: &Asset) -> impl Iterator<Item = &str> {
    let table = asset.table_facet();
    let column = asset.column_facet();

    asset
        .name
        .as_deref()
        .into_iter()
        .chain(asset.description.as_deref())
        .chain(table.and_then(|facet| facet.table_name.as_deref()))
        .chain(
            column
                .map(|facet| facet.column_name.as_str())
                .filter(|name| !name.is_empty()),
        )
        .chain(column.and_then(|facet| facet.data_type.as_deref()))
        .chain(asset.tags.iter().map(|tag| tag.name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_core::asset::{ColumnFacet, TableFacet};
    use carta_core::filter::ALL;
    use carta_core::{AssetStatus, Facet, Tag};
    use std::collections::HashSet;

    fn orders_table() -> Asset {
        let mut asset = Asset::new(
            "t1",
            Facet::Table(TableFacet {
                schema: Some("public".into()),
                table_name: Some("orders".into()),
                database_name: Some("sales".into()),
                parent_schema_asset_id: None,
            }),
        );
        asset.name = Some("orders".into());
        asset.tags = vec![Tag::new("tag1", "finance")];
        asset
    }

    fn amount_column() -> Asset {
        Asset::new(
            "c1",
            Facet::Column(ColumnFacet {
                parent_table_asset_id: Some("t1".into()),
                column_name: "amount".into(),
                ordinal: Some(1),
                data_type: Some("decimal".into()),
                privacy: None,
                parent_table_facet: Some(TableFacet {
                    schema: Some("public".into()),
                    table_name: Some("orders".into()),
                    database_name: Some("sales".into()),
                    parent_schema_asset_id: None,
                }),
            }),
        )
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = FilterState::default();
        assert!(matches(&orders_table(), &filter));
        assert!(matches(&amount_column(), &filter));
    }

    #[test]
    fn schema_constraint_is_exclusive() {
        let mut filter = FilterState {
            selected_schema: Some("analytics".into()),
            ..Default::default()
        };
        assert!(!matches(&orders_table(), &filter));
        assert!(!matches(&amount_column(), &filter));

        filter.selected_schema = Some("public".into());
        assert!(matches(&orders_table(), &filter));
        assert!(matches(&amount_column(), &filter));
    }

    #[test]
    fn database_constraint_resolves_through_facets() {
        let filter = FilterState {
            selected_database: Some("sales".into()),
            ..Default::default()
        };
        assert!(matches(&orders_table(), &filter));
        assert!(matches(&amount_column(), &filter));

        let other = FilterState {
            selected_database: Some("marketing".into()),
            ..Default::default()
        };
        assert!(!matches(&orders_table(), &other));
    }

    #[test]
    fn all_sentinel_does_not_constrain() {
        let filter = FilterState {
            selected_schema: Some(ALL.into()),
            selected_tag: Some(ALL.into()),
            ..Default::default()
        };
        assert!(matches(&orders_table(), &filter));
    }

    #[test]
    fn tag_requires_membership() {
        let mut filter = FilterState {
            selected_tag: Some("tag1".into()),
            ..Default::default()
        };
        assert!(matches(&orders_table(), &filter));
        assert!(!matches(&amount_column(), &filter));

        filter.selected_tag = Some("tag2".into());
        assert!(!matches(&orders_table(), &filter));
    }

    #[test]
    fn unverified_matches_missing_status_only() {
        let filter = FilterState {
            selected_status: Some(StatusFilter::Unverified),
            ..Default::default()
        };
        assert!(matches(&orders_table(), &filter));

        let mut validated = orders_table();
        validated.status = Some(AssetStatus::Validated);
        assert!(!matches(&validated, &filter));

        let exact = FilterState {
            selected_status: Some(StatusFilter::Is(AssetStatus::Validated)),
            ..Default::default()
        };
        assert!(matches(&validated, &exact));
        assert!(!matches(&orders_table(), &exact));
    }

    #[test]
    fn matching_ids_replace_the_text_scan() {
        let filter = FilterState {
            // The query would match, but the id set takes precedence.
            search_query: Some("orders".into()),
            matching_ids: Some(HashSet::from(["c1".to_string()])),
            ..Default::default()
        };
        assert!(!matches(&orders_table(), &filter));
        assert!(matches(&amount_column(), &filter));
    }

    #[test]
    fn legacy_search_is_caseless_substring() {
        let filter = FilterState {
            search_query: Some("  DECI ".into()),
            ..Default::default()
        };
        // Matches the column's data type, not the table.
        assert!(matches(&amount_column(), &filter));
        assert!(!matches(&orders_table(), &filter));

        let by_tag = FilterState {
            search_query: Some("finan".into()),
            ..Default::default()
        };
        assert!(matches(&orders_table(), &by_tag));
    }
}
