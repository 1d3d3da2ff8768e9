pub mod engine;
pub mod explorer;
pub mod summary;

pub use carta_core::{
    asset, catalog, filter, Asset, AssetStatus, AssetType, Catalog, Error, Facet, FilterState,
    Result, Tag,
};

pub use engine::eval::matches;
pub use engine::stats::{
    compute_catalog_stats, compute_dashboard_stats, documentation_score, CatalogStats,
    DashboardStats,
};
pub use engine::tree::{build_filtered_tree, DatabaseNode, TreeOptions};
pub use explorer::ExplorerState;
pub use summary::{table_summaries, TableSummary};
