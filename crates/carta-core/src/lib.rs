pub mod asset;
pub use asset::{Asset, AssetStatus, AssetType, Facet, Tag};

pub mod catalog;
pub use catalog::Catalog;

mod error;
pub use error::Error;

pub mod filter;
pub use filter::FilterState;

/// A Result type alias that uses Carta's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
