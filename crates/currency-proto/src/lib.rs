pub mod config;
pub mod currency;
pub mod platform;
pub mod selection;

pub use currency::{Catalog, CatalogError, Currency};
pub use selection::SelectionSet;
