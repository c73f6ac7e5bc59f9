pub mod cli;
pub mod config;
pub mod dates;
pub mod deployment;
pub mod description;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod format;
pub mod labels;
pub mod loader;
pub mod logging;
pub mod manifest;
pub mod metadata;
pub mod server;
pub mod state;
pub mod tools;
pub mod types;

pub use filter::{FilterAction, FilterState, TypeFilter};
pub use loader::{Catalog, CatalogLoader};
pub use manifest::{Manifest, ManifestEntry};
pub use types::{Activation, Customization, CustomizationKind};
