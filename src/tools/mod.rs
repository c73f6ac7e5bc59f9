pub mod catalog_stats;
pub mod get_source;
pub mod inspect;
pub mod list_labels;
pub mod search;

pub use catalog_stats::*;
pub use get_source::*;
pub use inspect::*;
pub use list_labels::*;
pub use search::*;
