use crate::fetch::Fetch;
use crate::state::CatalogState;
use std::fmt::Write as _;

/// Totals per type, label and category counts, and the hosting mode.
pub async fn handle_catalog_stats<F: Fetch>(state: &CatalogState<F>) -> Result<String, String> {
    let catalog = state.catalog();
    let stats = catalog.stats();

    let mut output = String::new();
    let _ = writeln!(output, "Catalog ({} mode):", state.mode());
    let _ = writeln!(output, "  • {} customizations", stats.total);
    let _ = writeln!(output, "  • {} rules, {} workflows", stats.rules, stats.workflows);
    let _ = writeln!(output, "  • {} labels across {} categories", stats.labels, stats.categories);
    let _ = writeln!(output, "  • {} sources cached", state.cached_sources().await);

    let _ = writeln!(output, "\nCategories:");
    for category in catalog.categories() {
        let count = catalog
            .records()
            .iter()
            .filter(|record| record.category == category)
            .count();
        let _ = writeln!(output, "  • {} ({})", category, count);
    }

    Ok(output)
}
