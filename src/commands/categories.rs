//! Categories command: list the category vocabulary.

use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{anyhow, Result};
use tracing::info;

/// Executes a category listing.
pub struct CategoriesCommand {
    config: Config,
}

impl CategoriesCommand {
    /// Creates a new categories command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the vocabulary and returns formatted output.
    pub async fn execute(&self, source: &dyn CatalogSource) -> Result<String> {
        info!("Listing categories");

        let categories = source
            .categories()
            .await
            .map_err(|err| anyhow!("{}\n{}", err, err.hint()))?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_categories(&categories))
    }
}
