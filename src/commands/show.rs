//! Show command: look up a single benefit by id.

use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{anyhow, Result};
use tracing::info;

/// Executes a benefit lookup.
pub struct ShowCommand {
    config: Config,
}

impl ShowCommand {
    /// Creates a new show command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches one benefit and returns formatted output.
    pub async fn execute(&self, source: &dyn CatalogSource, id: &str) -> Result<String> {
        info!("Looking up benefit: {}", id);

        let benefit = source
            .benefit(id)
            .await
            .map_err(|err| anyhow!("{}\n{}", err, err.hint()))?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_benefit(&benefit))
    }
}
