pub mod configure;
pub mod fetch;
pub mod status;
pub mod summary;

use anyhow::{Context, Result};
use portfolio_kit_core::{StatsConfig, config_path, load_config};
use portfolio_kit_stats::StatsClient;

/// Load the saved config (plus WAKATIME_API_KEY), honoring --direct
fn load_stats_config(direct: bool) -> Result<StatsConfig> {
    let path = config_path()?;
    let config = load_config(&path).with_context(|| {
        format!(
            "Failed to load {}\nRun 'portfolio-kit configure' first",
            path.display()
        )
    })?;
    Ok(if direct { config.direct() } else { config })
}

fn stats_client(direct: bool) -> Result<StatsClient> {
    let config = load_stats_config(direct)?;
    StatsClient::new(&config).context("Failed to build stats client")
}
