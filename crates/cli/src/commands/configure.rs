use anyhow::{Context, Result};
use portfolio_kit_core::{
    DEFAULT_API_BASE, DEFAULT_RELAY, SavedSettings, StatsConfig, TOKEN_ENV_VAR, build_config,
    config_path, mask_token, read_settings, save_config,
};
use secrecy::ExposeSecret;
use std::io::{self, Write};

/// Helper to read user input
fn read_input(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for the WakaTime token and relay, then save the global config
pub async fn run() -> Result<()> {
    println!("🔧 Configuring WakaTime access...\n");

    let path = config_path()?;

    // Read the file only; WAKATIME_API_KEY must not end up saved to disk
    let existing = read_settings(&path)
        .with_context(|| format!("Failed to read existing config at {}", path.display()))?;

    println!("📋 You'll need:");
    println!("   1. Your WakaTime secret API key");
    println!("      Find at: https://wakatime.com/settings/api-key");
    println!("   2. A CORS relay (optional - default: {})", DEFAULT_RELAY);
    println!("      Enter 'none' to call the API directly");
    println!();

    let current_token = existing.as_ref().and_then(|s| s.token.as_ref());
    let token_input = match current_token {
        Some(token) => read_input(&format!(
            "API Token [current: {}]: ",
            mask_token(token.expose_secret())
        ))?,
        None => read_input("API Token: ")?,
    };

    let current_relay = match &existing {
        Some(settings) => settings.effective_relay().unwrap_or("none").to_string(),
        None => DEFAULT_RELAY.to_string(),
    };
    let relay_input = read_input(&format!("Relay [current: {}]: ", current_relay))?;

    let config = apply_answers(existing.as_ref(), &token_input, &relay_input)?;

    save_config(&path, &config).context("Failed to save config")?;

    println!();
    println!("✅ Configuration saved to: {}", path.display());
    match &config.relay {
        Some(relay) => println!("   Requests go through: {}", relay),
        None => println!("   Requests go directly to: https://{}", config.api_base),
    }
    println!("   💡 {} overrides the saved token", TOKEN_ENV_VAR);
    println!();
    println!("🚀 Ready! Try: portfolio-kit summary");

    Ok(())
}

/// Merge prompt answers over the saved settings. Empty answers keep the current value.
fn apply_answers(
    existing: Option<&SavedSettings>,
    token_input: &str,
    relay_input: &str,
) -> Result<StatsConfig> {
    let token = if token_input.is_empty() {
        existing
            .and_then(|s| s.token.as_ref())
            .map(|t| t.expose_secret().to_string())
            .context("API token is required")?
    } else {
        token_input.to_string()
    };

    let relay = if relay_input.is_empty() {
        match existing {
            Some(settings) => settings.effective_relay().map(str::to_string),
            None => Some(DEFAULT_RELAY.to_string()),
        }
    } else if relay_input.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(relay_input.to_string())
    };

    let api_base = existing
        .and_then(|s| s.api_base.as_deref())
        .unwrap_or(DEFAULT_API_BASE);

    Ok(build_config(&token, Some(api_base), relay.as_deref())?)
}
