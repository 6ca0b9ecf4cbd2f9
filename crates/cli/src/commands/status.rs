use anyhow::Result;
use portfolio_kit_core::{StatsConfig, TOKEN_ENV_VAR, config_path, mask_token};
use portfolio_kit_stats::StatsClient;
use secrecy::ExposeSecret;

/// Show where the config lives and what requests would look like
pub async fn run() -> Result<()> {
    let path = config_path()?;

    println!("📊 portfolio-kit configuration\n");
    println!("   Config file: {}", path.display());
    if !path.exists() {
        println!("   (not created yet)");
    }

    let config = super::load_stats_config(false)?;
    let client = StatsClient::new(&config)?;

    let env_token = std::env::var(TOKEN_ENV_VAR).ok();
    for line in describe(&config, &client, token_from_env(env_token.as_deref())) {
        println!("   {}", line);
    }

    Ok(())
}

/// Blank values are ignored when loading, so they don't count as the source
fn token_from_env(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn describe(config: &StatsConfig, client: &StatsClient, env_is_source: bool) -> Vec<String> {
    let source = if env_is_source {
        TOKEN_ENV_VAR
    } else {
        "config file"
    };

    vec![
        format!(
            "Token: {} (from {})",
            mask_token(config.token.expose_secret()),
            source
        ),
        format!("API base: {}", config.api_base),
        match &config.relay {
            Some(relay) => format!("Relay: {}", relay),
            None => "Relay: none (direct)".to_string(),
        },
        format!("Summaries URL: {}", client.request_url("summaries")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_env_token_is_not_the_source() {
        assert!(token_from_env(Some("waka_env")));
        assert!(!token_from_env(Some("")));
        assert!(!token_from_env(Some("   ")));
        assert!(!token_from_env(None));
    }

    #[test]
    fn test_describe_relayed() {
        let config = StatsConfig::new("waka_12345678");
        let client = StatsClient::new(&config).unwrap();

        let lines = describe(&config, &client, false);

        assert_eq!(lines[0], "Token: *********5678 (from config file)");
        assert_eq!(lines[2], "Relay: https://cors-anywhere.herokuapp.com/");
        assert_eq!(
            lines[3],
            "Summaries URL: https://cors-anywhere.herokuapp.com/https://wakatime.com/api/v1/users/current/summaries"
        );
        assert!(lines.iter().all(|l| !l.contains("waka_12345678")));
    }

    #[test]
    fn test_describe_direct_from_env() {
        let config = StatsConfig::new("waka_12345678").direct();
        let client = StatsClient::new(&config).unwrap();

        let lines = describe(&config, &client, true);

        assert!(lines[0].ends_with("(from WAKATIME_API_KEY)"));
        assert_eq!(lines[2], "Relay: none (direct)");
    }
}
