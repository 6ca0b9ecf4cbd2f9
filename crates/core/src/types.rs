use secrecy::SecretString;

/// Public CORS relay the portfolio page has always gone through
pub const DEFAULT_RELAY: &str = "https://cors-anywhere.herokuapp.com/";

/// WakaTime API host and version prefix, without scheme
pub const DEFAULT_API_BASE: &str = "wakatime.com/api/v1";

/// Environment variable that overrides the configured token
pub const TOKEN_ENV_VAR: &str = "WAKATIME_API_KEY";

/// Connection settings for the coding-activity stats API
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Secret API token, sent as Basic authorization
    pub token: SecretString,
    /// Host and path prefix of the analytics API, e.g. `wakatime.com/api/v1`
    pub api_base: String,
    /// Relay prefix ending in `/`; `None` calls the API directly
    pub relay: Option<String>,
}

impl StatsConfig {
    /// Config with the default API host, routed through the default relay
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            api_base: DEFAULT_API_BASE.to_string(),
            relay: Some(DEFAULT_RELAY.to_string()),
        }
    }

    /// Drop the relay and talk to the API host directly
    pub fn direct(mut self) -> Self {
        self.relay = None;
        self
    }

    pub fn is_direct(&self) -> bool {
        self.relay.is_none()
    }
}

/// Show only the last four characters of a secret
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// Format a number of seconds as "H hrs M mins"
pub fn format_total_seconds(total_secs: f64) -> String {
    let total = if total_secs.is_finite() && total_secs > 0.0 {
        total_secs as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    format!("{} hrs {} mins", hours, mins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = StatsConfig::new("abc");
        assert_eq!(config.api_base, "wakatime.com/api/v1");
        assert_eq!(
            config.relay.as_deref(),
            Some("https://cors-anywhere.herokuapp.com/")
        );
        assert!(!config.is_direct());
        assert!(config.direct().is_direct());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = StatsConfig::new("super-secret-token");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("waka_12345678"), "*********5678");
        assert_eq!(mask_token("abcd"), "****");
        assert_eq!(mask_token(""), "");
    }

    #[test]
    fn test_format_total_seconds() {
        assert_eq!(format_total_seconds(0.0), "0 hrs 0 mins");
        assert_eq!(format_total_seconds(3600.0), "1 hrs 0 mins");
        assert_eq!(format_total_seconds(5430.7), "1 hrs 30 mins");
        assert_eq!(format_total_seconds(-5.0), "0 hrs 0 mins");
        assert_eq!(format_total_seconds(f64::NAN), "0 hrs 0 mins");
    }
}
