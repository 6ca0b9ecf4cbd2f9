use anyhow::{Context, Result};
use portfolio_kit_stats::{FetchError, StatsClient};
use serde_json::Value;

/// Fetch one endpoint and print the payload
pub async fn run(endpoint: &str, compact: bool, direct: bool, lenient: bool) -> Result<()> {
    let client = super::stats_client(direct)?;
    tracing::debug!(url = %client.request_url(endpoint), "fetch");

    if let Some(output) = fetch_and_render(&client, endpoint, compact, lenient).await? {
        println!("{}", output);
    }
    Ok(())
}

/// Fetch and render an endpoint.
///
/// With `lenient`, failures are logged and `Ok(None)` comes back, which is
/// what the portfolio page does with a failed request.
async fn fetch_and_render(
    client: &StatsClient,
    endpoint: &str,
    compact: bool,
    lenient: bool,
) -> Result<Option<String>> {
    let payload = if lenient {
        match client.fetch_or_log(endpoint).await {
            Some(payload) => payload,
            None => return Ok(None),
        }
    } else {
        client
            .fetch(endpoint)
            .await
            .map_err(|e| describe_failure(endpoint, e))?
    };

    render(&payload, compact).map(Some)
}

fn render(payload: &Value, compact: bool) -> Result<String> {
    let output = if compact {
        serde_json::to_string(payload)
    } else {
        serde_json::to_string_pretty(payload)
    };
    output.context("Failed to serialize payload")
}

fn describe_failure(endpoint: &str, err: FetchError) -> anyhow::Error {
    let hint = match &err {
        FetchError::Http { status: 401 | 403 } => {
            "\nCheck your token with 'portfolio-kit status' or run 'portfolio-kit configure'"
        }
        FetchError::Http { status: 429 } => "\nRate limited; try again later or use --direct",
        FetchError::Network(_) => "\nIs the relay reachable? Try --direct",
        FetchError::Decode(_) => "\nThe relay or API returned something other than JSON",
        _ => "",
    };
    anyhow::anyhow!("Fetching '{}' failed ({}): {}{}", endpoint, err.kind(), err, hint)
}
