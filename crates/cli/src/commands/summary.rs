use anyhow::Result;
use portfolio_kit_stats::{ActivitySummary, StatsSource, summarize};

/// Print total coding time for a stats range
pub async fn run(range: &str, direct: bool) -> Result<()> {
    let client = super::stats_client(direct)?;

    println!("⏱  Fetching {} stats...", range);
    let line = summary_line(&client, range).await?;
    println!("   {}", line);

    Ok(())
}

async fn summary_line(source: &dyn StatsSource, range: &str) -> Result<String> {
    let ActivitySummary { range, total } = summarize(source, range)
        .await
        .map_err(|e| anyhow::anyhow!("Fetching {} stats failed ({}): {}", range, e.kind(), e))?;

    Ok(match total {
        Some(total) => format!("{}: {}", range.replace('_', " "), total),
        None => format!("{}: no activity recorded", range.replace('_', " ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use portfolio_kit_stats::{FetchError, Result as FetchResult};
    use serde_json::{Value, json};

    /// Same response regardless of endpoint
    struct Canned(fn() -> FetchResult<Value>);

    #[async_trait]
    impl StatsSource for Canned {
        async fn fetch(&self, _endpoint: &str) -> FetchResult<Value> {
            (self.0)()
        }
    }

    #[tokio::test]
    async fn summary_line_formats_total() {
        let source = Canned(|| Ok(json!({"data": {"human_readable_total": "3 hrs 2 mins"}})));
        let line = summary_line(&source, "last_7_days").await.unwrap();
        assert_eq!(line, "last 7 days: 3 hrs 2 mins");
    }

    #[tokio::test]
    async fn summary_line_without_total() {
        let source = Canned(|| Ok(json!({"data": {}})));
        let line = summary_line(&source, "all_time").await.unwrap();
        assert_eq!(line, "all time: no activity recorded");
    }

    #[tokio::test]
    async fn summary_line_reports_failure_kind() {
        let source = Canned(|| Err(FetchError::Http { status: 404 }));
        let err = summary_line(&source, "last_year").await.unwrap_err();
        assert!(err.to_string().contains("last_year stats failed (http)"));
    }
}
