// Human-readable totals for the activity widget
use portfolio_kit_core::format_total_seconds;
use serde_json::Value;

use crate::StatsSource;
use crate::error::Result;

pub const DEFAULT_RANGE: &str = "last_7_days";

/// Total coding time over one stats range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub range: String,
    /// `None` when the payload carries no total
    pub total: Option<String>,
}

/// Endpoint for the stats of a named range, e.g. `stats/last_7_days`
pub fn stats_endpoint(range: &str) -> String {
    format!("stats/{}", range)
}

/// Pull the total out of a stats payload.
///
/// Prefers the server's `human_readable_total`, falling back to
/// `total_seconds`. Anything else in the payload is ignored.
pub fn total_from_stats(payload: &Value) -> Option<String> {
    let data = payload.get("data")?;

    if let Some(text) = data.get("human_readable_total").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    data.get("total_seconds")
        .and_then(Value::as_f64)
        .map(format_total_seconds)
}

/// Fetch one stats range and reduce it to a summary
pub async fn summarize(source: &dyn StatsSource, range: &str) -> Result<ActivitySummary> {
    let payload = source.fetch(&stats_endpoint(range)).await?;
    Ok(ActivitySummary {
        range: range.to_string(),
        total: total_from_stats(&payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeSource {
        response: fn() -> Result<Value>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(response: fn() -> Result<Value>) -> Self {
            Self {
                response,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl StatsSource for FakeSource {
        async fn fetch(&self, endpoint: &str) -> Result<Value> {
            self.requested.lock().unwrap().push(endpoint.to_string());
            (self.response)()
        }
    }

    #[test]
    fn test_stats_endpoint() {
        assert_eq!(stats_endpoint("last_7_days"), "stats/last_7_days");
        assert_eq!(stats_endpoint("all_time"), "stats/all_time");
    }

    #[test]
    fn test_total_prefers_human_readable() {
        let payload = json!({
            "data": {"human_readable_total": "12 hrs 4 mins", "total_seconds": 1.0}
        });
        assert_eq!(total_from_stats(&payload).as_deref(), Some("12 hrs 4 mins"));
    }

    #[test]
    fn test_total_falls_back_to_seconds() {
        let payload = json!({"data": {"total_seconds": 3600}});
        assert_eq!(total_from_stats(&payload).as_deref(), Some("1 hrs 0 mins"));
    }

    #[test]
    fn test_total_missing() {
        assert_eq!(total_from_stats(&json!({})), None);
        assert_eq!(total_from_stats(&json!({"data": {}})), None);
        assert_eq!(total_from_stats(&json!({"data": {"total_seconds": "soon"}})), None);
        assert_eq!(total_from_stats(&json!(null)), None);
    }

    #[tokio::test]
    async fn summarize_requests_stats_range() {
        let source = FakeSource::new(|| Ok(json!({"data": {"total_seconds": 5400}})));

        let summary = summarize(&source, DEFAULT_RANGE).await.unwrap();

        assert_eq!(
            summary,
            ActivitySummary {
                range: "last_7_days".to_string(),
                total: Some("1 hrs 30 mins".to_string()),
            }
        );
        assert_eq!(*source.requested.lock().unwrap(), vec!["stats/last_7_days"]);
    }

    #[tokio::test]
    async fn summarize_propagates_fetch_errors() {
        let source = FakeSource::new(|| Err(FetchError::Http { status: 402 }));

        let err = summarize(&source, "last_year").await.unwrap_err();

        assert_eq!(err.status(), Some(402));
        assert_eq!(*source.requested.lock().unwrap(), vec!["stats/last_year"]);
    }
}
