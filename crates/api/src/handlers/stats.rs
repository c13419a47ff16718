//! Price statistics: catalog aggregates and the scraped market series.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use weddit_core::import::{extract_table_rows, parse_price};
use weddit_core::stats::PriceStats;
use weddit_core::Region;
use weddit_db::repositories::VendorRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Heading that precedes the per-region contract amount table on the
/// public statistics page.
const REGION_TABLE_HEADING: &str = "지역별 결혼서비스 계약 금액";

/// GET /api/v1/stats/prices
pub async fn prices(State(state): State<AppState>) -> AppResult<Json<DataResponse<PriceStats>>> {
    let vendors = VendorRepo::list(&state.pool, None, None).await?;
    Ok(Json(DataResponse {
        data: PriceStats::collect(&vendors),
    }))
}

#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    pub metric: Option<String>,
}

/// A labelled market price series, in units of 만원.
#[derive(Debug, Serialize)]
pub struct MarketSeries {
    pub metric: String,
    pub labels: Vec<String>,
    pub values: Vec<i64>,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Built-in monthly contract averages served whenever live data is
/// unavailable, tagged with `note: "fallback"`. Months run November
/// through October to match the wedding season cycle.
fn fallback_season_series() -> MarketSeries {
    let labels = [
        "11월", "12월", "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월",
    ];
    MarketSeries {
        metric: "season".to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        values: vec![
            1230, 1375, 1190, 1260, 1663, 1725, 1755, 1680, 1420, 1310, 1575, 1454,
        ],
        unit: "만원".to_string(),
        note: Some("fallback".to_string()),
    }
}

/// GET /api/v1/stats/market?metric=season|region
///
/// The metric is matched case-insensitively. The `region` metric scrapes
/// the public statistics page; any fetch or parse failure, and any
/// unrecognized metric, falls back to the built-in season series rather
/// than erroring.
pub async fn market(
    State(state): State<AppState>,
    Query(query): Query<MarketQuery>,
) -> AppResult<Json<DataResponse<MarketSeries>>> {
    let metric = query
        .metric
        .as_deref()
        .unwrap_or("season")
        .to_lowercase();
    let series = match metric.as_str() {
        "region" => match scrape_region_series(&state).await {
            Some(series) => series,
            None => fallback_season_series(),
        },
        _ => fallback_season_series(),
    };
    Ok(Json(DataResponse::new(series)))
}

/// Fetch and parse the per-region contract amount table. Returns `None`
/// on any failure so the caller can fall back.
async fn scrape_region_series(state: &AppState) -> Option<MarketSeries> {
    let url = state.config.market_stats_url.as_deref()?;

    let html = match state.http.get(url).send().await {
        Ok(response) => match response.text().await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(error = %err, "Market stats body read failed");
                return None;
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, "Market stats fetch failed");
            return None;
        }
    };

    // Only the table after the region heading holds label-value pairs we
    // want; earlier tables on the page cover other metrics.
    let section_start = html.find(REGION_TABLE_HEADING)?;
    let section = &html[section_start..];

    let mut labels = Vec::new();
    let mut values = Vec::new();
    for row in extract_table_rows(section) {
        let [label, value, ..] = row.as_slice() else {
            continue;
        };
        let is_region = Region::ALL.iter().any(|r| label.contains(r.label()));
        if !is_region {
            continue;
        }
        if let Some(amount) = parse_price(value) {
            labels.push(label.clone());
            values.push(amount);
        }
    }

    if labels.is_empty() {
        tracing::warn!("Market stats page yielded no region rows");
        return None;
    }

    Some(MarketSeries {
        metric: "region".to_string(),
        labels,
        values,
        unit: "만원".to_string(),
        note: None,
    })
}
