//! BLS OEWS wage statistics client
//!
//! Fetches Occupational Employment and Wage Statistics percentile data from
//! the Bureau of Labor Statistics public API. One blocking request per unique
//! (occupation, area, year); successful responses are memoized for the
//! lifetime of the client. A failed fetch is "no data available", never an
//! error, so proposals are not blocked by API outages.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// OEWS wage statistics for an occupation in an area
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WageData {
    pub occupation_code: String,
    pub occupation_title: String,
    pub area_code: String,
    pub area_title: String,
    pub employment: Option<u64>,
    pub mean_annual: Option<f64>,
    pub median_annual: Option<f64>,
    pub pct_10: Option<f64>,
    pub pct_25: Option<f64>,
    pub pct_75: Option<f64>,
    pub pct_90: Option<f64>,
    pub year: u16,
}

/// Source of wage statistics; the seam that lets tests substitute a static
/// table for the live BLS client
pub trait WageDataProvider {
    fn get_wage_data(&mut self, occupation_code: &str, area_code: &str, year: u16)
        -> Option<WageData>;
}

/// Client for the BLS OEWS timeseries API
pub struct OewsClient {
    api_key: Option<String>,
    http: reqwest::blocking::Client,
    cache: HashMap<(String, String, u16), WageData>,
}

const BASE_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";

/// OEWS datatype codes: (measure name, 2-digit series suffix)
const DATA_TYPES: &[(&str, &str)] = &[
    ("employment", "01"),
    ("mean_hourly", "03"),
    ("mean_annual", "04"),
    ("pct_10", "06"),
    ("pct_25", "07"),
    ("median", "08"),
    ("pct_75", "09"),
    ("pct_90", "10"),
];

/// Measures requested for salary validation
const WAGE_MEASURES: &[&str] = &["mean_annual", "median", "pct_10", "pct_25", "pct_75", "pct_90"];

impl OewsClient {
    /// Create a client; an API key raises BLS rate limits but is optional
    pub fn new(api_key: Option<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            api_key,
            http,
            cache: HashMap::new(),
        }
    }

    /// Build an OEWS series ID: `OEUM{area:7}{industry:6}{occupation:6}{datatype:2}`
    ///
    /// Area is zero-padded to 7 digits, industry is cross-industry (000000),
    /// and the occupation code drops its hyphen.
    pub fn build_series_id(area_code: &str, occupation_code: &str, data_type: &str) -> String {
        let occ = occupation_code.replace('-', "");
        let area = format!("{:0>7}", area_code);
        let dtype = DATA_TYPES
            .iter()
            .find(|(name, _)| *name == data_type)
            .map(|(_, code)| *code)
            .unwrap_or("04");
        format!("OEUM{}000000{}{}", area, occ, dtype)
    }

    fn fetch(&self, occupation_code: &str, area_code: &str, year: u16) -> Option<WageData> {
        let series_ids: Vec<String> = WAGE_MEASURES
            .iter()
            .map(|measure| Self::build_series_id(area_code, occupation_code, measure))
            .collect();

        let mut payload = serde_json::json!({
            "seriesid": series_ids,
            "startyear": year.to_string(),
            "endyear": year.to_string(),
        });
        if let Some(key) = &self.api_key {
            payload["registrationkey"] = serde_json::Value::String(key.clone());
        }

        let response = match self.http.post(BASE_URL).json(&payload).send() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Failed to fetch OEWS data: {}", e);
                return None;
            }
        };

        let body: BlsResponse = match response.json() {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to parse OEWS response: {}", e);
                return None;
            }
        };

        if body.status != "REQUEST_SUCCEEDED" {
            warn!("BLS API request failed: {:?}", body.message);
            return None;
        }

        let mut wage_data = WageData {
            occupation_code: occupation_code.to_string(),
            area_code: area_code.to_string(),
            year,
            ..Default::default()
        };

        for series in body.results.series {
            let value = series
                .data
                .iter()
                .find(|dp| dp.year == year.to_string())
                .and_then(|dp| dp.value.replace(',', "").parse::<f64>().ok());

            let Some(value) = value else { continue };

            // The 2-digit series suffix identifies the measure
            match series.series_id.get(series.series_id.len().saturating_sub(2)..) {
                Some("04") => wage_data.mean_annual = Some(value),
                Some("08") => wage_data.median_annual = Some(value),
                Some("06") => wage_data.pct_10 = Some(value),
                Some("07") => wage_data.pct_25 = Some(value),
                Some("09") => wage_data.pct_75 = Some(value),
                Some("10") => wage_data.pct_90 = Some(value),
                _ => {}
            }
        }

        Some(wage_data)
    }
}

impl WageDataProvider for OewsClient {
    fn get_wage_data(
        &mut self,
        occupation_code: &str,
        area_code: &str,
        year: u16,
    ) -> Option<WageData> {
        let key = (
            occupation_code.to_string(),
            area_code.to_string(),
            year,
        );

        if let Some(cached) = self.cache.get(&key) {
            debug!("OEWS cache hit for {}/{}/{}", occupation_code, area_code, year);
            return Some(cached.clone());
        }

        let wage_data = self.fetch(occupation_code, area_code, year)?;
        self.cache.insert(key, wage_data.clone());
        Some(wage_data)
    }
}

#[derive(Debug, Deserialize)]
struct BlsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Vec<String>,
    #[serde(rename = "Results", default)]
    results: BlsResults,
}

#[derive(Debug, Default, Deserialize)]
struct BlsResults {
    #[serde(default)]
    series: Vec<BlsSeries>,
}

#[derive(Debug, Deserialize)]
struct BlsSeries {
    #[serde(rename = "seriesID", default)]
    series_id: String,
    #[serde(default)]
    data: Vec<BlsDataPoint>,
}

#[derive(Debug, Deserialize)]
struct BlsDataPoint {
    #[serde(default)]
    year: String,
    #[serde(default)]
    value: String,
}

/// Estimate the percentile rank of a salary from known percentile anchors
///
/// Linear interpolation between bracketing anchor points. Below the lowest
/// anchor, extrapolates linearly from zero; above the highest, extrapolates
/// toward an assumed 99th percentile at 1.5x the top anchor wage, capped at
/// 99. Requires at least two anchors; returns None otherwise.
pub fn estimate_percentile(salary: f64, wage_data: &WageData) -> Option<f64> {
    let mut points: Vec<(f64, f64)> = Vec::new();
    if let Some(w) = wage_data.pct_10 {
        points.push((10.0, w));
    }
    if let Some(w) = wage_data.pct_25 {
        points.push((25.0, w));
    }
    if let Some(w) = wage_data.median_annual {
        points.push((50.0, w));
    }
    if let Some(w) = wage_data.pct_75 {
        points.push((75.0, w));
    }
    if let Some(w) = wage_data.pct_90 {
        points.push((90.0, w));
    }

    points.retain(|(_, wage)| *wage > 0.0);
    if points.len() < 2 {
        return None;
    }

    points.sort_by(|a, b| a.1.total_cmp(&b.1));

    let (lowest_pct, lowest_wage) = points[0];
    if salary <= lowest_wage {
        return Some((lowest_pct * (salary / lowest_wage)).max(0.0));
    }

    let (highest_pct, highest_wage) = points[points.len() - 1];
    if salary >= highest_wage {
        let pct_99_estimate = highest_wage * 1.5;
        let excess_ratio = (salary - highest_wage) / (pct_99_estimate - highest_wage);
        return Some((highest_pct + (99.0 - highest_pct) * excess_ratio).min(99.0));
    }

    for pair in points.windows(2) {
        let (lower_pct, lower_wage) = pair[0];
        let (upper_pct, upper_wage) = pair[1];
        if lower_wage <= salary && salary <= upper_wage {
            let ratio = (salary - lower_wage) / (upper_wage - lower_wage);
            return Some(lower_pct + ratio * (upper_pct - lower_pct));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_wage_data() -> WageData {
        WageData {
            occupation_code: "15-1252".into(),
            area_code: "0000000".into(),
            pct_10: Some(70000.0),
            pct_25: Some(90000.0),
            median_annual: Some(120000.0),
            pct_75: Some(150000.0),
            pct_90: Some(180000.0),
            year: 2023,
            ..Default::default()
        }
    }

    #[test]
    fn test_series_id_national() {
        let id = OewsClient::build_series_id("0000000", "15-1252", "mean_annual");
        assert_eq!(id, "OEUM000000000000015125204");
    }

    #[test]
    fn test_series_id_metro_median() {
        let id = OewsClient::build_series_id("41860", "15-1252", "median");
        assert!(id.starts_with("OEUM0041860"));
        assert!(id.contains("151252"));
        assert!(id.ends_with("08"));
    }

    #[test]
    fn test_percentile_at_median() {
        let pct = estimate_percentile(120000.0, &sample_wage_data()).unwrap();
        assert!((pct - 50.0).abs() <= 1.0);
    }

    #[test]
    fn test_percentile_at_75th() {
        let pct = estimate_percentile(150000.0, &sample_wage_data()).unwrap();
        assert!((pct - 75.0).abs() <= 1.0);
    }

    #[test]
    fn test_percentile_interpolates_between_anchors() {
        let pct = estimate_percentile(135000.0, &sample_wage_data()).unwrap();
        assert!(pct > 50.0 && pct < 75.0);
    }

    #[test]
    fn test_percentile_below_lowest_anchor() {
        let pct = estimate_percentile(35000.0, &sample_wage_data()).unwrap();
        assert!(pct >= 0.0 && pct < 10.0);
    }

    #[test]
    fn test_percentile_above_highest_anchor() {
        let pct = estimate_percentile(250000.0, &sample_wage_data()).unwrap();
        assert!(pct > 90.0 && pct <= 99.0);
    }

    #[test]
    fn test_percentile_capped_at_99() {
        let pct = estimate_percentile(10_000_000.0, &sample_wage_data()).unwrap();
        assert_eq!(pct, 99.0);
    }

    #[test]
    fn test_percentile_monotonic_in_salary() {
        let data = sample_wage_data();
        let salaries = [20000.0, 70000.0, 100000.0, 150000.0, 200000.0, 300000.0];
        let pcts: Vec<f64> = salaries
            .iter()
            .map(|s| estimate_percentile(*s, &data).unwrap())
            .collect();

        for pair in pcts.windows(2) {
            assert!(pair[0] <= pair[1], "percentiles not monotonic: {:?}", pcts);
        }
    }

    #[test]
    fn test_cache_short_circuits_fetch() {
        let mut client = OewsClient::new(None);
        let key = ("15-1252".to_string(), "0000000".to_string(), 2023);
        client.cache.insert(key, sample_wage_data());

        // Served from cache; no request is issued for a cached key
        let data = client.get_wage_data("15-1252", "0000000", 2023).unwrap();
        assert_eq!(data.median_annual, Some(120000.0));
    }

    #[test]
    fn test_percentile_requires_two_anchors() {
        let sparse = WageData {
            median_annual: Some(120000.0),
            ..Default::default()
        };
        assert!(estimate_percentile(100000.0, &sparse).is_none());
    }

    #[test]
    fn test_percentile_with_partial_anchors() {
        let partial = WageData {
            pct_25: Some(90000.0),
            median_annual: Some(120000.0),
            pct_75: Some(150000.0),
            ..Default::default()
        };
        let pct = estimate_percentile(120000.0, &partial).unwrap();
        assert!((pct - 50.0).abs() <= 1.0);
    }
}
