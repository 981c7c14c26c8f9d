use crate::args::Username;
use crate::error::ExportError;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use reqwest::Url;

pub const BASE_URL: &str = "https://app.mybasis.com/api/v1/chart/";

/// Sampling interval, in seconds, for the chart series.
const INTERVAL: u32 = 60;
const OFFSET: u32 = 0;
const UNITS: &str = "ms";

/// Data categories requested from the chart endpoint.
const CATEGORIES: [&str; 6] = [
    "heartrate",
    "steps",
    "calories",
    "gsr",
    "skin_temp",
    "bodystates",
];

/// One-day `[start, end)` window of data to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Window beginning on `start`; `None` if `start` has no following day.
    pub fn starting(start: NaiveDate) -> Option<Self> {
        let end = start.succ_opt()?;
        Some(Self { start, end })
    }

    /// Window for `date`, or for yesterday (UTC) when no date is given.
    pub fn for_date(date: Option<NaiveDate>) -> Result<Self, ExportError> {
        Self::for_date_at(date, Utc::now())
    }

    /// Same as [`DateRange::for_date`] with "now" supplied by the caller.
    pub fn for_date_at(date: Option<NaiveDate>, now: DateTime<Utc>) -> Result<Self, ExportError> {
        let start = date.unwrap_or_else(|| (now - TimeDelta::days(1)).date_naive());
        Self::starting(start).ok_or(ExportError::DateOutOfRange(start))
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Fully assembled chart request: endpoint plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub endpoint: String,
    pub query: Vec<(&'static str, String)>,
}

impl RequestSpec {
    pub fn build(base_url: &str, username: &Username, range: DateRange) -> Self {
        let endpoint = format!("{}{}.json", base_url, username);
        let mut query = vec![
            ("summary", "true".to_string()),
            ("interval", INTERVAL.to_string()),
            ("start_date", range.start_str()),
            ("start_offset", OFFSET.to_string()),
            ("end_date", range.end_str()),
            ("end_offset", OFFSET.to_string()),
            ("units", UNITS.to_string()),
        ];
        query.extend(CATEGORIES.iter().map(|c| (*c, "true".to_string())));
        Self { endpoint, query }
    }

    /// Value of the query parameter `key`, if present.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Endpoint with the query string appended.
    pub fn url(&self) -> Result<Url, ExportError> {
        Url::parse_with_params(&self.endpoint, &self.query)
            .map_err(|e| ExportError::InvalidUrl(format!("{}: {}", self.endpoint, e)))
    }
}

/// Build the chart request for `username` against the public Basis API.
pub fn build_request(username: &Username, date: Option<NaiveDate>) -> Result<RequestSpec, ExportError> {
    let range = DateRange::for_date(date)?;
    Ok(RequestSpec::build(BASE_URL, username, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user() -> Username {
        Username::parse("aaaaaaaaaaaaaaaaaaaaaaaa").unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_for_explicit_date() {
        let now = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let range = DateRange::for_date_at(Some(ymd(2015, 3, 4)), now).unwrap();
        assert_eq!(range.start_str(), "2015-03-04");
        assert_eq!(range.end_str(), "2015-03-05");
    }

    #[test]
    fn range_crosses_month_year_and_leap_day() {
        assert_eq!(DateRange::starting(ymd(2015, 12, 31)).unwrap().end, ymd(2016, 1, 1));
        assert_eq!(DateRange::starting(ymd(2016, 2, 28)).unwrap().end, ymd(2016, 2, 29));
        assert_eq!(DateRange::starting(ymd(2015, 2, 28)).unwrap().end, ymd(2015, 3, 1));
    }

    #[test]
    fn range_defaults_to_yesterday_utc() {
        let now = Utc.with_ymd_and_hms(2015, 3, 5, 0, 30, 0).unwrap();
        let range = DateRange::for_date_at(None, now).unwrap();
        assert_eq!(range.start, ymd(2015, 3, 4));
        assert_eq!(range.end, ymd(2015, 3, 5));
    }

    #[test]
    fn default_range_follows_the_clock() {
        let before = Utc.with_ymd_and_hms(2015, 3, 5, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2015, 3, 6, 0, 0, 1).unwrap();
        let a = DateRange::for_date_at(None, before).unwrap();
        let b = DateRange::for_date_at(None, after).unwrap();
        assert_ne!(a, b);
        assert_eq!(b.start, a.end);
    }

    #[test]
    fn unanchored_range_is_one_day_long() {
        let range = DateRange::for_date(None).unwrap();
        assert_eq!(range.end - range.start, TimeDelta::days(1));
    }

    #[test]
    fn range_without_following_day_is_an_error() {
        assert!(DateRange::starting(NaiveDate::MAX).is_none());
        assert!(matches!(
            DateRange::for_date_at(Some(NaiveDate::MAX), Utc::now()),
            Err(ExportError::DateOutOfRange(d)) if d == NaiveDate::MAX
        ));
    }

    #[test]
    fn request_endpoint_ends_with_username() {
        let spec = build_request(&user(), None).unwrap();
        assert_eq!(
            spec.endpoint,
            "https://app.mybasis.com/api/v1/chart/aaaaaaaaaaaaaaaaaaaaaaaa.json"
        );
        assert!(spec.endpoint.ends_with("aaaaaaaaaaaaaaaaaaaaaaaa.json"));
    }

    #[test]
    fn request_carries_fixed_parameters() {
        let range = DateRange::starting(ymd(2015, 3, 4)).unwrap();
        let spec = RequestSpec::build(BASE_URL, &user(), range);
        let expected = [
            ("summary", "true"),
            ("interval", "60"),
            ("start_date", "2015-03-04"),
            ("start_offset", "0"),
            ("end_date", "2015-03-05"),
            ("end_offset", "0"),
            ("units", "ms"),
            ("heartrate", "true"),
            ("steps", "true"),
            ("calories", "true"),
            ("gsr", "true"),
            ("skin_temp", "true"),
            ("bodystates", "true"),
        ];
        assert_eq!(spec.query.len(), expected.len());
        for (key, value) in expected {
            assert_eq!(spec.param(key), Some(value), "parameter {key}");
        }
    }

    #[test]
    fn url_encodes_query() {
        let range = DateRange::starting(ymd(2015, 3, 4)).unwrap();
        let url = RequestSpec::build(BASE_URL, &user(), range).url().unwrap();
        assert_eq!(url.path(), "/api/v1/chart/aaaaaaaaaaaaaaaaaaaaaaaa.json");
        let query = url.query().unwrap();
        assert!(query.starts_with("summary=true&interval=60&start_date=2015-03-04"));
        assert!(query.ends_with("skin_temp=true&bodystates=true"));
    }

    #[test]
    fn url_rejects_bad_base() {
        let range = DateRange::starting(ymd(2015, 3, 4)).unwrap();
        let spec = RequestSpec::build("not a url/", &user(), range);
        assert!(matches!(spec.url(), Err(ExportError::InvalidUrl(_))));
    }
}
