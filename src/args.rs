use crate::error::{ArgsError, ExportError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Length of the short-MD5 identifiers Basis uses as usernames.
pub const SHORT_MD5_LEN: usize = 24;

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Returns true when `value` is exactly 24 lowercase hex characters.
pub fn is_short_md5(value: &str) -> bool {
    value.len() == SHORT_MD5_LEN && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// A validated Basis username.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ArgsError> {
        let raw = raw.into();
        if is_short_md5(&raw) {
            Ok(Self(raw))
        } else {
            Err(ArgsError::InvalidUsername(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = ArgsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a user supplied date into its UTC calendar date.
///
/// Accepts plain dates (`2015-03-04`, `2015/03/04`, `03/04/2015`,
/// `March 4, 2015`, `Mar 4 2015`), partial ISO dates (`2015-03`, `2015`)
/// which resolve to the first day of the period, naive timestamps with or
/// without seconds which are read as UTC, and RFC 3339 / RFC 2822
/// timestamps, which are converted to UTC before the time of day is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|ts| ts.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        })
        .or_else(|| parse_partial(raw))
}

/// `YYYY-MM` or `YYYY`, anchored to the first day.
fn parse_partial(raw: &str) -> Option<NaiveDate> {
    if !raw.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let padded = match raw.len() {
        4 => format!("{raw}-01-01"),
        7 => format!("{raw}-01"),
        _ => return None,
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d").ok()
}

/// Command-line values as given, before validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawArgs<'a> {
    pub username: Option<&'a str>,
    pub date: Option<&'a str>,
    pub pretty: bool,
}

impl RawArgs<'_> {
    pub fn resolve(self) -> Result<ExportArgs, ExportError> {
        Ok(ExportArgs::resolve(self.username, self.date, self.pretty)?)
    }
}

/// Validated invocation parameters, resolved once and passed down by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    pub username: Username,
    pub date: Option<NaiveDate>,
    pub pretty: bool,
}

impl ExportArgs {
    /// Validate raw command-line values in order: username presence,
    /// username format, then the optional date.
    pub fn resolve(
        username: Option<&str>,
        date: Option<&str>,
        pretty: bool,
    ) -> Result<Self, ArgsError> {
        let username = username
            .filter(|u| !u.is_empty())
            .ok_or(ArgsError::MissingArgument)?;
        let username = Username::parse(username)?;
        let date = date
            .map(|raw| {
                parse_date(raw)
                    // the request window needs the day after
                    .filter(|d| d.succ_opt().is_some())
                    .ok_or_else(|| ArgsError::InvalidDate(raw.to_string()))
            })
            .transpose()?;
        Ok(Self {
            username,
            date,
            pretty,
        })
    }
}
