use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};

static DATE_RE: OnceLock<Regex> = OnceLock::new();
static MONTH_RE: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn date_re() -> &'static Regex {
    DATE_RE.get_or_init(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("static pattern"))
}

#[allow(clippy::expect_used)]
fn month_re() -> &'static Regex {
    MONTH_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}$").expect("static pattern"))
}

/// `true` when `s` is a calendar date in canonical `DD/MM/YYYY` form.
pub(crate) fn is_valid_date(s: &str) -> bool {
    date_re().is_match(s)
}

/// `true` when `s` is a month key in canonical `YYYY-MM` form.
pub(crate) fn is_valid_month(s: &str) -> bool {
    month_re().is_match(s)
}

/// Derive the `YYYY-MM` month key from a `DD/MM/YYYY` date.
pub(crate) fn month_from_date(date: &str) -> Result<String> {
    let caps = date_re().captures(date).ok_or_else(|| {
        Error::Validation(format!("invalid date: {date} (expected DD/MM/YYYY)"))
    })?;
    Ok(format!("{}-{}", &caps[3], &caps[2]))
}

/// Lenient `D/M/YYYY` parse, used only for calendar ordering of daily
/// totals. Day and month may be unpadded here.
pub(crate) fn parse_dmy(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

/// Current wall-clock time as an RFC 3339 timestamp.
pub(crate) fn iso_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "dates_tests.rs"]
mod tests;
