use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a cell value that may come back display-formatted by the backing
/// store ("৳ 50,000", "50,000.00"). Strips every character except digits,
/// `.` and `-`, then parses; a value that still fails resolves to zero so
/// a scan never fails on a single malformed cell.
pub(crate) fn parse_number(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}
