use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::dates;
use crate::error::Result;
use crate::sheet::SheetStore;

/// Aggregated activity for one month, recomputed from a full scan of the
/// expense log.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthActivity {
    pub(crate) month: String,
    pub(crate) total_spent: Decimal,
    pub(crate) category_breakdown: BTreeMap<String, Decimal>,
    pub(crate) member_breakdown: BTreeMap<String, Decimal>,
    pub(crate) daily_totals: Vec<DailyTotal>,
}

/// Summed spend for one distinct date that has at least one expense.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DailyTotal {
    pub(crate) date: String,
    pub(crate) amount: Decimal,
}

/// Recompute totals and breakdowns for `month`. Records match on the
/// exact month key — no date-range inference. Pure read; no writes, no
/// side effects.
pub(crate) fn aggregate(store: &SheetStore, month: &str) -> Result<MonthActivity> {
    let expenses = store.list_expenses()?;

    let mut total_spent = Decimal::ZERO;
    let mut category_breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut member_breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut daily: BTreeMap<String, Decimal> = BTreeMap::new();

    for e in expenses.iter().filter(|e| e.month == month) {
        total_spent += e.amount;

        *category_breakdown
            .entry(e.category.as_str().to_string())
            .or_default() += e.amount;

        let member = if e.member_name.trim().is_empty() {
            "Unknown"
        } else {
            e.member_name.as_str()
        };
        *member_breakdown.entry(member.to_string()).or_default() += e.amount;

        if !e.date.is_empty() {
            *daily.entry(e.date.clone()).or_default() += e.amount;
        }
    }

    let mut daily_totals: Vec<DailyTotal> = daily
        .into_iter()
        .map(|(date, amount)| DailyTotal { date, amount })
        .collect();
    // Calendar order, not string order: "2/1/2024" before "10/1/2024".
    daily_totals.sort_by_key(|d| dates::parse_dmy(&d.date).unwrap_or(NaiveDate::MIN));

    Ok(MonthActivity {
        month: month.to_string(),
        total_spent,
        category_breakdown,
        member_breakdown,
        daily_totals,
    })
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
