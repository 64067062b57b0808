//! Pure aggregation functions over a transaction snapshot.
//!
//! Provides the balance, per-category totals, month bucketing and
//! income/expense splits that back the dashboard and statistics views.
//! Nothing here touches storage; every function recomputes from the ordered
//! snapshot it is given and is safe to call repeatedly for re-renders.

use std::collections::BTreeMap;

use time::{Month, OffsetDateTime, UtcOffset};

use crate::models::Transaction;

/// The number of month buckets offered by the monthly statistics views.
const RECENT_MONTH_COUNT: usize = 12;

/// The sum of all signed amounts in the snapshot.
///
/// Expenses are stored negative and income positive, so this is the running
/// balance.
pub fn balance(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(Transaction::amount)
        .sum()
}

/// The canonical "Month Year" label for `timestamp`, e.g. "January 2026".
///
/// The timestamp is converted to `offset` first so that buckets follow the
/// user's local calendar. Pass [`UtcOffset::UTC`] when no local offset
/// applies.
pub fn month_bucket(timestamp: OffsetDateTime, offset: UtcOffset) -> String {
    let local = timestamp.to_offset(offset);

    format!("{} {}", local.month(), local.year())
}

/// The labels of the last 12 month buckets ending at `now`'s month, most
/// recent first.
///
/// `now` should already carry the offset of the local calendar.
pub fn recent_months(now: OffsetDateTime) -> Vec<String> {
    let mut month = now.month();
    let mut year = now.year();
    let mut labels = Vec::with_capacity(RECENT_MONTH_COUNT);

    for _ in 0..RECENT_MONTH_COUNT {
        labels.push(format!("{month} {year}"));

        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    labels
}

/// Group the snapshot by category label and sum the signed amounts.
///
/// When `month` is given, only transactions whose [month_bucket] matches are
/// counted. Categories whose amounts cancel out to exactly zero are retained;
/// chart consumers that want them dropped should use [category_shares].
pub fn totals_by_category(
    transactions: &[Transaction],
    month: Option<&str>,
    offset: UtcOffset,
) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();

    for transaction in transactions {
        if let Some(month) = month
            && month_bucket(*transaction.date(), offset) != month
        {
            continue;
        }

        *totals
            .entry(transaction.category().to_string())
            .or_insert(0.0) += transaction.amount();
    }

    totals
}

/// A category's share of the total magnitude, for chart legends.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    /// The category label.
    pub category: String,
    /// The signed total for the category.
    pub total: f64,
    /// The category's rounded percentage of the total magnitude.
    ///
    /// Percentages are rounded independently, so they can drift from summing
    /// to exactly 100 by up to one point per category.
    pub percent: i32,
}

/// Per-category totals with their percentage of the overall magnitude.
///
/// Categories with a net total of exactly zero are excluded, matching the
/// chart consumers. Returns an empty vector when there is no data or the
/// total magnitude is zero, so callers never divide by zero.
pub fn category_shares(
    transactions: &[Transaction],
    month: Option<&str>,
    offset: UtcOffset,
) -> Vec<CategoryShare> {
    let totals = totals_by_category(transactions, month, offset);

    let total_magnitude: f64 = totals.values().map(|total| total.abs()).sum();
    if total_magnitude == 0.0 {
        return Vec::new();
    }

    totals
        .into_iter()
        .filter(|(_, total)| *total != 0.0)
        .map(|(category, total)| CategoryShare {
            category,
            percent: percentage_share(total, total_magnitude),
            total,
        })
        .collect()
}

/// The income and expense totals of one month bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthSplit {
    /// Sum of the positive amounts in the month.
    pub income: f64,
    /// Absolute value of the sum of the negative amounts in the month.
    pub expenses: f64,
}

/// Split the snapshot's amounts into income and expense totals for one month
/// bucket.
pub fn split_income_expense(
    transactions: &[Transaction],
    month: &str,
    offset: UtcOffset,
) -> MonthSplit {
    let in_month = transactions
        .iter()
        .filter(|transaction| month_bucket(*transaction.date(), offset) == month);

    let mut income = 0.0;
    let mut expense_sum = 0.0;
    for transaction in in_month {
        if transaction.amount() > 0.0 {
            income += transaction.amount();
        } else {
            expense_sum += transaction.amount();
        }
    }

    MonthSplit {
        income,
        expenses: expense_sum.abs(),
    }
}

/// `category_total`'s share of `total_magnitude` as a rounded integer
/// percentage.
///
/// The caller must guard against `total_magnitude == 0`, which means "no
/// data" rather than a percentage.
pub fn percentage_share(category_total: f64, total_magnitude: f64) -> i32 {
    (category_total.abs() / total_magnitude * 100.0).round() as i32
}
