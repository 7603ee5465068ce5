//! Revenue consolidation of finished service orders
//!
//! Pure functions over a slice of service orders. Only finished orders take
//! part; everything else is dropped before bucketing.
//!
//! - Monthly: always 12 buckets (Jan..Dec) for the selected year
//! - Quarterly: always 4 buckets for the selected year
//! - Annual: one bucket per year that has finished orders, newest first;
//!   the selected year is ignored

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Local};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Bucket, Consolidation, ServiceOrder, ViewType};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const QUARTER_LABELS: [&str; 4] = [
    "1st Quarter (Jan-Mar)",
    "2nd Quarter (Apr-Jun)",
    "3rd Quarter (Jul-Sep)",
    "4th Quarter (Oct-Dec)",
];

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Current calendar year in local time
pub fn current_year() -> i32 {
    Local::now().year()
}

/// `value` as a percentage of `total`; zero unless the total is positive.
/// `None` when the percentage does not fit in a `Decimal`.
pub fn share_percent(value: Decimal, total: Decimal) -> Option<Decimal> {
    if total > Decimal::ZERO {
        value.checked_div(total)?.checked_mul(ONE_HUNDRED)
    } else {
        Some(Decimal::ZERO)
    }
}

fn overflow(what: &str) -> Error {
    Error::InvalidData(format!("{} overflows the supported money range", what))
}

/// Years offered by the report year selector: the current year plus every
/// entry year of a finished order, newest first
pub fn available_years(orders: &[ServiceOrder], current_year: i32) -> Vec<i32> {
    let mut years: BTreeSet<i32> = orders
        .iter()
        .filter(|o| o.is_finished())
        .map(|o| o.entry_date.year())
        .collect();
    years.insert(current_year);
    years.into_iter().rev().collect()
}

/// Group finished orders into period buckets and derive the totals.
///
/// Fails with [`Error::InvalidData`] when a sum or share leaves the range
/// of `Decimal`.
pub fn consolidate(
    orders: &[ServiceOrder],
    view: ViewType,
    selected_year: i32,
) -> Result<Consolidation> {
    let finished = orders.iter().filter(|o| o.is_finished());

    let mut buckets = match view {
        ViewType::Monthly => {
            let mut buckets: Vec<Bucket> = MONTH_LABELS.iter().map(|l| Bucket::empty(*l)).collect();
            for order in finished.filter(|o| o.entry_date.year() == selected_year) {
                add_order(&mut buckets[order.entry_date.month0() as usize], order)?;
            }
            buckets
        }
        ViewType::Quarterly => {
            let mut buckets: Vec<Bucket> =
                QUARTER_LABELS.iter().map(|l| Bucket::empty(*l)).collect();
            for order in finished.filter(|o| o.entry_date.year() == selected_year) {
                add_order(&mut buckets[(order.entry_date.month0() / 3) as usize], order)?;
            }
            buckets
        }
        ViewType::Annual => {
            let mut by_year: BTreeMap<i32, Bucket> = BTreeMap::new();
            for order in finished {
                let year = order.entry_date.year();
                let bucket = by_year
                    .entry(year)
                    .or_insert_with(|| Bucket::empty(year.to_string()));
                add_order(bucket, order)?;
            }
            by_year.into_values().rev().collect()
        }
    };

    let total_value = buckets
        .iter()
        .try_fold(Decimal::ZERO, |acc, b| acc.checked_add(b.value))
        .ok_or_else(|| overflow("Revenue total"))?;
    let total_count: i64 = buckets.iter().map(|b| b.count).sum();
    let average_ticket = if total_count > 0 {
        total_value
            .checked_div(Decimal::from(total_count))
            .ok_or_else(|| overflow("Average ticket"))?
    } else {
        Decimal::ZERO
    };
    for bucket in &mut buckets {
        bucket.share_percent = share_percent(bucket.value, total_value)
            .ok_or_else(|| overflow(&format!("Share of {}", bucket.label)))?;
    }
    let max_value = buckets
        .iter()
        .map(|b| b.value)
        .max()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ONE);

    Ok(Consolidation {
        view,
        year: match view {
            ViewType::Annual => None,
            _ => Some(selected_year),
        },
        buckets,
        total_value,
        total_count,
        average_ticket,
        max_value,
    })
}

fn add_order(bucket: &mut Bucket, order: &ServiceOrder) -> Result<()> {
    bucket.value = bucket
        .value
        .checked_add(order.value)
        .ok_or_else(|| overflow(&format!("Revenue for {}", bucket.label)))?;
    bucket.count += 1;
    Ok(())
}
