use std::cmp::Ordering;

use crate::bill::Bill;
use crate::date::parse_bill_date;

/// Orders bills most recent first. Dates are compared as calendar values,
/// never as raw strings; entries whose date fails to parse sort after every
/// dated entry. Equal dates keep their original relative order.
pub fn sort_bills_latest_first(bills: &mut [Bill]) {
    bills.sort_by(|left, right| compare_dates_latest_first(&left.date, &right.date));
}

fn compare_dates_latest_first(left: &str, right: &str) -> Ordering {
    match (parse_bill_date(left), parse_bill_date(right)) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
