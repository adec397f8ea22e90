use time::Date;
use time::macros::format_description;

/// Parses a bill date in zero-padded `YYYY-MM-DD` form. Anything else,
/// including non-padded variants, is rejected rather than guessed at.
pub fn parse_bill_date(value: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, format).ok()
}
