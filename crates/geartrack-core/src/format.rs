//! Fixed-locale display formatting (Brazilian Portuguese numbers, BRL)
//!
//! Rounding is half away from zero at the displayed precision. Dates are
//! formatted from their calendar fields only.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Currency prefix for formatted amounts
pub const CURRENCY_PREFIX: &str = "R$ ";

/// Round to `places` decimals, half away from zero
pub fn round_half_up(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed-point digits with exactly `places` decimals, '.' as separator
fn fixed(value: Decimal, places: u32) -> String {
    let mut rounded = round_half_up(value, places);
    rounded.rescale(places);
    rounded.to_string()
}

/// `1200` -> `1200,00` for two places. No thousands separator.
pub fn format_decimal_comma(value: Decimal, places: u32) -> String {
    fixed(value, places).replace('.', ",")
}

/// `1234.5` -> `R$ 1.234,50`
pub fn format_currency(value: Decimal) -> String {
    let digits = fixed(value, 2);
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
    format!(
        "{}{}{},{}",
        sign,
        CURRENCY_PREFIX,
        group_thousands(int_part),
        frac_part
    )
}

/// Precomputed share percentage as `40,0`, or `0` when the total it was
/// taken from is not positive
pub fn format_share(share_percent: Decimal, total: Decimal) -> String {
    if total > Decimal::ZERO {
        format_decimal_comma(share_percent, 1)
    } else {
        "0".to_string()
    }
}

/// `2023-10-01` -> `01/10/2023`
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `45000` -> `45.000 km`
pub fn format_mileage(km: u32) -> String {
    format!("{} km", group_thousands(&km.to_string()))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec("1234.5")), "R$ 1.234,50");
        assert_eq!(format_currency(dec("1200")), "R$ 1.200,00");
        assert_eq!(format_currency(dec("0")), "R$ 0,00");
        assert_eq!(format_currency(dec("999.999")), "R$ 1.000,00");
        assert_eq!(format_currency(dec("1234567.891")), "R$ 1.234.567,89");
        assert_eq!(format_currency(dec("-80.5")), "-R$ 80,50");
    }

    #[test]
    fn test_format_decimal_comma() {
        assert_eq!(format_decimal_comma(dec("1200"), 2), "1200,00");
        assert_eq!(format_decimal_comma(dec("1234567.8"), 2), "1234567,80");
        assert_eq!(format_decimal_comma(dec("0.125"), 2), "0,13");
        assert_eq!(format_decimal_comma(dec("33.35"), 1), "33,4");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(dec("40"), dec("2000")), "40,0");
        assert_eq!(format_share(dec("60"), dec("2000")), "60,0");
        assert_eq!(format_share(dec("33.333333"), dec("3")), "33,3");
        assert_eq!(format_share(dec("66.666667"), dec("3")), "66,7");
        assert_eq!(format_share(dec("0"), dec("-5")), "0");
        assert_eq!(format_share(dec("0"), dec("0")), "0");
    }

    #[test]
    fn test_format_date_br() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
        assert_eq!(format_date_br(date), "01/10/2023");
    }

    #[test]
    fn test_format_mileage() {
        assert_eq!(format_mileage(45000), "45.000 km");
        assert_eq!(format_mileage(999), "999 km");
        assert_eq!(format_mileage(1234567), "1.234.567 km");
    }
}
