//! 金额、数量格式化 (USD)

use crate::decimal::round_half_up;
use bigdecimal::{BigDecimal, Zero};

/// `$1,234.57`，负数为 `-$400.00`
pub fn format_currency(value: &BigDecimal) -> String {
    let rounded = round_half_up(value, 2);
    let negative = rounded < BigDecimal::zero();
    let digits = if negative {
        (-rounded).to_string()
    } else {
        rounded.to_string()
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:0<2}", sign, group_thousands(whole), fraction)
}

/// 一位小数的小时数
pub fn format_hours(value: &BigDecimal) -> String {
    round_half_up(value, 1).to_string()
}

pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// 阶梯区间 `1,001 - 5,000`
pub fn format_range(min: u64, max: u64) -> String {
    format!("{} - {}", format_count(min), format_count(max))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(&BigDecimal::from(2_500)), "$2,500.00");
        assert_eq!(format_currency(&BigDecimal::from(-400)), "-$400.00");
        assert_eq!(format_currency(&BigDecimal::from_str("1234567.885").unwrap()), "$1,234,567.89");
        assert_eq!(format_currency(&BigDecimal::from_str("0.5").unwrap()), "$0.50");
        assert_eq!(format_currency(&BigDecimal::zero()), "$0.00");
    }

    #[test]
    fn test_format_count_and_range() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(100_000), "100,000");
        assert_eq!(format_range(50_001, 100_000), "50,001 - 100,000");
    }
}
