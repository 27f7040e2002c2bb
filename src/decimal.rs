//! 金额与分钟的十进制辅助函数
//!
//! 外部输入 (浮点数) 在进入核心计算前统一转为 `BigDecimal`，
//! 负数、NaN、无穷大一律归零。

use bigdecimal::{BigDecimal, One, Zero};
use std::str::FromStr;

/// 浮点输入转十进制，越界值归零
pub fn non_negative(value: f64) -> BigDecimal {
    if !value.is_finite() || value <= 0.0 {
        return BigDecimal::zero();
    }
    // f64 的 Display 输出最短可回读表示 (0.015 -> "0.015")，避免二进制误差进入计算
    BigDecimal::from_str(&value.to_string()).unwrap_or_else(|_| BigDecimal::zero())
}

/// 负值归零
pub fn clamp_non_negative(value: BigDecimal) -> BigDecimal {
    if value < BigDecimal::zero() {
        BigDecimal::zero()
    } else {
        value
    }
}

/// 以分为单位的费率 (97 -> 0.97)
pub fn cents(amount: i64) -> BigDecimal {
    BigDecimal::from(amount) / BigDecimal::from(100)
}

/// 向上取整到 0.1
pub fn ceil_tenths(value: &BigDecimal) -> BigDecimal {
    let scaled = value * &BigDecimal::from(10);
    let truncated = scaled.with_scale(0);
    let ceiled = if truncated < scaled {
        truncated + BigDecimal::one()
    } else {
        truncated
    };
    ceiled / BigDecimal::from(10)
}

/// 四舍五入 (远离零) 到指定小数位
pub fn round_half_up(value: &BigDecimal, scale: i64) -> BigDecimal {
    if *value < BigDecimal::zero() {
        let magnitude = round_half_up(&-value.clone(), scale);
        return -magnitude;
    }
    let mut half = BigDecimal::from(5);
    for _ in 0..=scale {
        half = half / BigDecimal::from(10);
    }
    (value + &half).with_scale(scale)
}
