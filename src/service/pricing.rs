use crate::models::{PricingSchedule, PricingTier, TierCard};
use bigdecimal::{BigDecimal, Zero};
use std::sync::OnceLock;

/// 标准定价表 (进程内共享只读实例)
pub fn standard_schedule() -> &'static PricingSchedule {
    static STANDARD: OnceLock<PricingSchedule> = OnceLock::new();
    STANDARD.get_or_init(PricingSchedule::standard)
}

/// 按标准定价表计算每档月费
pub fn compute_tier_charges(monthly_transactions: u64) -> Vec<BigDecimal> {
    standard_schedule().tier_charges(monthly_transactions)
}

/// 各档费用之和
pub fn total_charge(charges: &[BigDecimal]) -> BigDecimal {
    charges
        .iter()
        .fold(BigDecimal::zero(), |acc, charge| acc + charge)
}

/// 已达到的阶梯: 从第一档到 `min <= total` 的最高档 (含)
pub fn reached_tiers(tiers: &[PricingTier], total_transactions: u64) -> &[PricingTier] {
    match tiers.iter().rposition(|t| t.min <= total_transactions) {
        Some(last) => &tiers[..=last],
        None => &[],
    }
}

/// 生成阶梯卡片
///
/// 第一档始终展示 (即使未达到)。卡片价格取同序号阶梯的计算费用，缺失时退回
/// 阶梯记录的 `monthly_cost`；`first_price_override` 可强制第一张卡片的标价。
pub fn tier_cards(
    tiers: &[PricingTier],
    charges: &[BigDecimal],
    total_transactions: u64,
    first_price_override: Option<&BigDecimal>,
) -> Vec<TierCard> {
    let reached = reached_tiers(tiers, total_transactions);
    let shown: &[PricingTier] = if reached.is_empty() {
        tiers.get(..1).unwrap_or(&[])
    } else {
        reached
    };

    shown
        .iter()
        .enumerate()
        .map(|(position, tier)| {
            let computed = charges.get(position).unwrap_or(&tier.monthly_cost);
            let price = match (position, first_price_override) {
                (0, Some(forced)) => forced.clone(),
                _ => computed.clone(),
            };
            TierCard {
                position,
                label: format!("Tier {}", position + 1),
                min: tier.min,
                max: tier.max,
                price,
                reached: position < reached.len(),
            }
        })
        .collect()
}
