use crate::decimal::cents;
use crate::error::PricingError;
use crate::ids::IdGenerator;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// 标准阶梯: (累计上限, 费率 分)，首档为固定月费
const STANDARD_RUNGS: [(u64, i64); 8] = [
    (150, 17_500),
    (1_000, 97),
    (5_000, 74),
    (8_000, 51),
    (12_000, 35),
    (15_000, 23),
    (50_000, 15),
    (100_000, 4),
];

/// 阶梯展示记录 (可编辑，仅决定展示哪些阶梯卡片)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub id: String,
    pub label: String,
    pub min: u64, // 含
    pub max: u64, // 仅展示
    pub monthly_cost: BigDecimal,
}

/// 定价阶梯的一档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rung {
    /// 累计上限
    pub threshold: u64,
    /// 首档为固定月费，其余为每笔边际费率
    pub rate: BigDecimal,
}

impl Rung {
    pub fn new(threshold: u64, rate: BigDecimal) -> Self {
        Self { threshold, rate }
    }
}

/// 叠加边际费率的定价表
///
/// 第一档无论是否用满都收取固定费用 (价格下限)；之后每档只对落在本档区间内的
/// 笔数按本档费率计费；超过最后一档上限的笔数全部按最后一档费率计入最后一档。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingSchedule {
    rungs: Vec<Rung>,
}

impl PricingSchedule {
    pub fn new(rungs: Vec<Rung>) -> Result<Self, PricingError> {
        if rungs.len() < 2 {
            return Err(PricingError::TooFewRungs(rungs.len()));
        }
        for (index, rung) in rungs.iter().enumerate() {
            if rung.rate < BigDecimal::zero() {
                return Err(PricingError::NegativeRate(index));
            }
            if index > 0 && rung.threshold <= rungs[index - 1].threshold {
                return Err(PricingError::NonIncreasingThreshold {
                    index,
                    threshold: rung.threshold,
                    previous: rungs[index - 1].threshold,
                });
            }
        }
        Ok(Self { rungs })
    }

    /// 标准 8 档定价表 ($175 起)
    pub fn standard() -> Self {
        Self {
            rungs: STANDARD_RUNGS
                .iter()
                .map(|&(threshold, rate)| Rung::new(threshold, cents(rate)))
                .collect(),
        }
    }

    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }

    /// 首档固定月费
    pub fn floor_fee(&self) -> &BigDecimal {
        &self.rungs[0].rate
    }

    /// 计算每档月费，结果长度与档数一致，总和即月度 EDI 费用
    pub fn tier_charges(&self, monthly_transactions: u64) -> Vec<BigDecimal> {
        let mut charges = Vec::with_capacity(self.rungs.len());

        // 首档: 固定收费
        charges.push(self.floor_fee().clone());
        let mut remaining = monthly_transactions.saturating_sub(self.rungs[0].threshold);

        // 逐档分配剩余笔数
        for pair in self.rungs.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            let in_rung = remaining.min(curr.threshold - prev.threshold);
            charges.push(&curr.rate * &BigDecimal::from(in_rung));
            remaining -= in_rung;
        }

        // 超出最后一档上限的部分并入最后一档
        if remaining > 0 {
            let top_rate = &self.rungs[self.rungs.len() - 1].rate;
            if let Some(last) = charges.last_mut() {
                *last += top_rate * &BigDecimal::from(remaining);
            }
        }

        charges
    }

    /// 从定价表派生展示阶梯 (Tier 1: 1-150, Tier 2: 151-1000, ...)
    pub fn display_tiers(&self, ids: &mut dyn IdGenerator) -> Vec<PricingTier> {
        let mut previous = 0u64;
        self.rungs
            .iter()
            .enumerate()
            .map(|(index, rung)| {
                let monthly_cost = if index == 0 {
                    rung.rate.clone()
                } else {
                    &rung.rate * &BigDecimal::from(rung.threshold - previous)
                };
                let tier = PricingTier {
                    id: ids.next_id(),
                    label: format!("Tier {}", index + 1),
                    min: previous + 1,
                    max: rung.threshold,
                    monthly_cost,
                };
                previous = rung.threshold;
                tier
            })
            .collect()
    }
}

impl Default for PricingSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
