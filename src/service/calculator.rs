use crate::decimal::{ceil_tenths, clamp_non_negative, non_negative};
use crate::models::{DocumentTypeKey, MinutesPerDocumentType, PricingSchedule, Totals, TradingPartner};
use crate::service::pricing::{standard_schedule, total_charge};
use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 每笔出错交易的返工分钟数
pub const REWORK_MINUTES_PER_ERROR: i64 = 10;

/// 返工时间并入人工分钟数的方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorBufferUnits {
    /// 返工小时数直接加到分钟数上 (沿用既有报价口径)
    #[default]
    Reference,
    /// 返工小时数先换算为分钟再相加
    Minutes,
}

/// ROI 计算服务: 人工成本 vs 阶梯 EDI 费用
#[derive(Debug, Clone)]
pub struct RoiCalculator {
    schedule: PricingSchedule,
    error_units: ErrorBufferUnits,
}

impl Default for RoiCalculator {
    /// 标准定价表 (共享实例的副本) + 既有返工口径
    fn default() -> Self {
        Self::new(standard_schedule().clone(), ErrorBufferUnits::default())
    }
}

impl RoiCalculator {
    pub fn new(schedule: PricingSchedule, error_units: ErrorBufferUnits) -> Self {
        Self {
            schedule,
            error_units,
        }
    }

    pub fn schedule(&self) -> &PricingSchedule {
        &self.schedule
    }

    pub fn error_units(&self) -> ErrorBufferUnits {
        self.error_units
    }

    /// 计算汇总，纯函数，不修改输入
    pub fn compute(
        &self,
        partners: &[TradingPartner],
        minutes: &MinutesPerDocumentType,
        hourly_rate: &BigDecimal,
        error_pct: &BigDecimal,
    ) -> Totals {
        let hourly_rate = clamp_non_negative(hourly_rate.clone());
        let error_pct = clamp_non_negative(error_pct.clone());

        // 1. 按文档类型汇总单量
        let total_by_type = aggregate_by_type(partners);

        // 2. 月交易总笔数
        let monthly_transactions = total_by_type
            .values()
            .fold(0u64, |acc, v| acc.saturating_add(*v));

        // 3. 人工分钟数
        let monthly_labor_minutes = labor_minutes(&total_by_type, minutes);

        // 4. 返工小时数
        let estimated_error_hours = estimated_error_hours(monthly_transactions, &error_pct);
        let error_term = match self.error_units {
            ErrorBufferUnits::Reference => estimated_error_hours.clone(),
            ErrorBufferUnits::Minutes => &estimated_error_hours * &BigDecimal::from(60),
        };

        // 5. 年人工成本 = (分钟 + 返工) / 60 * 时薪 * 12
        let annual_manual_cost = ((&monthly_labor_minutes + &error_term)
            * hourly_rate
            * BigDecimal::from(12))
            / BigDecimal::from(60);
        let monthly_manual_cost = annual_manual_cost.clone() / BigDecimal::from(12);

        // 6. EDI 费用
        let charges = self.schedule.tier_charges(monthly_transactions);
        let monthly_edi_cost = total_charge(&charges);
        let annual_edi_cost = &monthly_edi_cost * &BigDecimal::from(12);

        // 7. 年净节省 (可能为负)
        let net_annual_savings = &annual_manual_cost - &annual_edi_cost;

        // 8. 每月节省工时
        let monthly_hours_saved = monthly_labor_minutes.clone() / BigDecimal::from(60);

        tracing::debug!(
            "totals: {} transactions, {} labor minutes, manual {} / EDI {} per year",
            monthly_transactions,
            monthly_labor_minutes,
            annual_manual_cost,
            annual_edi_cost
        );

        Totals {
            total_by_type,
            monthly_transactions,
            monthly_labor_minutes,
            estimated_error_hours,
            monthly_manual_cost,
            annual_manual_cost,
            monthly_edi_cost,
            annual_edi_cost,
            net_annual_savings,
            monthly_hours_saved,
        }
    }
}

/// 以标准定价表和既有返工口径计算汇总
pub fn compute_totals(
    partners: &[TradingPartner],
    minutes: &MinutesPerDocumentType,
    hourly_rate: f64,
    error_pct_fraction: f64,
) -> Totals {
    RoiCalculator::default().compute(
        partners,
        minutes,
        &non_negative(hourly_rate),
        &non_negative(error_pct_fraction),
    )
}

/// 汇总所有伙伴的各类型单量，保持首次出现顺序 (饱和相加)
pub fn aggregate_by_type(partners: &[TradingPartner]) -> IndexMap<DocumentTypeKey, u64> {
    let mut total_by_type: IndexMap<DocumentTypeKey, u64> = IndexMap::new();
    for partner in partners {
        for (key, volume) in &partner.docs {
            let total = total_by_type.entry(key.clone()).or_insert(0);
            *total = total.saturating_add(*volume);
        }
    }
    total_by_type
}

/// Σ 单量 × 每单分钟数 (缺失分钟按 0)
pub fn labor_minutes(
    total_by_type: &IndexMap<DocumentTypeKey, u64>,
    minutes: &MinutesPerDocumentType,
) -> BigDecimal {
    total_by_type
        .iter()
        .fold(BigDecimal::zero(), |acc, (key, count)| {
            acc + BigDecimal::from(*count) * minutes.minutes(key.as_str())
        })
}

/// ceil(笔数 × 出错率 × 10/60 × 10) / 10
pub fn estimated_error_hours(monthly_transactions: u64, error_pct: &BigDecimal) -> BigDecimal {
    let hours = (BigDecimal::from(monthly_transactions)
        * clamp_non_negative(error_pct.clone())
        * BigDecimal::from(REWORK_MINUTES_PER_ERROR))
        / BigDecimal::from(60);
    ceil_tenths(&hours)
}
