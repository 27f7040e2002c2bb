use crate::models::DocumentTypeKey;
use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// ROI 计算结果，每次输入变化整体重算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// 按文档类型汇总的月单量 (首次出现顺序)
    pub total_by_type: IndexMap<DocumentTypeKey, u64>,
    pub monthly_transactions: u64,
    pub monthly_labor_minutes: BigDecimal,
    /// 预计每月返工小时数 (每笔出错 10 分钟，向上取整到 0.1 小时)
    pub estimated_error_hours: BigDecimal,
    pub monthly_manual_cost: BigDecimal,
    pub annual_manual_cost: BigDecimal,
    pub monthly_edi_cost: BigDecimal,
    pub annual_edi_cost: BigDecimal,
    /// 可能为负
    pub net_annual_savings: BigDecimal,
    pub monthly_hours_saved: BigDecimal,
}

/// 阶梯卡片 (展示用)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCard {
    pub position: usize,
    pub label: String,
    pub min: u64,
    pub max: u64,
    pub price: BigDecimal,
    pub reached: bool,
}
