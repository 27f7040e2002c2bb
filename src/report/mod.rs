//! ROI 报表: 汇总 + 阶梯卡片，支持文本 / JSON / CSV 输出

pub mod csv_export;
pub mod format;

use crate::error::ReportError;
use crate::models::{Scenario, TierCard, Totals};
use crate::service::{tier_cards, RoiCalculator};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub use format::{format_count, format_currency, format_hours, format_range};

/// 按文档类型的单量行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeLine {
    pub document_type: String,
    pub label: String,
    pub monthly_volume: u64,
    pub minutes_per_doc: BigDecimal,
    pub labor_minutes: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub partner_count: usize,
    pub hourly_rate: BigDecimal,
    pub error_pct: BigDecimal,
    pub volumes: Vec<VolumeLine>,
    pub tier_cards: Vec<TierCard>,
    pub totals: Totals,
}

impl Report {
    pub fn build(
        scenario: &Scenario,
        calculator: &RoiCalculator,
        first_price_override: Option<&BigDecimal>,
    ) -> Self {
        let totals = scenario.totals(calculator);
        let charges = calculator.schedule().tier_charges(totals.monthly_transactions);
        let cards = tier_cards(
            &scenario.tiers,
            &charges,
            totals.monthly_transactions,
            first_price_override,
        );

        let volumes = totals
            .total_by_type
            .iter()
            .map(|(key, volume)| {
                let minutes_per_doc = scenario.minutes.minutes(key.as_str());
                VolumeLine {
                    document_type: key.to_string(),
                    label: key.friendly_label(),
                    monthly_volume: *volume,
                    labor_minutes: &minutes_per_doc * &BigDecimal::from(*volume),
                    minutes_per_doc,
                }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            partner_count: scenario.partners.len(),
            hourly_rate: scenario.hourly_rate.clone(),
            error_pct: scenario.error_pct.clone(),
            volumes,
            tier_cards: cards,
            totals,
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        let totals = &self.totals;
        let mut out = String::new();

        let _ = writeln!(out, "EDI ROI Summary ({} trading partners)", self.partner_count);
        let _ = writeln!(out);
        let _ = writeln!(out, "Monthly volume by document type");
        for line in &self.volumes {
            let _ = writeln!(
                out,
                "  {:<40} {:>10}  ({} min/doc)",
                line.label,
                format_count(line.monthly_volume),
                line.minutes_per_doc
            );
        }
        let _ = writeln!(out, "  {:<40} {:>10}", "Total", format_count(totals.monthly_transactions));
        let _ = writeln!(out);

        let _ = writeln!(out, "Tiers");
        for card in &self.tier_cards {
            let _ = writeln!(
                out,
                "  {:<8} {:<20} {:>14}",
                card.label,
                format_range(card.min, card.max),
                format_currency(&card.price)
            );
        }
        let _ = writeln!(out);

        let rows = [
            ("Monthly labor hours", format_hours(&totals.monthly_hours_saved)),
            ("Estimated error hours", format_hours(&totals.estimated_error_hours)),
            ("Monthly manual cost", format_currency(&totals.monthly_manual_cost)),
            ("Monthly EDI cost", format_currency(&totals.monthly_edi_cost)),
            ("Annual manual cost", format_currency(&totals.annual_manual_cost)),
            ("Annual EDI cost", format_currency(&totals.annual_edi_cost)),
            ("Net annual savings", format_currency(&totals.net_annual_savings)),
        ];
        for (name, value) in rows {
            let _ = writeln!(out, "  {:<24} {:>16}", name, value);
        }

        out
    }
}
