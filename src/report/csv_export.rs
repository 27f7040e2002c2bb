//! CSV 导出: 阶梯卡片、按类型单量

use crate::error::ReportError;
use crate::report::format::format_range;
use crate::report::{Report, VolumeLine};
use bigdecimal::BigDecimal;
use csv::Writer;
use serde::Serialize;
use std::io;
use std::path::Path;

#[derive(Debug, Serialize)]
struct TierCardRow<'a> {
    tier: &'a str,
    range: String,
    min: u64,
    max: u64,
    monthly_cost: &'a BigDecimal,
    reached: bool,
}

pub fn write_tier_cards_csv<W: io::Write>(report: &Report, writer: W) -> Result<(), ReportError> {
    let mut writer = Writer::from_writer(writer);
    for card in &report.tier_cards {
        writer.serialize(TierCardRow {
            tier: &card.label,
            range: format_range(card.min, card.max),
            min: card.min,
            max: card.max,
            monthly_cost: &card.price,
            reached: card.reached,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_volumes_csv<W: io::Write>(volumes: &[VolumeLine], writer: W) -> Result<(), ReportError> {
    let mut writer = Writer::from_writer(writer);
    for line in volumes {
        writer.serialize(line)?;
    }
    writer.flush()?;
    Ok(())
}

/// 在目录下写出 `tier_cards.csv` 与 `volumes.csv`
pub fn write_report_csv(report: &Report, dir: &Path) -> Result<(), ReportError> {
    std::fs::create_dir_all(dir)?;
    write_tier_cards_csv(report, std::fs::File::create(dir.join("tier_cards.csv"))?)?;
    write_volumes_csv(&report.volumes, std::fs::File::create(dir.join("volumes.csv"))?)?;
    tracing::info!("CSV report written to {}", dir.display());
    Ok(())
}
