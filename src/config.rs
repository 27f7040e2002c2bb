use crate::decimal::non_negative;
use crate::error::PricingError;
use crate::models::{PricingSchedule, Rung};
use crate::service::{ErrorBufferUnits, RoiCalculator};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 环境变量前缀，如 `EDI_ROI__REPORT__FORMAT=json`
pub const ENV_PREFIX: &str = "EDI_ROI";

/// 指向配置文件的环境变量
pub const CONFIG_PATH_VAR: &str = "EDI_ROI_CONFIG";

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub calculator: CalculatorConfig,
    pub pricing: PricingConfig,
    pub display: DisplayConfig,
    pub report: ReportConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub error_buffer_units: ErrorBufferUnits,
}

/// 自定义定价阶梯，未配置时使用标准定价表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub rungs: Option<Vec<RungConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RungConfig {
    pub threshold: u64,
    pub rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 第一张阶梯卡片的强制标价 (如 185)，不影响计费
    pub first_tier_label_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// 命令行未指定场景文件时使用
    pub scenario_path: Option<PathBuf>,
    /// 设置后额外导出 tier_cards.csv / volumes.csv
    pub csv_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 <- 配置文件 (可选) <- 环境变量
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        settings.try_deserialize()
    }

    /// 从环境加载: `EDI_ROI_CONFIG` 指定的文件 (可省略) + `EDI_ROI__*` 覆盖
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load(path.as_deref())
    }

    /// 定价表
    pub fn schedule(&self) -> Result<PricingSchedule, PricingError> {
        match &self.pricing.rungs {
            Some(rungs) => PricingSchedule::new(
                rungs
                    .iter()
                    .map(|r| Rung::new(r.threshold, non_negative(r.rate)))
                    .collect(),
            ),
            None => Ok(PricingSchedule::standard()),
        }
    }

    pub fn calculator(&self) -> Result<RoiCalculator, PricingError> {
        Ok(RoiCalculator::new(
            self.schedule()?,
            self.calculator.error_buffer_units,
        ))
    }

    pub fn first_tier_label_price(&self) -> Option<BigDecimal> {
        self.display.first_tier_label_price.map(non_negative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.report.format, ReportFormat::Text);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.schedule().unwrap(), PricingSchedule::standard());
        assert!(config.first_tier_label_price().is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("edi-roi-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[calculator]
error_buffer_units = "minutes"

[display]
first_tier_label_price = 185.0

[report]
format = "json"

[[pricing.rungs]]
threshold = 100
rate = 50.0

[[pricing.rungs]]
threshold = 500
rate = 0.5
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.calculator.error_buffer_units, ErrorBufferUnits::Minutes);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert_eq!(config.first_tier_label_price(), Some(BigDecimal::from(185)));
        let schedule = config.schedule().unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.floor_fee(), &BigDecimal::from(50));
    }

    #[test]
    fn test_example_config_keeps_185_label() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/config/edi-roi.example.toml"));
        let config = AppConfig::load(Some(path)).unwrap();
        assert_eq!(config.first_tier_label_price(), Some(BigDecimal::from(185)));
        assert_eq!(config.calculator.error_buffer_units, ErrorBufferUnits::Reference);
        // 标价不影响计费
        assert_eq!(config.schedule().unwrap(), PricingSchedule::standard());
    }

    #[test]
    fn test_from_env_reads_overrides() {
        // 其余测试都不断言日志级别
        std::env::set_var("EDI_ROI__LOG__LEVEL", "trace");
        let config = AppConfig::from_env().unwrap();
        std::env::remove_var("EDI_ROI__LOG__LEVEL");
        assert_eq!(config.log.level, "trace");
    }

    #[test]
    fn test_invalid_custom_schedule() {
        let mut config = AppConfig::default();
        config.pricing.rungs = Some(vec![RungConfig {
            threshold: 100,
            rate: 10.0,
        }]);
        assert_eq!(config.schedule(), Err(PricingError::TooFewRungs(1)));
    }
}
