use edi_roi_calc::config::ReportFormat;
use edi_roi_calc::report::{csv_export, format_currency};
use edi_roi_calc::{load_scenario, AppConfig, Report, Scenario, TimestampIds};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载配置 (EDI_ROI_CONFIG 指向配置文件，可省略)
    let config = AppConfig::from_env()?;

    // 初始化日志 - 本地时间格式，输出到 stderr，stdout 留给报表
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_env_filter(EnvFilter::new(&config.log.level))
        .with_writer(std::io::stderr)
        .init();
    info!("Starting with config: {:?}", config);

    // 场景: 命令行参数优先，其次配置文件
    let mut ids = TimestampIds::default();
    let scenario_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.report.scenario_path.clone());
    let scenario = match scenario_path {
        Some(path) => {
            info!("Loading scenario from {}", path.display());
            load_scenario(&path, &mut ids)?
        }
        None => {
            warn!("No scenario given, using the default workbook");
            Scenario::new(&mut ids)
        }
    };

    let calculator = config.calculator()?;
    let first_price = config.first_tier_label_price();
    let report = Report::build(&scenario, &calculator, first_price.as_ref());
    info!(
        "Computed totals: {} transactions/month, net annual savings {}",
        report.totals.monthly_transactions,
        format_currency(&report.totals.net_annual_savings)
    );

    match config.report.format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(dir) = &config.report.csv_dir {
        csv_export::write_report_csv(&report, dir)?;
    }

    Ok(())
}
