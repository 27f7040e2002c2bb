use std::path::PathBuf;
use thiserror::Error;

/// 定价阶梯配置错误
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("pricing schedule needs a flat floor rung and at least one marginal rung, got {0} rung(s)")]
    TooFewRungs(usize),

    #[error("rung {index} threshold {threshold} must be greater than the previous threshold {previous}")]
    NonIncreasingThreshold {
        index: usize,
        threshold: u64,
        previous: u64,
    },

    #[error("rung {0} has a negative rate")]
    NegativeRate(usize),
}

/// 场景 (输入工作簿) 错误
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid document type key '{0}', expected three digits, '_' and two or more letters (e.g. 850_PO)")]
    InvalidDocumentKey(String),

    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("unknown trading partner: {0}")]
    UnknownPartner(String),

    #[error("duplicate trading partner id: {0}")]
    DuplicatePartner(String),

    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 报表输出错误
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
