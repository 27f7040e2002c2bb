use crate::error::ScenarioError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// 默认文档类型
pub const DEFAULT_DOCUMENT_TYPES: [&str; 4] = ["850_PO", "810_INV", "855_ACK", "856_ASN"];

/// 文档类型键 (如 `850_PO`)：三位 X12 交易集代码 + `_` + 至少两个字母
///
/// 构造时去除首尾空白并转为大写，之后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentTypeKey(String);

impl DocumentTypeKey {
    /// 校验并规范化
    pub fn parse(raw: &str) -> Result<Self, ScenarioError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if Self::is_valid(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(ScenarioError::InvalidDocumentKey(raw.to_string()))
        }
    }

    pub fn is_valid(raw: &str) -> bool {
        let Some((code, suffix)) = raw.trim().split_once('_') else {
            return false;
        };
        code.len() == 3
            && code.chars().all(|c| c.is_ascii_digit())
            && suffix.len() >= 2
            && suffix.chars().all(|c| c.is_ascii_alphabetic())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 交易集代码 (`850`)
    pub fn code(&self) -> &str {
        self.0.split_once('_').map(|(code, _)| code).unwrap_or(&self.0)
    }

    /// 后缀 (`PO`)
    pub fn suffix(&self) -> &str {
        self.0.split_once('_').map(|(_, suffix)| suffix).unwrap_or("")
    }

    /// `850_PO` -> `Purchase Order (850)`，代码表无记录时退回后缀
    pub fn friendly_label(&self) -> String {
        let name = transaction_set_name(self.code())
            .map(str::to_string)
            .unwrap_or_else(|| self.suffix().to_string());
        format!("{} ({})", name, self.code())
    }

    pub fn defaults() -> Vec<DocumentTypeKey> {
        DEFAULT_DOCUMENT_TYPES
            .iter()
            .map(|k| DocumentTypeKey(k.to_string()))
            .collect()
    }
}

impl TryFrom<String> for DocumentTypeKey {
    type Error = ScenarioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentTypeKey> for String {
    fn from(key: DocumentTypeKey) -> Self {
        key.0
    }
}

impl Borrow<str> for DocumentTypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// X12 交易集代码 -> 名称
pub fn transaction_set_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "204" => "Motor Carrier Load Tender",
        "210" => "Freight Invoice",
        "214" => "Shipment Status",
        "810" => "Invoice",
        "820" => "Payment/Remittance",
        "832" => "Price/Sales Catalog",
        "840" => "RFQ",
        "843" => "Response to RFQ",
        "846" => "Inventory Advice",
        "850" => "Purchase Order",
        "852" => "Product Activity Data",
        "855" => "Purchase Order Acknowledgment",
        "856" => "Advance Ship Notice",
        "860" => "PO Change Request",
        "940" => "Warehouse Shipping Order",
        "943" => "Stock Transfer Shipment Advice",
        "944" => "Stock Transfer Receipt Advice",
        "945" => "Warehouse Shipping Advice",
        "946" => "Delivery Information",
        "997" => "Functional Acknowledgment",
        _ => return None,
    };
    Some(name)
}
