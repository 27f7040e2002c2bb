use crate::decimal::clamp_non_negative;
use crate::models::DocumentTypeKey;
use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 贸易伙伴：每种文档类型的月度单量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPartner {
    pub id: String,
    pub name: String,
    pub docs: IndexMap<DocumentTypeKey, u64>,
}

impl TradingPartner {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            docs: IndexMap::new(),
        }
    }

    pub fn with_volume(mut self, key: DocumentTypeKey, volume: u64) -> Self {
        self.docs.insert(key, volume);
        self
    }

    /// 某类型月单量，缺失按 0
    pub fn volume(&self, key: &str) -> u64 {
        self.docs.get(key).copied().unwrap_or(0)
    }

    /// 饱和求和，超大单量不会溢出
    pub fn total_volume(&self) -> u64 {
        self.docs.values().fold(0u64, |acc, v| acc.saturating_add(*v))
    }
}

/// 每种文档类型的人工处理分钟数
///
/// 反序列化同样经过 `set`，负值归零。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<DocumentTypeKey, BigDecimal>",
    into = "IndexMap<DocumentTypeKey, BigDecimal>"
)]
pub struct MinutesPerDocumentType {
    minutes: IndexMap<DocumentTypeKey, BigDecimal>,
}

impl MinutesPerDocumentType {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置分钟数，负值归零
    pub fn set(&mut self, key: DocumentTypeKey, minutes: BigDecimal) {
        self.minutes.insert(key, clamp_non_negative(minutes));
    }

    pub fn with(mut self, key: DocumentTypeKey, minutes: BigDecimal) -> Self {
        self.set(key, minutes);
        self
    }

    /// 某类型分钟数，缺失按 0
    pub fn minutes(&self, key: &str) -> BigDecimal {
        self.minutes.get(key).cloned().unwrap_or_else(BigDecimal::zero)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.minutes.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<BigDecimal> {
        self.minutes.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DocumentTypeKey, &BigDecimal)> {
        self.minutes.iter()
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }
}

impl From<IndexMap<DocumentTypeKey, BigDecimal>> for MinutesPerDocumentType {
    fn from(raw: IndexMap<DocumentTypeKey, BigDecimal>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<MinutesPerDocumentType> for IndexMap<DocumentTypeKey, BigDecimal> {
    fn from(minutes: MinutesPerDocumentType) -> Self {
        minutes.minutes
    }
}

impl FromIterator<(DocumentTypeKey, BigDecimal)> for MinutesPerDocumentType {
    fn from_iter<T: IntoIterator<Item = (DocumentTypeKey, BigDecimal)>>(iter: T) -> Self {
        let mut minutes = Self::new();
        for (key, value) in iter {
            minutes.set(key, value);
        }
        minutes
    }
}
