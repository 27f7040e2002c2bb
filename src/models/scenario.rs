use crate::decimal::non_negative;
use crate::error::ScenarioError;
use crate::ids::IdGenerator;
use crate::models::{
    DocumentTypeKey, MinutesPerDocumentType, PricingSchedule, PricingTier, Totals, TradingPartner,
};
use crate::service::RoiCalculator;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// 默认时薪 (USD)
pub const DEFAULT_HOURLY_RATE: i64 = 25;

/// 输入工作簿: 文档类型、伙伴单量、每单分钟数、时薪、出错率、展示阶梯
///
/// 删除文档类型时级联清理分钟表和所有伙伴中的同名键。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub document_types: Vec<DocumentTypeKey>,
    pub partners: Vec<TradingPartner>,
    pub minutes: MinutesPerDocumentType,
    pub hourly_rate: BigDecimal,
    pub error_pct: BigDecimal,
    pub tiers: Vec<PricingTier>,
}

impl Scenario {
    /// 空工作簿 (无文档类型、无伙伴)，阶梯取标准定价表
    pub fn empty(ids: &mut dyn IdGenerator) -> Self {
        Self {
            document_types: Vec::new(),
            partners: Vec::new(),
            minutes: MinutesPerDocumentType::new(),
            hourly_rate: BigDecimal::from(DEFAULT_HOURLY_RATE),
            error_pct: non_negative(0.015),
            tiers: PricingSchedule::standard().display_tiers(ids),
        }
    }

    /// 默认工作簿: 4 种默认文档类型 + 一个零单量伙伴
    pub fn new(ids: &mut dyn IdGenerator) -> Self {
        let mut scenario = Self::empty(ids);
        for key in DocumentTypeKey::defaults() {
            scenario.minutes.set(key.clone(), BigDecimal::zero());
            scenario.document_types.push(key);
        }
        scenario.add_partner(ids);
        scenario
    }

    /// 新增伙伴 "Trading Partner N"，所有文档类型单量为 0
    pub fn add_partner(&mut self, ids: &mut dyn IdGenerator) -> &TradingPartner {
        let name = format!("Trading Partner {}", self.partners.len() + 1);
        let id = self.fresh_id(ids);
        self.push_partner(id, name)
    }

    /// 按给定 id 新增伙伴，id 已存在时拒绝
    pub fn insert_partner(&mut self, id: String, name: String) -> Result<&TradingPartner, ScenarioError> {
        if self.partner(&id).is_some() {
            return Err(ScenarioError::DuplicatePartner(id));
        }
        Ok(self.push_partner(id, name))
    }

    /// 跳过已被占用的 id
    pub fn fresh_id(&self, ids: &mut dyn IdGenerator) -> String {
        loop {
            let id = ids.next_id();
            if self.partner(&id).is_none() {
                return id;
            }
        }
    }

    fn push_partner(&mut self, id: String, name: String) -> &TradingPartner {
        let mut partner = TradingPartner::new(id, name);
        for key in &self.document_types {
            partner.docs.insert(key.clone(), 0);
        }
        self.partners.push(partner);
        &self.partners[self.partners.len() - 1]
    }

    pub fn remove_partner(&mut self, id: &str) -> Result<TradingPartner, ScenarioError> {
        let index = self.partner_index(id)?;
        Ok(self.partners.remove(index))
    }

    pub fn rename_partner(&mut self, id: &str, name: impl Into<String>) -> Result<(), ScenarioError> {
        let index = self.partner_index(id)?;
        self.partners[index].name = name.into();
        Ok(())
    }

    pub fn partner(&self, id: &str) -> Option<&TradingPartner> {
        self.partners.iter().find(|p| p.id == id)
    }

    /// 设置伙伴某类型月单量，文档类型必须已登记
    pub fn set_volume(&mut self, partner_id: &str, key: &str, volume: u64) -> Result<(), ScenarioError> {
        let key = self.known_key(key)?;
        let index = self.partner_index(partner_id)?;
        self.partners[index].docs.insert(key, volume);
        Ok(())
    }

    pub fn set_minutes(&mut self, key: &str, minutes: f64) -> Result<(), ScenarioError> {
        let key = self.known_key(key)?;
        self.minutes.set(key, non_negative(minutes));
        Ok(())
    }

    pub fn set_hourly_rate(&mut self, rate: f64) {
        self.hourly_rate = non_negative(rate);
    }

    pub fn set_error_pct(&mut self, fraction: f64) {
        self.error_pct = non_negative(fraction);
    }

    /// 登记文档类型 (重复登记无副作用)，并为分钟表和所有伙伴补 0
    pub fn add_document_type(&mut self, raw: &str) -> Result<DocumentTypeKey, ScenarioError> {
        let key = DocumentTypeKey::parse(raw)?;
        if !self.document_types.contains(&key) {
            self.document_types.push(key.clone());
        }
        if !self.minutes.contains(key.as_str()) {
            self.minutes.set(key.clone(), BigDecimal::zero());
        }
        for partner in &mut self.partners {
            partner.docs.entry(key.clone()).or_insert(0);
        }
        Ok(key)
    }

    /// 删除文档类型并级联清理，返回是否存在过
    pub fn remove_document_type(&mut self, raw: &str) -> bool {
        let normalized = raw.trim().to_ascii_uppercase();
        let before = self.document_types.len();
        self.document_types.retain(|k| k.as_str() != normalized);
        self.minutes.remove(&normalized);
        for partner in &mut self.partners {
            partner.docs.shift_remove(normalized.as_str());
        }
        self.document_types.len() != before
    }

    pub fn totals(&self, calculator: &RoiCalculator) -> Totals {
        calculator.compute(&self.partners, &self.minutes, &self.hourly_rate, &self.error_pct)
    }

    fn partner_index(&self, id: &str) -> Result<usize, ScenarioError> {
        self.partners
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ScenarioError::UnknownPartner(id.to_string()))
    }

    fn known_key(&self, raw: &str) -> Result<DocumentTypeKey, ScenarioError> {
        let key = DocumentTypeKey::parse(raw)?;
        if self.document_types.contains(&key) {
            Ok(key)
        } else {
            Err(ScenarioError::UnknownDocumentType(key.to_string()))
        }
    }
}
