//! 场景文件 (JSON) 加载
//!
//! 文件中的数值均按浮点读取，进入工作簿前统一归零越界值。

use crate::error::ScenarioError;
use crate::ids::IdGenerator;
use crate::models::Scenario;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_hourly_rate() -> f64 {
    25.0
}

fn default_error_pct() -> f64 {
    0.015
}

/// 场景文件格式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub document_types: Vec<String>,
    #[serde(default)]
    pub partners: Vec<PartnerEntry>,
    #[serde(default)]
    pub minutes_per_doc: IndexMap<String, f64>,
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,
    #[serde(default = "default_error_pct")]
    pub error_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub docs: IndexMap<String, f64>,
}

impl ScenarioFile {
    /// 转为工作簿；伙伴或分钟表中出现的文档类型自动登记
    pub fn into_scenario(self, ids: &mut dyn IdGenerator) -> Result<Scenario, ScenarioError> {
        let mut scenario = Scenario::empty(ids);

        let referenced = self
            .document_types
            .iter()
            .chain(self.minutes_per_doc.keys())
            .chain(self.partners.iter().flat_map(|p| p.docs.keys()));
        for raw in referenced {
            scenario.add_document_type(raw)?;
        }

        for (raw, minutes) in &self.minutes_per_doc {
            scenario.set_minutes(raw, *minutes)?;
        }

        for entry in self.partners {
            let id = match entry.id {
                Some(id) => id,
                None => scenario.fresh_id(ids),
            };
            scenario.insert_partner(id.clone(), entry.name)?;
            for (raw, volume) in &entry.docs {
                scenario.set_volume(&id, raw, clamp_volume(*volume))?;
            }
        }

        scenario.set_hourly_rate(self.hourly_rate);
        scenario.set_error_pct(self.error_pct);

        tracing::info!(
            "Loaded scenario: {} partners, {} document types",
            scenario.partners.len(),
            scenario.document_types.len()
        );
        Ok(scenario)
    }
}

/// 单量: 负数、NaN 归零，小数向下取整
pub fn clamp_volume(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        0
    } else {
        value.floor() as u64
    }
}

pub fn parse_scenario(json: &str, ids: &mut dyn IdGenerator) -> Result<Scenario, ScenarioError> {
    let file: ScenarioFile = serde_json::from_str(json)?;
    file.into_scenario(ids)
}

pub fn load_scenario(path: &Path, ids: &mut dyn IdGenerator) -> Result<Scenario, ScenarioError> {
    let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(&json, ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::service::RoiCalculator;
    use bigdecimal::BigDecimal;

    #[test]
    fn test_clamp_volume() {
        assert_eq!(clamp_volume(-5.0), 0);
        assert_eq!(clamp_volume(f64::NAN), 0);
        assert_eq!(clamp_volume(12.9), 12);
        assert_eq!(clamp_volume(40.0), 40);
    }

    #[test]
    fn test_parse_registers_referenced_types() {
        let json = r#"{
            "partners": [
                { "name": "Acme", "docs": { "850_po": 120, "810_INV": -4 } },
                { "id": "tp-b", "name": "Globex", "docs": { "856_ASN": 30.7 } }
            ],
            "minutes_per_doc": { "850_PO": 5, "810_INV": -1 },
            "hourly_rate": 30
        }"#;
        let mut ids = SequentialIds::with_prefix("x");
        let scenario = parse_scenario(json, &mut ids).unwrap();

        let types: Vec<&str> = scenario.document_types.iter().map(|k| k.as_str()).collect();
        assert_eq!(types, vec!["850_PO", "810_INV", "856_ASN"]);

        let acme = &scenario.partners[0];
        assert_eq!(acme.volume("850_PO"), 120);
        assert_eq!(acme.volume("810_INV"), 0);
        assert_eq!(acme.docs.get("856_ASN"), Some(&0));
        assert_eq!(scenario.partner("tp-b").unwrap().volume("856_ASN"), 30);

        assert_eq!(scenario.minutes.minutes("810_INV"), BigDecimal::from(0));
        assert_eq!(scenario.hourly_rate, BigDecimal::from(30));
    }

    #[test]
    fn test_parse_rejects_duplicate_partner_ids() {
        let json = r#"{
            "partners": [
                { "id": "x", "name": "Acme", "docs": { "850_PO": 10 } },
                { "id": "x", "name": "Globex", "docs": { "850_PO": 20 } }
            ]
        }"#;
        let mut ids = SequentialIds::new();
        match parse_scenario(json, &mut ids) {
            Err(ScenarioError::DuplicatePartner(id)) => assert_eq!(id, "x"),
            other => panic!("expected duplicate partner error, got {:?}", other.map(|s| s.partners.len())),
        }
    }

    #[test]
    fn test_generated_ids_skip_explicit_ones() {
        let json = r#"{
            "partners": [
                { "id": "x_0", "name": "Acme", "docs": { "850_PO": 10 } },
                { "name": "Globex", "docs": { "850_PO": 20 } }
            ]
        }"#;
        let mut ids = SequentialIds::with_prefix("x");
        let scenario = parse_scenario(json, &mut ids).unwrap();
        assert_eq!(scenario.partner("x_0").unwrap().volume("850_PO"), 10);
        assert_eq!(scenario.partner("x_1").unwrap().volume("850_PO"), 20);
    }

    #[test]
    fn test_huge_volumes_saturate_in_totals() {
        let json = r#"{
            "partners": [
                { "name": "Acme", "docs": { "850_PO": 1e20 } },
                { "name": "Globex", "docs": { "850_PO": 1e20 } }
            ]
        }"#;
        let mut ids = SequentialIds::new();
        let scenario = parse_scenario(json, &mut ids).unwrap();
        assert_eq!(scenario.partners[0].volume("850_PO"), u64::MAX);

        let totals = scenario.totals(&RoiCalculator::default());
        assert_eq!(totals.monthly_transactions, u64::MAX);
        assert_eq!(totals.total_by_type["850_PO"], u64::MAX);
    }

    #[test]
    fn test_parse_rejects_bad_keys() {
        let json = r#"{ "partners": [ { "name": "Acme", "docs": { "PO": 1 } } ] }"#;
        let mut ids = SequentialIds::new();
        assert!(matches!(
            parse_scenario(json, &mut ids),
            Err(ScenarioError::InvalidDocumentKey(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let mut ids = SequentialIds::new();
        let err = load_scenario(Path::new("/nonexistent/scenario.json"), &mut ids).unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }));
    }
}
