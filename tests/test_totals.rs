//! Totals aggregator tests
//!
//! Labor cost, error buffer, EDI cost and savings computed from partner volumes.

use bigdecimal::{BigDecimal, Zero};
use edi_roi_calc::{compute_totals, DocumentTypeKey, MinutesPerDocumentType, TradingPartner};
use std::str::FromStr;

fn key(raw: &str) -> DocumentTypeKey {
    DocumentTypeKey::parse(raw).unwrap()
}

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

#[test]
fn test_single_partner_scenario() {
    let partners = vec![TradingPartner::new("tp_1", "Acme").with_volume(key("850_PO"), 100)];
    let minutes = MinutesPerDocumentType::new().with(key("850_PO"), BigDecimal::from(5));

    let totals = compute_totals(&partners, &minutes, 25.0, 0.0);

    assert_eq!(totals.monthly_transactions, 100);
    assert_eq!(totals.monthly_labor_minutes, BigDecimal::from(500));
    assert_eq!(totals.annual_manual_cost, BigDecimal::from(2_500));
    assert_eq!(totals.monthly_edi_cost, BigDecimal::from(175));
    assert_eq!(totals.annual_edi_cost, BigDecimal::from(2_100));
    assert_eq!(totals.net_annual_savings, BigDecimal::from(400));
    assert_eq!(totals.estimated_error_hours, BigDecimal::zero());
}

#[test]
fn test_multi_partner_aggregation() {
    let partners = vec![
        TradingPartner::new("a", "A")
            .with_volume(key("850_PO"), 400)
            .with_volume(key("810_INV"), 200),
        TradingPartner::new("b", "B")
            .with_volume(key("850_PO"), 600)
            .with_volume(key("856_ASN"), 50),
    ];
    // 856_ASN has no minutes entry
    let minutes = MinutesPerDocumentType::new()
        .with(key("850_PO"), BigDecimal::from(3))
        .with(key("810_INV"), dec("1.5"));

    let totals = compute_totals(&partners, &minutes, 30.0, 0.015);

    assert_eq!(totals.total_by_type["850_PO"], 1_000);
    assert_eq!(totals.total_by_type["810_INV"], 200);
    assert_eq!(totals.total_by_type["856_ASN"], 50);
    assert_eq!(totals.monthly_transactions, 1_250);
    assert_eq!(
        totals.monthly_transactions,
        totals.total_by_type.values().sum::<u64>()
    );

    // 3000 + 300
    assert_eq!(totals.monthly_labor_minutes, BigDecimal::from(3_300));
    // 1250 * 0.015 * 10 / 60 = 3.125 -> 3.2
    assert_eq!(totals.estimated_error_hours, dec("3.2"));
    // (3300 + 3.2) / 60 * 30 * 12
    assert_eq!(totals.annual_manual_cost, dec("19819.2"));
    assert_eq!(totals.monthly_manual_cost, dec("1651.6"));
    // 175 + 850*0.97 + 250*0.74
    assert_eq!(totals.monthly_edi_cost, dec("1184.5"));
    assert_eq!(totals.annual_edi_cost, dec("14214"));
    assert_eq!(totals.net_annual_savings, dec("5605.2"));
    assert_eq!(totals.monthly_hours_saved, BigDecimal::from(55));
}

#[test]
fn test_negative_savings_when_volume_is_tiny() {
    let partners = vec![TradingPartner::new("a", "A").with_volume(key("850_PO"), 1)];
    let minutes = MinutesPerDocumentType::new().with(key("850_PO"), BigDecimal::from(1));

    let totals = compute_totals(&partners, &minutes, 25.0, 0.0);

    assert!(totals.net_annual_savings < BigDecimal::zero());
    assert_eq!(
        totals.net_annual_savings,
        &totals.annual_manual_cost - &totals.annual_edi_cost
    );
}

#[test]
fn test_no_partners() {
    let totals = compute_totals(&[], &MinutesPerDocumentType::new(), 25.0, 0.015);
    assert!(totals.total_by_type.is_empty());
    assert_eq!(totals.monthly_transactions, 0);
    assert_eq!(totals.annual_manual_cost, BigDecimal::zero());
    assert_eq!(totals.annual_edi_cost, BigDecimal::from(2_100));
}

#[test]
fn test_inputs_not_mutated_and_idempotent() {
    let partners = vec![TradingPartner::new("a", "A").with_volume(key("850_PO"), 321)];
    let minutes = MinutesPerDocumentType::new().with(key("850_PO"), dec("2.75"));
    let partners_before = partners.clone();

    let first = compute_totals(&partners, &minutes, 27.5, 0.02);
    let second = compute_totals(&partners, &minutes, 27.5, 0.02);

    assert_eq!(first, second);
    assert_eq!(partners, partners_before);
}
