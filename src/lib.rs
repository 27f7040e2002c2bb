pub mod config;
pub mod decimal;
pub mod error;
pub mod ids;
pub mod loader;
pub mod models;
pub mod report;
pub mod service;

pub use config::AppConfig;
pub use error::{PricingError, ReportError, ScenarioError};
pub use ids::{IdGenerator, SequentialIds, TimestampIds};
pub use loader::load_scenario;
pub use models::{
    DocumentTypeKey, MinutesPerDocumentType, PricingSchedule, PricingTier, Scenario, TierCard,
    Totals, TradingPartner,
};
pub use report::Report;
pub use service::{compute_tier_charges, compute_totals, reached_tiers, RoiCalculator};
