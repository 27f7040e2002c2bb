pub mod document;
pub mod partner;
pub mod scenario;
pub mod tier;
pub mod totals;

pub use document::{transaction_set_name, DocumentTypeKey, DEFAULT_DOCUMENT_TYPES};
pub use partner::{MinutesPerDocumentType, TradingPartner};
pub use scenario::Scenario;
pub use tier::{PricingSchedule, PricingTier, Rung};
pub use totals::{TierCard, Totals};
