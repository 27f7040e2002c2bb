pub mod calculator;
pub mod pricing;

pub use calculator::{compute_totals, ErrorBufferUnits, RoiCalculator};
pub use pricing::{compute_tier_charges, reached_tiers, standard_schedule, tier_cards, total_charge};
