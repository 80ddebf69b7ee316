//! Fitness RPG Shared Library
//!
//! Pure calculation core shared by the backend and WASM modules: metric
//! calculators, the XP and level engine, progression tables, achievements,
//! plan generation and the user profile.

pub mod achievements;
pub mod calculator;
pub mod errors;
pub mod health_metrics;
pub mod levels;
pub mod plans;
pub mod profile;
pub mod progression;
pub mod types;
pub mod validation;
pub mod xp;

// Re-export commonly used items
pub use calculator::{CalculatorRequest, CalculatorResult};
pub use errors::*;
pub use health_metrics::*;
pub use levels::*;
pub use profile::{DerivedMetrics, ProfileInput, ProfileSummary, UserProfile};
pub use types::*;
