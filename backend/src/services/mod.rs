//! Business logic services
//!
//! Services validate request payloads and coordinate the shared
//! calculation core. They hold no state of their own.

pub mod plans;
pub mod profile;
pub mod progress;

pub use plans::PlanService;
pub use profile::ProfileService;
pub use progress::ProgressService;
