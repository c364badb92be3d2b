//! Student career guidance: profile intake, a three-part assessment flow, and college
//! recommendations ranked by location preference and rating.

pub mod assessments;
pub mod colleges;
pub mod config;
pub mod error;
pub mod gateway;
pub mod journey;
pub mod profile;
pub mod router;
pub mod service;
pub mod session;
pub mod telemetry;

pub use router::guidance_router;
pub use service::{GuidanceError, GuidanceService};
pub use session::{Identity, IdentityProvider, SessionContext, UserId};
