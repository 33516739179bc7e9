//! HTTP API handlers for onboard-api

pub mod health;
pub mod onboarding;

pub use health::health_routes;
pub use onboarding::{onboarding_routes, submit_onboarding, MALFORMED_FORM_MESSAGE};
