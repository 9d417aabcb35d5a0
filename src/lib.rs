//! Trip planner - AI-assisted travel planning service
//!
//! This library provides the plan generation pipeline: request validation,
//! prompt composition, the Gemini client boundary, response segmentation,
//! and the HTTP surface that ties them together.

pub mod api;
pub mod config;
pub mod error;
pub mod gemini;
pub mod models;
pub mod parser;
pub mod planner;
pub mod prompt;
pub mod web;

// Re-export core types for public API
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use gemini::{GeminiClient, TextGenerator};
pub use models::{BudgetTier, PlanCompleteness, TravelPlan, TripRequest};
pub use planner::PlannerService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
