//! Core engine for the venue rental operations console.
//!
//! The interesting logic lives under [`onboarding`]: the status pipelines for
//! applications, processes, hosts, and spaces, the pricing model resolver that
//! turns form submissions into canonical price records, and the completeness
//! evaluator gating pipeline advancement. Everything is a pure computation
//! over a point-in-time snapshot; persistence and identity are injected
//! through traits so the engine stays directly unit-testable.

pub mod config;
pub mod error;
pub mod onboarding;
pub mod telemetry;
