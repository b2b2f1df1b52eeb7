//! Meshport Core - Shared types for the meshport crates
//!
//! This crate provides the pieces every other meshport crate leans on:
//! - Mathematical primitives (re-exported from glam)
//! - The diagnostics sink used to report import progress and failures

pub mod diagnostics;

pub use diagnostics::{CollectedDiagnostics, Diagnostic, Diagnostics, Severity, TracingDiagnostics};
pub use glam::{Vec2, Vec3};
