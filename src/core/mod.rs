//! Core domain models for tracelens.
//!
//! This module contains the typed Apollo Tracing payload model, the
//! error taxonomy, and configuration handling.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder, RenderConfig, ViewConfig, DEFAULT_THRESHOLD_PERCENT};
pub use error::{Result, TraceLensError};
pub use types::{Block, Execution, FieldPath, NestedTrace, PathSegment, ResolverSpan, TracePayload};
