//! tracelens - Terminal-native flame-graph inspector for Apollo
//! GraphQL tracing payloads.
//!
//! tracelens takes the `extensions.tracing` object a GraphQL server
//! returns when the Apollo Tracing extension is enabled, restructures
//! its flat resolver-span list into a nesting forest, and renders a
//! waterfall with a readable time axis on the terminal.
//!
//! # Features
//!
//! - **Trace Nesting**: path + interval containment turns the flat
//!   span list into a renderable hierarchy
//! - **Readable Axis**: the coarsest tick scale (100/10/1 ms) that
//!   still yields more than one label
//! - **Short-Span Filtering**: hide spans below a configurable
//!   percentage of the total duration
//! - **Flexible Input**: bare payload, `{"tracing": ...}`, or a whole
//!   response with `{"extensions": {"tracing": ...}}`
//!
//! # Architecture
//!
//! - `core`: domain models, errors, and configuration
//! - `ingest`: payload validation and wrapper normalization
//! - `trace`: the nesting, scaling, visibility, and layout algorithms
//! - `session`: current-trace lifecycle and derived state
//! - `render`: plain-text waterfall output
//! - `cli`: command-line interface
//!
//! # Example
//!
//! ```
//! use tracelens_lib::session::Session;
//! use tracelens_lib::trace::select_scale;
//!
//! let mut session = Session::new();
//! session.load_demo();
//!
//! let axis = session.axis().expect("demo trace is loaded");
//! assert!(axis.scale.tick_count > 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cli;
pub mod core;
pub mod ingest;
pub mod render;
pub mod session;
pub mod trace;

// Re-export core types for convenience
pub use crate::core::{Config, Result};
pub use crate::session::Session;
