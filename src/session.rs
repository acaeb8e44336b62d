//! Current-trace session state.
//!
//! A [`Session`] owns the payload submitted by the user, the nesting
//! forest derived from it, and the view settings. The forest is
//! derived data: it is recomputed from the payload on every load and
//! owns no state of its own. Nothing here persists across runs.

use crate::core::{NestedTrace, Result, TracePayload, ViewConfig};
use crate::ingest;
use crate::trace::{is_visible, nest, select_scale, Scale};

/// Axis description handed to rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    /// Selected tick scale
    pub scale: Scale,
    /// Total request duration in milliseconds, for the end-of-axis
    /// label
    pub total_ms: f64,
}

/// A span in the forest paired with its resolved visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedTrace<'a> {
    /// The underlying span and its children
    pub trace: &'a NestedTrace,
    /// Whether this span should be rendered under the current view
    /// settings
    pub visible: bool,
    /// Children with their own flags, mirroring `trace.nested`
    pub nested: Vec<FlaggedTrace<'a>>,
}

impl FlaggedTrace<'_> {
    /// Returns whether any directly nested child is visible
    pub fn has_visible_children(&self) -> bool {
        self.nested.iter().any(|child| child.visible)
    }
}

/// Holds the current trace and its derived structures.
///
/// The lifecycle matches a submission flow: `load` replaces the
/// current trace and resets the view settings, `reset` clears
/// everything. A failed load leaves prior state untouched.
#[derive(Debug, Default)]
pub struct Session {
    trace: Option<TracePayload>,
    forest: Vec<NestedTrace>,
    view: ViewConfig,
}

impl Session {
    /// Creates an empty session with default view settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session with the given view settings
    pub fn with_view(view: ViewConfig) -> Self {
        Session {
            view,
            ..Self::default()
        }
    }

    /// Validates raw input and makes it the current trace.
    ///
    /// View settings reset to defaults on success, matching the
    /// new-submission lifecycle. On failure the previous trace and
    /// settings survive and the validator error is returned.
    pub fn load(&mut self, input: &str) -> Result<()> {
        let payload = ingest::parse_payload(input)?;
        self.view.reset();
        self.set_payload(payload);
        Ok(())
    }

    /// Makes an already-validated payload the current trace
    pub fn load_payload(&mut self, payload: TracePayload) {
        self.view.reset();
        self.set_payload(payload);
    }

    /// Loads the embedded demo trace
    pub fn load_demo(&mut self) {
        self.load_payload(ingest::demo_payload().clone());
    }

    fn set_payload(&mut self, payload: TracePayload) {
        self.forest = nest(&payload.execution.resolvers);
        tracing::info!(
            resolvers = payload.resolver_count(),
            roots = self.forest.len(),
            duration_ms = payload.duration_ms(),
            "loaded trace"
        );
        self.trace = Some(payload);
    }

    /// Clears the trace, the forest, and the view settings
    pub fn reset(&mut self) {
        tracing::info!("session reset");
        *self = Self::default();
    }

    /// Sets the short-span threshold, clamping to [0, 100]
    pub fn set_threshold_percent(&mut self, threshold: u8) {
        self.view.threshold_percent = threshold.min(100);
    }

    /// Sets whether insignificant spans are hidden
    pub fn set_hide_short_spans(&mut self, hide: bool) {
        self.view.hide_short_spans = hide;
    }

    /// Current view settings
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    /// Current payload, if one is loaded
    pub fn payload(&self) -> Option<&TracePayload> {
        self.trace.as_ref()
    }

    /// The nesting forest for the current trace
    pub fn forest(&self) -> &[NestedTrace] {
        &self.forest
    }

    /// Axis scale and total duration, if a trace is loaded
    pub fn axis(&self) -> Option<Axis> {
        self.trace.as_ref().map(|payload| {
            let total_ms = payload.duration_ms();
            Axis {
                scale: select_scale(total_ms),
                total_ms,
            }
        })
    }

    /// The forest with per-span visibility flags resolved against the
    /// current view settings.
    pub fn flagged_forest(&self) -> Vec<FlaggedTrace<'_>> {
        let total = self.trace.as_ref().map_or(0, |payload| payload.duration);

        self.forest
            .iter()
            .map(|root| FlaggedTrace {
                trace: root,
                visible: is_visible(root.span.duration, total, &self.view),
                nested: root
                    .nested
                    .iter()
                    .map(|child| FlaggedTrace {
                        trace: child,
                        visible: is_visible(child.span.duration, total, &self.view),
                        nested: Vec::new(),
                    })
                    .collect(),
            })
            .collect()
    }
}
