//! # Events — Structured Event Sink
//!
//! The core takes an optional structured-event sink instead of an ambient
//! global logger: a small trait object passed as `Option<&dyn EventSink>`,
//! no blanket global state, so a caller that wants per-candidate telemetry
//! gets it without the core depending on any particular transport or
//! storage backend.

/// One of the internal failure classes a rejected candidate falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// `snap` projected to a value `<= 1`.
    Zero,
    /// `snap` projected to a value `>= N`.
    Overflow,
    /// A projected candidate failed the divisibility test.
    NotDivisible,
}

/// A sink for structured search events. All methods default to no-ops, so
/// implementing only the events a caller cares about is enough.
pub trait EventSink: Send + Sync {
    /// Called once per sample drawn (after shell-exclusion admission), with
    /// the sample index and the mapped `k` value.
    fn sample_progress(&self, _n: u64, _k: f64) {}

    /// Called when a (k, m) pair clears the amplitude threshold and is
    /// projected to a candidate.
    fn candidate_hit(&self, _n: u64, _m: i64, _amplitude: f64) {}

    /// Called when a projected or tested candidate is rejected.
    fn failure_class(&self, _class: FailureClass) {}
}

/// An explicit no-op sink, for callers that want a named type rather than
/// `Option::None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {}
