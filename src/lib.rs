//! # Resonance Factor — Core Library
//!
//! A deterministic, non-probabilistic semiprime factoring core built on a
//! geometric-resonance search: scale-adaptive precision, a Dirichlet-kernel
//! amplitude gate, an exponential snap projector, and single-division
//! certification. No trial division, no Pollard rho, no sieving — every
//! candidate that reaches certification is checked exactly once against `N`.
//!
//! ## Module Organization
//!
//! - [`precision`] — scale-derived working precision and singularity-cutoff scale
//! - [`hpmath`] — the `rug::Float` (MPFR) facade: the only module touching MPFR directly
//! - [`kernel`] — normalized Dirichlet kernel amplitude
//! - [`snap`] — exponential snap projection from `(ln N, theta)` to a candidate
//! - [`qmc`] — golden-ratio low-discrepancy sample sequence
//! - [`shell`] — optional shell-exclusion admission predicate
//! - [`config`] — baseline and scale-adaptive effective configuration
//! - [`engine`] — the `factor()` entry point and sample/m-sweep search loop
//! - [`result`] — `SearchOutcome`, `Diagnostics`, and the atomic accumulator
//! - [`events`] — the optional structured `EventSink` collaborator
//! - [`error`] — `ConfigError`, the one surfaced `std::error::Error` type
//!
//! ## Design Philosophy
//!
//! Every module outside `hpmath` is pure and stateless with respect to the
//! backing arbitrary-precision library — `hpmath::HpContext` is a narrow
//! facade so `rug` could be swapped for another MPFR binding without
//! touching the kernel, snap, or engine logic. Configuration is
//! dependency-injected; there is no global or singleton config, and no
//! ambient logger — callers that want tracing get it by enabling the `tracing`
//! crate's subscriber, and callers that want structured events implement
//! [`events::EventSink`].

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod hpmath;
pub mod kernel;
pub mod precision;
pub mod qmc;
pub mod result;
pub mod shell;
pub mod snap;

pub use config::{adaptive_config, BaselineConfig, EffectiveConfig};
pub use engine::{factor, CancellationToken};
pub use error::ConfigError;
pub use events::{EventSink, FailureClass, NullSink};
pub use result::{Diagnostics, FailureReason, SearchOutcome};
