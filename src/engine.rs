//! # Search Engine — Orchestration
//!
//! Ties the precision, high-precision math, kernel, snap, QMC, config, and
//! shell-exclusion modules together into the single public entry point,
//! [`factor`]. Implements the sample/m-sweep search loop, deadline and
//! cancellation checks, and the ordering guarantee that the reported success
//! is always the one with the smallest sample index.

use crate::config::{adaptive_config, BaselineConfig, EffectiveConfig};
use crate::error::ConfigError;
use crate::events::{EventSink, FailureClass};
use crate::hpmath::HpContext;
use crate::kernel;
use crate::precision::derive_precision;
use crate::qmc::QmcSampler;
use crate::result::{DiagnosticsAccumulator, FailureReason, SearchOutcome};
use crate::shell::{AdmitAll, ShellFilter};
use crate::snap::{snap_with_reason, Rejection};
use rayon::prelude::*;
use rug::{Float, Integer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A cheap, cloneable cooperative-cancellation flag: the caller holds one
/// handle and flips it from another thread (a signal handler, a parent
/// orchestrator) while the engine polls it between samples.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The single entry point. Validates preconditions on `n` and
/// `cfg`, derives the effective configuration and working precision, then
/// runs the sample/m-sweep search until a certified factor pair is found,
/// the deadline passes, cancellation is observed, or the sample schedule is
/// exhausted.
///
/// `shell_filter` is only consulted when `cfg.enable_shell_exclusion` is
/// set; passing `None` in that case falls back to [`AdmitAll`], so disabling
/// shell exclusion and omitting a filter are equivalent ways to search the
/// full k-range.
pub fn factor(
    n: &Integer,
    cfg: &BaselineConfig,
    shell_filter: Option<&dyn ShellFilter>,
    cancellation: Option<&CancellationToken>,
    sink: Option<&dyn EventSink>,
) -> SearchOutcome {
    let start = Instant::now();
    let bits = n.significant_bits();
    let eff = adaptive_config(cfg, bits);
    let span = tracing::info_span!("factor", bits, samples = eff.samples, m_span = eff.m_span);
    let _guard = span.enter();

    if let Err(e) = validate_target(n) {
        tracing::warn!(error = %e, "rejected target");
        return failure(FailureReason::InvalidConfig(e), eff, start, &None);
    }
    if let Err(e) = cfg.validate() {
        tracing::warn!(error = %e, "rejected baseline config");
        return failure(FailureReason::InvalidConfig(e), eff, start, &None);
    }

    let diagnostics = eff.enable_diagnostics.then(DiagnosticsAccumulator::new);

    let p = derive_precision(cfg.configured_precision, bits);
    tracing::debug!(precision = p, "derived working precision");
    let ctx = HpContext::new(p);
    let ln_n = ctx.log(&ctx.from_integer(n));
    let sampler = QmcSampler::new(eff.k_lo, eff.k_hi);
    let deadline = start + eff.timeout;

    for sample_idx in 0..eff.samples {
        if Instant::now() >= deadline {
            tracing::info!(sample_idx, "deadline reached");
            return failure(FailureReason::Timeout, eff, start, &diagnostics);
        }
        if cancellation.is_some_and(CancellationToken::is_cancelled) {
            tracing::info!(sample_idx, "cancellation observed");
            return failure(FailureReason::Cancelled, eff, start, &diagnostics);
        }

        let k = sampler.k(sample_idx);
        if eff.enable_shell_exclusion {
            let admitted = shell_filter
                .unwrap_or(&AdmitAll)
                .admit(k, eff.k_lo, eff.k_hi);
            if !admitted {
                continue;
            }
        }
        if let Some(s) = sink {
            s.sample_progress(sample_idx, k);
        }

        if let Some((p_factor, q_factor)) =
            sweep_m(&ctx, &ln_n, n, &eff, k, sample_idx, diagnostics.as_ref(), sink)
        {
            tracing::info!(sample_idx, "certified factor pair found");
            return SearchOutcome::Success {
                p: p_factor,
                q: q_factor,
                elapsed: start.elapsed(),
                config: eff,
                diagnostics: diagnostics.as_ref().map(DiagnosticsAccumulator::snapshot),
            };
        }

        if let Some(acc) = &diagnostics {
            acc.record_sample_processed();
        }
    }

    tracing::info!("sample schedule exhausted without a certified factor");
    failure(FailureReason::SamplesExhausted, eff, start, &diagnostics)
}

fn validate_target(n: &Integer) -> Result<(), ConfigError> {
    if n <= &Integer::from(1u32) {
        return Err(ConfigError::TargetTooSmall(n.to_string()));
    }
    Ok(())
}

fn failure(
    reason: FailureReason,
    config: EffectiveConfig,
    start: Instant,
    diagnostics: &Option<DiagnosticsAccumulator>,
) -> SearchOutcome {
    SearchOutcome::Failure {
        reason,
        elapsed: start.elapsed(),
        config,
        diagnostics: diagnostics.as_ref().map(DiagnosticsAccumulator::snapshot),
    }
}

/// Evaluates every `m` in `[-mSpan, mSpan]` for one sample, returning the
/// certified `(p, q)` pair with the smallest `|m|` (positive wins ties), or
/// `None` if no `m` in this sample certifies. The sweep itself runs on
/// rayon's pool for throughput; the winner is picked deterministically
/// afterward so the result never depends on thread-scheduling order.
fn sweep_m(
    ctx: &HpContext,
    ln_n: &Float,
    n: &Integer,
    eff: &EffectiveConfig,
    k: f64,
    sample_idx: u64,
    diagnostics: Option<&DiagnosticsAccumulator>,
    sink: Option<&dyn EventSink>,
) -> Option<(Integer, Integer)> {
    let m_span = eff.m_span as i64;
    let threshold = Float::with_val(ctx.bits(), eff.threshold);

    let mut hits: Vec<(i64, Integer, Integer)> = (-m_span..=m_span)
        .into_par_iter()
        .filter_map(|m| {
            evaluate_m(ctx, ln_n, n, eff.j, k, m, &threshold, sample_idx, diagnostics, sink)
        })
        .collect();

    hits.sort_by_key(|(m, _, _)| (m.unsigned_abs(), -m));
    hits.into_iter().next().map(|(_, p, q)| (p, q))
}

/// One `(n, m)` cell of the search grid: computes `theta`, gates on
/// amplitude, and on a clearing amplitude projects and certifies a
/// candidate. Returns the certified `(p, q)` pair (`p <= q`) on success.
#[allow(clippy::too_many_arguments)]
fn evaluate_m(
    ctx: &HpContext,
    ln_n: &Float,
    n: &Integer,
    j: u32,
    k: f64,
    m: i64,
    threshold: &Float,
    sample_idx: u64,
    diagnostics: Option<&DiagnosticsAccumulator>,
    sink: Option<&dyn EventSink>,
) -> Option<(i64, Integer, Integer)> {
    let m_f = ctx.from_i64(m);
    let k_f = ctx.from_f64(k);
    let raw_theta = Float::with_val(ctx.bits(), ctx.two_pi() * &m_f) / &k_f;
    let theta = ctx.principal_angle(&raw_theta);

    let amplitude = kernel::amplitude(ctx, &theta, j);
    if let Some(acc) = diagnostics {
        acc.record_kernel_evaluation(amplitude.to_f64());
    }
    if amplitude < *threshold {
        return None;
    }
    if let Some(s) = sink {
        s.candidate_hit(sample_idx, m, amplitude.to_f64());
    }
    if let Some(acc) = diagnostics {
        acc.record_candidate_tested();
    }

    match snap_with_reason(ctx, ln_n, &theta, n) {
        Err(Rejection::Zero) => {
            record_failure(diagnostics, sink, FailureClass::Zero, DiagnosticsAccumulator::record_zero);
            None
        }
        Err(Rejection::Overflow) => {
            record_failure(diagnostics, sink, FailureClass::Overflow, DiagnosticsAccumulator::record_overflow);
            None
        }
        Ok(p_hat) => certify(n, &p_hat, m, diagnostics, sink),
    }
}

fn record_failure(
    diagnostics: Option<&DiagnosticsAccumulator>,
    sink: Option<&dyn EventSink>,
    class: FailureClass,
    record: impl FnOnce(&DiagnosticsAccumulator),
) {
    if let Some(acc) = diagnostics {
        record(acc);
    }
    if let Some(s) = sink {
        s.failure_class(class);
    }
}

/// Single-division certification: tests `p_hat + delta` for
/// `delta` in `{0, -1, +1}`, accepting the first that divides `n` exactly.
fn certify(
    n: &Integer,
    p_hat: &Integer,
    m: i64,
    diagnostics: Option<&DiagnosticsAccumulator>,
    sink: Option<&dyn EventSink>,
) -> Option<(i64, Integer, Integer)> {
    for delta in [0i32, -1, 1] {
        let p = Integer::from(p_hat + delta);
        if p <= 1u32 || &p >= n {
            continue;
        }
        if n.is_divisible(&p) {
            let q = Integer::from(n / &p);
            return Some(if p <= q { (m, p, q) } else { (m, q, p) });
        }
    }
    record_failure(
        diagnostics,
        sink,
        FailureClass::NotDivisible,
        DiagnosticsAccumulator::record_not_divisible,
    );
    None
}
