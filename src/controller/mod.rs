// src/controller/mod.rs
// Top-level orchestrator: validate, single-flight, analyze, execute

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{info, warn};

use crate::analysis::complexity;
use crate::client::{HttpTransport, RequestClient, Transport};
use crate::config::ShiftConfig;
use crate::error::OperationError;
use crate::types::{ComplexityMetrics, OperationKind, OperationOutcome, OperationRequest, RetryPolicy};

/// Hard cap on submitted source length, in characters.
const MAX_CODE_CHARS: usize = 50_000;

/// Clears the in-flight flag when the accepted path exits, on every path
/// out of `execute` including panics.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Orchestrates one operation at a time against the remote service.
///
/// Owns the in-flight flag exclusively; operations are strictly
/// single-flight and a second `execute` while one is pending is rejected,
/// not queued. The stages run in a fixed order — validate, analyze,
/// execute, record-metrics — and only the execute stage performs I/O.
pub struct OperationController {
    client: RequestClient,
    policy: RetryPolicy,
    in_flight: AtomicBool,
}

impl OperationController {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self {
            client: RequestClient::new(transport),
            policy,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &ShiftConfig) -> Self {
        Self::new(Arc::new(HttpTransport::from_config(config)), config.retry_policy())
    }

    /// Run one operation to a normalized outcome. Never panics the caller,
    /// never leaves the flag set, never queues.
    pub async fn execute(&self, request: OperationRequest) -> OperationOutcome {
        if let Err(e) = Self::validate(&request) {
            warn!(operation = %request.kind, error = %e, "request rejected");
            return e.into_outcome();
        }

        let Some(_guard) = self.begin() else {
            warn!(operation = %request.kind, "rejected: operation already in flight");
            return OperationError::Busy.into_outcome();
        };

        let started = Instant::now();
        let metrics = Self::analyze(&request);

        let mut outcome = self.client.send(&request, &self.policy).await;
        outcome.complexity = Some(metrics);

        self.record_metrics(&request, &outcome, started);
        outcome
    }

    /// Stage 1: reject before any state change or network activity.
    fn validate(request: &OperationRequest) -> Result<(), OperationError> {
        if request.source_code.trim().is_empty() {
            return Err(OperationError::Validation("code cannot be empty".into()));
        }
        if request.source_code.chars().count() > MAX_CODE_CHARS {
            return Err(OperationError::Validation(format!(
                "code is too long (max {} characters)",
                MAX_CODE_CHARS
            )));
        }
        if request.kind == OperationKind::Convert {
            match request.target_language {
                None => {
                    return Err(OperationError::Validation(
                        "conversion requires a target language".into(),
                    ));
                }
                Some(target) if target == request.source_language => {
                    return Err(OperationError::Validation(
                        "source and target languages cannot be the same".into(),
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Claim the flag; `None` means another operation holds it.
    fn begin(&self) -> Option<FlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard(&self.in_flight))
    }

    /// Stage 2: advisory classification. Logged and attached to the
    /// outcome, never a gate.
    fn analyze(request: &OperationRequest) -> ComplexityMetrics {
        let metrics = complexity::analyze(&request.source_code, request.source_language);
        info!(
            language = %request.source_language,
            score = metrics.score,
            level = ?metrics.level,
            lines = metrics.line_count,
            "input classified"
        );
        metrics
    }

    /// Stage 4: per-operation timing and result telemetry.
    fn record_metrics(&self, request: &OperationRequest, outcome: &OperationOutcome, started: Instant) {
        info!(
            operation = %request.kind,
            success = outcome.success,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "operation finished"
        );
    }

    /// Whether an operation is currently in flight. Observational only;
    /// `execute` does its own atomic claim.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    fn request(kind: OperationKind, target: Option<Language>) -> OperationRequest {
        OperationRequest {
            source_code: "print(1)".into(),
            source_language: Language::Python,
            target_language: target,
            kind,
        }
    }

    // ========================================================================
    // Validation stage
    // ========================================================================

    #[test]
    fn empty_code_is_rejected() {
        let mut req = request(OperationKind::Transform, None);
        req.source_code = "   \n\t ".into();
        assert!(OperationController::validate(&req).is_err());
    }

    #[test]
    fn oversized_code_is_rejected() {
        let mut req = request(OperationKind::Transform, None);
        req.source_code = "x".repeat(MAX_CODE_CHARS + 1);
        assert!(OperationController::validate(&req).is_err());
    }

    #[test]
    fn code_at_the_cap_is_accepted() {
        let mut req = request(OperationKind::Transform, None);
        req.source_code = "x".repeat(MAX_CODE_CHARS);
        assert!(OperationController::validate(&req).is_ok());
    }

    #[test]
    fn convert_to_same_language_is_rejected() {
        let req = request(OperationKind::Convert, Some(Language::Python));
        assert!(OperationController::validate(&req).is_err());
    }

    #[test]
    fn convert_without_target_is_rejected() {
        let req = request(OperationKind::Convert, None);
        assert!(OperationController::validate(&req).is_err());
    }

    #[test]
    fn convert_to_different_language_is_accepted() {
        let req = request(OperationKind::Convert, Some(Language::JavaScript));
        assert!(OperationController::validate(&req).is_ok());
    }

    // ========================================================================
    // Flight guard
    // ========================================================================

    #[test]
    fn guard_resets_flag_on_drop() {
        let flag = AtomicBool::new(false);
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .unwrap();
        {
            let _guard = FlightGuard(&flag);
            assert!(flag.load(Ordering::Acquire));
        }
        assert!(!flag.load(Ordering::Acquire));
    }
}
