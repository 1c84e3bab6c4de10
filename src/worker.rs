use futures_util::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    limiter::AdmissionLimiter,
    models::{CorrelationId, UnitOfWork},
};

pub const DEFAULT_WORK_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkError {
    #[error("workload failed: {0}")]
    Failed(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum UnitOutcome {
    Rejected,
    Completed,
    Failed(WorkError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FanOutReport {
    pub admitted: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Stand-in for real I/O or compute.
pub async fn simulated_work(delay: Duration) -> Result<(), WorkError> {
    tokio::time::sleep(delay).await;
    Ok(())
}

/// Runs one unit of work behind the limiter.
///
/// A rejected unit does nothing and never touches `release`. An admitted unit
/// gives its slot back whatever `work` returns, and also if it panics.
pub async fn run_unit<F, Fut>(
    limiter: Arc<AdmissionLimiter>,
    unit: UnitOfWork,
    work: F,
) -> UnitOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), WorkError>>,
{
    let permit = match limiter.try_acquire() {
        Ok(permit) => permit,
        Err(observed) => {
            info!(
                tx_id = %unit.tx_id,
                ordinal = unit.ordinal,
                total_admitted = observed.total_admitted,
                active = observed.active,
                "unit rejected"
            );
            return UnitOutcome::Rejected;
        }
    };

    let admitted = permit.admitted();
    info!(
        tx_id = %unit.tx_id,
        ordinal = unit.ordinal,
        total_admitted = admitted.total_admitted,
        active = admitted.active,
        "unit admitted"
    );

    let live = limiter.snapshot();
    info!(
        tx_id = %unit.tx_id,
        ordinal = unit.ordinal,
        total_admitted = live.total_admitted,
        active = live.active,
        "unit working"
    );

    let result = work().await;

    let live = limiter.snapshot();
    info!(
        tx_id = %unit.tx_id,
        ordinal = unit.ordinal,
        total_admitted = live.total_admitted,
        active = live.active,
        ok = result.is_ok(),
        "unit work finished"
    );

    let after = permit.release();
    info!(
        tx_id = %unit.tx_id,
        ordinal = unit.ordinal,
        total_admitted = after.total_admitted,
        active = after.active,
        ok = result.is_ok(),
        "unit released"
    );

    match result {
        Ok(()) => UnitOutcome::Completed,
        Err(e) => UnitOutcome::Failed(e),
    }
}

/// Launches `width` units as separate tasks and waits for all of them.
pub async fn fan_out(
    limiter: Arc<AdmissionLimiter>,
    tx_id: CorrelationId,
    width: usize,
    delay: Duration,
) -> FanOutReport {
    let mut handles = Vec::with_capacity(width);
    for ordinal in 0..width {
        let unit = UnitOfWork {
            tx_id: tx_id.clone(),
            ordinal,
        };
        handles.push(tokio::spawn(run_unit(
            Arc::clone(&limiter),
            unit,
            move || simulated_work(delay),
        )));

        let live = limiter.snapshot();
        info!(
            tx_id = %tx_id,
            ordinal,
            total_admitted = live.total_admitted,
            active = live.active,
            "unit spawned"
        );
    }

    let mut report = FanOutReport::default();
    for joined in join_all(handles).await {
        match joined {
            Ok(UnitOutcome::Completed) => report.admitted += 1,
            Ok(UnitOutcome::Rejected) => report.rejected += 1,
            Ok(UnitOutcome::Failed(e)) => {
                report.admitted += 1;
                report.failed += 1;
                error!(tx_id = %tx_id, error = %e, "unit failed");
            }
            Err(e) => {
                report.failed += 1;
                error!(tx_id = %tx_id, error = %e, "unit task aborted");
            }
        }
    }
    report
}
