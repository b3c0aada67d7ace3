//! Step log
//!
//! A [`Step`] records the outcome of one top-level operation in the log.
//! It is opened when the operation starts and finalized exactly once with
//! its outcome. A step dropped without being finalized is logged as a
//! failure, so early returns never leave an open step behind.

use std::time::Instant;

/// Final state of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    Failure,
    Abort,
}

/// Scoped log entry for one operation.
#[derive(Debug)]
pub struct Step {
    name: String,
    started: Instant,
    outcome: Option<StepOutcome>,
}

impl Step {
    /// Open a step.
    pub fn new(name: &str) -> Self {
        log::debug!("step '{}' started", name);
        Self {
            name: name.to_string(),
            started: Instant::now(),
            outcome: None,
        }
    }

    /// Step name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outcome, once finalized.
    pub fn outcome(&self) -> Option<StepOutcome> {
        self.outcome
    }

    /// Close the step with an outcome and message.
    ///
    /// Only the first call has an effect.
    pub fn finalize(&mut self, outcome: StepOutcome, message: &str) {
        if self.outcome.is_some() {
            return;
        }
        let elapsed = self.started.elapsed();
        match outcome {
            StepOutcome::Success => {
                log::info!("step '{}' succeeded in {:.2?}", self.name, elapsed)
            }
            StepOutcome::Failure => {
                log::error!("step '{}' failed after {:.2?}: {}", self.name, elapsed, message)
            }
            StepOutcome::Abort => {
                log::warn!("step '{}' aborted after {:.2?}: {}", self.name, elapsed, message)
            }
        }
        self.outcome = Some(outcome);
    }
}

impl Drop for Step {
    fn drop(&mut self) {
        if self.outcome.is_none() {
            self.finalize(StepOutcome::Failure, "step was not finalized");
        }
    }
}
