//! Use cases and the facades exposing them to callers.
//!
//! # Responsibility
//! - Sequence repository calls as load -> mutate -> save pipelines.
//! - Return every outcome as `CoreResult`, never panic on bad input.
//!
//! # Invariants
//! - Use cases are stateless; all state lives behind the repository.
//! - The first failure short-circuits the pipeline and is returned unchanged.
//! - Nothing is retried.

use crate::error::CoreResult;
use log::{debug, warn};

pub mod counter;
pub mod notes;

pub(crate) fn traced<T>(name: &'static str, outcome: CoreResult<T>) -> CoreResult<T> {
    match &outcome {
        Ok(_) => debug!("event=use_case module=service name={name} status=ok"),
        Err(err) => warn!(
            "event=use_case module=service name={name} status=error error_code={}",
            err.code()
        ),
    }
    outcome
}
