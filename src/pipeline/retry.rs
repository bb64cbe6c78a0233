//! Bounded retry loop
//!
//! Each attempt starts from scratch. A failure that a fresh attempt cannot fix
//! (see [`PackError::is_retryable`]) ends the loop immediately; otherwise the
//! last failure is reported once the budget is spent. There is no backoff.

use crate::core::error::{PackError, PackResult};

/// Run `attempt` up to `budget` times, passing the 1-based attempt number.
pub fn run_bounded<T, F>(budget: u32, mut attempt: F) -> PackResult<T>
where
  F: FnMut(u32) -> PackResult<T>,
{
  let mut last = None;

  for number in 1..=budget {
    match attempt(number) {
      Ok(value) => {
        if number > 1 {
          tracing::info!("succeeded on attempt {}/{}", number, budget);
        }
        return Ok(value);
      }
      Err(err) if !err.is_retryable() => return Err(err),
      Err(err) => {
        let left = budget - number;
        if left > 0 {
          tracing::info!("restarting from COPY ({} attempt(s) left)", left);
        }
        last = Some(err);
      }
    }
  }

  Err(PackError::RetryExhausted {
    attempts: budget,
    last: Box::new(last.unwrap_or_else(|| PackError::message("retry budget allows no attempts"))),
  })
}
