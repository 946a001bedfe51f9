use std::fmt::Display;
use std::time::Duration;

use tracing::debug;

use crate::{AttemptError, OutputSink, Sleeper, ThreadSleeper, TracingOutput, WaitError};

/// Delay unit used when none is configured.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Retries a connect operation with linearly growing delays.
///
/// Attempt `i` (zero-based) that fails is followed by a sleep of
/// `base_delay * (i + 1)`, the last failed attempt included. A success
/// returns immediately. A waiter holds no mutable state, so one instance can
/// serve any number of concurrent waits.
#[derive(Debug, Clone)]
pub struct ConnectionWaiter<S = ThreadSleeper> {
    resource_name: String,
    max_attempts: u32,
    base_delay: Duration,
    sleeper: S,
}

impl ConnectionWaiter<ThreadSleeper> {
    /// A waiter that blocks the calling thread between attempts.
    /// `max_attempts == 0` fails without ever calling the operation.
    pub fn new(resource_name: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            resource_name: resource_name.into(),
            max_attempts,
            base_delay: DEFAULT_BASE_DELAY,
            sleeper: ThreadSleeper,
        }
    }
}

impl<S: Sleeper> ConnectionWaiter<S> {
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> ConnectionWaiter<T> {
        ConnectionWaiter {
            resource_name: self.resource_name,
            max_attempts: self.max_attempts,
            base_delay: self.base_delay,
            sleeper,
        }
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Delay slept after the failed attempt with zero-based index `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.saturating_add(1))
    }

    /// Runs `connect` until it succeeds or every attempt has failed.
    ///
    /// Every failure is reported to `sink` twice: first as an
    /// [`AttemptError`], then as a `"Trying to reconnect to <name> in <N> s"`
    /// message. Only exhaustion is returned to the caller.
    pub fn wait<T, E, F>(&self, mut connect: F, sink: &mut dyn OutputSink) -> Result<T, WaitError>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
    {
        for attempt in 0..self.max_attempts {
            let reason = match connect() {
                Ok(resource) => {
                    debug!("connected to {} on attempt {}", self.resource_name, attempt + 1);
                    return Ok(resource);
                }
                Err(reason) => reason,
            };

            let attempt_error = AttemptError {
                resource_name: self.resource_name.clone(),
                attempt,
                reason: reason.to_string(),
            };
            sink.output("", Some(&attempt_error));

            let delay = self.delay_after(attempt);
            let message = format!(
                "Trying to reconnect to {} in {:.0} s",
                self.resource_name,
                delay.as_secs_f64()
            );
            sink.output(&message, None);
            self.sleeper.sleep(delay);
        }

        Err(WaitError::Exhausted {
            resource_name: self.resource_name.clone(),
            attempts: self.max_attempts,
        })
    }

    /// [`wait`](Self::wait) reporting through [`TracingOutput`].
    pub fn wait_logged<T, E, F>(&self, connect: F) -> Result<T, WaitError>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
    {
        self.wait(connect, &mut TracingOutput)
    }
}

/// One-shot wait with the default sleeper and base delay. Without a sink,
/// diagnostics go to [`TracingOutput`].
pub fn wait_for_connection<T, E, F>(
    max_attempts: u32,
    resource_name: &str,
    connect: F,
    sink: Option<&mut dyn OutputSink>,
) -> Result<T, WaitError>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    let waiter = ConnectionWaiter::new(resource_name, max_attempts);
    match sink {
        Some(sink) => waiter.wait(connect, sink),
        None => waiter.wait_logged(connect),
    }
}
