//! Retrying acquisition of external resources.
//!
//! [`ConnectionWaiter`] runs a fallible connect operation until it succeeds
//! or the attempt budget runs out, sleeping `base_delay * (attempt + 1)`
//! after every failure. Progress goes to an [`OutputSink`]; delays go
//! through a [`Sleeper`] so tests never sleep in real time.

mod error;
mod output;
mod sleeper;
pub mod tcp;
mod waiter;

pub use error::{AttemptError, WaitError};
pub use output::{OutputSink, TracingOutput};
pub use sleeper::{NoopSleeper, Sleeper, ThreadSleeper};
pub use waiter::{ConnectionWaiter, DEFAULT_BASE_DELAY, wait_for_connection};
