//! Sleep abstraction for testability.
//!
//! The retrying transport waits between attempts through a [`Sleeper`]
//! so tests can run retry sequences without real delays.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

/// Abstraction over asynchronous sleeping.
///
/// # Example
///
/// ```
/// use hookpost::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let sleeper = InstantSleeper::default();
/// sleeper.sleep(Duration::from_secs(60)).await;
/// assert_eq!(sleeper.recorded(), vec![Duration::from_secs(60)]);
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Sleeper that returns immediately and records every requested wait.
#[derive(Debug, Default)]
pub struct InstantSleeper {
    recorded: Mutex<Vec<Duration>>,
}

impl InstantSleeper {
    /// Returns the durations passed to [`Sleeper::sleep`], in call order.
    #[must_use]
    pub fn recorded(&self) -> Vec<Duration> {
        self.recorded
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |waits| waits.clone())
    }
}

impl Sleeper for InstantSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        match self.recorded.lock() {
            Ok(mut waits) => waits.push(duration),
            Err(poisoned) => poisoned.into_inner().push(duration),
        }
        std::future::ready(())
    }
}
