//! Cooperative execution throttle
//!
//! Long host-visible loops (enumeration driving script callbacks, bulk
//! reflection operations) call [`ExecutionThrottle::wait`] once per step. The
//! call may block; it returns `Ok(())` to continue, or an error that the
//! caller turns into an abort of the in-flight operation.
//!
//! Cancellation and deadline are carried by a [`CancellationSignal`] that the
//! host can trigger from another thread.

use crate::error::Error;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error as ThisError;
use tracing::{debug, trace};

/// Why the throttle refused to continue
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ThrottleError {
    /// The signal was cancelled
    #[error("operation cancelled")]
    Cancelled,
    /// Quota exhausted or the wait would pass the deadline
    #[error("{0}")]
    DeadlineExceeded(String),
}

impl From<ThrottleError> for Error {
    fn from(err: ThrottleError) -> Self {
        match err {
            ThrottleError::Cancelled => Error::cancelled("operation cancelled"),
            ThrottleError::DeadlineExceeded(message) => Error::deadline_exceeded(message),
        }
    }
}

struct SignalInner {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
    lock: Mutex<()>,
    wake: Condvar,
}

/// Cancellation context handed to the throttle
#[derive(Clone)]
pub struct CancellationSignal {
    inner: Arc<SignalInner>,
}

impl CancellationSignal {
    /// A signal with no deadline
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A signal that expires at `deadline`
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::build(Some(deadline))
    }

    /// A signal that expires after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(Instant::now() + timeout))
    }

    fn build(deadline: Option<Instant>) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                cancelled: AtomicBool::new(false),
                deadline,
                lock: Mutex::new(()),
                wake: Condvar::new(),
            }),
        }
    }

    /// Cancel; wakes any thread blocked in a throttle wait
    pub fn cancel(&self) {
        let _guard = self.inner.lock.lock();
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.wake.notify_all();
    }

    /// Check if cancelled
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Fail if cancelled or past the deadline
    pub fn check(&self) -> Result<(), ThrottleError> {
        if self.is_cancelled() {
            return Err(ThrottleError::Cancelled);
        }
        if self.deadline().is_some_and(|d| Instant::now() >= d) {
            return Err(ThrottleError::DeadlineExceeded("deadline exceeded".to_string()));
        }
        Ok(())
    }

    /// Block for `duration` unless cancelled first
    pub fn sleep(&self, duration: Duration) -> Result<(), ThrottleError> {
        let until = Instant::now() + duration;
        let mut guard = self.inner.lock.lock();
        while !self.is_cancelled() {
            if self.inner.wake.wait_until(&mut guard, until).timed_out() {
                break;
            }
        }
        drop(guard);
        if self.is_cancelled() {
            Err(ThrottleError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationSignal")
            .field("cancelled", &self.is_cancelled())
            .field("deadline", &self.deadline())
            .finish()
    }
}

/// Permission gate consulted between loop steps
pub trait ExecutionThrottle: Send + Sync {
    /// Wait for permission to run one more step
    fn wait(&self, signal: Option<&CancellationSignal>) -> Result<(), ThrottleError>;
}

/// No rate limit; only honors the signal
#[derive(Debug, Default, Clone, Copy)]
pub struct Unthrottled;

impl ExecutionThrottle for Unthrottled {
    fn wait(&self, signal: Option<&CancellationSignal>) -> Result<(), ThrottleError> {
        match signal {
            Some(signal) => signal.check(),
            None => Ok(()),
        }
    }
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
    issued: u64,
}

/// Token-bucket throttle: `rate` ticks per second with bursts up to `burst`,
/// and an optional total tick quota
pub struct TokenBucket {
    rate: f64,
    burst: f64,
    max_ticks: Option<u64>,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Create a full bucket
    pub fn new(rate: f64, burst: u32, max_ticks: Option<u64>) -> Self {
        let burst = f64::from(burst.max(1));
        Self {
            rate,
            burst,
            max_ticks,
            state: Mutex::new(BucketState {
                tokens: burst,
                last_refill: Instant::now(),
                issued: 0,
            }),
        }
    }

    /// Ticks granted so far
    pub fn issued(&self) -> u64 {
        self.state.lock().issued
    }

    /// Reserve one token; returns how long the caller must wait before using it
    fn reserve(&self, signal: Option<&CancellationSignal>) -> Result<Duration, ThrottleError> {
        let mut state = self.state.lock();
        if let Some(max) = self.max_ticks {
            if state.issued >= max {
                return Err(ThrottleError::DeadlineExceeded(format!(
                    "tick quota of {} exhausted",
                    max
                )));
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();
        state.tokens = (state.tokens + elapsed * self.rate).min(self.burst);
        state.last_refill = now;

        let delay = if state.tokens >= 1.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64((1.0 - state.tokens) / self.rate)
        };
        if let Some(deadline) = signal.and_then(|s| s.deadline()) {
            if now + delay > deadline {
                return Err(ThrottleError::DeadlineExceeded(
                    "throttle wait would exceed deadline".to_string(),
                ));
            }
        }

        state.tokens -= 1.0;
        state.issued += 1;
        Ok(delay)
    }

    fn refund(&self) {
        let mut state = self.state.lock();
        state.tokens = (state.tokens + 1.0).min(self.burst);
        state.issued = state.issued.saturating_sub(1);
    }
}

impl ExecutionThrottle for TokenBucket {
    fn wait(&self, signal: Option<&CancellationSignal>) -> Result<(), ThrottleError> {
        if let Some(signal) = signal {
            signal.check()?;
        }
        let delay = self.reserve(signal).inspect_err(|err| {
            debug!(%err, "throttle refused");
        })?;
        if delay.is_zero() {
            return Ok(());
        }

        trace!(?delay, "throttle wait");
        let slept = match signal {
            Some(signal) => signal.sleep(delay),
            None => {
                std::thread::sleep(delay);
                Ok(())
            }
        };
        if slept.is_err() {
            self.refund();
            debug!("throttle wait cancelled");
        }
        slept
    }
}

impl std::fmt::Debug for TokenBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBucket")
            .field("rate", &self.rate)
            .field("burst", &self.burst)
            .field("max_ticks", &self.max_ticks)
            .finish()
    }
}
