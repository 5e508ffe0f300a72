//! Timed-access protocol shared by latency-modeled storage.
//!
//! Every storage resource in the engine (register/memory cell arrays,
//! instruction memory, instruction buffers) models cross-unit access latency
//! the same way: a boolean readiness flag plus an integer countdown. This
//! module provides:
//! 1. **Delay modes:** No-delay resources succeed immediately; delayed
//!    resources require a request/wait/access handshake.
//! 2. **Latency arithmetic:** A pure function of the requester's and the
//!    resource's clock frequencies.
//! 3. **The access timer:** The state machine driving the handshake.

use serde::Deserialize;

use crate::common::error::ProtocolError;

/// Operating mode of a timed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum DelayMode {
    /// Every access succeeds immediately; requesting access is an error.
    #[default]
    Immediate,
    /// Accesses must be requested and waited for.
    Delayed,
}

/// Simulated access latency, in resource ticks, for a requester running at
/// `requester_hz` reaching a resource running at `resource_hz`.
///
/// The latency is `ceil(requester_hz / resource_hz)` with a minimum of one
/// tick: a fast unit waits proportionally longer for a slow resource, and
/// no access is ever free.
///
/// # Examples
///
/// ```
/// use scalar_core::common::timing::access_latency;
///
/// assert_eq!(access_latency(4, 1), 4);
/// assert_eq!(access_latency(3, 2), 2);
/// assert_eq!(access_latency(1, 8), 1);
/// ```
pub fn access_latency(requester_hz: u64, resource_hz: u64) -> u64 {
    debug_assert!(requester_hz > 0 && resource_hz > 0, "zero clock frequency");
    requester_hz.div_ceil(resource_hz).max(1)
}

/// Readiness state machine for one timed resource.
///
/// A delayed timer starts not-ready: the first access must be preceded by a
/// request. A successful access consumes readiness, requiring a fresh
/// request before the next one. An immediate timer is always ready.
#[derive(Debug, Clone)]
pub struct AccessTimer {
    mode: DelayMode,
    ready: bool,
    countdown: u64,
}

impl AccessTimer {
    /// Creates a timer in the given mode.
    pub fn new(mode: DelayMode) -> Self {
        Self {
            mode,
            ready: mode == DelayMode::Immediate,
            countdown: 0,
        }
    }

    /// The timer's operating mode.
    pub fn mode(&self) -> DelayMode {
        self.mode
    }

    /// Whether an access would currently succeed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether a countdown is currently running.
    pub fn in_flight(&self) -> bool {
        self.countdown > 0
    }

    /// Requests access on behalf of a unit running at `requester_hz`.
    ///
    /// If a countdown is already running the request is a no-op — the
    /// countdown is never restarted. Otherwise readiness is cleared and a
    /// countdown of [`access_latency`] ticks begins.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::RequestOnImmediate`] if the resource is in
    /// no-delay mode: immediate resources never need asking.
    pub fn request(&mut self, requester_hz: u64, resource_hz: u64) -> Result<(), ProtocolError> {
        if self.mode == DelayMode::Immediate {
            return Err(ProtocolError::RequestOnImmediate);
        }
        if self.countdown > 0 {
            return Ok(());
        }
        self.ready = false;
        self.countdown = access_latency(requester_hz, resource_hz);
        Ok(())
    }

    /// Advances the timer by one resource tick.
    ///
    /// Decrements a running countdown by exactly one; readiness is raised
    /// when it reaches zero.
    pub fn tick(&mut self) {
        if self.countdown > 0 {
            self.countdown -= 1;
            if self.countdown == 0 {
                self.ready = true;
            }
        }
    }

    /// Consumes readiness for one access.
    ///
    /// Immediate timers always succeed and stay ready. Delayed timers
    /// succeed only when ready, and a success clears readiness so the next
    /// access needs a fresh request.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotReady`] for a delayed timer whose
    /// latency has not elapsed.
    pub fn consume(&mut self) -> Result<(), ProtocolError> {
        match self.mode {
            DelayMode::Immediate => Ok(()),
            DelayMode::Delayed => {
                if self.ready {
                    self.ready = false;
                    Ok(())
                } else {
                    Err(ProtocolError::NotReady)
                }
            }
        }
    }

    /// Discards any pending or completed request, clearing readiness.
    ///
    /// No-op for immediate timers, which are unconditionally ready.
    pub fn cancel(&mut self) {
        if self.mode == DelayMode::Delayed {
            self.ready = false;
            self.countdown = 0;
        }
    }
}
