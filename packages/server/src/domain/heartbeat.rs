//! Viewer liveness state machine.
//!
//! Pure logic: no timers and no I/O. The viewer's control loop drives it
//! with `on_ping_sent` / `on_pong` / `check_liveness` and reacts to the
//! returned state, which keeps every transition unit-testable with a fixed
//! clock.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatState {
    /// Healthy; nothing outstanding.
    Connected,
    /// A ping went out and no pong has arrived yet.
    AwaitingPong,
    /// Liveness window elapsed without an answer. Terminal.
    TimedOut,
}

/// Ping/pong liveness tracking for one viewer connection.
///
/// Both outgoing pings and incoming pongs refresh `last_ping_at`; the
/// connection is stale once the elapsed time since that mark exceeds the
/// pong timeout.
#[derive(Debug)]
pub struct ViewerHeartbeat {
    state: HeartbeatState,
    last_ping_at: i64,
    pong_timeout_ms: i64,
}

impl ViewerHeartbeat {
    pub fn new(pong_timeout_ms: i64, now_ms: i64) -> Self {
        Self {
            state: HeartbeatState::Connected,
            last_ping_at: now_ms,
            pong_timeout_ms,
        }
    }

    pub fn state(&self) -> HeartbeatState {
        self.state
    }

    pub fn last_ping_at(&self) -> i64 {
        self.last_ping_at
    }

    /// Record that the periodic ping was sent.
    pub fn on_ping_sent(&mut self, now_ms: i64) {
        if self.state == HeartbeatState::TimedOut {
            return;
        }
        self.last_ping_at = now_ms;
        self.state = HeartbeatState::AwaitingPong;
    }

    /// Record a pong frame from the peer.
    pub fn on_pong(&mut self, now_ms: i64) {
        if self.state == HeartbeatState::TimedOut {
            return;
        }
        self.last_ping_at = now_ms;
        self.state = HeartbeatState::Connected;
    }

    /// Re-check liveness after the receive wait elapsed without any inbound
    /// frame. Transitions to `TimedOut` (sticky) once the pong timeout has
    /// passed since the last ping mark.
    pub fn check_liveness(&mut self, now_ms: i64) -> HeartbeatState {
        if self.state != HeartbeatState::TimedOut && now_ms - self.last_ping_at > self.pong_timeout_ms
        {
            self.state = HeartbeatState::TimedOut;
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT_MS: i64 = 15_000;

    #[test]
    fn test_initial_state_is_connected() {
        let heartbeat = ViewerHeartbeat::new(TIMEOUT_MS, 0);

        assert_eq!(heartbeat.state(), HeartbeatState::Connected);
    }

    #[test]
    fn test_ping_sent_awaits_pong() {
        let mut heartbeat = ViewerHeartbeat::new(TIMEOUT_MS, 0);

        heartbeat.on_ping_sent(30_000);

        assert_eq!(heartbeat.state(), HeartbeatState::AwaitingPong);
        assert_eq!(heartbeat.last_ping_at(), 30_000);
    }

    #[test]
    fn test_pong_returns_to_connected() {
        let mut heartbeat = ViewerHeartbeat::new(TIMEOUT_MS, 0);
        heartbeat.on_ping_sent(30_000);

        heartbeat.on_pong(31_000);

        assert_eq!(heartbeat.state(), HeartbeatState::Connected);
        assert_eq!(heartbeat.last_ping_at(), 31_000);
    }

    #[test]
    fn test_check_within_timeout_stays_alive() {
        let mut heartbeat = ViewerHeartbeat::new(TIMEOUT_MS, 0);
        heartbeat.on_ping_sent(30_000);

        // Exactly at the timeout boundary is still alive.
        assert_eq!(
            heartbeat.check_liveness(45_000),
            HeartbeatState::AwaitingPong
        );
    }

    #[test]
    fn test_check_past_timeout_times_out() {
        let mut heartbeat = ViewerHeartbeat::new(TIMEOUT_MS, 0);
        heartbeat.on_ping_sent(30_000);

        assert_eq!(heartbeat.check_liveness(45_001), HeartbeatState::TimedOut);
    }

    #[test]
    fn test_pong_defers_timeout() {
        let mut heartbeat = ViewerHeartbeat::new(TIMEOUT_MS, 0);
        heartbeat.on_ping_sent(30_000);
        heartbeat.on_pong(40_000);

        assert_eq!(heartbeat.check_liveness(45_000), HeartbeatState::Connected);
        assert_eq!(heartbeat.check_liveness(55_001), HeartbeatState::TimedOut);
    }

    #[test]
    fn test_timed_out_is_sticky() {
        let mut heartbeat = ViewerHeartbeat::new(TIMEOUT_MS, 0);
        heartbeat.on_ping_sent(0);
        heartbeat.check_liveness(20_000);

        // Neither a late pong nor a new ping revives the connection.
        heartbeat.on_pong(20_001);
        assert_eq!(heartbeat.state(), HeartbeatState::TimedOut);
        heartbeat.on_ping_sent(20_002);
        assert_eq!(heartbeat.state(), HeartbeatState::TimedOut);
    }
}
