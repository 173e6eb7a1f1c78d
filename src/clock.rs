use std::time::Duration;
use tokio::time::Instant;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Tick,
    RevealElapsed,
}

/// Deadlines for one round's 1 Hz tick and its one-shot reveal.
///
/// The clock only reports what is due; the caller feeds each event to the
/// engine. Ticks that fall due while a reveal is pending are held and
/// released right after the reveal fires.
#[derive(Debug)]
pub struct RoundClock {
    tick_period: Duration,
    reveal_delay: Duration,
    next_tick: Instant,
    reveal_at: Option<Instant>,
}

impl RoundClock {
    pub fn new(now: Instant, reveal_delay: Duration) -> Self {
        Self::with_tick_period(now, TICK_PERIOD, reveal_delay)
    }

    pub fn with_tick_period(now: Instant, tick_period: Duration, reveal_delay: Duration) -> Self {
        Self {
            tick_period,
            reveal_delay,
            next_tick: now + tick_period,
            reveal_at: None,
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    pub fn schedule_reveal(&mut self, now: Instant) {
        self.reveal_at = Some(now + self.reveal_delay);
    }

    pub fn reveal_pending(&self) -> bool {
        self.reveal_at.is_some()
    }

    pub fn next_deadline(&self) -> Instant {
        self.reveal_at.unwrap_or(self.next_tick)
    }

    /// Takes the next event due at `now`. Call until it returns `None`.
    pub fn poll(&mut self, now: Instant) -> Option<ClockEvent> {
        if let Some(at) = self.reveal_at {
            if now < at {
                return None;
            }
            self.reveal_at = None;
            return Some(ClockEvent::RevealElapsed);
        }

        if now >= self.next_tick {
            self.next_tick += self.tick_period;
            return Some(ClockEvent::Tick);
        }
        None
    }

    /// Sleeps until the next event is due. Cancel-safe: dropping the future
    /// before it resolves leaves the clock untouched.
    pub async fn wait(&mut self) -> ClockEvent {
        loop {
            tokio::time::sleep_until(self.next_deadline()).await;
            if let Some(event) = self.poll(Instant::now()) {
                return event;
            }
        }
    }
}
