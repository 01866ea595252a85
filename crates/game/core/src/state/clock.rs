//! Per-entity action cadence.

use std::num::NonZeroU64;

use crate::state::Tick;

/// Gate deciding when an entity may act.
///
/// Real-time entities accumulate simulated time and act once the accumulator
/// reaches their interval. Time only advances in whole quanta, so the interval
/// is rounded up to the quantum grid: two actions are never closer than the
/// configured interval, and intervals on the grid keep an exact `1 / interval`
/// rate. Player-bound entities act once per submitted turn and only count
/// turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionClock {
    RealTime {
        interval: NonZeroU64,
        accumulated: u64,
    },
    TurnBound {
        turns: u64,
    },
    /// Never acts (props, NPCs without behavior, projectiles).
    Inert,
}

impl ActionClock {
    /// Real-time clock with the given interval; `None` for a zero interval.
    pub fn real_time(interval: u64) -> Option<Self> {
        NonZeroU64::new(interval).map(|interval| ActionClock::RealTime {
            interval,
            accumulated: 0,
        })
    }

    pub fn turn_bound() -> Self {
        ActionClock::TurnBound { turns: 0 }
    }

    /// Configured interval for real-time clocks.
    pub fn interval(&self) -> Option<Tick> {
        match self {
            ActionClock::RealTime { interval, .. } => Some(Tick(interval.get())),
            _ => None,
        }
    }

    /// Time accumulated since the last action (real-time clocks only).
    pub fn accumulated(&self) -> u64 {
        match self {
            ActionClock::RealTime { accumulated, .. } => *accumulated,
            _ => 0,
        }
    }

    /// Adds `elapsed` simulated milliseconds to a real-time accumulator.
    pub fn advance(&mut self, elapsed: u64) {
        if let ActionClock::RealTime { accumulated, .. } = self {
            *accumulated = accumulated.saturating_add(elapsed);
        }
    }

    /// Consumes one action if the accumulator reached the effective interval.
    ///
    /// `interval_percent` stretches the interval (slow effects); 100 leaves it
    /// unchanged. The stretched interval is rounded up to a multiple of
    /// `quantum`. At most one action is granted per call, and the carried
    /// remainder is capped below one interval so a clock that fell behind
    /// never bursts several actions in a row.
    pub fn try_consume(&mut self, interval_percent: u32, quantum: u64) -> bool {
        let ActionClock::RealTime {
            interval,
            accumulated,
        } = self
        else {
            return false;
        };

        let effective = on_grid(scale(interval.get(), interval_percent), quantum);
        if *accumulated < effective {
            return false;
        }

        *accumulated = (*accumulated - effective).min(effective - 1);
        true
    }

    /// Records a player turn on a turn-bound clock.
    pub fn record_turn(&mut self) {
        if let ActionClock::TurnBound { turns } = self {
            *turns += 1;
        }
    }

    pub fn turns(&self) -> u64 {
        match self {
            ActionClock::TurnBound { turns } => *turns,
            _ => 0,
        }
    }
}

/// `value * percent / 100`, never below one.
fn scale(value: u64, percent: u32) -> u64 {
    (value.saturating_mul(u64::from(percent.max(1))) / 100).max(1)
}

/// Smallest multiple of `quantum` that is at least `value`.
fn on_grid(value: u64, quantum: u64) -> u64 {
    let quantum = quantum.max(1);
    value.div_ceil(quantum).saturating_mul(quantum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_rejected() {
        assert!(ActionClock::real_time(0).is_none());
        assert_eq!(
            ActionClock::real_time(250).and_then(|c| c.interval()),
            Some(Tick(250))
        );
    }

    #[test]
    fn acts_once_interval_elapses_and_carries_excess() {
        let mut clock = ActionClock::real_time(250).expect("non-zero interval");

        clock.advance(100);
        clock.advance(100);
        assert!(!clock.try_consume(100, 50));

        clock.advance(100);
        assert!(clock.try_consume(100, 50));
        assert_eq!(clock.accumulated(), 50);

        // Only one action per consume, even with time to spare.
        assert!(!clock.try_consume(100, 50));
    }

    #[test]
    fn off_grid_interval_never_acts_early() {
        let mut clock = ActionClock::real_time(150).expect("non-zero interval");
        let quantum = 100;
        let mut acted_at = Vec::new();

        for tick in 1..=30u64 {
            clock.advance(quantum);
            if clock.try_consume(100, quantum) {
                acted_at.push(tick * quantum);
            }
        }

        assert_eq!(acted_at.len(), 15);
        assert!(acted_at.windows(2).all(|w| w[1] - w[0] >= 150));
    }

    #[test]
    fn long_run_rate_converges_to_interval() {
        let mut clock = ActionClock::real_time(150).expect("non-zero interval");
        let mut actions = 0u64;
        let quantum = 50;
        let ticks = 6_000;

        for _ in 0..ticks {
            clock.advance(quantum);
            if clock.try_consume(100, quantum) {
                actions += 1;
            }
        }

        // 300_000 ms / 150 ms
        assert_eq!(actions, 2_000);
    }

    #[test]
    fn slow_percentage_stretches_interval() {
        let mut clock = ActionClock::real_time(200).expect("non-zero interval");
        clock.advance(300);
        assert!(!clock.try_consume(200, 100));
        clock.advance(100);
        assert!(clock.try_consume(200, 100));
    }

    #[test]
    fn turn_bound_clock_counts_turns_only() {
        let mut clock = ActionClock::turn_bound();
        clock.advance(1_000);
        assert!(!clock.try_consume(100, 100));
        clock.record_turn();
        clock.record_turn();
        assert_eq!(clock.turns(), 2);
    }
}
