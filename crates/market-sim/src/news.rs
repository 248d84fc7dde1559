//! News Bias Controller
//!
//! Two-state process: inactive, or an active shock pushing generated order
//! prices up or down for a bounded number of ticks. The shock magnitude is
//! fixed for its whole lifetime.

use bazaar_core::Tick;
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::NewsBiasConfig;

/// Direction of a news shock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsDirection {
    Up,
    Down,
}

impl NewsDirection {
    /// +1 for good news, -1 for bad news
    pub fn sign(&self) -> f64 {
        match self {
            NewsDirection::Up => 1.0,
            NewsDirection::Down => -1.0,
        }
    }
}

/// An active news shock covering `start_tick..=end_tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsBias {
    pub direction: NewsDirection,
    pub start_tick: Tick,
    pub end_tick: Tick,
}

impl NewsBias {
    pub fn covers(&self, tick: Tick) -> bool {
        self.start_tick <= tick && tick <= self.end_tick
    }

    pub fn duration(&self) -> Tick {
        self.end_tick - self.start_tick
    }
}

/// What happened to the news state on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsTransition {
    Unchanged,
    Activated(NewsBias),
    Expired(NewsBias),
}

#[derive(Debug, Clone)]
pub struct NewsBiasController {
    config: NewsBiasConfig,
    active: Option<NewsBias>,
}

impl NewsBiasController {
    pub fn new(config: NewsBiasConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Run the per-tick transition check.
    ///
    /// An expiring shock consumes the tick: a new one can only start on a
    /// later tick.
    pub fn advance<R: Rng + ?Sized>(&mut self, tick: Tick, rng: &mut R) -> NewsTransition {
        if let Some(bias) = self.active {
            if tick > bias.end_tick {
                self.active = None;
                info!(
                    "News bias {:?} expired at tick {} (ran {}..={})",
                    bias.direction, tick, bias.start_tick, bias.end_tick
                );
                return NewsTransition::Expired(bias);
            }
            return NewsTransition::Unchanged;
        }

        if !rng.gen_bool(self.config.activation_probability) {
            return NewsTransition::Unchanged;
        }

        let duration = rng.gen_range(1..=self.config.max_duration);
        let direction = if rng.gen_bool(0.5) {
            NewsDirection::Up
        } else {
            NewsDirection::Down
        };
        NewsTransition::Activated(self.activate(tick, duration, direction))
    }

    /// Start a shock on `tick` lasting `duration` further ticks.
    ///
    /// Replaces any shock already running.
    pub fn activate(&mut self, tick: Tick, duration: Tick, direction: NewsDirection) -> NewsBias {
        let bias = NewsBias {
            direction,
            start_tick: tick,
            end_tick: tick.saturating_add(duration),
        };
        info!(
            "News bias {:?} active for ticks {}..={}",
            direction, bias.start_tick, bias.end_tick
        );
        self.active = Some(bias);
        bias
    }

    /// The live shock, if any
    pub fn active_bias(&self) -> Option<&NewsBias> {
        self.active.as_ref()
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn quiet_controller() -> NewsBiasController {
        NewsBiasController::new(NewsBiasConfig {
            activation_probability: 0.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_bias_lives_for_inclusive_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut news = quiet_controller();
        let bias = news.activate(10, 5, NewsDirection::Up);
        assert_eq!(bias.end_tick, 15);

        for tick in 10..=15 {
            assert_eq!(news.advance(tick, &mut rng), NewsTransition::Unchanged);
            assert!(news.active_bias().is_some_and(|b| b.covers(tick)));
        }

        assert_eq!(news.advance(16, &mut rng), NewsTransition::Expired(bias));
        assert!(news.active_bias().is_none());
    }

    #[test]
    fn test_unbounded_duration_saturates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut news = quiet_controller();
        let bias = news.activate(10, Tick::MAX, NewsDirection::Down);

        assert_eq!(bias.end_tick, Tick::MAX);
        assert_eq!(bias.duration(), Tick::MAX - 10);
        assert_eq!(news.advance(Tick::MAX, &mut rng), NewsTransition::Unchanged);
        assert!(news.active_bias().is_some_and(|b| b.covers(Tick::MAX)));
    }

    #[test]
    fn test_never_activates_with_zero_probability() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut news = quiet_controller();
        for tick in 1..5_000 {
            assert_eq!(news.advance(tick, &mut rng), NewsTransition::Unchanged);
        }
    }

    #[test]
    fn test_certain_activation_draws_bounded_duration() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut news = NewsBiasController::new(NewsBiasConfig {
            activation_probability: 1.0,
            max_duration: 500,
            ..Default::default()
        });

        match news.advance(3, &mut rng) {
            NewsTransition::Activated(bias) => {
                assert_eq!(bias.start_tick, 3);
                assert!((1..=500).contains(&bias.duration()));
            }
            other => panic!("expected activation, got {:?}", other),
        }
    }

    #[test]
    fn test_expiry_tick_does_not_reactivate() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut news = NewsBiasController::new(NewsBiasConfig {
            activation_probability: 1.0,
            ..Default::default()
        });
        let bias = news.activate(1, 1, NewsDirection::Down);

        assert!(matches!(news.advance(3, &mut rng), NewsTransition::Expired(b) if b == bias));
        assert!(news.active_bias().is_none());
        assert!(matches!(
            news.advance(4, &mut rng),
            NewsTransition::Activated(_)
        ));
    }

    #[test]
    fn test_activation_rate_close_to_configured() {
        let mut rng = StdRng::seed_from_u64(2024);
        let config = NewsBiasConfig {
            max_duration: 1,
            ..Default::default()
        };
        let mut news = NewsBiasController::new(config);

        let mut activations = 0;
        for tick in 1..=200_000 {
            if let NewsTransition::Activated(_) = news.advance(tick, &mut rng) {
                activations += 1;
            }
        }
        // Each shock occupies about 3 ticks, so roughly 400 activations
        assert!(activations > 250 && activations < 550, "{}", activations);
    }
}
