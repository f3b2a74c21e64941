use std::time::Duration;

use super::config::GameConfig;

/// Result of crossing a level threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// The level just reached
    pub level: u32,
    /// Score needed for the following level
    pub next_level_score: u32,
    /// Tick interval to use from now on
    pub tick_interval: Duration,
    /// How many obstacles to add
    pub new_obstacles: usize,
}

/// Level thresholds and speed scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    level_score_increment: u32,
    tick_step: Duration,
    min_tick: Duration,
}

impl Progression {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level_score_increment: config.level_score_increment,
            tick_step: Duration::from_millis(config.tick_step_ms),
            min_tick: Duration::from_millis(config.min_tick_ms),
        }
    }

    /// Returns the level-up reached at `score`, if any.
    ///
    /// Only a score equal to or past `next_level_score` advances, and only by
    /// one level per call, since score grows by one per eaten food.
    pub fn check(
        &self,
        score: u32,
        level: u32,
        next_level_score: u32,
        tick_interval: Duration,
    ) -> Option<LevelUp> {
        if score < next_level_score {
            return None;
        }

        let level = level + 1;
        Some(LevelUp {
            level,
            next_level_score: next_level_score + self.level_score_increment,
            tick_interval: self.faster(tick_interval),
            new_obstacles: level as usize,
        })
    }

    /// Shorten the interval by one step without going under the floor
    pub fn faster(&self, tick_interval: Duration) -> Duration {
        tick_interval
            .saturating_sub(self.tick_step)
            .max(self.min_tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progression() -> Progression {
        Progression::new(&GameConfig::default())
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let p = progression();
        assert_eq!(p.check(4, 1, 5, Duration::from_millis(120)), None);
    }

    #[test]
    fn test_level_up_at_threshold() {
        let p = progression();
        let up = p.check(5, 1, 5, Duration::from_millis(120)).unwrap();

        assert_eq!(up.level, 2);
        assert_eq!(up.next_level_score, 10);
        assert_eq!(up.tick_interval, Duration::from_millis(110));
        assert_eq!(up.new_obstacles, 2);
    }

    #[test]
    fn test_threshold_grows_by_fixed_increment() {
        let p = progression();
        let second = p.check(10, 2, 10, Duration::from_millis(110)).unwrap();
        let third = p.check(15, 3, second.next_level_score, second.tick_interval).unwrap();

        assert_eq!(second.next_level_score, 15);
        assert_eq!(third.next_level_score, 20);
        assert_eq!(third.new_obstacles, 4);
    }

    #[test]
    fn test_speed_floor() {
        let p = progression();
        assert_eq!(p.faster(Duration::from_millis(55)), Duration::from_millis(50));
        assert_eq!(p.faster(Duration::from_millis(50)), Duration::from_millis(50));
        assert_eq!(p.faster(Duration::from_millis(5)), Duration::from_millis(50));
    }
}
