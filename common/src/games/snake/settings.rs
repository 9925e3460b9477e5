use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{FieldSize, WallCollisionMode};

pub const MAX_FOOD_REWARD: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedSettings {
    pub initial_tick_interval_ms: u32,
    /// Subtracted from the tick interval each time food is eaten. Zero keeps a fixed rate.
    pub speedup_per_food_ms: u32,
    pub min_tick_interval_ms: u32,
}

impl SpeedSettings {
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_interval_ms as u64)
    }

    pub fn after_food(&self, current: Duration) -> Duration {
        let floor = Duration::from_millis(self.min_tick_interval_ms as u64);
        current
            .saturating_sub(Duration::from_millis(self.speedup_per_food_ms as u64))
            .max(floor)
    }
}

impl Default for SpeedSettings {
    fn default() -> Self {
        Self {
            initial_tick_interval_ms: 200,
            speedup_per_food_ms: 5,
            min_tick_interval_ms: 50,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub wall_collision_mode: WallCollisionMode,
    pub initial_length: usize,
    pub food_reward: u32,
    pub speed: SpeedSettings,
}

impl SnakeSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize {
            width: self.field_width,
            height: self.field_height,
        }
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            field_width: 20,
            field_height: 20,
            wall_collision_mode: WallCollisionMode::WrapAround,
            initial_length: 3,
            food_reward: 10,
            speed: SpeedSettings::default(),
        }
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 5 || self.field_width > 100 {
            return Err("Field width must be between 5 and 100".to_string());
        }
        if self.field_height < 5 || self.field_height > 100 {
            return Err("Field height must be between 5 and 100".to_string());
        }
        if self.initial_length < 1 {
            return Err("Initial snake length must be at least 1".to_string());
        }
        if self.initial_length > self.field_width / 2 + 1 {
            return Err("Initial snake length must fit in the left half of the field".to_string());
        }
        if self.food_reward == 0 || self.food_reward > MAX_FOOD_REWARD {
            return Err(format!("Food reward must be between 1 and {}", MAX_FOOD_REWARD));
        }
        if self.speed.min_tick_interval_ms < 10 {
            return Err("Minimum tick interval must be at least 10ms".to_string());
        }
        if self.speed.initial_tick_interval_ms > 5000 {
            return Err("Tick interval must not exceed 5000ms".to_string());
        }
        if self.speed.initial_tick_interval_ms < self.speed.min_tick_interval_ms {
            return Err("Initial tick interval must not be below the minimum".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(SnakeSettings::default().validate().is_ok());
    }

    #[test]
    fn test_speed_decreases_until_floor() {
        let speed = SpeedSettings::default();
        let mut interval = speed.initial_interval();
        assert_eq!(interval, Duration::from_millis(200));

        interval = speed.after_food(interval);
        assert_eq!(interval, Duration::from_millis(195));

        for _ in 0..100 {
            interval = speed.after_food(interval);
        }
        assert_eq!(interval, Duration::from_millis(50));
    }

    #[test]
    fn test_fixed_speed_never_changes() {
        let speed = SpeedSettings {
            initial_tick_interval_ms: 120,
            speedup_per_food_ms: 0,
            min_tick_interval_ms: 50,
        };
        let interval = speed.after_food(speed.initial_interval());
        assert_eq!(interval, Duration::from_millis(120));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let too_small = SnakeSettings {
            field_width: 4,
            ..SnakeSettings::default()
        };
        assert!(too_small.validate().is_err());

        let too_long = SnakeSettings {
            initial_length: 15,
            ..SnakeSettings::default()
        };
        assert!(too_long.validate().is_err());

        let inverted_speed = SnakeSettings {
            speed: SpeedSettings {
                initial_tick_interval_ms: 40,
                speedup_per_food_ms: 5,
                min_tick_interval_ms: 50,
            },
            ..SnakeSettings::default()
        };
        assert!(inverted_speed.validate().is_err());
    }

    #[test]
    fn test_food_reward_bounds() {
        let zero = SnakeSettings {
            food_reward: 0,
            ..SnakeSettings::default()
        };
        assert!(zero.validate().is_err());

        let max = SnakeSettings {
            food_reward: MAX_FOOD_REWARD,
            ..SnakeSettings::default()
        };
        assert!(max.validate().is_ok());

        let huge = SnakeSettings {
            food_reward: u32::MAX,
            ..SnakeSettings::default()
        };
        assert!(huge.validate().is_err());
    }
}
