use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use ggez::{GameError, GameResult};
use serde::{Deserialize, Serialize};

use crate::grid::{BoundaryPolicy, Grid};

pub const DEFAULT_CONFIG_PATH: &str = "snake.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub grid_size: i16,
    pub cell_size: i16,
    pub tick_ms: u64,
    pub reset_delay_ms: u64,
    pub reset_debounce_ms: u64,
    pub initial_length: usize,
    pub boundary: BoundaryPolicy,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: 20,
            cell_size: 20,
            tick_ms: 100,
            reset_delay_ms: 1000,
            reset_debounce_ms: 50,
            initial_length: 4,
            boundary: BoundaryPolicy::Wrap,
            seed: None,
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents)
                .map_err(|e| GameError::ConfigError(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, String> {
        let config: Config = serde_json::from_str(contents).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 2 {
            return Err(format!("grid_size must be at least 2, got {}", self.grid_size));
        }
        if self.cell_size < 1 {
            return Err(format!("cell_size must be positive, got {}", self.cell_size));
        }
        if self.tick_ms == 0 {
            return Err("tick_ms must be positive".to_string());
        }

        let max_length = self.grid_size as usize / 2 + 1;
        if self.initial_length == 0 || self.initial_length > max_length {
            return Err(format!(
                "initial_length must be between 1 and {} on a {}x{} grid, got {}",
                max_length, self.grid_size, self.grid_size, self.initial_length
            ));
        }

        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_size, self.boundary)
    }

    pub fn screen_size(&self) -> f32 {
        (self.grid_size as i32 * self.cell_size as i32) as f32
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn reset_debounce(&self) -> Duration {
        Duration::from_millis(self.reset_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let config = Config::from_json(r#"{ "grid_size": 30, "boundary": "wall", "seed": 9 }"#).unwrap();

        assert_eq!(config.grid_size, 30);
        assert_eq!(config.boundary, BoundaryPolicy::Wall);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.initial_length, 4);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_json(r#"{ "grid_size": 1 }"#).is_err());
        assert!(Config::from_json(r#"{ "tick_ms": 0 }"#).is_err());
        assert!(Config::from_json(r#"{ "initial_length": 0 }"#).is_err());
        assert!(Config::from_json(r#"{ "grid_size": 4, "initial_length": 4 }"#).is_err());
        assert!(Config::from_json("not json").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load("definitely/not/here/snake.json").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn default_screen_is_400_pixels() {
        assert_eq!(Config::default().screen_size(), 400.0);
    }
}
