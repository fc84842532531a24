use std::fs;
use std::io::ErrorKind;

use serde::Deserialize;

use crate::agendas::state_dir;
use crate::domain::ViewMode;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
	pub default_view: ViewMode,
	pub day_start_hour: u32,
	pub day_end_hour: u32,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			default_view: ViewMode::Week,
			day_start_hour: 0,
			day_end_hour: 24,
		}
	}
}

impl Config {
	pub fn hour_range(&self) -> (u32, u32) {
		let start = self.day_start_hour.min(23);
		let end = self.day_end_hour.clamp(start + 1, 24);
		(start, end)
	}
}

pub fn load_config() -> Config {
	let path = state_dir().join(CONFIG_FILE);
	let raw = match fs::read_to_string(&path) {
		Ok(raw) => raw,
		Err(err) if err.kind() == ErrorKind::NotFound => return Config::default(),
		Err(err) => {
			eprintln!("warning: failed to read {}: {err}", path.display());
			return Config::default();
		}
	};

	match toml::from_str(&raw) {
		Ok(config) => config,
		Err(err) => {
			eprintln!("warning: ignoring invalid {}: {err}", path.display());
			Config::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::Config;
	use crate::domain::ViewMode;

	#[test]
	fn hour_range_is_clamped_to_a_valid_window() {
		let config = Config::default();
		assert_eq!(config.hour_range(), (0, 24));

		let narrowed = Config {
			day_start_hour: 8,
			day_end_hour: 18,
			..Config::default()
		};
		assert_eq!(narrowed.hour_range(), (8, 18));

		let inverted = Config {
			day_start_hour: 30,
			day_end_hour: 2,
			..Config::default()
		};
		assert_eq!(inverted.hour_range(), (23, 24));
	}

	#[test]
	fn parses_partial_config_with_defaults() {
		let config: Config = toml::from_str("default_view = \"day\"").expect("parse config");
		assert_eq!(config.default_view, ViewMode::Day);
		assert_eq!(config.day_end_hour, 24);
	}
}
