use crate::settings::LifeSettings;
use std::path::PathBuf;

/// Longest allowed delay between generations, in seconds
const MAX_TIME_STEP: f32 = 5.0;

/// Configuration for the interactive simulation
#[derive(Debug, Clone, PartialEq)]
pub struct LifeConfig {
    pub time_step: f32,
    pub seed: Option<u64>,
    /// Stamped at the centre instead of a random soup
    pub pattern: Option<String>,
    pub draw_char: char,
    /// Generations between random life injections, 0 disables
    pub inject_interval: u64,
    pub screenshot_dir: PathBuf,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            time_step: 0.05,
            seed: None,
            pattern: None,
            draw_char: '█',
            inject_interval: 0,
            screenshot_dir: PathBuf::from("."),
        }
    }
}

impl LifeConfig {
    /// Layer CLI values over the settings file over built-in defaults
    pub fn resolve(cli: LifeSettings, file: LifeSettings) -> Self {
        let defaults = Self::default();
        let time_step = cli.time_step.or(file.time_step).unwrap_or(defaults.time_step);
        Self {
            // NaN collapses to 0 through max()
            time_step: time_step.max(0.0).min(MAX_TIME_STEP),
            seed: cli.seed.or(file.seed),
            pattern: cli.pattern.or(file.pattern),
            draw_char: cli.draw_char.or(file.draw_char).unwrap_or(defaults.draw_char),
            inject_interval: cli
                .inject_interval
                .or(file.inject_interval)
                .unwrap_or(defaults.inject_interval),
            screenshot_dir: cli
                .screenshot_dir
                .or(file.screenshot_dir)
                .unwrap_or(defaults.screenshot_dir),
        }
    }
}

/// Configuration for headless print mode
#[derive(Debug, Clone, PartialEq)]
pub struct PrintConfig {
    pub width: u16,
    pub height: u16,
    pub generations: u64,
    pub seed: Option<u64>,
    pub pattern: Option<String>,
    pub draw_char: char,
}
