use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub life: LifeSettings,
}

/// `[life]` table; every key is optional and overridable from the CLI
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct LifeSettings {
    pub time_step: Option<f32>,
    pub seed: Option<u64>,
    pub pattern: Option<String>,
    pub draw_char: Option<char>,
    pub inject_interval: Option<u64>,
    pub screenshot_dir: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring malformed settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("automata")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.life, LifeSettings::default());
    }

    #[test]
    fn reads_life_table() {
        let settings = Settings::parse(
            r#"
            [life]
            time_step = 0.1
            pattern = "acorn"
            draw_char = "o"
            inject_interval = 250
            screenshot_dir = "/tmp/shots"
            "#,
        )
        .unwrap();
        assert_eq!(settings.life.time_step, Some(0.1));
        assert_eq!(settings.life.pattern.as_deref(), Some("acorn"));
        assert_eq!(settings.life.draw_char, Some('o'));
        assert_eq!(settings.life.inject_interval, Some(250));
        assert_eq!(settings.life.screenshot_dir, Some(PathBuf::from("/tmp/shots")));
        assert_eq!(settings.life.seed, None);
    }

    #[test]
    fn wrong_types_are_errors() {
        assert!(Settings::parse("[life]\ntime_step = \"fast\"").is_err());
    }
}
