use crate::error::Result;
use crate::spinner::{DEFAULT_COMPLETE_CHARACTER, DEFAULT_ERROR_CHARACTER};
use crate::ui::animations::Animation;
use crate::ui::colors::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(250);

/// Serializable manager options, loadable from a JSON or YAML file.
///
/// Fields left out of the file keep their defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SpinnerConfig {
    pub animation: Option<Animation>,
    pub frame_duration_ms: Option<u64>,
    pub spinner_color: Color,
    pub complete_color: Color,
    pub error_color: Color,
    pub message_color: Color,
    pub complete_character: String,
    pub error_character: String,
    pub handle_signals: bool,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            animation: None,
            frame_duration_ms: None,
            spinner_color: Color::HiGreen,
            complete_color: Color::HiGreen,
            error_color: Color::HiRed,
            message_color: Color::NoColor,
            complete_character: DEFAULT_COMPLETE_CHARACTER.to_string(),
            error_character: DEFAULT_ERROR_CHARACTER.to_string(),
            handle_signals: true,
        }
    }
}

impl SpinnerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn frame_duration(&self) -> Option<Duration> {
        self.frame_duration_ms.map(Duration::from_millis)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
