//! # Chart Configuration
//!
//! Display and playback settings, read from YAML.
//!
//! ## Format
//! ```yaml
//! locale: urdu            # notation column to show
//! join: separated         # joined | separated
//! notation: tables/ipa.yaml   # optional; built-in table otherwise
//! audio:
//!   base: audio/
//!   prefix: ""
//!   extension: .mp3
//! pacing:
//!   tone-gap-ms: 350
//!   syllable-gap-ms: 800
//!   error-gap-ms: 150
//! ```
//!
//! Every key is optional. A relative `notation` path is resolved against the
//! directory of the config file.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::notation::{JoinMode, NotationTable};
use crate::playback::{LocatorTemplate, Pacing, PlaybackScheduler};

pub const DEFAULT_LOCALE: &str = "urdu";

/// Inter-item delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PacingConfig {
    pub tone_gap_ms: u64,
    pub syllable_gap_ms: u64,
    pub error_gap_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            tone_gap_ms: Pacing::DEFAULT_TONE_GAP_MS,
            syllable_gap_ms: Pacing::DEFAULT_SYLLABLE_GAP_MS,
            error_gap_ms: Pacing::DEFAULT_ERROR_GAP_MS,
        }
    }
}

impl From<PacingConfig> for Pacing {
    fn from(c: PacingConfig) -> Self {
        Pacing::from_millis(c.tone_gap_ms, c.syllable_gap_ms, c.error_gap_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChartConfig {
    pub locale: String,
    pub join: JoinMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<PathBuf>,
    pub audio: LocatorTemplate,
    pub pacing: PacingConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            join: JoinMode::default(),
            notation: None,
            audio: LocatorTemplate::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ChartError> {
        let config: ChartConfig =
            serde_yaml::from_str(content).map_err(|e| ChartError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChartError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let mut config = Self::from_yaml(&content)?;

        if let (Some(notation), Some(dir)) = (&config.notation, path.parent()) {
            if notation.is_relative() {
                config.notation = Some(dir.join(notation));
            }
        }

        tracing::debug!(path = %path.display(), locale = %config.locale, "loaded chart config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ChartError> {
        if self.locale.trim().is_empty() {
            return Err(ChartError::ConfigError("locale must not be empty".to_string()));
        }
        if self.pacing.error_gap_ms >= self.pacing.tone_gap_ms {
            return Err(ChartError::ConfigError(format!(
                "error-gap-ms ({}) must be shorter than tone-gap-ms ({})",
                self.pacing.error_gap_ms, self.pacing.tone_gap_ms
            )));
        }
        if self.pacing.tone_gap_ms >= self.pacing.syllable_gap_ms {
            return Err(ChartError::ConfigError(format!(
                "tone-gap-ms ({}) must be shorter than syllable-gap-ms ({})",
                self.pacing.tone_gap_ms, self.pacing.syllable_gap_ms
            )));
        }
        Ok(())
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing.into()
    }

    /// The configured notation table, or the built-in one.
    pub fn notation_table(&self) -> Result<Cow<'static, NotationTable>, ChartError> {
        match &self.notation {
            Some(path) => NotationTable::from_path(path).map(Cow::Owned),
            None => Ok(Cow::Borrowed(NotationTable::builtin())),
        }
    }

    /// A scheduler using the configured clip bank and pacing.
    pub fn scheduler(&self) -> PlaybackScheduler<LocatorTemplate> {
        PlaybackScheduler::new(self.audio.clone(), self.pacing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ChartConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.locale, "urdu");
        assert_eq!(config.join, JoinMode::Joined);
        assert_eq!(config.audio, LocatorTemplate::cdn());
        assert_eq!(config.pacing(), Pacing::default());
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
locale: ipa
join: separated
audio:
  base: audio/
  prefix: py-
  extension: .ogg
pacing:
  tone-gap-ms: 250
  syllable-gap-ms: 700
  error-gap-ms: 50
"#;
        let config = ChartConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.locale, "ipa");
        assert_eq!(config.join, JoinMode::Separated);
        assert_eq!(config.audio.prefix, "py-");
        assert_eq!(config.pacing().tone_gap, Duration::from_millis(250));
        assert_eq!(config.pacing().error_gap, Duration::from_millis(50));
    }

    #[test]
    fn test_partial_pacing_keeps_other_defaults() {
        let config = ChartConfig::from_yaml("pacing:\n  syllable-gap-ms: 1200\n").unwrap();
        assert_eq!(config.pacing.syllable_gap_ms, 1200);
        assert_eq!(config.pacing.tone_gap_ms, Pacing::DEFAULT_TONE_GAP_MS);
    }

    #[test]
    fn test_unknown_join_mode_rejected() {
        let err = ChartConfig::from_yaml("join: split").unwrap_err();
        assert!(matches!(err, ChartError::ConfigError(_)));
    }

    #[test]
    fn test_error_gap_must_be_shorter() {
        let yaml = "pacing:\n  tone-gap-ms: 100\n  error-gap-ms: 100\n";
        let err = ChartConfig::from_yaml(yaml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: error-gap-ms (100) must be shorter than tone-gap-ms (100)"
        );
    }

    #[test]
    fn test_syllable_gap_must_be_longer() {
        let yaml = "pacing:\n  tone-gap-ms: 900\n  syllable-gap-ms: 600\n";
        let err = ChartConfig::from_yaml(yaml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: tone-gap-ms (900) must be shorter than syllable-gap-ms (600)"
        );
    }

    #[test]
    fn test_empty_locale_rejected() {
        assert!(ChartConfig::from_yaml("locale: ''").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ChartConfig::from_path("/nonexistent/chart.yaml").unwrap_err();
        assert!(matches!(err, ChartError::ConfigError(_)));
    }

    #[test]
    fn test_builtin_notation_by_default() {
        let table = ChartConfig::default().notation_table().unwrap();
        assert!(matches!(table, Cow::Borrowed(_)));
    }
}
