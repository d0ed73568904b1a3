//! Scenario schema and loader.

use std::path::Path;

use karman_lbm::{ChannelParams, LbmError};
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};

/// Iteration schedule of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Total timesteps.
    pub iterations: usize,
    /// Sample the flow every this many steps.
    pub sample_every: usize,
    /// Do not sample until the wake has developed.
    pub skip_first: usize,
    /// Check for divergence every this many steps; 0 disables the check.
    pub check_every: usize,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            iterations: 15_000,
            sample_every: 100,
            skip_first: 5_000,
            check_every: 100,
        }
    }
}

impl RunParams {
    pub fn validate(&self) -> karman_lbm::Result<()> {
        if self.sample_every == 0 {
            return Err(LbmError::InvalidParameter(
                "sample_every must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Divergence-check interval, `None` when disabled.
    pub fn divergence_check(&self) -> Option<usize> {
        (self.check_every > 0).then_some(self.check_every)
    }
}

/// Top-level scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Iteration schedule.
    pub run: RunParams,
    /// Channel setup.
    pub channel: ChannelParams,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "cylinder-wake".to_string(),
            run: RunParams::default(),
            channel: ChannelParams::default(),
        }
    }
}

impl Scenario {
    /// Check the channel setup and run schedule.
    pub fn validate(&self) -> Result<()> {
        self.channel.validate()?;
        self.run.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Json,
    Toml,
}

fn file_kind(path: &Path) -> Result<FileKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "json" => Ok(FileKind::Json),
        "toml" => Ok(FileKind::Toml),
        _ => Err(FormatError::UnsupportedExtension(path.display().to_string())),
    }
}

/// Parse and validate a JSON scenario.
pub fn parse_scenario_json(json: &str) -> Result<Scenario> {
    let scenario: Scenario = serde_json::from_str(json)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Parse and validate a TOML scenario.
pub fn parse_scenario_toml(text: &str) -> Result<Scenario> {
    let scenario: Scenario = toml::from_str(text)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Load a `.json` or `.toml` scenario from disk.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario> {
    let path = path.as_ref();
    let kind = file_kind(path)?;
    let text = std::fs::read_to_string(path)?;
    let scenario = match kind {
        FileKind::Json => parse_scenario_json(&text)?,
        FileKind::Toml => parse_scenario_toml(&text)?,
    };
    log::debug!("loaded scenario '{}' from {}", scenario.name, path.display());
    Ok(scenario)
}

/// Write a scenario to disk; the format follows the extension.
pub fn save_scenario(path: impl AsRef<Path>, scenario: &Scenario) -> Result<()> {
    let path = path.as_ref();
    let text = match file_kind(path)? {
        FileKind::Json => export_scenario_json(scenario)?,
        FileKind::Toml => export_scenario_toml(scenario)?,
    };
    std::fs::write(path, text)?;
    Ok(())
}

/// Export a scenario to pretty JSON.
pub fn export_scenario_json(scenario: &Scenario) -> Result<String> {
    Ok(serde_json::to_string_pretty(scenario)?)
}

/// Export a scenario to TOML.
pub fn export_scenario_toml(scenario: &Scenario) -> Result<String> {
    Ok(toml::to_string_pretty(scenario)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use karman_lbm::InflowKind;

    #[test]
    fn test_default_scenario_is_reference_run() {
        let s = Scenario::default();
        assert_eq!(s.run.iterations, 15_000);
        assert_eq!(s.run.sample_every, 100);
        assert_eq!(s.run.skip_first, 5_000);
        assert_eq!(s.channel, ChannelParams::default());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut s = Scenario::default();
        s.name = "narrow".to_string();
        s.channel = ChannelParams::with_grid(120, 30);
        s.channel.inflow_profile = InflowKind::Parabolic;
        s.run.check_every = 0;

        let json = export_scenario_json(&s).unwrap();
        let parsed = parse_scenario_json(&json).unwrap();
        assert_eq!(parsed, s);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut s = Scenario::default();
        s.channel.reynolds = 120.0;
        let text = export_scenario_toml(&s).unwrap();
        let parsed = parse_scenario_toml(&text).unwrap();
        assert_eq!(parsed, s);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = r#"
            name = "slow"

            [channel]
            reynolds = 40.0
            inflow_profile = "parabolic"

            [run]
            iterations = 500
        "#;
        let s = parse_scenario_toml(text).unwrap();
        assert_eq!(s.name, "slow");
        assert_eq!(s.channel.reynolds, 40.0);
        assert_eq!(s.channel.inflow_profile, InflowKind::Parabolic);
        assert_eq!(s.channel.nx, 300);
        assert_eq!(s.run.iterations, 500);
        assert_eq!(s.run.sample_every, 100);
    }

    #[test]
    fn test_invalid_channel_rejected() {
        let json = r#"{ "channel": { "cylinder": { "center": [60.0, 25.0], "radius": 30.0 } } }"#;
        let err = parse_scenario_json(json).unwrap_err();
        assert!(matches!(err, FormatError::Invalid(LbmError::InvalidObstacle(_))));
    }

    #[test]
    fn test_invalid_run_rejected() {
        let text = "[run]\nsample_every = 0\n";
        let err = parse_scenario_toml(text).unwrap_err();
        assert!(matches!(err, FormatError::Invalid(LbmError::InvalidParameter(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_scenario_json("{ not json"),
            Err(FormatError::JsonError(_))
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let s = Scenario {
            name: "file".to_string(),
            channel: ChannelParams::with_grid(100, 40),
            ..Scenario::default()
        };
        for file in ["wake.json", "wake.toml", "WAKE.TOML"] {
            let path = dir.path().join(file);
            save_scenario(&path, &s).unwrap();
            assert_eq!(load_scenario(&path).unwrap(), s);
        }
    }

    #[test]
    fn test_disabled_check_survives_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = Scenario::default();
        s.run.check_every = 0;
        for file in ["off.json", "off.toml"] {
            let path = dir.path().join(file);
            save_scenario(&path, &s).unwrap();
            let loaded = load_scenario(&path).unwrap();
            assert_eq!(loaded.run.check_every, 0, "{file}");
            assert_eq!(loaded.run.divergence_check(), None, "{file}");
        }
    }

    #[test]
    fn test_divergence_check_interval() {
        let mut run = RunParams::default();
        assert_eq!(run.divergence_check(), Some(100));
        run.check_every = 0;
        assert_eq!(run.divergence_check(), None);
        assert!(run.validate().is_ok());
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wake.yaml");
        assert!(matches!(
            save_scenario(&path, &Scenario::default()),
            Err(FormatError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            load_scenario(&path),
            Err(FormatError::UnsupportedExtension(_))
        ));
    }
}
