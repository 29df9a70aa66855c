//! Planner configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use zoo_route::{
    LaunchAltitude, RouteBuilder, RoutePolicy, ScoreParams, DEFAULT_CRUISE_ALTITUDE,
    DEFAULT_IMPORTANCE_WEIGHT,
};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "zoo-drone.yaml";

/// Planner configuration, loaded from zoo-drone.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Zoo description file
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Path file to write; defaults depend on the variant
    pub output: Option<PathBuf>,

    /// Append run events (JSON lines) here when set
    pub events_path: Option<PathBuf>,

    /// Planning variant
    pub variant: Variant,

    /// Override the variant's retention
    pub retention: Option<Retention>,

    /// Altitude legs are flown at
    #[serde(default = "default_cruise_altitude")]
    pub cruise_altitude: f64,

    /// Multiplier on fed importance in the score
    #[serde(default = "default_importance_weight")]
    pub importance_weight: f64,

    /// Replay start altitude used by the baseline scorer
    #[serde(default = "default_baseline_launch_altitude")]
    pub baseline_launch_altitude: f64,

    /// Reject malformed input lines instead of dropping them
    #[serde(default = "default_true")]
    pub strict_parsing: bool,
}

fn default_input() -> PathBuf {
    PathBuf::from("zoo.txt")
}
fn default_cruise_altitude() -> f64 {
    DEFAULT_CRUISE_ALTITUDE
}
fn default_importance_weight() -> f64 {
    DEFAULT_IMPORTANCE_WEIGHT
}
fn default_baseline_launch_altitude() -> f64 {
    10.0
}
fn default_true() -> bool {
    true
}

/// Which planner/scorer pairing to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Nearest-neighbor routes, best diet only.
    #[default]
    Baseline,
    /// Energy-aware routes, one per diet.
    Extended,
}

impl Variant {
    pub fn policy(self) -> RoutePolicy {
        match self {
            Variant::Baseline => RoutePolicy::NearestNeighbor,
            Variant::Extended => RoutePolicy::EnergyAware,
        }
    }

    pub fn retention(self) -> Retention {
        match self {
            Variant::Baseline => Retention::Best,
            Variant::Extended => Retention::All,
        }
    }

    pub fn default_output(self) -> PathBuf {
        match self {
            Variant::Baseline => PathBuf::from("level1_output.txt"),
            Variant::Extended => PathBuf::from("final_output.txt"),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Baseline => f.write_str("baseline"),
            Variant::Extended => f.write_str("extended"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(Variant::Baseline),
            "extended" | "energy-aware" => Ok(Variant::Extended),
            other => Err(format!("unknown variant `{other}` (expected baseline or extended)")),
        }
    }
}

/// Which trial results are kept for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Retention {
    /// Only the highest-scoring route.
    Best,
    /// Every route, in diet order.
    All,
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Retention::Best => f.write_str("best"),
            Retention::All => f.write_str("all"),
        }
    }
}

impl FromStr for Retention {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best" => Ok(Retention::Best),
            "all" => Ok(Retention::All),
            other => Err(format!("unknown retention `{other}` (expected best or all)")),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: None,
            events_path: None,
            variant: Variant::default(),
            retention: None,
            cruise_altitude: default_cruise_altitude(),
            importance_weight: default_importance_weight(),
            baseline_launch_altitude: default_baseline_launch_altitude(),
            strict_parsing: default_true(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from a directory (looks for zoo-drone.yaml), falling back to defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve relative paths against `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        self.input = base.join(&self.input);
        self.output = Some(base.join(self.output_path()));
        self.events_path = self.events_path.as_ref().map(|p| base.join(p));
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.variant.default_output())
    }

    pub fn retention(&self) -> Retention {
        self.retention.unwrap_or_else(|| self.variant.retention())
    }

    pub fn route_builder(&self) -> RouteBuilder {
        RouteBuilder::new(self.variant.policy()).with_cruise_altitude(self.cruise_altitude)
    }

    pub fn score_params(&self) -> ScoreParams {
        let launch_altitude = match self.variant {
            Variant::Baseline => LaunchAltitude::Fixed(self.baseline_launch_altitude),
            Variant::Extended => LaunchAltitude::Depot,
        };
        ScoreParams {
            cruise_altitude: self.cruise_altitude,
            importance_weight: self.importance_weight,
            launch_altitude,
        }
    }

    /// Default config file contents written by `zoo-drone init`.
    pub fn default_yaml() -> &'static str {
        r#"# Zoo drone planner configuration

input: zoo.txt
# output: level1_output.txt
# events_path: .zoo-drone/events.jsonl

# baseline: nearest-neighbor routes, best diet kept
# extended: energy-aware routes, every diet kept
variant: baseline
# retention: best

cruise_altitude: 50.0
importance_weight: 1000.0
baseline_launch_altitude: 10.0
strict_parsing: true
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_baseline_variant() {
        let config = PlannerConfig::default();
        assert_eq!(config.variant, Variant::Baseline);
        assert_eq!(config.retention(), Retention::Best);
        assert_eq!(config.output_path(), PathBuf::from("level1_output.txt"));
        assert_eq!(config.route_builder().policy(), RoutePolicy::NearestNeighbor);
        assert_eq!(
            config.score_params().launch_altitude,
            LaunchAltitude::Fixed(10.0)
        );
    }

    #[test]
    fn extended_variant_keeps_every_route() {
        let config: PlannerConfig = serde_yaml::from_str("variant: extended\n").unwrap();
        assert_eq!(config.retention(), Retention::All);
        assert_eq!(config.output_path(), PathBuf::from("final_output.txt"));
        assert_eq!(config.route_builder().policy(), RoutePolicy::EnergyAware);
        assert_eq!(config.score_params().launch_altitude, LaunchAltitude::Depot);
        assert_eq!(config.cruise_altitude, 50.0);
        assert!(config.strict_parsing);
    }

    #[test]
    fn retention_override_wins_over_variant() {
        let config: PlannerConfig =
            serde_yaml::from_str("variant: extended\nretention: best\n").unwrap();
        assert_eq!(config.retention(), Retention::Best);
    }

    #[test]
    fn default_yaml_parses_to_defaults() {
        let config: PlannerConfig = serde_yaml::from_str(PlannerConfig::default_yaml()).unwrap();
        let defaults = PlannerConfig::default();
        assert_eq!(config.input, defaults.input);
        assert_eq!(config.variant, defaults.variant);
        assert_eq!(config.importance_weight, defaults.importance_weight);
        assert_eq!(config.output, None);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.input, PathBuf::from("zoo.txt"));

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "cruise_altitude: 30\n").unwrap();
        let config = PlannerConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.cruise_altitude, 30.0);
    }

    #[test]
    fn variant_and_retention_parse_from_cli_strings() {
        assert_eq!("Extended".parse::<Variant>(), Ok(Variant::Extended));
        assert_eq!("energy-aware".parse::<Variant>(), Ok(Variant::Extended));
        assert_eq!("all".parse::<Retention>(), Ok(Retention::All));
        assert!("fastest".parse::<Variant>().is_err());
    }
}
