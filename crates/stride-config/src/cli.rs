//! Command-line argument parsing for Stride.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Stride command-line overrides.
///
/// CLI values override settings loaded from `config.ron`. Binaries flatten
/// this into their own parser.
#[derive(Args, Debug, Clone, Default)]
pub struct CliArgs {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Closest third-person orbit radius.
    #[arg(long)]
    pub min_zoom: Option<f32>,

    /// Farthest third-person orbit radius.
    #[arg(long)]
    pub max_zoom: Option<f32>,

    /// Seconds to hold at minimum zoom before entering first person.
    #[arg(long)]
    pub fpp_delay: Option<f32>,

    /// First-person mouse sensitivity.
    #[arg(long)]
    pub mouse_sensitivity: Option<f32>,

    /// Enable or disable the mode/flag change watcher.
    #[arg(long)]
    pub state_watcher: Option<bool>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(r) = args.min_zoom {
            self.tpp_zoom.min_radius = r;
        }
        if let Some(r) = args.max_zoom {
            self.tpp_zoom.max_radius = r;
        }
        if let Some(d) = args.fpp_delay {
            self.controller.fpp_transition_delay = d;
        }
        if let Some(s) = args.mouse_sensitivity {
            self.controller.fpp_mouse_sensitivity = s;
        }
        if let Some(w) = args.state_watcher {
            self.debug.state_watcher = w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            min_zoom: Some(0.5),
            fpp_delay: Some(0.25),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.tpp_zoom.min_radius, 0.5);
        assert_eq!(config.controller.fpp_transition_delay, 0.25);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.tpp_zoom.max_radius, 6.0);
        assert_eq!(config.climb_zoom.min_radius, 1.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
