//! Runtime option parsing.

use std::path::PathBuf;

use crate::cli::RuntimeArgs;

use super::env::{EnvSnapshot, DRY_RUN_VAR};

/// Options that decide how a run behaves, before paths are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Dry run requested via `DRY_RUN`, `--dry-run` or `--mock`.
    pub dry_run: bool,
    /// Explicit assets directory from `--assets-dir`.
    pub assets_dir: Option<PathBuf>,
    dry_run_override: Option<bool>,
}

impl RuntimeOptions {
    /// Create options with an explicit dry-run flag and no assets override.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Combine parsed command-line flags with the environment.
    ///
    /// The environment can only turn dry-run on; flags never turn it off.
    pub fn from_args(args: &RuntimeArgs, env: &EnvSnapshot) -> Self {
        Self {
            dry_run: env.is_truthy(DRY_RUN_VAR) || args.dry_run || args.mock,
            assets_dir: args.assets_dir.clone(),
            dry_run_override: None,
        }
    }

    /// Set the assets directory override.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    /// Force dry-run on or off regardless of flags and environment.
    pub fn set_dry_run(&mut self, enabled: bool) {
        self.dry_run_override = Some(enabled);
    }

    /// Drop a previously forced dry-run value.
    pub fn clear_dry_run_override(&mut self) {
        self.dry_run_override = None;
    }

    /// Effective dry-run value; an override wins over parsed inputs.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run_override.unwrap_or(self.dry_run)
    }

    /// The assets override, ignoring blank values.
    pub fn assets_override(&self) -> Option<&PathBuf> {
        self.assets_dir
            .as_ref()
            .filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(argv: &[&str], env: &EnvSnapshot) -> RuntimeOptions {
        let cli = Cli::try_parse_from(argv).unwrap();
        RuntimeOptions::from_args(&cli.runtime, env)
    }

    #[test]
    fn dry_run_from_env() {
        let env = EnvSnapshot::from_pairs([("DRY_RUN", "1")]);
        assert!(parse(&["installer"], &env).dry_run);
    }

    #[test]
    fn dry_run_from_flag() {
        assert!(parse(&["installer", "--dry-run"], &EnvSnapshot::default()).dry_run);
    }

    #[test]
    fn mock_flag_means_dry_run() {
        assert!(parse(&["installer", "--mock"], &EnvSnapshot::default()).dry_run);
    }

    #[test]
    fn no_flags_no_dry_run() {
        let env = EnvSnapshot::from_pairs([("DRY_RUN", "0")]);
        assert!(!parse(&["installer"], &env).dry_run);
    }

    #[test]
    fn assets_dir_separate_value() {
        let opts = parse(
            &["installer", "--assets-dir", "/opt/assets"],
            &EnvSnapshot::default(),
        );
        assert_eq!(opts.assets_dir, Some(PathBuf::from("/opt/assets")));
    }

    #[test]
    fn assets_dir_equals_syntax() {
        let opts = parse(
            &["installer", "--assets-dir=/opt/assets"],
            &EnvSnapshot::default(),
        );
        assert_eq!(opts.assets_dir, Some(PathBuf::from("/opt/assets")));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let opts = parse(
            &["earscope", "uninstall", "--mock", "--assets-dir=/a"],
            &EnvSnapshot::default(),
        );
        assert!(opts.dry_run);
        assert_eq!(opts.assets_dir, Some(PathBuf::from("/a")));
    }

    #[test]
    fn override_takes_precedence() {
        let env = EnvSnapshot::from_pairs([("DRY_RUN", "true")]);
        let mut opts = parse(&["installer"], &env);
        assert!(opts.is_dry_run());

        opts.set_dry_run(false);
        assert!(!opts.is_dry_run());

        opts.clear_dry_run_override();
        assert!(opts.is_dry_run());
    }

    #[test]
    fn blank_assets_override_is_ignored() {
        let opts = RuntimeOptions::new(false).with_assets_dir("  ");
        assert!(opts.assets_override().is_none());
    }
}
