pub mod check;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use gatecheck_common::config::{ALLOW_ENV, ALLOW_PROPERTY};
use gatecheck_common::properties::CheckedProperties;
use gatecheck_core::AddressChecker;
use tracing::{debug, info};

use crate::terminal::spinner;

#[derive(Parser)]
#[command(name = "gatecheck")]
#[command(about = "Test addresses against an IP allow-list.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Allow-list patterns, e.g. "192.168.3.0/24 ::1 localhost"
    #[arg(short, long, global = true)]
    pub allow: Option<String>,

    /// Properties file holding the allow-list under the `ip` key
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reduce output (-q drops decoration, -qq prints verdicts only)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether addresses are allowed
    #[command(alias = "c")]
    Check {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Show the compiled allow-list
    #[command(alias = "l")]
    List,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The allow-list to use: `--allow`, then `--config`, then the environment.
    pub fn allow_list(&self) -> anyhow::Result<String> {
        select_allow_list(
            self.allow.as_deref(),
            self.config.as_deref(),
            std::env::var(ALLOW_ENV).ok(),
        )
    }
}

fn select_allow_list(
    allow: Option<&str>,
    config: Option<&Path>,
    env: Option<String>,
) -> anyhow::Result<String> {
    if let Some(allow) = allow {
        debug!("allow-list taken from --allow");
        return Ok(allow.to_string());
    }

    if let Some(path) = config {
        let props = CheckedProperties::load_from_file(path)?;
        let patterns = props
            .get_string(ALLOW_PROPERTY)
            .with_context(|| format!("reading allow-list from {}", path.display()))?;
        debug!(path = %path.display(), "allow-list taken from properties file");
        return Ok(patterns.to_string());
    }

    if let Some(env) = env {
        debug!("allow-list taken from {ALLOW_ENV}");
        return Ok(env);
    }

    anyhow::bail!("no allow-list given: use --allow, --config or set {ALLOW_ENV}");
}

/// Compiles the allow-list behind a spinner, since hostnames may need DNS.
pub fn compile(patterns: &str, q_level: u8) -> anyhow::Result<AddressChecker> {
    let checker = {
        let _spinner = spinner::start("Compiling allow-list...", q_level > 1);
        AddressChecker::new(patterns)
    }
    .context("invalid allow-list")?;

    if q_level == 0 {
        info!("Compiled {} pattern(s)", checker.patterns().len());
    }
    Ok(checker)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn test_parse_check_with_global_flags() {
        let cli = CommandLine::try_parse_from([
            "gatecheck", "check", "10.0.0.1", "::1", "--allow", "10.0.0.0/8", "-qq",
        ])
        .unwrap();
        assert_eq!(cli.allow.as_deref(), Some("10.0.0.0/8"));
        assert_eq!(cli.quiet, 2);
        match cli.command {
            Commands::Check { addresses } => assert_eq!(addresses, vec!["10.0.0.1", "::1"]),
            Commands::List => panic!("expected check"),
        }
    }

    #[test]
    fn test_check_requires_an_address() {
        assert!(CommandLine::try_parse_from(["gatecheck", "check"]).is_err());
    }

    #[test]
    fn test_allow_flag_wins() {
        let selected = select_allow_list(
            Some("10.0.0.0/8"),
            Some(Path::new("/nonexistent/gatecheck.properties")),
            Some("::1".to_string()),
        )
        .unwrap();
        assert_eq!(selected, "10.0.0.0/8");
    }

    #[test]
    fn test_env_is_last_resort() {
        let selected = select_allow_list(None, None, Some("::1".to_string())).unwrap();
        assert_eq!(selected, "::1");
        assert!(select_allow_list(None, None, None).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = select_allow_list(
            None,
            Some(Path::new("/nonexistent/gatecheck.properties")),
            Some("::1".to_string()),
        );
        assert!(result.is_err());
    }
}
