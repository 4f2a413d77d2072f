/// Runtime presentation settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips the banner at startup.
    pub no_banner: bool,
    /// Quiet level.
    ///
    /// `1` drops headers, `2` prints bare verdicts only.
    pub quiet: u8,
}

/// Property holding the allow-list in a properties file.
pub const ALLOW_PROPERTY: &str = "ip";

/// Environment variable consulted when no other allow-list source is given.
pub const ALLOW_ENV: &str = "GATECHECK_ALLOW";
