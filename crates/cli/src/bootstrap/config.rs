use splitzone_dns_domain::{CliOverrides, Config};

/// Load and validate the configuration.
///
/// Runs before logging is initialized, so failures surface through the
/// returned error only.
pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}
