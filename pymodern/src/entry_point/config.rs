use crate::cli::Cli;
use crate::config::Config;
use crate::errors::ConfigurationError;
use crate::registry::Registry;

/// Effective configuration after merging CLI flags over file configuration.
pub(crate) struct AppConfig {
    pub(crate) config: Config,
    pub(crate) registry: Registry,
    pub(crate) extensions: Vec<String>,
    pub(crate) exclude_paths: Vec<String>,
    pub(crate) exclude_folders: Vec<String>,
    pub(crate) include_folders: Vec<String>,
}

/// Loads file configuration for the first audit path and merges CLI overrides.
///
/// CLI flags win over the configuration file; list-valued path filters are
/// merged because excludes are additive.
pub(crate) fn setup_configuration(
    effective_paths: &[std::path::PathBuf],
    cli: &Cli,
) -> Result<AppConfig, ConfigurationError> {
    let config_anchor = effective_paths
        .first()
        .cloned()
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let config = Config::load(&config_anchor);

    let enabled: Option<Vec<String>> = if cli.rules.is_empty() {
        config.pymodern.rules.clone()
    } else {
        Some(cli.rules.clone())
    };
    let disabled = config.pymodern.ignore.clone().unwrap_or_default();
    let registry = Registry::with_selection(enabled.as_deref(), &disabled)?;

    let extensions = if cli.extensions.is_empty() {
        config.pymodern.extensions.clone().unwrap_or_default()
    } else {
        cli.extensions.clone()
    };

    let mut exclude_paths = cli.exclude_paths.clone();
    exclude_paths.extend(config.pymodern.exclude_paths.clone().unwrap_or_default());

    let mut exclude_folders = cli.exclude_folders.clone();
    exclude_folders.extend(config.pymodern.exclude_folders.clone().unwrap_or_default());

    let mut include_folders = cli.include_folders.clone();
    include_folders.extend(config.pymodern.include_folders.clone().unwrap_or_default());

    Ok(AppConfig {
        config,
        registry,
        extensions,
        exclude_paths,
        exclude_folders,
        include_folders,
    })
}
