//! Configuration management for xmdoc.
//!
//! Parses `xmdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`]; they take
//! precedence over config file values. The resolved form handed to the
//! generation pipeline is [`GenerateSettings`].

use std::path::{Path, PathBuf};

use serde::Deserialize;
use xmdoc_render::Newline;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "xmdoc.toml";

/// Default type count above which a namespace gets its own index page.
const DEFAULT_NAMESPACE_INDEX_THRESHOLD: usize = 8;

/// Resolved settings for one generation run.
///
/// `dry_run` and `verify` are per-invocation and only come from the CLI;
/// everything else may come from `xmdoc.toml`, overridden by CLI flags.
#[derive(Clone, Debug)]
pub struct GenerateSettings {
    /// Classify differences but write nothing.
    pub dry_run: bool,
    /// Classify differences and treat a non-empty report as failure.
    pub verify: bool,
    /// Delete managed files that are no longer rendered.
    pub clean: bool,
    /// Newline convention for rendered output.
    pub newline: Newline,
    /// Assembly names whose types link into sibling documentation trees.
    pub external_assemblies: Vec<String>,
    /// Explicit XML documentation file; defaults to the artifact's sibling.
    pub xml_path: Option<PathBuf>,
    /// Source symbol map for "defined in" links.
    pub source_symbols: Option<PathBuf>,
    /// Type count above which a namespace gets its own index page.
    pub namespace_index_threshold: usize,
    /// Emit the assembly root `index.md`.
    pub emit_root_index: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            dry_run: false,
            verify: false,
            clean: false,
            newline: Newline::Lf,
            external_assemblies: Vec::new(),
            xml_path: None,
            source_symbols: None,
            namespace_index_threshold: DEFAULT_NAMESPACE_INDEX_THRESHOLD,
            emit_root_index: true,
        }
    }
}

/// CLI settings that override configuration file values.
///
/// Option fields only override when set; `external_assemblies` appends.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Classify differences but write nothing.
    pub dry_run: bool,
    /// Classify differences and treat a non-empty report as failure.
    pub verify: bool,
    /// Override the clean flag.
    pub clean: Option<bool>,
    /// Override the newline convention.
    pub newline: Option<Newline>,
    /// Additional external assembly names.
    pub external_assemblies: Vec<String>,
    /// Override the XML documentation file path.
    pub xml_path: Option<PathBuf>,
    /// Override the source symbol map path.
    pub source_symbols: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output shape and reconciliation defaults.
    pub output: OutputConfig,
    /// Cross-reference configuration.
    pub links: LinksConfig,
    /// Input file configuration (paths are relative strings from TOML).
    source: SourceConfigRaw,

    /// Resolved source configuration (set after loading).
    #[serde(skip)]
    pub source_resolved: SourceConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Newline convention: `"lf"` or `"platform"`.
    pub newline: Newline,
    /// Delete managed files that are no longer rendered.
    pub clean: bool,
    /// Emit the assembly root `index.md`.
    pub emit_root_index: bool,
    /// Type count above which a namespace gets its own index page.
    pub namespace_index_threshold: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            newline: Newline::Lf,
            clean: false,
            emit_root_index: true,
            namespace_index_threshold: DEFAULT_NAMESPACE_INDEX_THRESHOLD,
        }
    }
}

/// Cross-reference configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Assembly names whose types link into sibling documentation trees.
    pub external_assemblies: Vec<String>,
}

/// Raw source configuration as parsed from TOML (paths as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SourceConfigRaw {
    xml: Option<String>,
    symbols: Option<String>,
}

/// Resolved input file configuration with config-relative paths made
/// absolute.
#[derive(Debug, Default)]
pub struct SourceConfig {
    /// XML documentation file.
    pub xml: Option<PathBuf>,
    /// Source symbol map.
    pub symbols: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings applied.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `xmdoc.toml` in the current directory and parents and
    /// falls back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Resolve this configuration plus CLI settings into run settings.
    #[must_use]
    pub fn settings(&self, cli: &CliSettings) -> GenerateSettings {
        let mut external = self.links.external_assemblies.clone();
        external.extend(cli.external_assemblies.iter().cloned());
        external.sort();
        external.dedup();

        GenerateSettings {
            dry_run: cli.dry_run,
            verify: cli.verify,
            clean: cli.clean.unwrap_or(self.output.clean),
            newline: cli.newline.unwrap_or(self.output.newline),
            external_assemblies: external,
            xml_path: cli.xml_path.clone().or_else(|| self.source_resolved.xml.clone()),
            source_symbols: cli
                .source_symbols
                .clone()
                .or_else(|| self.source_resolved.symbols.clone()),
            namespace_index_threshold: self.output.namespace_index_threshold,
            emit_root_index: self.output.emit_root_index,
        }
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.source_resolved = SourceConfig {
            xml: self.source.xml.as_deref().map(|p| config_dir.join(p)),
            symbols: self.source.symbols.as_deref().map(|p| config_dir.join(p)),
        };
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.links.external_assemblies {
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "links.external_assemblies entries cannot be empty".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GenerateSettings::default();

        assert!(!settings.dry_run);
        assert!(!settings.verify);
        assert!(!settings.clean);
        assert_eq!(settings.newline, Newline::Lf);
        assert_eq!(settings.namespace_index_threshold, 8);
        assert!(settings.emit_root_index);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.output.newline, Newline::Lf);
        assert!(!config.output.clean);
        assert!(config.links.external_assemblies.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[output]
newline = "platform"
clean = true
emit_root_index = false
namespace_index_threshold = 3

[links]
external_assemblies = ["Contoso.Core"]

[source]
xml = "Acme.xml"
symbols = "symbols.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.output.newline, Newline::Platform);
        assert!(config.output.clean);
        assert!(!config.output.emit_root_index);
        assert_eq!(config.output.namespace_index_threshold, 3);
        assert_eq!(config.links.external_assemblies, vec!["Contoso.Core"]);
        assert_eq!(
            config.source_resolved.xml,
            Some(PathBuf::from("/project/Acme.xml"))
        );
        assert_eq!(
            config.source_resolved.symbols,
            Some(PathBuf::from("/project/symbols.json"))
        );
    }

    #[test]
    fn test_cli_settings_override_config() {
        let toml = r#"
[output]
newline = "platform"
clean = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let cli = CliSettings {
            dry_run: true,
            clean: Some(false),
            newline: Some(Newline::Lf),
            ..Default::default()
        };

        let settings = config.settings(&cli);

        assert!(settings.dry_run);
        assert!(!settings.clean);
        assert_eq!(settings.newline, Newline::Lf);
    }

    #[test]
    fn test_cli_external_assemblies_append_and_dedup() {
        let toml = r#"
[links]
external_assemblies = ["Contoso.Core", "Fabrikam"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let cli = CliSettings {
            external_assemblies: vec!["Contoso.Core".to_owned(), "Adventure".to_owned()],
            ..Default::default()
        };

        let settings = config.settings(&cli);

        assert_eq!(
            settings.external_assemblies,
            vec!["Adventure", "Contoso.Core", "Fabrikam"]
        );
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/xmdoc.toml"))).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xmdoc.toml");
        std::fs::write(&path, "[source]\nsymbols = \"symbols.json\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(
            config.source_resolved.symbols,
            Some(dir.path().join("symbols.json"))
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_validate_rejects_empty_external_name() {
        let toml = r#"
[links]
external_assemblies = [""]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("external_assemblies"));
    }

    #[test]
    fn test_invalid_newline_fails_to_parse() {
        let toml = r#"
[output]
newline = "crlf"
"#;
        let result: Result<Config, _> = toml::from_str(toml);

        assert!(result.is_err());
    }
}
