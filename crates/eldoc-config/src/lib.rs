//! Configuration management for eldoc.
//!
//! Parses `eldoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` or `$VAR` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.default_locale`
//! - `site.site_url`
//! - `site.repository_url`

mod expand;

use std::path::{Path, PathBuf};

use eldoc_i18n::Locale;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override locale overrides directory.
    pub locales_dir: Option<PathBuf>,
    /// Override durable storage file.
    pub storage_path: Option<PathBuf>,
    /// Override the locale applied on first mount.
    pub default_locale: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "eldoc.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site shell configuration.
    pub site: SiteConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Locale configuration (paths are relative strings from TOML).
    locales: LocalesConfigRaw,
    /// Durable storage configuration (paths are relative strings from TOML).
    storage: StorageConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved locale overrides directory (set after loading).
    #[serde(skip)]
    pub locales_dir: Option<PathBuf>,
    /// Resolved durable storage file (set after loading).
    #[serde(skip)]
    pub storage_path: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site shell configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title shown in the footer.
    pub title: String,
    /// Locale applied on first mount when the URL carries none.
    pub default_locale: String,
    /// Page shown for absent or malformed fragments.
    pub fallback_page: String,
    /// Durable storage key holding the last resolved locale.
    pub storage_key: String,
    /// Base URL of the sibling site (guide and resource links).
    pub site_url: String,
    /// Repository URL (issue tracker and contribution guide links).
    pub repository_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Element-React".to_owned(),
            default_locale: Locale::default().code().to_owned(),
            fallback_page: "install".to_owned(),
            storage_key: "ELEMENT_LANGUAGE".to_owned(),
            site_url: "http://element.eleme.io".to_owned(),
            repository_url: "https://github.com/eleme/element-react".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LocalesConfigRaw {
    dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StorageConfigRaw {
    path: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding `<page-key>.md` sources.
    pub source_dir: PathBuf,
    /// Project directory for eldoc data (.eldoc/).
    pub project_dir: PathBuf,
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.site_url`").
        field: String,
        /// Error message (e.g., "${`DOCS_HOST`}: environment variable not found").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `eldoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Locale applied on first mount.
    ///
    /// Validation guarantees the configured code is supported.
    #[must_use]
    pub fn default_locale(&self) -> Locale {
        Locale::from_code(&self.site.default_locale).unwrap_or_default()
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(locales_dir) = &settings.locales_dir {
            self.locales_dir = Some(locales_dir.clone());
        }
        if let Some(storage_path) = &settings.storage_path {
            self.storage_path.clone_from(storage_path);
        }
        if let Some(locale) = &settings.default_locale {
            self.site.default_locale.clone_from(locale);
        }
    }

    /// Search for config file in current directory and parents.
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let project_dir = base.join(".eldoc");
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            locales: LocalesConfigRaw::default(),
            storage: StorageConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                project_dir: project_dir.clone(),
            },
            locales_dir: None,
            storage_path: project_dir.join("storage.json"),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let site = &self.site;

        if Locale::from_code(&site.default_locale).is_none() {
            let supported: Vec<_> = Locale::ALL.iter().map(|l| l.code()).collect();
            return Err(ConfigError::Validation(format!(
                "site.default_locale must be one of {}, got {:?}",
                supported.join(", "),
                site.default_locale
            )));
        }
        require_non_empty(&site.fallback_page, "site.fallback_page")?;
        require_non_empty(&site.storage_key, "site.storage_key")?;
        require_http_url(&site.site_url, "site.site_url")?;
        require_http_url(&site.repository_url, "site.repository_url")?;

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let site = &mut self.site;
        site.title = expand::expand_env(&site.title, "site.title")?;
        site.default_locale = expand::expand_env(&site.default_locale, "site.default_locale")?;
        site.site_url = expand::expand_env(&site.site_url, "site.site_url")?;
        site.repository_url = expand::expand_env(&site.repository_url, "site.repository_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let project_dir = config_dir.join(".eldoc");

        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            project_dir: project_dir.clone(),
        };
        self.locales_dir = self.locales.dir.as_deref().map(|dir| config_dir.join(dir));
        self.storage_path = self
            .storage
            .path
            .as_deref()
            .map_or_else(|| project_dir.join("storage.json"), |p| config_dir.join(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.title, "Element-React");
        assert_eq!(config.site.fallback_page, "install");
        assert_eq!(config.site.storage_key, "ELEMENT_LANGUAGE");
        assert_eq!(config.default_locale(), Locale::ZhCn);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.storage_path,
            PathBuf::from("/test/.eldoc/storage.json")
        );
        assert!(config.locales_dir.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.default_locale, "zh-CN");
        assert_eq!(config.site.site_url, "http://element.eleme.io");
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
title = "Docs"
default_locale = "en-US"
fallback_page = "quick-start"
storage_key = "DOCS_LANGUAGE"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Docs");
        assert_eq!(config.default_locale(), Locale::EnUs);
        assert_eq!(config.site.fallback_page, "quick-start");
        assert_eq!(config.site.storage_key, "DOCS_LANGUAGE");
        // Unset fields keep defaults
        assert_eq!(
            config.site.repository_url,
            "https://github.com/eleme/element-react"
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "pages"

[locales]
dir = "i18n"

[storage]
path = "state/local.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/pages"));
        assert_eq!(config.docs_resolved.project_dir, PathBuf::from("/project/.eldoc"));
        assert_eq!(config.locales_dir, Some(PathBuf::from("/project/i18n")));
        assert_eq!(config.storage_path, PathBuf::from("/project/state/local.json"));
    }

    #[test]
    fn test_validate_rejects_unsupported_locale() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.default_locale = "fr-FR".to_owned();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("site.default_locale"));
        assert!(err.to_string().contains("zh-CN, en-US"));
    }

    #[test]
    fn test_validate_rejects_empty_fallback_page() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.fallback_page = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.fallback_page"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.repository_url = "github.com/eleme/element-react".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.repository_url"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            default_locale: Some("en-US".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.default_locale(), Locale::EnUs);
        // Unchanged
        assert_eq!(
            config.storage_path,
            PathBuf::from("/test/.eldoc/storage.json")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.site.default_locale, "zh-CN");
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/eldoc.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[docs]\nsource_dir = \"site/pages\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path, Some(path));
        assert_eq!(
            config.docs_resolved.source_dir,
            dir.path().join("site/pages")
        );
        assert_eq!(config.storage_path, dir.path().join(".eldoc/storage.json"));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\ndefault_locale = \"de-DE\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_cli_settings_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let overrides = CliSettings {
            default_locale: Some("xx".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_expand_env_vars_site_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("ELDOC_TEST_SITE_URL", "https://docs.internal");
        }

        let toml = r#"
[site]
site_url = "${ELDOC_TEST_SITE_URL}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.site_url, "https://docs.internal");

        unsafe {
            std::env::remove_var("ELDOC_TEST_SITE_URL");
        }
    }
}
