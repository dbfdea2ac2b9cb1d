//! Shared configuration loader for the kusari toolchain.
//!
//! `defaults/kusari.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`KusariConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use kusari::TransformOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/kusari.default.toml");

/// Top-level configuration consumed by kusari applications.
#[derive(Debug, Clone, Deserialize)]
pub struct KusariConfig {
    pub transform: TransformOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a file named on the command line; it must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a file that is only read when present, such as `./kusari.toml`.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key, e.g. `output.format` from `--format`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<KusariConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<KusariConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.transform, TransformOptions::default());
        assert_eq!(config.output.format, "twig");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("transform.collapse_self_conditional", true)
            .expect("override to apply")
            .set_override("output.format", "treeviz")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.transform.collapse_self_conditional);
        assert_eq!(config.output.format, "treeviz");
    }

    #[test]
    fn layers_user_file_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[transform]\ninclude_prefix = \"templates/\"").unwrap();
        writeln!(file, "[transform.filter_renames]\nescape = \"e\"").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.transform.include_prefix, "templates/");
        assert_eq!(config.transform.filter_name("escape"), "e");
        // defaults for untouched keys survive
        assert_eq!(config.transform.filter_name("safe"), "raw");
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/definitely/not/here.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "twig");
    }
}
