use std::path::{Path, PathBuf};

use derive_more::From;

use crate::{ConfigSource, FeatureConfiguration};

/// Configuration supplied by the caller instead of (or in addition to) a file.
///
/// Both variants are validated before use. A raw value goes through the same checks as a parsed
/// configuration file.
#[derive(Debug, Clone, PartialEq, From)]
pub enum ProgrammaticConfiguration {
    /// Already typed configuration.
    Typed(FeatureConfiguration),
    /// Arbitrary value expected to match the configuration shape.
    Raw(serde_json::Value),
}

/// Options controlling where configuration for an evaluation comes from.
///
/// When both a file path and a programmatic configuration are given, the file wins unless
/// [`ConfigSource::Programmatic`] is selected explicitly.
///
/// # Examples
/// ```
/// # use feature_rules::{ConfigSource, EvaluationOptions, FeatureConfiguration};
/// let mut options = EvaluationOptions::new();
/// options
///     .config_file_path("features.yaml")
///     .configuration(FeatureConfiguration::default().with_plans(["pro"]))
///     .config_source(ConfigSource::Programmatic);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvaluationOptions {
    pub(crate) config_file_path: Option<PathBuf>,
    pub(crate) configuration: Option<ProgrammaticConfiguration>,
    pub(crate) config_source: Option<ConfigSource>,
}

impl EvaluationOptions {
    /// Create options with no configuration, so only built-in rules apply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file at `path`.
    pub fn config_file_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.config_file_path = Some(path.into());
        self
    }

    /// Supply configuration directly. Accepts a [`FeatureConfiguration`] or a
    /// [`serde_json::Value`].
    pub fn configuration(
        &mut self,
        configuration: impl Into<ProgrammaticConfiguration>,
    ) -> &mut Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Select which configuration source takes precedence.
    pub fn config_source(&mut self, config_source: ConfigSource) -> &mut Self {
        self.config_source = Some(config_source);
        self
    }

    /// Configured file path, if any.
    ///
    /// An empty path counts as not supplied.
    pub(crate) fn file_path(&self) -> Option<&Path> {
        self.config_file_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use crate::{ConfigSource, FeatureConfiguration};

    use super::{EvaluationOptions, ProgrammaticConfiguration};

    #[test]
    fn setters_chain() {
        let mut options = EvaluationOptions::new();
        options
            .config_file_path("config.yaml")
            .configuration(json!({"plans": ["pro"]}))
            .config_source(ConfigSource::Programmatic);

        assert_eq!(options.file_path(), Some(Path::new("config.yaml")));
        assert_eq!(
            options.configuration,
            Some(ProgrammaticConfiguration::Raw(json!({"plans": ["pro"]})))
        );
        assert_eq!(options.config_source, Some(ConfigSource::Programmatic));
    }

    #[test]
    fn typed_configuration_converts() {
        let mut options = EvaluationOptions::new();
        options.configuration(FeatureConfiguration::default().with_regions(["eu"]));
        assert!(matches!(
            options.configuration,
            Some(ProgrammaticConfiguration::Typed(_))
        ));
    }

    #[test]
    fn empty_path_counts_as_absent() {
        let mut options = EvaluationOptions::new();
        options.config_file_path("");
        assert_eq!(options.file_path(), None);

        options.config_file_path(" ");
        assert_eq!(options.file_path(), Some(Path::new(" ")));
    }
}
