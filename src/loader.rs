use std::{io::ErrorKind, path::Path};

use crate::{ConfigSource, Error, FeatureConfiguration, Result};

/// Load and validate a YAML configuration file.
///
/// The file must contain a mapping with optional `userids`, `regions` and `plans` keys, each a
/// list of non-empty strings:
///
/// ```yaml
/// userids:
///   - user-special
/// regions:
///   - eu
/// plans:
///   - enterprise
/// ```
///
/// # Errors
///
/// - [`Error::ConfigurationPath`] if `path` is blank.
/// - [`Error::ConfigurationFileNotFound`] if there is no file at `path`.
/// - [`Error::ConfigurationFormat`] if the content is not valid YAML.
/// - [`Error::ConfigurationShape`] or [`Error::ConfigurationField`] if the parsed content doesn't
///   match the configuration shape.
pub fn load_configuration_from_file(path: impl AsRef<Path>) -> Result<FeatureConfiguration> {
    let path = path.as_ref();
    let display_path = path.to_string_lossy();
    if display_path.trim().is_empty() {
        return Err(Error::ConfigurationPath);
    }

    let not_found = || Error::ConfigurationFileNotFound {
        path: display_path.clone().into_owned(),
    };

    if !path.exists() {
        return Err(not_found());
    }

    let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        // The file may disappear between the check and the read.
        ErrorKind::NotFound => not_found(),
        _ => err.into(),
    })?;

    let raw: serde_json::Value = serde_yaml::from_str(&content)
        .map_err(|err| Error::ConfigurationFormat(err.to_string()))?;

    let configuration = FeatureConfiguration::validate(&raw, ConfigSource::File)?;

    log::debug!(target: "feature_rules",
                path:display = display_path,
                userids = list_len(&configuration.userids),
                regions = list_len(&configuration.regions),
                plans = list_len(&configuration.plans);
                "loaded configuration file");

    Ok(configuration)
}

fn list_len(list: &Option<Vec<String>>) -> usize {
    list.as_ref().map_or(0, Vec::len)
}
