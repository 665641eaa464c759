use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{context::is_blank, error::FieldViolation, Error, Result};

/// Optional allow-lists that targeting rules are built from.
///
/// Each list may be absent or empty. Order and duplicates within a list don't affect evaluation.
///
/// ```
/// # use feature_rules::FeatureConfiguration;
/// let configuration = FeatureConfiguration::default()
///     .with_regions(["eu"])
///     .with_plans(["enterprise"]);
/// assert!(configuration.userids.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfiguration {
    /// User ids targeted by `user-targeted-feature`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userids: Option<Vec<String>>,
    /// Regions targeted by `region-targeted-feature`. Also replaces the built-in region list of
    /// `region-specific-feature`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    /// Plans targeted by `plan-targeted-feature`. Also restricts plan-gated features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<String>>,
}

/// Origin of configuration data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Configuration loaded from a YAML file. Preferred when a file path is given.
    #[default]
    File,
    /// Configuration supplied by the caller.
    Programmatic,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigSource::File => "file",
            ConfigSource::Programmatic => "programmatic",
        })
    }
}

const USERIDS: &str = "userids";
const REGIONS: &str = "regions";
const PLANS: &str = "plans";

impl FeatureConfiguration {
    /// Set the `userids` list.
    pub fn with_userids<S: Into<String>>(mut self, userids: impl IntoIterator<Item = S>) -> Self {
        self.userids = Some(userids.into_iter().map(Into::into).collect());
        self
    }

    /// Set the `regions` list.
    pub fn with_regions<S: Into<String>>(mut self, regions: impl IntoIterator<Item = S>) -> Self {
        self.regions = Some(regions.into_iter().map(Into::into).collect());
        self
    }

    /// Set the `plans` list.
    pub fn with_plans<S: Into<String>>(mut self, plans: impl IntoIterator<Item = S>) -> Self {
        self.plans = Some(plans.into_iter().map(Into::into).collect());
        self
    }

    /// Validate an arbitrary parsed value against the configuration shape.
    ///
    /// Validation is fail-fast: the first violation found is returned. Validated entries are
    /// trimmed.
    pub fn validate(raw: &Value, source: ConfigSource) -> Result<FeatureConfiguration> {
        let object = raw.as_object().ok_or(Error::ConfigurationShape {
            config_source: source,
        })?;

        Ok(FeatureConfiguration {
            userids: raw_list(object, USERIDS, source)?,
            regions: raw_list(object, REGIONS, source)?,
            plans: raw_list(object, PLANS, source)?,
        })
    }

    /// Apply the same entry checks as [`FeatureConfiguration::validate`] to an already typed
    /// configuration.
    pub fn validated(self, source: ConfigSource) -> Result<FeatureConfiguration> {
        let check = |field: &'static str, list: Option<Vec<String>>| {
            list.map(|entries| {
                trimmed_entries(field, source, entries.iter().map(|s| Some(s.as_str())))
            })
            .transpose()
        };

        Ok(FeatureConfiguration {
            userids: check(USERIDS, self.userids)?,
            regions: check(REGIONS, self.regions)?,
            plans: check(PLANS, self.plans)?,
        })
    }
}

fn raw_list(
    object: &Map<String, Value>,
    field: &'static str,
    source: ConfigSource,
) -> Result<Option<Vec<String>>> {
    let Some(value) = object.get(field) else {
        return Ok(None);
    };

    let entries = value.as_array().ok_or(Error::ConfigurationField {
        field,
        config_source: source,
        violation: FieldViolation::NotAnArray,
    })?;

    trimmed_entries(field, source, entries.iter().map(Value::as_str)).map(Some)
}

/// `None` items stand for non-string entries.
fn trimmed_entries<'a>(
    field: &'static str,
    source: ConfigSource,
    entries: impl Iterator<Item = Option<&'a str>>,
) -> Result<Vec<String>> {
    entries
        .map(|entry| {
            let violation = match entry {
                None => FieldViolation::NotAString,
                Some(s) if is_blank(s) => FieldViolation::Blank,
                Some(s) => return Ok(s.trim().to_owned()),
            };
            Err(Error::ConfigurationField {
                field,
                config_source: source,
                violation,
            })
        })
        .collect()
}
