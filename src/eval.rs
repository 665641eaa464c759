use serde::{Deserialize, Serialize};

use crate::{
    resolver::resolve_configuration, rules::build_rules, EvaluationOptions, Result, UserContext,
};

/// Features enabled for a user, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureEvaluationResult {
    enabled_features: Vec<String>,
}

impl FeatureEvaluationResult {
    /// Identifiers of enabled features. Each appears at most once.
    pub fn enabled_features(&self) -> &[String] {
        &self.enabled_features
    }

    /// Return `true` if `feature_id` is enabled.
    pub fn is_enabled(&self, feature_id: &str) -> bool {
        self.enabled_features.iter().any(|f| f == feature_id)
    }

    /// Consume the result, returning enabled feature identifiers.
    pub fn into_enabled_features(self) -> Vec<String> {
        self.enabled_features
    }
}

/// Evaluate which features are enabled for a user context given as an arbitrary value.
///
/// The context must be an object with non-blank string `userId`, `region` and `plan` fields.
/// Configuration is resolved from `options` (see [`EvaluationOptions`]); without options only
/// built-in rules apply.
///
/// # Errors
///
/// Any context validation, configuration loading or configuration validation error is returned
/// as is, before any rule is evaluated.
///
/// # Examples
/// ```
/// # use feature_rules::evaluate_features;
/// let context = serde_json::json!({"userId": "user123", "region": "us", "plan": "pro"});
/// let result = evaluate_features(&context, None).unwrap();
/// assert_eq!(
///     result.enabled_features(),
///     [
///         "advanced-analytics",
///         "priority-support",
///         "api-access",
///         "basic-dashboard",
///         "email-support",
///         "region-specific-feature",
///     ]
/// );
/// ```
pub fn evaluate_features(
    context: &serde_json::Value,
    options: Option<&EvaluationOptions>,
) -> Result<FeatureEvaluationResult> {
    let context = UserContext::validate(context)?;
    evaluate_user_context(&context, options)
}

/// Evaluate which features are enabled for an already validated user context.
///
/// ```
/// # use feature_rules::{evaluate_user_context, EvaluationOptions, FeatureConfiguration, UserContext};
/// let context = UserContext::new("user-special", "asia", "free").unwrap();
/// let mut options = EvaluationOptions::new();
/// options.configuration(FeatureConfiguration::default().with_userids(["user-special"]));
///
/// let result = evaluate_user_context(&context, Some(&options)).unwrap();
/// assert!(result.is_enabled("user-targeted-feature"));
/// ```
pub fn evaluate_user_context(
    context: &UserContext,
    options: Option<&EvaluationOptions>,
) -> Result<FeatureEvaluationResult> {
    let configuration = resolve_configuration(options)?;

    let enabled_features: Vec<String> = build_rules(configuration.as_ref())
        .iter()
        .filter(|rule| rule.eval(context))
        .map(|rule| rule.feature_id().to_owned())
        .collect();

    log::trace!(target: "feature_rules",
                user_id = context.user_id(),
                region = context.region(),
                plan = context.plan(),
                enabled_features:serde = &enabled_features;
                "evaluated features");

    Ok(FeatureEvaluationResult { enabled_features })
}
