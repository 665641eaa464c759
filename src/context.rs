use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// User attributes that features are evaluated against.
///
/// A `UserContext` can only be obtained through validation, so all three fields are guaranteed to
/// be non-blank. Values are kept exactly as supplied (not trimmed) and compared verbatim against
/// configured allow-lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    user_id: String,
    region: String,
    plan: String,
}

impl UserContext {
    /// Create a validated user context.
    ///
    /// ```
    /// # use feature_rules::UserContext;
    /// let context = UserContext::new("user123", "us", "pro").unwrap();
    /// assert_eq!(context.plan(), "pro");
    ///
    /// assert!(UserContext::new("user123", "  ", "pro").is_err());
    /// ```
    pub fn new(
        user_id: impl Into<String>,
        region: impl Into<String>,
        plan: impl Into<String>,
    ) -> Result<UserContext> {
        let context = UserContext {
            user_id: user_id.into(),
            region: region.into(),
            plan: plan.into(),
        };
        for (field, value) in [
            ("userId", &context.user_id),
            ("region", &context.region),
            ("plan", &context.plan),
        ] {
            if is_blank(value) {
                return Err(Error::ContextField { field });
            }
        }
        Ok(context)
    }

    /// Validate an arbitrary value against the user context shape.
    ///
    /// Checks run in order and the first failure is reported: the value must be an object, then
    /// `userId`, `region` and `plan` must each be a non-blank string.
    ///
    /// ```
    /// # use feature_rules::{Error, UserContext};
    /// let value = serde_json::json!({"userId": "user123", "region": "eu", "plan": "basic"});
    /// assert!(UserContext::validate(&value).is_ok());
    ///
    /// let value = serde_json::json!({"region": "eu", "plan": "basic"});
    /// assert!(matches!(
    ///     UserContext::validate(&value),
    ///     Err(Error::ContextField { field: "userId" })
    /// ));
    /// ```
    pub fn validate(value: &Value) -> Result<UserContext> {
        let object = value.as_object().ok_or(Error::ContextShape)?;

        Ok(UserContext {
            user_id: required_field(object, "userId")?,
            region: required_field(object, "region")?,
            plan: required_field(object, "plan")?,
        })
    }

    /// Unique identifier of the user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Geographic region of the user.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Subscription plan of the user (e.g., "basic", "pro").
    pub fn plan(&self) -> &str {
        &self.plan
    }
}

fn required_field(object: &Map<String, Value>, field: &'static str) -> Result<String> {
    match object.get(field) {
        Some(Value::String(s)) if !is_blank(s) => Ok(s.clone()),
        _ => Err(Error::ContextField { field }),
    }
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
