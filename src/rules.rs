use std::{collections::HashSet, sync::Arc};

use crate::{FeatureConfiguration, UserContext};

/// Identifiers of all features known to the rule builder, in evaluation order.
pub mod features {
    /// Pro plan only.
    pub const ADVANCED_ANALYTICS: &str = "advanced-analytics";
    /// Pro plan only.
    pub const PRIORITY_SUPPORT: &str = "priority-support";
    /// Pro plan only.
    pub const API_ACCESS: &str = "api-access";
    /// Basic and pro plans.
    pub const BASIC_DASHBOARD: &str = "basic-dashboard";
    /// Basic and pro plans.
    pub const EMAIL_SUPPORT: &str = "email-support";
    /// Users in the configured regions, or in "us"/"eu" when no regions are configured.
    pub const REGION_SPECIFIC_FEATURE: &str = "region-specific-feature";
    /// Users listed in `userids`. Only evaluated when `userids` is non-empty.
    pub const USER_TARGETED_FEATURE: &str = "user-targeted-feature";
    /// Users in `regions`. Only evaluated when `regions` is non-empty.
    pub const REGION_TARGETED_FEATURE: &str = "region-targeted-feature";
    /// Users on `plans`. Only evaluated when `plans` is non-empty.
    pub const PLAN_TARGETED_FEATURE: &str = "plan-targeted-feature";
}

const PRO_PLANS: &[&str] = &["pro"];
const BASIC_PLANS: &[&str] = &["basic", "pro"];
const DEFAULT_REGIONS: &[&str] = &["us", "eu"];

/// Allow-lists are shared between the rules of one evaluation.
type AllowList = Arc<HashSet<String>>;

/// A feature identifier paired with the condition that enables it.
#[derive(Debug, Clone)]
pub struct FeatureRule {
    feature_id: &'static str,
    condition: Condition,
}

#[derive(Debug, Clone)]
enum Condition {
    /// Plan is one of `plans` and, if a plan allow-list is configured, is in it.
    Plan {
        plans: &'static [&'static str],
        allow_list: Option<AllowList>,
    },
    /// Region is in the allow-list, or one of [`DEFAULT_REGIONS`] without one.
    Region { allow_list: Option<AllowList> },
    UserIdIn(AllowList),
    RegionIn(AllowList),
    PlanIn(AllowList),
}

impl Condition {
    fn eval(&self, context: &UserContext) -> bool {
        match self {
            Self::Plan { plans, allow_list } => {
                plans.contains(&context.plan())
                    && allow_list
                        .as_ref()
                        .map_or(true, |allowed| allowed.contains(context.plan()))
            }
            Self::Region { allow_list } => match allow_list {
                Some(allowed) => allowed.contains(context.region()),
                None => DEFAULT_REGIONS.contains(&context.region()),
            },
            Self::UserIdIn(allowed) => allowed.contains(context.user_id()),
            Self::RegionIn(allowed) => allowed.contains(context.region()),
            Self::PlanIn(allowed) => allowed.contains(context.plan()),
        }
    }
}

impl FeatureRule {
    /// Identifier of the feature this rule enables.
    pub fn feature_id(&self) -> &'static str {
        self.feature_id
    }

    /// Return `true` if the feature is enabled for `context`.
    pub fn eval(&self, context: &UserContext) -> bool {
        self.condition.eval(context)
    }
}

/// Build the ordered list of rules for a configuration.
///
/// Without configuration (or with all lists empty), only the six built-in rules are returned.
/// Each non-empty list adds its targeting rule at the end.
///
/// ```
/// # use feature_rules::{build_rules, features, FeatureConfiguration};
/// let configuration = FeatureConfiguration::default().with_userids(["user-special"]);
/// let rules = build_rules(Some(&configuration));
/// assert_eq!(rules.len(), 7);
/// assert_eq!(rules[6].feature_id(), features::USER_TARGETED_FEATURE);
/// ```
pub fn build_rules(configuration: Option<&FeatureConfiguration>) -> Vec<FeatureRule> {
    let (userids, regions, plans) = match configuration {
        Some(c) => (
            allow_list(&c.userids),
            allow_list(&c.regions),
            allow_list(&c.plans),
        ),
        None => (None, None, None),
    };

    let plan_rule =
        |feature_id: &'static str, plans_accepted: &'static [&'static str]| FeatureRule {
            feature_id,
            condition: Condition::Plan {
                plans: plans_accepted,
                allow_list: plans.clone(),
            },
        };

    let mut rules = vec![
        plan_rule(features::ADVANCED_ANALYTICS, PRO_PLANS),
        plan_rule(features::PRIORITY_SUPPORT, PRO_PLANS),
        plan_rule(features::API_ACCESS, PRO_PLANS),
        plan_rule(features::BASIC_DASHBOARD, BASIC_PLANS),
        plan_rule(features::EMAIL_SUPPORT, BASIC_PLANS),
        FeatureRule {
            feature_id: features::REGION_SPECIFIC_FEATURE,
            condition: Condition::Region {
                allow_list: regions.clone(),
            },
        },
    ];

    if let Some(userids) = userids {
        rules.push(FeatureRule {
            feature_id: features::USER_TARGETED_FEATURE,
            condition: Condition::UserIdIn(userids),
        });
    }
    if let Some(regions) = regions {
        rules.push(FeatureRule {
            feature_id: features::REGION_TARGETED_FEATURE,
            condition: Condition::RegionIn(regions),
        });
    }
    if let Some(plans) = plans {
        rules.push(FeatureRule {
            feature_id: features::PLAN_TARGETED_FEATURE,
            condition: Condition::PlanIn(plans),
        });
    }

    rules
}

/// `None` for absent and empty lists alike.
fn allow_list(list: &Option<Vec<String>>) -> Option<AllowList> {
    list.as_ref()
        .filter(|entries| !entries.is_empty())
        .map(|entries| Arc::new(entries.iter().cloned().collect()))
}

#[cfg(test)]
mod tests {
    use crate::{FeatureConfiguration, UserContext};

    use super::{build_rules, features::*};

    fn ids(configuration: Option<&FeatureConfiguration>) -> Vec<&'static str> {
        build_rules(configuration)
            .iter()
            .map(|rule| rule.feature_id())
            .collect()
    }

    fn enabled(
        configuration: Option<&FeatureConfiguration>,
        context: &UserContext,
    ) -> Vec<&'static str> {
        build_rules(configuration)
            .iter()
            .filter(|rule| rule.eval(context))
            .map(|rule| rule.feature_id())
            .collect()
    }

    fn context(user_id: &str, region: &str, plan: &str) -> UserContext {
        UserContext::new(user_id, region, plan).unwrap()
    }

    const BUILT_IN: [&str; 6] = [
        ADVANCED_ANALYTICS,
        PRIORITY_SUPPORT,
        API_ACCESS,
        BASIC_DASHBOARD,
        EMAIL_SUPPORT,
        REGION_SPECIFIC_FEATURE,
    ];

    #[test]
    fn built_in_rules_only_without_configuration() {
        assert_eq!(ids(None), BUILT_IN);
    }

    #[test]
    fn empty_lists_behave_like_absent_configuration() {
        let configuration = FeatureConfiguration::default()
            .with_userids(Vec::<String>::new())
            .with_regions(Vec::<String>::new())
            .with_plans(Vec::<String>::new());
        assert_eq!(ids(Some(&configuration)), BUILT_IN);

        let context = context("u", "asia", "pro");
        assert_eq!(
            enabled(Some(&configuration), &context),
            enabled(None, &context)
        );
    }

    #[test]
    fn targeting_rules_are_appended_in_order() {
        let configuration = FeatureConfiguration::default()
            .with_plans(["pro"])
            .with_userids(["u1"]);
        assert_eq!(
            ids(Some(&configuration)),
            [
                &BUILT_IN[..],
                &[USER_TARGETED_FEATURE, PLAN_TARGETED_FEATURE][..]
            ]
            .concat()
        );
    }

    #[test]
    fn pro_plan_gets_everything_in_default_regions() {
        assert_eq!(enabled(None, &context("u", "us", "pro")), BUILT_IN);
    }

    #[test]
    fn basic_plan_gets_basic_features() {
        assert_eq!(
            enabled(None, &context("u", "eu", "basic")),
            [BASIC_DASHBOARD, EMAIL_SUPPORT, REGION_SPECIFIC_FEATURE]
        );
    }

    #[test]
    fn unknown_plan_and_region_get_nothing() {
        assert!(enabled(None, &context("u", "unknown-region", "unknown-plan")).is_empty());
    }

    #[test]
    fn plan_comparison_is_exact() {
        assert_eq!(
            enabled(None, &context("u", "asia", "Pro")),
            Vec::<&str>::new()
        );
        assert_eq!(
            enabled(None, &context("u", "asia", " pro")),
            Vec::<&str>::new()
        );
    }

    #[test]
    fn plan_allow_list_restricts_plan_features() {
        let configuration = FeatureConfiguration::default().with_plans(["enterprise"]);
        assert_eq!(
            enabled(Some(&configuration), &context("u", "asia", "pro")),
            Vec::<&str>::new()
        );

        let configuration = FeatureConfiguration::default().with_plans(["basic"]);
        assert_eq!(
            enabled(Some(&configuration), &context("u", "asia", "pro")),
            Vec::<&str>::new()
        );
        assert_eq!(
            enabled(Some(&configuration), &context("u", "asia", "basic")),
            [BASIC_DASHBOARD, EMAIL_SUPPORT, PLAN_TARGETED_FEATURE]
        );
    }

    #[test]
    fn region_allow_list_replaces_default_regions() {
        let configuration = FeatureConfiguration::default().with_regions(["asia"]);
        assert_eq!(
            enabled(Some(&configuration), &context("u", "asia", "free")),
            [REGION_SPECIFIC_FEATURE, REGION_TARGETED_FEATURE]
        );
        assert!(enabled(Some(&configuration), &context("u", "us", "free")).is_empty());
    }

    #[test]
    fn user_targeting() {
        let configuration = FeatureConfiguration::default().with_userids(["u1", "u1", "u2"]);
        assert_eq!(
            enabled(Some(&configuration), &context("u2", "asia", "free")),
            [USER_TARGETED_FEATURE]
        );
        assert!(enabled(Some(&configuration), &context("u3", "asia", "free")).is_empty());
    }
}
