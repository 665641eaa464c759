//! Deterministic feature flag rules keyed on user attributes.
//!
//! # Overview
//!
//! Features are evaluated for a [`UserContext`] made of a user id, a region and a subscription
//! plan. Evaluation runs a fixed, ordered list of rules and returns a [`FeatureEvaluationResult`]
//! listing the identifiers of every enabled feature (see [`features`]).
//!
//! ```
//! # use feature_rules::evaluate_features;
//! let context = serde_json::json!({"userId": "user456", "region": "eu", "plan": "basic"});
//! let result = evaluate_features(&context, None).unwrap();
//! assert!(result.is_enabled("basic-dashboard"));
//! assert!(!result.is_enabled("api-access"));
//! ```
//!
//! # Configuration
//!
//! Rules can be tuned with optional `userids`, `regions` and `plans` allow-lists, loaded from a
//! YAML file or supplied as a [`FeatureConfiguration`] through [`EvaluationOptions`]. A file path
//! takes precedence unless [`ConfigSource::Programmatic`] is selected. Configuration is loaded
//! from scratch on every call; nothing is cached between evaluations.
//!
//! # Error Handling
//!
//! Errors are represented by the [`Error`] enum. Invalid contexts and invalid configuration are
//! reported before any rule runs, so an evaluation either fully succeeds or returns an error.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate for logging messages under
//! the `feature_rules` target. Consider integrating a `log`-compatible logger implementation for
//! better visibility into configuration resolution and evaluation.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod configuration;
mod context;
mod error;
mod eval;
mod loader;
mod options;
mod resolver;
mod rules;

pub use configuration::{ConfigSource, FeatureConfiguration};
pub use context::UserContext;
pub use error::{Error, FieldViolation, Result};
pub use eval::{evaluate_features, evaluate_user_context, FeatureEvaluationResult};
pub use loader::load_configuration_from_file;
pub use options::{EvaluationOptions, ProgrammaticConfiguration};
pub use rules::{build_rules, features, FeatureRule};
