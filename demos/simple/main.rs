use feature_rules::{evaluate_features, EvaluationOptions};

pub fn main() -> feature_rules::Result<()> {
    // Configure env_logger to see evaluation logs.
    env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("feature_rules=trace"))
        .init();

    let context = serde_json::json!({
        "userId": "user-special",
        "region": "eu",
        "plan": "enterprise",
    });

    // Built-in rules only.
    let result = evaluate_features(&context, None)?;
    println!("Without configuration: {:?}", result.enabled_features());

    // Optional path to a YAML configuration file.
    if let Some(path) = std::env::args().nth(1) {
        let mut options = EvaluationOptions::new();
        options.config_file_path(path);

        let result = evaluate_features(&context, Some(&options))?;
        println!("With configuration: {:?}", result.enabled_features());
    }

    Ok(())
}
