use crate::{
    load_configuration_from_file, options::ProgrammaticConfiguration, ConfigSource,
    EvaluationOptions, FeatureConfiguration, Result,
};

/// Pick the configuration to evaluate with.
///
/// - No options: no configuration.
/// - [`ConfigSource::Programmatic`]: the supplied configuration, even if a file path is present.
///   Without a supplied configuration, there is no configuration (the file is not consulted).
/// - Otherwise a file path wins over a supplied configuration.
/// - Otherwise the supplied configuration, if any.
pub(crate) fn resolve_configuration(
    options: Option<&EvaluationOptions>,
) -> Result<Option<FeatureConfiguration>> {
    let Some(options) = options else {
        return Ok(None);
    };

    if options.config_source == Some(ConfigSource::Programmatic) {
        if options.configuration.is_none() {
            log::warn!(target: "feature_rules",
                       "programmatic configuration source selected but no configuration supplied");
        }
        return programmatic(options);
    }

    if let Some(path) = options.file_path() {
        log::debug!(target: "feature_rules",
                    source:display = ConfigSource::File,
                    path:display = path.display();
                    "resolved configuration source");
        return load_configuration_from_file(path).map(Some);
    }

    programmatic(options)
}

fn programmatic(options: &EvaluationOptions) -> Result<Option<FeatureConfiguration>> {
    let source = ConfigSource::Programmatic;
    let configuration = match &options.configuration {
        None => return Ok(None),
        Some(ProgrammaticConfiguration::Typed(configuration)) => {
            configuration.clone().validated(source)?
        }
        Some(ProgrammaticConfiguration::Raw(raw)) => FeatureConfiguration::validate(raw, source)?,
    };

    log::debug!(target: "feature_rules",
                source:display = source;
                "resolved configuration source");

    Ok(Some(configuration))
}
