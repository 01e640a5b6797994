use std::path::Path;

use ::config::{Config as ConfigBuilder, Environment, File, FileFormat};
use anyhow::Result;
use clap::ArgMatches;
use clap::parser::ValueSource;
use pagegen_core::config::BuildConfig;

pub const DEFAULT_CONFIG_FILE: &str = "./pagegen.toml";

/// Load configuration with cascading precedence:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (PAGEGEN_*)
/// 3. Configuration file
/// 4. Defaults (lowest priority)
pub fn load_build_config(args: &ArgMatches) -> Result<BuildConfig> {
    load_with_env(args, environment())
}

/// Variables like `PAGEGEN_BASE_PATH` map to the `base_path` key.
fn environment() -> Environment {
    Environment::with_prefix("PAGEGEN").prefix_separator("_")
}

fn load_with_env(args: &ArgMatches, env: Environment) -> Result<BuildConfig> {
    let config_file = args
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_FILE);
    // A file named on the command line must exist; the default one is optional
    let explicit = args.value_source("config") == Some(ValueSource::CommandLine);

    // 1. Start with defaults
    let mut builder =
        ConfigBuilder::builder().add_source(ConfigBuilder::try_from(&BuildConfig::default())?);

    // 2. Add configuration file
    if explicit || Path::new(config_file).exists() {
        builder = builder.add_source(
            File::from(Path::new(config_file))
                .format(FileFormat::Toml)
                .required(explicit),
        );
    }

    // 3. Add environment variables
    builder = builder.add_source(env);

    // 4. Override with CLI arguments
    for key in ["content", "template", "output", "static", "base_path"] {
        if let Some(value) = args.try_get_one::<String>(key).unwrap_or(None) {
            builder = builder.set_override(key, value.as_str())?;
        }
    }
    for flag in ["clean", "parallel"] {
        if args.try_get_one::<bool>(flag).unwrap_or(None) == Some(&true) {
            builder = builder.set_override(flag, true)?;
        }
    }

    let config: BuildConfig = builder.build()?.try_deserialize()?;
    Ok(config)
}
