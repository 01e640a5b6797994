use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use pagegen_core::SiteBuilder;

use crate::config::load_build_config;

// No default values here: anything left unset falls through to the config
// file, then the environment, then the built-in defaults.
pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("content")
                .short('s')
                .long("content")
                .value_name("DIR")
                .help("Directory containing markdown files [default: ./content]"),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .value_name("FILE")
                .help("HTML template with {{ Title }} and {{ Content }} [default: ./template.html]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for generated site [default: ./public]"),
        )
        .arg(
            Arg::new("static")
                .long("static")
                .value_name("DIR")
                .help("Directory of assets copied as-is [default: ./static]"),
        )
        .arg(
            Arg::new("base_path")
                .short('b')
                .long("base-path")
                .value_name("PATH")
                .help("URL prefix the site is served under, e.g. /myrepo/ [default: /]"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value(crate::config::DEFAULT_CONFIG_FILE),
        )
        .arg(
            Arg::new("clean")
                .long("clean")
                .help("Empty the output directory first")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("parallel")
                .short('j')
                .long("parallel")
                .help("Generate pages on all cores")
                .action(ArgAction::SetTrue),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build")).about("Build static site from markdown files")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = load_build_config(args)?;
    tracing::debug!(?config, "Resolved configuration");

    let site = SiteBuilder::from_config(&config).build()?;
    let summary = site
        .render_all()
        .with_context(|| format!("failed to build site from {}", config.content.display()))?;

    println!(
        "Generated {} pages and copied {} static files into {}",
        summary.pages,
        summary.static_files,
        config.output.display()
    );

    Ok(())
}
