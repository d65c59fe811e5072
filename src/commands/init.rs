use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches};
use std::path::PathBuf;

use crate::cli::registry::{CommandSpec, Run};
use crate::cli::GlobalArgs;
use crate::config::ConfigFormat;
use crate::init;

pub fn command() -> CommandSpec {
    CommandSpec {
        name: "init",
        about: "Create a fresh klepto configuration file",
        long_about: Some(
            "Create a fresh klepto configuration file.\n\
             Writes to --config when given, otherwise to .klepto.<format> in the current directory.",
        ),
        example: Some("klepto init --format yaml"),
        args: vec![
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .value_parser(value_parser!(ConfigFormat))
                .help("Configuration format (default: from --config extension, else toml)"),
            Arg::new("force")
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Overwrite an existing configuration file"),
        ],
        run: Run::Plain(handle_init),
        children: Vec::new(),
    }
}

/// Where `init` writes and in which format
pub fn target(matches: &ArgMatches) -> Result<(PathBuf, ConfigFormat)> {
    let explicit = GlobalArgs::from_matches(matches).config;
    let requested = matches.get_one::<ConfigFormat>("format").copied();

    match explicit {
        Some(path) => {
            let format = requested
                .or_else(|| ConfigFormat::from_path(&path))
                .unwrap_or(ConfigFormat::Toml);
            Ok((path, format))
        }
        None => {
            let format = requested.unwrap_or(ConfigFormat::Toml);
            let cwd = std::env::current_dir().context("can't find current working directory")?;
            Ok((cwd.join(init::default_file_name(format)), format))
        }
    }
}

pub fn handle_init(matches: &ArgMatches) -> Result<()> {
    let (path, format) = target(matches)?;
    let path = init::generate_config_at_path(&path, format, matches.get_flag("force"))?;
    println!("✅ Configuration written to {}", path.display());
    Ok(())
}
