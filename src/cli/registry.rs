//! Declarative command tree.
//!
//! Commands are described as [`CommandSpec`] values, turned into a clap
//! [`Command`] by [`build_command`] and executed by [`dispatch`]. Whether a
//! command needs the configuration is part of its declaration: only
//! [`Run::Configured`] bodies trigger resolution, and they receive the
//! resolved [`Spec`] as an argument.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

use super::GlobalArgs;
use crate::commands;
use crate::config::{self, ConfigError, Spec};

pub type PlainFn = fn(&ArgMatches) -> Result<()>;
pub type ConfiguredFn = fn(&Spec, &ArgMatches) -> Result<()>;

#[derive(Clone, Copy)]
pub enum Run {
    /// Only groups subcommands
    Group,
    /// Runs without a configuration
    Plain(PlainFn),
    /// Runs once the configuration has been resolved
    Configured(ConfiguredFn),
}

pub struct CommandSpec {
    pub name: &'static str,
    pub about: &'static str,
    pub long_about: Option<&'static str>,
    pub example: Option<&'static str>,
    pub args: Vec<Arg>,
    pub run: Run,
    pub children: Vec<CommandSpec>,
}

impl CommandSpec {
    pub fn child(&self, name: &str) -> Option<&CommandSpec> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn requires_config(&self) -> bool {
        matches!(self.run, Run::Configured(_))
    }
}

const LONG_ABOUT: &str = "Klepto by HelloFresh.
Takes the structure and data from one (mysql) database (--from),
anonymises the data according to the provided configuration file,
and inserts that data into another mysql database (--to).

Perfect for bringing your live data to staging!";

/// Flags inherited by every subcommand
pub fn persistent_flags() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .short('c')
            .long("config")
            .value_name("PATH")
            .default_value("")
            .hide_default_value(true)
            .global(true)
            .help("Path to config file (default is ./.klepto)"),
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .global(true)
            .help("Make the operation more talkative"),
    ]
}

/// The `klepto` command tree
pub fn root() -> CommandSpec {
    CommandSpec {
        name: "klepto",
        about: "Steals and anonymises databases",
        long_about: Some(LONG_ABOUT),
        example: Some(
            "klepto steal -c .klepto.toml|yaml|json --from root:root@localhost:3306/fromDb --to root:root@localhost:3306/toDb",
        ),
        args: persistent_flags(),
        run: Run::Group,
        children: vec![
            commands::steal::command(),
            commands::version::command(),
            commands::update::command(),
            commands::init::command(),
        ],
    }
}

pub fn build_command(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(spec.name)
        .about(spec.about)
        .args(spec.args.iter().cloned());

    if let Some(long_about) = spec.long_about {
        cmd = cmd.long_about(long_about);
    }
    if let Some(example) = spec.example {
        cmd = cmd.after_help(format!("Example:\n  {example}"));
    }
    if !spec.children.is_empty() {
        cmd = cmd.subcommand_required(true).arg_required_else_help(true);
    }

    for child in &spec.children {
        cmd = cmd.subcommand(build_command(child));
    }
    cmd
}

/// Walk the matches down to the deepest selected command
pub fn select<'a>(spec: &'a CommandSpec, matches: &'a ArgMatches) -> (&'a CommandSpec, &'a ArgMatches) {
    match matches.subcommand() {
        Some((name, sub_matches)) => match spec.child(name) {
            Some(child) => select(child, sub_matches),
            None => (spec, matches),
        },
        None => (spec, matches),
    }
}

/// Runs after flag parsing and before the command body
pub fn pre_run(globals: &GlobalArgs) -> Result<Spec, ConfigError> {
    config::resolve(globals.config.as_deref())
}

/// Run the selected command. Configured commands only start once
/// [`pre_run`] has produced a configuration.
pub fn dispatch(command: &CommandSpec, matches: &ArgMatches, globals: &GlobalArgs) -> Result<()> {
    match command.run {
        Run::Group => {
            build_command(command).print_help()?;
            Ok(())
        }
        Run::Plain(run) => {
            debug!("Running {} without configuration", command.name);
            run(matches)
        }
        Run::Configured(run) => {
            let spec = pre_run(globals)
                .with_context(|| format!("failed to load configuration for {}", command.name))?;
            debug!("Running {} with {} table definitions", command.name, spec.tables.len());
            run(&spec, matches)
        }
    }
}
