use anyhow::Result;
use clap::ArgMatches;

use crate::cli::registry::{CommandSpec, Run};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn command() -> CommandSpec {
    CommandSpec {
        name: "version",
        about: "Display this binary's version, build time and git hash of this build",
        long_about: None,
        example: None,
        args: Vec::new(),
        run: Run::Plain(handle_version),
        children: Vec::new(),
    }
}

/// Commit and build date are stamped by the release pipeline
pub fn version_line() -> String {
    let commit = option_env!("KLEPTO_GIT_COMMIT").unwrap_or("unknown");
    let built = option_env!("KLEPTO_BUILD_DATE").unwrap_or("unknown");
    format!("klepto version {VERSION}\nGit hash: {commit}\nBuild time: {built}")
}

pub fn handle_version(_: &ArgMatches) -> Result<()> {
    println!("{}", version_line());
    Ok(())
}
