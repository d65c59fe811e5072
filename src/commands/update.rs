use anyhow::Result;
use clap::ArgMatches;
use tracing::debug;

use super::version::VERSION;
use crate::cli::registry::{CommandSpec, Run};

pub const RELEASES_URL: &str = "https://github.com/hellofresh/klepto/releases";

pub fn command() -> CommandSpec {
    CommandSpec {
        name: "update",
        about: "Check for new versions of klepto",
        long_about: None,
        example: None,
        args: Vec::new(),
        run: Run::Plain(handle_update),
        children: Vec::new(),
    }
}

pub fn update_notice() -> String {
    format!(
        "You are running klepto {VERSION}.\n\
         This build cannot replace itself; download the latest release from {RELEASES_URL}"
    )
}

pub fn handle_update(_: &ArgMatches) -> Result<()> {
    debug!("Self update is not available, pointing to {RELEASES_URL}");
    println!("{}", update_notice());
    Ok(())
}
