pub mod registry;

use anyhow::Result;
use clap::ArgMatches;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::diagnostics::Diagnostics;

/// Values of the persistent flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// `--config`, `None` when absent or empty
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let config = matches
            .get_one::<String>("config")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self {
            config,
            verbose: matches.get_flag("verbose"),
        }
    }
}

/// Parse `args`, set up diagnostics and run the selected command
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let root = registry::root();
    let matches = registry::build_command(&root).get_matches_from(args);
    let (command, leaf) = registry::select(&root, &matches);
    let globals = GlobalArgs::from_matches(leaf);

    let dispatch = Diagnostics::new(globals.verbose).dispatch();
    tracing::dispatcher::with_default(&dispatch, || registry::dispatch(command, leaf, &globals))
}
