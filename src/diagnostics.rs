//! Process diagnostics: verbosity and the CLI log formatter.
//!
//! The logger is an explicit [`Dispatch`] built once from the `--verbose`
//! flag and installed for the duration of a single invocation.

use std::fmt;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Info and above
    Normal,
    /// Debug and above
    Debug,
}

impl Verbosity {
    pub fn from_flag(verbose: bool) -> Self {
        if verbose {
            Self::Debug
        } else {
            Self::Normal
        }
    }

    pub fn level(self) -> LevelFilter {
        match self {
            Self::Normal => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }
}

/// Diagnostic settings for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    pub verbosity: Verbosity,
}

impl Diagnostics {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbosity: Verbosity::from_flag(verbose),
        }
    }

    /// Logger writing to stderr, coloured when stderr is a terminal
    pub fn dispatch(self) -> Dispatch {
        let ansi = std::io::stderr().is_terminal();
        self.build(std::io::stderr, ansi)
    }

    /// Logger writing to an arbitrary sink, never coloured
    pub fn dispatch_with_writer<W>(self, writer: W) -> Dispatch
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.build(writer, false)
    }

    fn build<W>(self, writer: W, ansi: bool) -> Dispatch
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.verbosity.level())
            .with_writer(writer)
            .with_ansi(ansi)
            .event_format(CliFormatter)
            .finish();
        Dispatch::new(subscriber)
    }
}

/// One line per event: `LEVEL message key=value...`
#[derive(Debug, Clone, Copy, Default)]
pub struct CliFormatter;

impl CliFormatter {
    fn label(level: Level) -> &'static str {
        match level {
            Level::ERROR => "ERROR",
            Level::WARN => "WARN ",
            Level::INFO => "INFO ",
            Level::DEBUG => "DEBUG",
            Level::TRACE => "TRACE",
        }
    }

    fn colour(level: Level) -> &'static str {
        match level {
            Level::ERROR => "\x1b[31m",
            Level::WARN => "\x1b[33m",
            Level::INFO => "\x1b[36m",
            Level::DEBUG | Level::TRACE => "\x1b[37m",
        }
    }
}

impl<S, N> FormatEvent<S, N> for CliFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            write!(writer, "{}{}\x1b[0m ", Self::colour(level), Self::label(level))?;
        } else {
            write!(writer, "{} ", Self::label(level))?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
