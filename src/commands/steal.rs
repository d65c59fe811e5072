use anyhow::{ensure, Result};
use clap::{value_parser, Arg, ArgMatches};
use std::fmt;
use tracing::{debug, info};

use crate::cli::registry::{CommandSpec, Run};
use crate::config::{Spec, Table};

const DEFAULT_FROM: &str = "root:root@tcp(localhost:3306)/klepto";
const DEFAULT_TO: &str = "os://stdout/";

pub fn command() -> CommandSpec {
    CommandSpec {
        name: "steal",
        about: "Steals and anonymises databases",
        long_about: Some(
            "Steals and anonymises databases.\n\
             Reads the tables described in the configuration from --from and writes \
             them, anonymised, to --to.",
        ),
        example: Some("klepto steal -c .klepto.toml --from root:root@tcp(localhost:3306)/fromDb --to root:root@tcp(localhost:3306)/toDb"),
        args: vec![
            Arg::new("from")
                .short('f')
                .long("from")
                .value_name("DSN")
                .default_value(DEFAULT_FROM)
                .help("Database dsn to steal from"),
            Arg::new("to")
                .short('t')
                .long("to")
                .value_name("DSN")
                .default_value(DEFAULT_TO)
                .help("Database to output to (default writes to stdout)"),
            Arg::new("concurrency")
                .long("concurrency")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("4")
                .help("Number of tables processed concurrently"),
        ],
        run: Run::Configured(handle_steal),
        children: Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StealOptions {
    pub from: String,
    pub to: String,
    pub concurrency: usize,
}

impl StealOptions {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let from = matches.get_one::<String>("from").cloned().unwrap_or_default();
        let to = matches.get_one::<String>("to").cloned().unwrap_or_default();
        let concurrency = matches.get_one::<usize>("concurrency").copied().unwrap_or(1);

        ensure!(!from.trim().is_empty(), "--from must not be empty");
        ensure!(!to.trim().is_empty(), "--to must not be empty");
        ensure!(concurrency > 0, "--concurrency must be at least 1");

        Ok(Self { from, to, concurrency })
    }
}

/// What a steal would do to one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePlan {
    pub name: String,
    pub copy_rows: bool,
    pub condition: Option<String>,
    pub limit: Option<u64>,
    pub sorts: Vec<(String, String)>,
    pub anonymise: Vec<(String, String)>,
    pub depends_on: Vec<String>,
}

impl TablePlan {
    fn new(table: &Table, spec: &Spec) -> Self {
        let filter = &table.filter;
        Self {
            name: table.name.clone(),
            copy_rows: !table.ignore_data,
            condition: filter.condition(&spec.matchers).map(str::to_string),
            limit: (filter.limit > 0).then_some(filter.limit),
            sorts: filter.sorts.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            anonymise: table.anonymise.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            depends_on: table
                .relationships
                .iter()
                .map(|r| format!("{}.{} via {}", r.referenced_table, r.referenced_key, r.foreign_key))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StealPlan {
    pub options: StealOptions,
    pub tables: Vec<TablePlan>,
}

impl StealPlan {
    pub fn build(spec: &Spec, options: StealOptions) -> Self {
        let tables = spec.tables.iter().map(|t| TablePlan::new(t, spec)).collect();
        Self { options, tables }
    }

    pub fn anonymised_columns(&self) -> usize {
        self.tables.iter().map(|t| t.anonymise.len()).sum()
    }
}

impl fmt::Display for StealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Stealing from {} to {} (concurrency {})",
            self.options.from, self.options.to, self.options.concurrency
        )?;

        for table in &self.tables {
            writeln!(f, "{}", table.name)?;
            if !table.copy_rows {
                writeln!(f, "  rows:      skipped (structure only)")?;
                continue;
            }
            writeln!(f, "  rows:      copied")?;
            if let Some(condition) = &table.condition {
                writeln!(f, "  filter:    {condition}")?;
            }
            if let Some(limit) = table.limit {
                writeln!(f, "  limit:     {limit}")?;
            }
            for (column, direction) in &table.sorts {
                writeln!(f, "  sort:      {column} {direction}")?;
            }
            for (column, faker) in &table.anonymise {
                writeln!(f, "  anonymise: {column} ({faker})")?;
            }
            for dependency in &table.depends_on {
                writeln!(f, "  depends:   {dependency}")?;
            }
        }
        Ok(())
    }
}

pub fn handle_steal(spec: &Spec, matches: &ArgMatches) -> Result<()> {
    let options = StealOptions::from_matches(matches)?;
    debug!("Steal options: {options:?}");

    let plan = StealPlan::build(spec, options);
    info!(
        tables = plan.tables.len(),
        anonymised_columns = plan.anonymised_columns(),
        "Planned steal"
    );

    print!("{plan}");
    Ok(())
}
