use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{item::Year, parser::Retention, resolver::DEFAULT_YEAR};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the entries of a bibliography file as HTML publication items, newest first
    Render {
        /// BibTeX/BibLaTeX source file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Also write the HTML to this file, replacing its contents
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Which records to keep
        #[arg(long, value_enum, default_value_t = Retention::Lenient)]
        retention: Retention,
        /// Year for records that carry no date, year, or year-like citation key
        #[arg(long, value_name = "YYYY", default_value_t = DEFAULT_YEAR)]
        default_year: Year,
    },
}
