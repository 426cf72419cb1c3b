use clap::ValueEnum;

use crate::{
    item::{Entry, Year},
    resolver,
};

pub mod field;
pub mod record;

/// Decides which extracted records make it into the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Retention {
    /// Keep a record if any field could be read from it.
    #[default]
    Lenient,
    /// Keep a record only if it has both a title and an author.
    Strict,
}

#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub retention: Retention,
    pub default_year: Year,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            retention: Retention::default(),
            default_year: resolver::DEFAULT_YEAR,
        }
    }
}

/// Entry types that carry no bibliographic data.
const SKIPPED_KINDS: &[&str] = &["comment", "string", "preamble"];

/// Extract every retained entry from a bibliography source, in file order.
pub fn parse(text: &str, options: &Options) -> Vec<Entry> {
    record::records(text)
        .filter(|rec| {
            record::kind(rec)
                .is_none_or(|kind| !SKIPPED_KINDS.iter().any(|s| kind.eq_ignore_ascii_case(s)))
        })
        .map(|rec| parse_entry(rec, options.default_year))
        .filter(|entry| retained(entry, options.retention))
        .collect()
}

pub fn parse_entry(record: &str, default_year: Year) -> Entry {
    let (year, year_source) = resolver::resolve(record, default_year);
    Entry {
        key: field::key(record),
        title: field::title(record),
        author: field::author(record),
        year,
        year_source,
        url: field::url(record),
    }
}

fn retained(entry: &Entry, retention: Retention) -> bool {
    match retention {
        Retention::Lenient => {
            entry.key.is_some()
                || entry.title.is_some()
                || entry.author.is_some()
                || entry.url.is_some()
                || entry.year_source.is_field()
        }
        Retention::Strict => entry.title.is_some() && entry.author.is_some(),
    }
}
