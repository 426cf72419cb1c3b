use std::fmt;

/// A single bibliography record, as extracted from one `@type{...}` fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub key: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Year,
    pub year_source: YearSource,
    pub url: Option<String>,
}

/// A four-digit publication year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(u16);

impl Year {
    pub const fn new(year: u16) -> Self {
        Year(year)
    }

    /// Parse exactly four ASCII digits.
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Year)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl std::str::FromStr for Year {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Year::parse(s.trim()).ok_or_else(|| format!("expected a four-digit year, got '{s}'"))
    }
}

/// Which step of the year precedence chain produced an entry's year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YearSource {
    DateField,
    YearField,
    DateScan,
    CitationKey,
    Default,
}

impl YearSource {
    /// Whether the year was read from a field of the record rather than guessed.
    pub fn is_field(self) -> bool {
        matches!(
            self,
            YearSource::DateField | YearSource::YearField | YearSource::DateScan
        )
    }
}
