use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    item::{Year, YearSource},
    parser::field,
};

/// The survey year, used when a record carries no usable year at all.
pub const DEFAULT_YEAR: Year = Year::new(2024);

type YearFn = fn(&str) -> Option<Year>;

/// List of year sources to try on a record.
///
/// NOTE: Ordering is important here, as it signifies priority. The first source that yields a
/// year wins.
static RESOLVERS: &[(YearSource, YearFn)] = &[
    (YearSource::DateField, from_date_field),
    (YearSource::YearField, from_year_field),
    (YearSource::DateScan, from_date_scan),
    (YearSource::CitationKey, from_citation_key),
];

static FOUR_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").unwrap());
static DATE_ASSIGN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)date\s*=\s*\{([^}]*)").unwrap());
// Exactly four digits, preferring a `_YYYY` suffix over a run anywhere else in the key.
static KEY_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([0-9]{4})(?:[^0-9]|$)").unwrap());
static KEY_ANY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9])([0-9]{4})(?:[^0-9]|$)").unwrap());

/// Resolve the year of a record and report where it came from.
pub fn resolve(record: &str, default: Year) -> (Year, YearSource) {
    RESOLVERS
        .iter()
        .find_map(|(source, f)| f(record).map(|year| (year, *source)))
        .unwrap_or((default, YearSource::Default))
}

fn first_year(s: &str) -> Option<Year> {
    FOUR_DIGITS_RE.find(s).and_then(|m| Year::parse(m.as_str()))
}

fn from_date_field(record: &str) -> Option<Year> {
    // The field scanner only accepts a name that starts a field, so `urldate` is never taken
    // for `date` here.
    field::raw(record, "date").and_then(first_year)
}

fn from_year_field(record: &str) -> Option<Year> {
    field::raw(record, "year").and_then(first_year)
}

/// Looser pass over every `...date = {` in the record, up to the first closing brace.
///
/// Catches values the balanced scanner gives up on (an unterminated brace) and prefixed date
/// fields such as `eventdate`, but never `urldate`.
fn from_date_scan(record: &str) -> Option<Year> {
    DATE_ASSIGN_RE.captures_iter(record).find_map(|caps| {
        let whole = caps.get(0)?;
        let start = whole.start();
        if record
            .get(start.saturating_sub(3)..start)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("url"))
        {
            return None;
        }
        first_year(caps.get(1)?.as_str())
    })
}

fn from_citation_key(record: &str) -> Option<Year> {
    let key = field::key(record)?;
    KEY_SUFFIX_RE
        .captures(&key)
        .or_else(|| KEY_ANY_RE.captures(&key))
        .and_then(|caps| Year::parse(caps.get(1)?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_of(record: &str) -> (String, YearSource) {
        let (year, source) = resolve(record, DEFAULT_YEAR);
        (year.to_string(), source)
    }

    #[test]
    fn date_field_wins_over_year_field() {
        let rec = "@article{k_2019,\n  year = {2021},\n  date = {2023-02-14},\n}";
        assert_eq!(year_of(rec), ("2023".into(), YearSource::DateField));
    }

    #[test]
    fn year_field_used_without_date() {
        let rec = "@article{k,\n  urldate = {2025-01-01},\n  year = {2022},\n}";
        assert_eq!(year_of(rec), ("2022".into(), YearSource::YearField));
    }

    #[test]
    fn urldate_alone_never_supplies_the_year() {
        let rec = "@online{lou_2023,\n  urldate = {2025-01-01},\n}";
        assert_eq!(year_of(rec), ("2023".into(), YearSource::CitationKey));

        let rec = "@online{nokey,\n  URLDATE = {2025-01-01},\n}";
        assert_eq!(year_of(rec), ("2024".into(), YearSource::Default));
    }

    #[test]
    fn date_scan_recovers_unterminated_and_prefixed_dates() {
        let rec = "@misc{k,\n  date = {2020-05-01\n";
        assert_eq!(year_of(rec), ("2020".into(), YearSource::DateScan));

        let rec = "@misc{k,\n  urldate = {2025-01-01},\n  eventdate = {2018},\n}";
        assert_eq!(year_of(rec), ("2018".into(), YearSource::DateScan));
    }

    #[test]
    fn date_scan_handles_multibyte_text_before_the_name() {
        let rec = "@misc{k,\n  \u{e9}\u{e9}date = {2016}\n";
        assert_eq!(year_of(rec), ("2016".into(), YearSource::DateScan));
    }

    #[test]
    fn nested_marker_does_not_lend_its_key_year() {
        let rec = "@misc{{,\n note = {see @article{foo_1999, for details},\n}";
        assert_eq!(year_of(rec), ("2024".into(), YearSource::Default));
    }

    #[test]
    fn date_without_digits_falls_through() {
        let rec = "@misc{zhao_2021,\n  date = {forthcoming},\n  year = {n.d.},\n}";
        assert_eq!(year_of(rec), ("2021".into(), YearSource::CitationKey));
    }

    #[test]
    fn key_suffix_preferred_over_other_runs() {
        let rec = "@misc{gpt4o2024_2025,\n  title = {t},\n}";
        assert_eq!(year_of(rec), ("2025".into(), YearSource::CitationKey));

        let rec = "@misc{vaswani2017attention,\n}";
        assert_eq!(year_of(rec), ("2017".into(), YearSource::CitationKey));

        // longer digit runs are not years
        let rec = "@misc{arxiv250209992,\n}";
        assert_eq!(year_of(rec), ("2024".into(), YearSource::Default));
    }

    #[test]
    fn custom_default_is_used() {
        let (year, source) = resolve("@misc{none,\n}", Year::new(1999));
        assert_eq!(year, Year::new(1999));
        assert_eq!(source, YearSource::Default);
    }

    #[test]
    fn resolves_any_iso_date() {
        proptest::proptest!(|(y in 1000u16..=9999, m in 1u8..=12, d in 1u8..=28, url_y in 1000u16..=9999)| {
            let rec = format!(
                "@misc{{k,\n  urldate = {{{url_y}-01-01}},\n  date = {{{y}-{m:02}-{d:02}}},\n}}"
            );
            let (year, source) = resolve(&rec, DEFAULT_YEAR);
            proptest::prop_assert_eq!(year, Year::new(y));
            proptest::prop_assert_eq!(source, YearSource::DateField);
        })
    }
}
