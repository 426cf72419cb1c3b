use once_cell::sync::Lazy;
use regex::Regex;

/// Shown when a record has no usable author list.
pub const MISSING_AUTHOR: &str = "Unknown Author";

/// More surnames than this collapse to `<first> et al.`
const MAX_LISTED: usize = 3;

static AND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+and\s+").unwrap());

/// Abbreviate an `and`-joined author list to surnames.
///
/// `Last, First` names take the part before the comma, `First Last` names the final word.
pub fn format_authors(authors: Option<&str>) -> String {
    let surnames: Vec<&str> = authors
        .map(|a| AND_RE.split(a.trim()).filter_map(surname).collect())
        .unwrap_or_default();

    match surnames.as_slice() {
        [] => MISSING_AUTHOR.to_string(),
        [first, ..] if surnames.len() > MAX_LISTED => format!("{first} et al."),
        _ => surnames.join(", "),
    }
}

fn surname(author: &str) -> Option<&str> {
    let author = author.trim();
    let last = match author.split_once(',') {
        Some((family, _)) => family.trim(),
        None => author.split_whitespace().last().unwrap_or(""),
    };
    if last.is_empty() { None } else { Some(last) }
}
