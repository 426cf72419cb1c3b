use once_cell::sync::Lazy;
use regex::{Matches, Regex};

/// Start of a record: `@type{` at the beginning of a line, indentation allowed.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*@(\w+)\{").unwrap());

/// Lazily yields the raw text of each record in a bibliography source.
///
/// A record runs from its marker up to (not including) the next marker, or to the end of the
/// input for the last one. Text before the first marker is ignored.
pub struct Records<'a> {
    text: &'a str,
    markers: Matches<'static, 'a>,
    start: Option<usize>,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.start.take()?;
        match self.markers.next() {
            Some(m) => {
                self.start = Some(m.start());
                Some(&self.text[start..m.start()])
            }
            None => Some(&self.text[start..]),
        }
    }
}

pub fn records(text: &str) -> Records<'_> {
    let mut markers = MARKER_RE.find_iter(text);
    let start = markers.next().map(|m| m.start());
    Records {
        text,
        markers,
        start,
    }
}

/// The entry type of a record fragment, e.g. `article` for `@article{...`.
pub fn kind(record: &str) -> Option<&str> {
    MARKER_RE
        .captures(record)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
