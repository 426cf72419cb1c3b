use once_cell::sync::Lazy;
use regex::Regex;

static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*@\w+\{\s*([^,\s{}]+)\s*,").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Find the raw value of `name = { ... }` in a record.
///
/// The name is matched case-insensitively and must start a field: only whitespace may separate
/// it from a preceding `,`, `{` or line break. So `title` never picks up `booktitle`, nor a
/// `title = {` written inside another field's value on the same line. Braces inside the value are balanced with a depth counter.
/// Occurrences that are not followed by `=` and `{` are skipped; a value whose closing brace
/// never arrives is treated as absent.
pub fn raw<'a>(record: &'a str, name: &str) -> Option<&'a str> {
    let haystack = record.to_ascii_lowercase();
    let needle = name.to_ascii_lowercase();
    let bytes = record.as_bytes();

    let mut from = 0;
    while let Some(found) = haystack[from..].find(&needle) {
        let at = from + found;
        from = at + needle.len();

        if !starts_field(bytes, at) {
            continue;
        }
        let Some(open) = value_start(bytes, at + needle.len()) else {
            continue;
        };
        return balanced(bytes, open).map(|end| record[open..end].trim());
    }
    None
}

/// After a field name, expect `\s* = \s* {` and return the index right after the brace.
fn value_start(bytes: &[u8], mut i: usize) -> Option<usize> {
    i = skip_ws(bytes, i);
    if bytes.get(i) != Some(&b'=') {
        return None;
    }
    i = skip_ws(bytes, i + 1);
    if bytes.get(i) != Some(&b'{') {
        return None;
    }
    Some(i + 1)
}

/// Index of the brace closing a group opened just before `start`.
fn balanced(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in bytes.iter().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
        i += 1;
    }
    i
}

fn starts_field(bytes: &[u8], at: usize) -> bool {
    let before = bytes[..at]
        .iter()
        .rev()
        .find(|b| !matches!(b, b' ' | b'\t'));
    matches!(before, None | Some(b',' | b'{' | b'\n' | b'\r'))
}

/// Citation key: the text between the record's own `@type{` and the first comma.
pub fn key(record: &str) -> Option<String> {
    KEY_RE
        .captures(record)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn title(record: &str) -> Option<String> {
    raw(record, "title").map(normalize_title).and_then(non_empty)
}

pub fn author(record: &str) -> Option<String> {
    raw(record, "author")
        .map(|a| collapse_whitespace(a).trim().to_string())
        .and_then(non_empty)
}

pub fn url(record: &str) -> Option<String> {
    raw(record, "url").map(|u| u.trim().to_string()).and_then(non_empty)
}

pub fn collapse_whitespace(s: &str) -> String {
    WS_RE.replace_all(s, " ").into_owned()
}

/// Collapse whitespace, unwrap a whole-value brace group, resolve the caret escape and drop
/// any braces left over.
pub fn normalize_title(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw.trim());
    let unwrapped = strip_outer_braces(&collapsed);
    unwrapped
        .replace("\\textasciicircum", "^")
        .chars()
        .filter(|c| !matches!(c, '{' | '}'))
        .collect()
}

/// Remove one pair of braces only when the first brace is closed by the very last character.
///
/// `{Foo} and {Bar}` starts and ends with braces but is left alone.
pub fn strip_outer_braces(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'{' {
        return s;
    }
    match balanced(bytes, 1) {
        Some(end) if end == bytes.len() - 1 => &s[1..end],
        _ => s,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
