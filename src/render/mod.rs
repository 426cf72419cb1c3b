use crate::item::Entry;

pub mod author;

/// Link target for entries without a `url` field.
pub const MISSING_URL: &str = "#";
pub const MISSING_TITLE: &str = "Unknown Title";

/// Order entries newest first. Entries from the same year keep their file order.
pub fn sort_by_year(mut entries: Vec<Entry>) -> Vec<Entry> {
    // `sort_by` is stable
    entries.sort_by(|a, b| b.year.cmp(&a.year));
    entries
}

/// Render all entries as HTML publication items separated by a blank line.
pub fn html(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(item)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn item(entry: &Entry) -> String {
    let url = entry.url.as_deref().unwrap_or(MISSING_URL);
    let title = entry.title.as_deref().unwrap_or(MISSING_TITLE);
    let authors = author::format_authors(entry.author.as_deref());
    let year = entry.year;
    format!(
        r#"<div class="publication-item">
  <span class="publication-title">
    <a href="{url}" target="_blank">{title}</a>
    <a href="{url}" target="_blank" class="link-icon">
      <i class="fas fa-external-link-alt"></i>
    </a>
  </span>
  <span class="publication-authors">{authors}, {year}</span>
</div>"#
    )
}
