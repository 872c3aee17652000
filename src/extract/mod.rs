//! Document text boundary.
//!
//! Parsing binary formats (PDF and friends) happens outside the service; what
//! crosses this boundary is per-page text. [`join_pages`] folds page texts into
//! the single blob the segmenter consumes.

/// Joins per-page text into one document blob, pages separated by a newline.
///
/// A page that is `None` or whitespace-only contributes nothing, including no
/// separator. All-empty input yields the empty string.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut text = String::new();

    for page in pages {
        let Some(page) = page else { continue };
        let page = page.as_ref();
        if page.trim().is_empty() {
            continue;
        }

        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(page);
    }

    text
}
