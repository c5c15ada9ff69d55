//! Turning video titles into file names

/// Longest sanitized title kept before the truncation marker is appended.
pub const MAX_TITLE_CHARS: usize = 127;

const TRUNCATION_MARKER: &str = "...";

/// Characters removed outright (not replaced) from titles.
const STRIPPED_CHARS: [char; 13] = [
    '<', '>', ':', '"', '/', '\\', '|', '?', '*', '\n', '#', '~', '\u{00B7}',
];

/// Clean a title for use as a file name stem.
///
/// Strips filesystem-hostile characters, collapses whitespace runs into single
/// spaces, trims, and cuts anything over [`MAX_TITLE_CHARS`] characters, marking
/// the cut with `...`. Applying it twice gives the same result as applying it once.
pub fn sanitize_title(title: &str) -> String {
    let stripped: String = title
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > MAX_TITLE_CHARS {
        let head: String = collapsed.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}{}", head, TRUNCATION_MARKER)
    } else {
        collapsed
    }
}
