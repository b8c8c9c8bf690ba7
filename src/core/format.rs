//! Filepath: src/core/format.rs
//! Render route segments as example paths (`/foo/{bar}`) or router
//! patterns (`/foo/:bar`). Both share one normalization pipeline and differ
//! only in how a dynamic segment is spelled.

use super::segments::Segment;

/// Concrete example path, e.g. `["foo", "$bar", "baz"]` → `/foo/{bar}/baz`.
pub fn format_path<S: AsRef<str>>(segments: &[S]) -> String
{
    render(segments, |name| format!("{{{name}}}"))
}

/// Router pattern, e.g. `["foo", "$bar", "baz"]` → `/foo/:bar/baz`.
pub fn format_pattern<S: AsRef<str>>(segments: &[S]) -> String
{
    render(segments, |name| format!(":{name}"))
}

/// Trim and drop empty segments, spell dynamic ones with `dynamic`, join
/// with `/`, and normalize to exactly one leading and no trailing slash.
fn render<S, F>(
    segments: &[S],
    dynamic: F,
) -> String
where
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    let body = segments
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(|s| match Segment::classify(s)
        {
            Segment::Dynamic(name) => dynamic(name),
            Segment::Static(text) => text.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("/{}", trim_slashes(&body))
}

/// Remove every leading and trailing `/`.
///
/// `"/////foo/bar//"` → `"foo/bar"`
pub(crate) fn trim_slashes(value: &str) -> &str
{
    value.trim_matches('/')
}
