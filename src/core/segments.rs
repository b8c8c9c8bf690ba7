//! Filepath: src/core/segments.rs
//! Filename → route segments for flat, dot-delimited route files.
//!
//! `orgs.$orgId._layout.members` becomes `["orgs", "$orgId", "members"]`:
//! - Each `.`-separated part is one token
//! - `_index` marks an index route and contributes nothing
//! - Any other `_`-prefixed token is a pathless layout and contributes nothing
//! - `$name` tokens are dynamic parameters, kept verbatim here

/// Index-route marker; matches its nearest ancestor route.
const INDEX_TOKEN: &str = "_index";

/// Prefix of pathless layout tokens.
const PATHLESS_PREFIX: char = '_';

/// Prefix of dynamic parameter tokens.
const DYNAMIC_PREFIX: char = '$';

/// One classified route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a>
{
    /// Literal path component
    Static(&'a str),

    /// Parameter name (without the `$` marker)
    Dynamic(&'a str),
}

impl<'a> Segment<'a>
{
    /// Classify a surviving token by its leading marker.
    pub fn classify(token: &'a str) -> Self
    {
        match token.strip_prefix(DYNAMIC_PREFIX)
        {
            Some(name) => Segment::Dynamic(name),
            None => Segment::Static(token),
        }
    }
}

/// Split a filename (extension already removed) into its route segments.
/// Never fails: a name made only of ignorable tokens yields an empty list.
pub fn parse_segments(filename: &str) -> Vec<String>
{
    filename
        .trim()
        .split('.')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter(|part| !is_ignored_token(part))
        .map(str::to_owned)
        .collect()
}

/// Tokens that never appear in the URL.
///
/// The `_index` check is subsumed by the prefix check; it is kept so the
/// two conventions stay visible at the call site.
fn is_ignored_token(part: &str) -> bool
{
    part == INDEX_TOKEN || part.starts_with(PATHLESS_PREFIX)
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_plain_segments()
    {
        assert_eq!(parse_segments("components.button"), vec!["components", "button"]);
    }

    #[test]
    fn test_index_is_dropped()
    {
        assert_eq!(parse_segments("foo._index.bar"), vec!["foo", "bar"]);
        assert!(parse_segments("_index").is_empty());
    }

    #[test]
    fn test_pathless_layout_is_dropped()
    {
        assert_eq!(parse_segments("_layout.foo"), vec!["foo"]);
        assert_eq!(parse_segments("docs._shell.$slug"), vec!["docs", "$slug"]);
    }

    #[test]
    fn test_index_like_tokens_without_underscore_are_kept()
    {
        assert_eq!(parse_segments("docs.index"), vec!["docs", "index"]);
    }

    #[test]
    fn test_whitespace_and_empty_parts()
    {
        assert_eq!(parse_segments("  foo .. bar . "), vec!["foo", "bar"]);
        assert!(parse_segments("").is_empty());
        assert!(parse_segments("...").is_empty());
    }

    #[test]
    fn test_dynamic_marker_survives_parsing()
    {
        assert_eq!(parse_segments("orgs.$orgId.members"), vec!["orgs", "$orgId", "members"]);
    }

    #[test]
    fn test_classify()
    {
        assert_eq!(Segment::classify("$id"), Segment::Dynamic("id"));
        assert_eq!(Segment::classify("users"), Segment::Static("users"));
        assert_eq!(Segment::classify("$"), Segment::Dynamic(""));
        assert_eq!(Segment::classify("a$b"), Segment::Static("a$b"));
    }

    proptest! {
        #[test]
        fn prop_no_empty_or_underscore_tokens(name in "[a-z_$ .]{0,40}")
        {
            for seg in parse_segments(&name)
            {
                prop_assert!(!seg.is_empty());
                prop_assert!(!seg.starts_with('_'));
                prop_assert_eq!(seg.trim(), seg.as_str());
            }
        }

        #[test]
        fn prop_order_is_preserved(parts in proptest::collection::vec("[a-z]{1,6}", 0..6))
        {
            let joined = parts.join("._skip.");
            prop_assert_eq!(parse_segments(&joined), parts);
        }
    }
}
