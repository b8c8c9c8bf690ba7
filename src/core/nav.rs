//! Filepath: src/core/nav.rs
//! Top-level navigation sections: the first path component of every route.

use std::collections::BTreeSet;

/// Collect `/<first segment>` for each route path (or `/` for the root),
/// deduplicated and sorted ascending.
pub fn extract_top_level_nav<S: AsRef<str>>(paths: &[S]) -> Vec<String>
{
    paths
        .iter()
        .map(|path| {
            let first = path
                .as_ref()
                .split('/')
                .find(|part| !part.is_empty())
                .unwrap_or("");
            format!("/{first}")
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
