//! Filepath: src/core/routes.rs
//! Route set derivation: discovered files → sorted, unique paths and
//! patterns. The root route `/` is always part of the result, even for an
//! empty routes directory.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument, trace};

use super::format::{format_path, format_pattern};
use super::segments::parse_segments;
use crate::infra::walk::{DiscoveryError, RouteWalker};

/// Path and pattern of the root route.
pub const ROOT: &str = "/";

/// Sorted, deduplicated route paths and route patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSet
{
    pub paths: Vec<String>,
    pub patterns: Vec<String>,
}

/// What one route file contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry
{
    pub file: PathBuf,
    pub segments: Vec<String>,
    pub path: String,
    pub pattern: String,
}

impl RouteEntry
{
    /// Derive the entry for a route file name (`orgs.$orgId.tsx`); the
    /// extension is stripped here.
    pub fn from_file(file: &Path) -> Self
    {
        let segments = parse_segments(route_name(file));
        Self {
            file: file.to_path_buf(),
            path: format_path(&segments),
            pattern: format_pattern(&segments),
            segments,
        }
    }
}

/// Basename without its extension, trimmed.
fn route_name(file: &Path) -> &str
{
    file.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .trim()
}

/// Accumulates unique paths and patterns, seeded with the root route.
#[derive(Debug)]
struct RouteAccumulator
{
    paths: BTreeSet<String>,
    patterns: BTreeSet<String>,
}

impl RouteAccumulator
{
    fn seeded() -> Self
    {
        Self {
            paths: BTreeSet::from([ROOT.to_string()]),
            patterns: BTreeSet::from([ROOT.to_string()]),
        }
    }

    fn insert(
        &mut self,
        entry: RouteEntry,
    )
    {
        trace!(file = %entry.file.display(), path = %entry.path, pattern = %entry.pattern, "route");
        self.paths.insert(entry.path);
        self.patterns.insert(entry.pattern);
    }

    fn finish(self) -> RouteSet
    {
        RouteSet {
            paths: self.paths.into_iter().collect(),
            patterns: self.patterns.into_iter().collect(),
        }
    }
}

/// Derive the route set from bare file names, without touching the
/// filesystem.
pub fn route_set_from_filenames<I, P>(files: I) -> RouteSet
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut acc = RouteAccumulator::seeded();
    for file in files
    {
        acc.insert(RouteEntry::from_file(file.as_ref()));
    }
    acc.finish()
}

/// Per-file entries for every route file under `root`, in path order.
#[instrument(skip(walker))]
pub fn collect_route_entries(
    root: &Path,
    walker: &RouteWalker,
) -> Result<Vec<RouteEntry>, DiscoveryError>
{
    let files = walker.walk_files(root)?;

    Ok(files
        .iter()
        .map(|f| RouteEntry::from_file(f))
        .collect())
}

/// Walk `root` and derive its sorted, unique route paths and patterns.
/// Fails only if discovery fails; odd file names degrade to `/`.
#[instrument(skip(walker))]
pub fn process_routes(
    root: &Path,
    walker: &RouteWalker,
) -> Result<RouteSet, DiscoveryError>
{
    let files = walker.walk_files(root)?;
    let routes = route_set_from_filenames(&files);

    debug!(
        files = files.len(),
        paths = routes.paths.len(),
        patterns = routes.patterns.len(),
        "processed routes"
    );

    Ok(routes)
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use anyhow::Result;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_components_and_index_routes()
    {
        let routes = route_set_from_filenames([
            "components.button.tsx",
            "components._index.tsx",
            "_index.tsx",
        ]);

        assert_eq!(routes.paths, vec!["/", "/components", "/components/button"]);
        assert_eq!(routes.patterns, routes.paths);
    }

    #[test]
    fn test_dynamic_segment_file()
    {
        let routes = route_set_from_filenames(["orgs.$orgId.members.tsx"]);

        assert_eq!(routes.paths, vec!["/", "/orgs/{orgId}/members"]);
        assert_eq!(routes.patterns, vec!["/", "/orgs/:orgId/members"]);
    }

    #[test]
    fn test_root_always_present()
    {
        let none: [&str; 0] = [];
        let routes = route_set_from_filenames(none);
        assert_eq!(routes.paths, vec!["/"]);
        assert_eq!(routes.patterns, vec!["/"]);
    }

    #[test]
    fn test_duplicates_collapse()
    {
        let routes = route_set_from_filenames([
            "docs.tsx",
            "docs._index.tsx",
            "_shell.docs.tsx",
            "nested/dir/docs.tsx",
        ]);
        assert_eq!(routes.paths, vec!["/", "/docs"]);
    }

    #[test]
    fn test_only_last_extension_is_stripped()
    {
        let entry = RouteEntry::from_file(Path::new("routes/blog.$slug.edit.tsx"));
        assert_eq!(entry.segments, vec!["blog", "$slug", "edit"]);
        assert_eq!(entry.path, "/blog/{slug}/edit");
        assert_eq!(entry.pattern, "/blog/:slug/edit");
    }

    #[test]
    fn test_patterns_dedupe_independently()
    {
        // same pattern shape is the same string only when names match
        let routes = route_set_from_filenames(["a.$x.tsx", "a.$y.tsx"]);
        assert_eq!(routes.patterns, vec!["/", "/a/:x", "/a/:y"]);
    }

    #[test]
    fn test_process_routes_on_disk() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        for name in ["_index.tsx", "components.input.tsx", "components.preview.checkbox.tsx", "notes.md"]
        {
            fs::write(root.join(name), "")?;
        }

        let walker = RouteWalker::new(&["tsx"], &[])?;
        let routes = process_routes(root, &walker)?;

        assert_eq!(
            routes.paths,
            vec!["/", "/components/input", "/components/preview/checkbox"]
        );

        let entries = collect_route_entries(root, &walker)?;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].path, "/");
        Ok(())
    }

    #[test]
    fn test_process_routes_missing_root() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let walker = RouteWalker::new(&["tsx"], &[])?;
        assert!(process_routes(&tmp.path().join("missing"), &walker).is_err());
        Ok(())
    }
}
