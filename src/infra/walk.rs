//! Filepath: src/infra/walk.rs
//! Route file discovery.
//! - Only files with a configured page extension (default `tsx`)
//! - Respects .gitignore, .git/info/exclude, and global gitignore (opt-out)
//! - Extra ignore globs (early prune + late filter)
//! - Hidden files skipped unless asked for
//! - Deterministic ordering for stable output
//!
//! Backed by ripgrep's `ignore` crate and `globset`.
//!
//! Unlike a best-effort tree listing, a generation run must not succeed on a
//! partial view of the routes directory: every traversal error is fatal.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder, types::TypesBuilder};
use tracing::{debug, instrument};

/// File type name registered with the `ignore` type matcher.
const PAGE_TYPE: &str = "page";

/// Discovery failures. Any of these aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError
{
    #[error("routes directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("routes path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot read routes directory {}", .path.display())]
    Io
    {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no page extensions configured")]
    NoExtensions,

    #[error("invalid ignore glob")]
    Glob(#[from] globset::Error),

    #[error("failed to traverse routes directory")]
    Walk(#[from] ignore::Error),
}

/// Walker over page files with optional extra ignore globs.
/// Extra globs are applied in two places:
///   1) Early: prune directories during traversal (filter_entry).
///   2) Late: filter out files that still slipped through.
#[derive(Debug, Clone)]
pub struct RouteWalker
{
    /// Compiled set of additional ignore patterns
    ignore_patterns: GlobSet,

    /// Page extensions without the leading dot
    extensions: Vec<String>,

    /// Include hidden (dot) files; default false
    include_hidden: bool,

    /// Honor .gitignore and friends; default true
    respect_gitignore: bool,

    /// Maximum recursion depth; default None (unbounded)
    max_depth: Option<usize>,
}

impl RouteWalker
{
    /// Build a walker for the given page extensions (`"tsx"` or `".tsx"`)
    /// and additional ignore patterns (e.g. `"**/*.test.tsx"`).
    pub fn new<E: AsRef<str>>(
        extensions: &[E],
        additional_ignores: &[String],
    ) -> Result<Self, DiscoveryError>
    {
        let extensions: Vec<String> = extensions
            .iter()
            .map(|e| {
                e.as_ref()
                    .trim()
                    .trim_start_matches('.')
                    .to_owned()
            })
            .filter(|e| !e.is_empty())
            .collect();

        if extensions.is_empty()
        {
            return Err(DiscoveryError::NoExtensions);
        }

        let mut builder = GlobSetBuilder::new();

        for pattern in additional_ignores
        {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Self {
            ignore_patterns: builder.build()?,
            extensions,
            include_hidden: false,
            respect_gitignore: true,
            max_depth: None,
        })
    }

    /// (Optional) Include or exclude hidden files (dotfiles).
    pub fn with_include_hidden(
        mut self,
        include_hidden: bool,
    ) -> Self
    {
        self.include_hidden = include_hidden;
        self
    }

    /// (Optional) Honor or bypass ignore files.
    pub fn with_respect_gitignore(
        mut self,
        respect: bool,
    ) -> Self
    {
        self.respect_gitignore = respect;
        self
    }

    /// (Optional) Limit recursion depth (`None` = unbounded).
    pub fn with_max_depth(
        mut self,
        depth: Option<usize>,
    ) -> Self
    {
        self.max_depth = depth;
        self
    }

    /// Internal: construct a configured WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Path,
    ) -> Result<WalkBuilder, DiscoveryError>
    {
        let mut b = WalkBuilder::new(root);

        // WalkBuilder::hidden(true) => *skip* dotfiles
        b.hidden(!self.include_hidden);

        b.ignore(self.respect_gitignore);
        b.parents(self.respect_gitignore);
        b.git_ignore(self.respect_gitignore);
        b.git_global(self.respect_gitignore);
        b.git_exclude(self.respect_gitignore);

        b.follow_links(false);
        b.max_depth(self.max_depth);

        // Early directory pruning using extra ignores.
        let extra = self
            .ignore_patterns
            .clone();
        let prune_root = root.to_path_buf();
        b.filter_entry(move |ent: &DirEntry| {
            let is_dir = ent
                .file_type()
                .is_some_and(|ft| ft.is_dir());

            if !is_dir
            {
                return true;
            }

            let rel = ent
                .path()
                .strip_prefix(&prune_root)
                .unwrap_or(ent.path());
            !(extra.is_match(rel) || extra.is_match(ent.path()))
        });

        // Page type filter; directories are never filtered by type.
        let mut tb = TypesBuilder::new();
        for ext in &self.extensions
        {
            tb.add(PAGE_TYPE, &format!("*.{ext}"))?;
        }
        tb.select(PAGE_TYPE);
        b.types(tb.build()?);

        Ok(b)
    }

    /// Traverse page files under `root`.
    /// Returns a **sorted** list of file paths for determinism.
    #[instrument(skip(self), fields(extensions = ?self.extensions))]
    pub fn walk_files<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        root: P,
    ) -> Result<Vec<PathBuf>, DiscoveryError>
    {
        let root_path = root.as_ref();
        ensure_directory(root_path)?;

        let mut out = Vec::new();

        for result in self
            .build_walk(root_path)?
            .build()
        {
            let entry = result?;

            if !entry
                .file_type()
                .is_some_and(|ft| ft.is_file())
            {
                continue;
            }

            let abs = entry.into_path();
            let rel = abs
                .strip_prefix(root_path)
                .unwrap_or(&abs);

            if self
                .ignore_patterns
                .is_match(rel)
            {
                debug!(path = %rel.display(), "skipped by ignore glob");
                continue;
            }

            out.push(abs);
        }

        out.sort();
        debug!(count = out.len(), "discovered route files");

        Ok(out)
    }
}

/// Fail fast unless `root` is an existing, readable directory.
fn ensure_directory(root: &Path) -> Result<(), DiscoveryError>
{
    match fs::metadata(root)
    {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DiscoveryError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound =>
        {
            Err(DiscoveryError::RootNotFound(root.to_path_buf()))
        }
        Err(source) => Err(DiscoveryError::Io { path: root.to_path_buf(), source }),
    }
}
