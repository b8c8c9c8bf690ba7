//! **gen-docs-routes** - Typed route manifests for file-based documentation sites
//!
//! Walks a flat, dot-delimited routes directory (`orgs.$orgId.members.tsx`),
//! derives each file's example path (`/orgs/{orgId}/members`) and router
//! pattern (`/orgs/:orgId/members`), and emits a generated module listing
//! every path, pattern and top-level navigation section.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - filename → segments → paths/patterns → manifest
pub mod core {
    /// Dot-delimited filename parsing (`_index`, pathless and `$dynamic` tokens)
    pub mod segments;
    pub use segments::{Segment, parse_segments};

    /// Route path (`{name}`) and route pattern (`:name`) rendering
    pub mod format;
    pub use format::{format_path, format_pattern};

    /// First-segment navigation sections
    pub mod nav;
    pub use nav::extract_top_level_nav;

    /// Template-driven manifest emission (TypeScript or Rust)
    pub mod manifest;
    pub use manifest::{Manifest, ManifestError, Target, emit_manifest};

    /// Discovery-driven route set derivation, root route always included
    pub mod routes;
    pub use routes::{RouteEntry, RouteSet, collect_route_entries, process_routes, route_set_from_filenames};

    /// `generate` command: write, print, check or watch
    pub mod generate;
    pub use generate::{CheckError, generate_manifest, run as generate_run};

    /// `list` command: per-file table or JSON
    pub mod list;
    pub use list::run as list_run;
}

/// Infrastructure - Configuration, discovery and output
pub mod infra {
    /// Layered configuration (file + environment + CLI)
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Atomic, change-aware manifest writes and staleness checks
    pub mod io;
    pub use io::{CheckOutcome, WriteOutcome, check_up_to_date, write_if_changed};

    /// Gitignore-aware route file discovery
    pub mod walk;
    pub use walk::{DiscoveryError, RouteWalker};
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::{generate_run, list_run};
pub use infra::{Config, RouteWalker, load_config};

// Core types for external consumers
pub use crate::core::{Manifest, RouteSet, Target};
