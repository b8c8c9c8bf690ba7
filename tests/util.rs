//! Shared test utilities for integration tests
//!
//! Provides the docs-site route fixture used across test files.

#![allow(dead_code)]

use assert_fs::prelude::*;

/// Route files of a small docs site, including index routes, a pathless
/// layout, a dynamic segment and a non-page file.
pub const DOCS_ROUTES: &[&str] = &[
    "_index.tsx",
    "_marketing.pricing.tsx",
    "components._index.tsx",
    "components.button.tsx",
    "components.input.tsx",
    "components.preview.checkbox.tsx",
    "orgs.$orgId.members.tsx",
    "README.md",
];

/// Create a project root with `app/routes` populated from `files`.
pub fn make_site(files: &[&str]) -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    // The directory must exist even when no files are given
    tmp.child("app/routes")
        .create_dir_all()
        .expect("routes dir");

    for f in files
    {
        tmp.child(format!("app/routes/{f}"))
            .write_str("export default function Page() { return null; }\n")
            .expect("write route");
    }

    tmp
}
