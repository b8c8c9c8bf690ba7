//! Filepath: src/core/manifest.rs
//! Generated route manifest.
//!
//! Renders the sorted route patterns, route paths and top-level navigation
//! items into a source module: for each list a constant, a type alias, an
//! identity helper and a membership predicate. Output is byte-stable for a
//! given input (no timestamps, LF endings, trailing newline) so the
//! generated file diffs cleanly under version control.

use minijinja::{AutoEscape, Environment, context};
use serde::{Deserialize, Serialize};

use super::nav::extract_top_level_nav;
use super::routes::RouteSet;

/// Name written into the generated header.
pub const GENERATOR: &str = env!("CARGO_PKG_NAME");

const TS_TEMPLATE: &str = include_str!("../../templates/routes.ts.jinja");
const RUST_TEMPLATE: &str = include_str!("../../templates/routes.rs.jinja");

/// Output language of the manifest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Target
{
    /// `as const` arrays with union types and type guards
    #[default]
    #[serde(alias = "ts")]
    #[value(name = "typescript", alias = "ts")]
    TypeScript,

    /// `&[&str]` constants with `binary_search` predicates
    #[serde(alias = "rs")]
    #[value(alias = "rs")]
    Rust,
}

impl Target
{
    fn template_name(self) -> &'static str
    {
        match self
        {
            Target::TypeScript => "routes.ts",
            Target::Rust => "routes.rs",
        }
    }

    /// Quote `value` as a string literal of the target language.
    fn literal(
        self,
        value: &str,
    ) -> Result<String, ManifestError>
    {
        match self
        {
            Target::TypeScript => Ok(serde_json::to_string(value)?),
            Target::Rust => Ok(format!("{value:?}")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError
{
    #[error("failed to render route manifest")]
    Render(#[from] minijinja::Error),

    #[error("failed to quote route string")]
    Literal(#[from] serde_json::Error),
}

/// The three route lists that make up a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest
{
    pub paths: Vec<String>,
    pub patterns: Vec<String>,
    pub nav_items: Vec<String>,
}

impl Manifest
{
    /// Build a manifest from sorted, unique paths and patterns, deriving the
    /// navigation sections from the paths.
    pub fn new(
        paths: Vec<String>,
        patterns: Vec<String>,
    ) -> Self
    {
        let nav_items = extract_top_level_nav(&paths);
        Self { paths, patterns, nav_items }
    }

    pub fn from_route_set(routes: &RouteSet) -> Self
    {
        Self::new(routes.paths.clone(), routes.patterns.clone())
    }

    pub fn render(
        &self,
        target: Target,
    ) -> Result<String, ManifestError>
    {
        emit_manifest(&self.paths, &self.patterns, &self.nav_items, target)
    }
}

/// Render the manifest text for `target`. Pure; writing is the caller's job.
pub fn emit_manifest<S: AsRef<str>>(
    paths: &[S],
    patterns: &[S],
    nav_items: &[S],
    target: Target,
) -> Result<String, ManifestError>
{
    let quote = |values: &[S]| -> Result<Vec<String>, ManifestError> {
        values
            .iter()
            .map(|v| target.literal(v.as_ref()))
            .collect()
    };

    let env = environment()?;
    let template = env.get_template(target.template_name())?;

    let rendered = template.render(context! {
        generator => GENERATOR,
        patterns => quote(patterns)?,
        routes => quote(paths)?,
        nav_items => quote(nav_items)?,
    })?;

    Ok(rendered)
}

fn environment() -> Result<Environment<'static>, ManifestError>
{
    let mut env = Environment::new();

    // Values are pre-quoted literals; block tags sit on their own lines.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);

    env.add_template("routes.ts", TS_TEMPLATE)?;
    env.add_template("routes.rs", RUST_TEMPLATE)?;

    Ok(env)
}
