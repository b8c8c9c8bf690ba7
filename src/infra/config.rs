use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{AppContext, InitArgs};
use crate::core::manifest::Target;
use crate::infra::walk::{DiscoveryError, RouteWalker};

/// Config file names, in priority order; the first one found wins.
pub const CONFIG_FILES: [&str; 4] = [
    "gen-docs-routes.toml",
    "gen-docs-routes.yaml",
    "gen-docs-routes.json",
    ".gen-docs-routes.toml",
];

/// Environment prefix; nested keys use `__` (e.g. `GEN_DOCS_ROUTES_ROUTES_DIR`).
pub const ENV_PREFIX: &str = "GEN_DOCS_ROUTES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Directory holding the route files
    pub routes_dir: PathBuf,

    /// Generated manifest location
    pub output: PathBuf,

    /// Language of the generated manifest
    pub target: Target,

    /// Page file extensions (without the dot)
    pub extensions: Vec<String>,

    /// Extra ignore globs, relative to `routes_dir`
    pub ignore_patterns: Vec<String>,

    /// Pick up dot-files as routes
    pub include_hidden: bool,

    /// Honor .gitignore and friends while walking
    pub respect_gitignore: bool,

    /// Directory depth limit below `routes_dir`; unbounded when unset
    pub max_depth: Option<usize>,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            routes_dir: PathBuf::from("app/routes"),
            output: PathBuf::from("app/types/routes.ts"),
            target: Target::TypeScript,
            extensions: vec!["tsx".to_string()],
            ignore_patterns: Vec::new(),
            include_hidden: false,
            respect_gitignore: true,
            max_depth: None,
        }
    }
}

impl Config
{
    /// Apply command-line overrides. Extensions replace the configured list
    /// when given; ignore globs are added to it.
    pub fn with_overrides(
        mut self,
        routes_dir: Option<PathBuf>,
        extensions: &[String],
        ignore: &[String],
    ) -> Self
    {
        if let Some(dir) = routes_dir
        {
            self.routes_dir = dir;
        }
        if !extensions.is_empty()
        {
            self.extensions = extensions.to_vec();
        }
        self.ignore_patterns
            .extend(ignore.iter().cloned());
        self
    }

    /// Route file walker for these settings.
    pub fn walker(&self) -> Result<RouteWalker, DiscoveryError>
    {
        Ok(RouteWalker::new(&self.extensions, &self.ignore_patterns)?
            .with_include_hidden(self.include_hidden)
            .with_respect_gitignore(self.respect_gitignore)
            .with_max_depth(self.max_depth))
    }

    /// Expand `~` and `$VAR` in the configured paths.
    pub fn expand_paths(mut self) -> Result<Self>
    {
        self.routes_dir = expand_path(&self.routes_dir)?;
        self.output = expand_path(&self.output)?;
        Ok(self)
    }
}

fn expand_path(path: &Path) -> Result<PathBuf>
{
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path {}", path.display()))?;

    Ok(PathBuf::from(expanded.into_owned()))
}

/// Environment source with the crate prefix and list-valued keys.
pub fn environment() -> config::Environment
{
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("extensions")
        .with_list_parse_key("ignore_patterns")
}

/// Load configuration from the current directory and the environment.
pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."), environment())
}

/// Load configuration from the first config file found in `dir`, overlaid
/// with `env`. Missing keys fall back to [`Config::default`].
pub fn load_config_from(
    dir: &Path,
    env: config::Environment,
) -> Result<Config>
{
    let mut builder = config::Config::builder();

    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    builder = builder.add_source(env);

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    parsed.expand_paths()
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("Would create config file at {}", config_path.display());
            print!("{toml_string}");
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use tempfile::TempDir;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> config::Environment
    {
        let map: config::Map<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_defaults_without_file() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let cfg = load_config_from(tmp.path(), env_from(&[]))?;
        assert_eq!(cfg, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()>
    {
        let tmp = TempDir::new()?;
        std::fs::write(
            tmp.path().join("gen-docs-routes.toml"),
            "routes_dir = \"site/routes\"\ntarget = \"rust\"\n",
        )?;

        let cfg = load_config_from(tmp.path(), env_from(&[]))?;
        assert_eq!(cfg.routes_dir, PathBuf::from("site/routes"));
        assert_eq!(cfg.target, Target::Rust);
        assert_eq!(cfg.extensions, vec!["tsx".to_string()]);
        assert!(cfg.respect_gitignore);
        Ok(())
    }

    #[test]
    fn test_environment_overrides_file() -> Result<()>
    {
        let tmp = TempDir::new()?;
        std::fs::write(tmp.path().join("gen-docs-routes.toml"), "output = \"a.ts\"\n")?;

        let cfg = load_config_from(
            tmp.path(),
            env_from(&[
                ("GEN_DOCS_ROUTES_OUTPUT", "b.ts"),
                ("GEN_DOCS_ROUTES_EXTENSIONS", "tsx,mdx"),
            ]),
        )?;
        assert_eq!(cfg.output, PathBuf::from("b.ts"));
        assert_eq!(cfg.extensions, vec!["tsx".to_string(), "mdx".to_string()]);
        Ok(())
    }

    #[test]
    fn test_max_depth_reaches_walker() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let routes = tmp.path().join("routes");
        std::fs::create_dir_all(routes.join("nested"))?;
        std::fs::write(routes.join("docs.tsx"), "")?;
        std::fs::write(routes.join("nested/deep.tsx"), "")?;

        let cfg = load_config_from(tmp.path(), env_from(&[("GEN_DOCS_ROUTES_MAX_DEPTH", "1")]))?;
        assert_eq!(cfg.max_depth, Some(1));

        let cfg = Config { routes_dir: routes.clone(), ..cfg };
        let files = cfg.walker()?.walk_files(&routes)?;
        assert_eq!(files, vec![routes.join("docs.tsx")]);
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error() -> Result<()>
    {
        let tmp = TempDir::new()?;
        std::fs::write(tmp.path().join("gen-docs-routes.toml"), "routes_dir = [\n")?;

        assert!(load_config_from(tmp.path(), env_from(&[])).is_err());
        Ok(())
    }

    #[test]
    fn test_cli_overrides()
    {
        let base = Config {
            ignore_patterns: vec!["**/*.test.tsx".to_string()],
            ..Config::default()
        };

        let cfg = base.clone().with_overrides(None, &[], &[]);
        assert_eq!(cfg, base);

        let cfg = base.with_overrides(
            Some(PathBuf::from("docs/routes")),
            &["mdx".to_string()],
            &["drafts/**".to_string()],
        );
        assert_eq!(cfg.routes_dir, PathBuf::from("docs/routes"));
        assert_eq!(cfg.extensions, vec!["mdx".to_string()]);
        assert_eq!(
            cfg.ignore_patterns,
            vec!["**/*.test.tsx".to_string(), "drafts/**".to_string()]
        );
    }

    #[test]
    fn test_default_round_trips_through_toml() -> Result<()>
    {
        let text = toml::to_string_pretty(&Config::default())?;
        let back: Config = toml::from_str(&text)?;
        assert_eq!(back, Config::default());
        Ok(())
    }
}
