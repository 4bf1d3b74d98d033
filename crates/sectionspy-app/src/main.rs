//! sectionspy headless driver.
//!
//! Loads a page description, replays a scripted UI session against it and
//! prints the navigation state after every step.
//!
//! Usage: `sectionspy-app [PAGE.toml] [SCRIPT.toml] [--config SPY.toml]`.
//! Without arguments the built-in portfolio page and tour run. Set
//! `SECTIONSPY_STORE` to a JSON file to keep the theme choice between runs
//! and `SECTIONSPY_COLOR_SCHEME=dark` to report a dark preference.

mod render;
mod script;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use sectionspy_core::config::SpyConfig;
use sectionspy_core::input::UiEvent;
use sectionspy_core::{Page, Site};
use sectionspy_platform::{EnvPreference, FileStore, KeyValueStore, MemoryStore};

use script::Script;

/// The page loaded when none is given.
pub const PORTFOLIO: &str = include_str!("../pages/portfolio.toml");

/// Names a JSON file backing the key-value store.
const STORE_VAR: &str = "SECTIONSPY_STORE";

/// Animation ticks inserted after each scrolling step when smooth
/// scrolling is enabled.
const SETTLE_FRAMES: usize = 30;

/// Replay a scripted UI session against a page description.
#[derive(Debug, Parser)]
#[command(name = "sectionspy-app", version)]
#[command(about = "Replay a scripted UI session against a page description", long_about = None)]
struct Cli {
    /// Page description (TOML). Defaults to the built-in portfolio page.
    page: Option<PathBuf>,

    /// Scripted session (TOML `[[step]]` list). Defaults to the built-in tour.
    script: Option<PathBuf>,

    /// Scrollspy configuration (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn open_store() -> Result<Box<dyn KeyValueStore>> {
    match std::env::var_os(STORE_VAR) {
        Some(path) => {
            let store = FileStore::open(&path)
                .with_context(|| format!("cannot open store {}", Path::new(&path).display()))?;
            log::info!("Theme store: {}", store.path().display());
            Ok(Box::new(store))
        },
        None => Ok(Box::new(MemoryStore::new())),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => SpyConfig::load(path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => SpyConfig::default(),
    };

    let page = match &args.page {
        Some(path) => Page::from_toml_str(&read(path)?)
            .with_context(|| format!("invalid page {}", path.display()))?,
        None => Page::from_toml_str(PORTFOLIO)?,
    };

    let mut script = match &args.script {
        Some(path) => Script::from_toml_str(&read(path)?)?,
        None => Script::from_toml_str(script::TOUR)?,
    };
    if config.smooth_scroll {
        script = script.with_settle_frames(SETTLE_FRAMES);
    }

    let preference = EnvPreference::from_env();
    let mut site = Site::new(
        page,
        config,
        open_store()?,
        &preference,
        script.viewport_width,
        script.viewport_height,
    )?;
    log::info!(
        "Page loaded: {} sections, {} links, {}px tall",
        site.spy().regions().len(),
        site.spy().indicators().len(),
        site.scroll().content_height(),
    );
    if site.spy().is_inert() {
        log::warn!("Nothing to track on this page");
    }

    println!("start");
    println!("{}", render::frame(&site));
    for (i, event) in script.step.iter().enumerate() {
        let changed = site.handle(event);
        if *event == UiEvent::Frame && !changed {
            continue;
        }
        println!("[{i}] {}{}", render::describe(event), if changed { " *" } else { "" });
        println!("{}", render::frame(&site));
    }

    site.teardown();
    log::info!(
        "Done: {} batches, {} unmatched activations",
        site.spy().batches_handled(),
        site.spy().indicators().orphaned_count(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sectionspy_core::ScrollSpy;

    fn args(list: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sectionspy-app").chain(list.iter().copied()))
    }

    #[test]
    fn no_args_runs_builtins() {
        let cli = args(&[]).unwrap();
        assert_eq!(cli.page, None);
        assert_eq!(cli.script, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn positional_and_config() {
        let cli = args(&["page.toml", "--config", "spy.toml", "tour.toml"]).unwrap();
        assert_eq!(cli.page, Some(PathBuf::from("page.toml")));
        assert_eq!(cli.script, Some(PathBuf::from("tour.toml")));
        assert_eq!(cli.config, Some(PathBuf::from("spy.toml")));
    }

    #[test]
    fn bad_args_rejected() {
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a", "b", "c"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn builtin_page_is_tracked() {
        let page = Page::from_toml_str(PORTFOLIO).unwrap();
        let spy = ScrollSpy::start(&page, &SpyConfig::default()).unwrap();
        assert_eq!(spy.regions().len(), 3);
        assert_eq!(spy.indicators().len(), 3);
        assert!(spy.is_running());
    }
}
