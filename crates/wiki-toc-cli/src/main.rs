mod viewer;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use wiki_toc_config::Config;
use wiki_toc_engine::{
    ContentItem, HeadingIdGenerator, ObserverOptions, RootMargin, TocItem, attach_toc,
    generate_heading_slug, get_h2_toc_items, get_toc_from_content, load_content_item,
    parse_toc_from_markdown, render_html_with_anchors, resolve_content_path,
};

use crate::viewer::{App, ViewerOptions};

#[derive(Debug, Parser)]
#[command(
    name = "wiki-toc",
    version,
    about = "Table-of-contents tooling for generated wiki pages"
)]
struct Cli {
    /// Config file to use instead of ~/.config/wiki-toc/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the table of contents of a page
    Toc {
        path: PathBuf,
        /// Parse the markdown down to this heading level, ignoring any backend TOC
        #[arg(long, value_name = "N")]
        max_level: Option<u8>,
        /// Parse the markdown even when the page carries a TOC
        #[arg(long)]
        reparse: bool,
        /// Only level-2 sections
        #[arg(long)]
        h2_only: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print the anchor slug for heading text
    Slug {
        #[arg(required = true)]
        text: Vec<String>,
        /// Treat each argument as a heading on the same page and disambiguate
        #[arg(long)]
        unique: bool,
    },
    /// Render a page to HTML with TOC anchors on its headings
    Render { path: PathBuf },
    /// Print the page as a content item with `ext.toc` filled in
    Attach {
        path: PathBuf,
        #[arg(long, value_name = "N")]
        max_level: Option<u8>,
    },
    /// Open a page in the terminal viewer
    View { path: PathBuf },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Write a config file with every setting at its default
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print where the config file is read from
    Path,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Cli {
        config: config_path,
        command,
    } = Cli::parse();
    let load = || load_config(config_path.as_deref());

    match command {
        Commands::Toc {
            path,
            max_level,
            reparse,
            h2_only,
            json,
        } => {
            let config = load()?;
            let item = load_item(&path, &config)?;
            let toc = if reparse || max_level.is_some() {
                let max_level = max_level.unwrap_or(config.toc.max_level);
                parse_toc_from_markdown(&item.content, max_level)
            } else {
                get_toc_from_content(Some(&item))
            };
            let toc = if h2_only { get_h2_toc_items(&toc) } else { toc };

            if json {
                println!("{}", serde_json::to_string_pretty(&toc)?);
            } else {
                print!("{}", format_toc(&toc));
            }
        }
        Commands::Slug { text, unique } => {
            if unique {
                let mut ids = HeadingIdGenerator::new();
                for heading in &text {
                    println!("{}", ids.generate_id(heading));
                }
            } else {
                println!("{}", generate_heading_slug(&text.join(" ")));
            }
        }
        Commands::Render { path } => {
            let config = load()?;
            let item = load_item(&path, &config)?;
            let toc = get_toc_from_content(Some(&item));
            print!("{}", render_html_with_anchors(&item.content, &toc));
        }
        Commands::Attach { path, max_level } => {
            let config = load()?;
            let mut item = load_item(&path, &config)?;
            let max_level = max_level.unwrap_or(config.toc.max_level);
            let toc = attach_toc(&mut item, max_level);
            log::info!("{} carries {} TOC entries", path.display(), toc.len());
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Commands::View { path } => {
            let config = load()?;
            let item = load_item(&path, &config)?;
            let toc = get_toc_from_content(Some(&item));
            let options = viewer_options(&config)?;
            viewer::run(App::new(&item, toc, options))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => {
                let path = config_path.clone().unwrap_or_else(Config::config_path);
                init_config(&path, force)?;
                println!("Wrote {}", path.display());
            }
            ConfigAction::Path => {
                let path = config_path.clone().unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => config,
            None => bail!("Config file {} does not exist", path.display()),
        },
        None => Config::load_or_default().with_context(|| {
            format!("Failed to load {}", Config::config_path().display())
        })?,
    };
    Ok(config)
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
    }
    Config::default().save_to_path(path)
}

fn load_item(path: &Path, config: &Config) -> Result<ContentItem> {
    let resolved = resolve_content_path(path, config.content_dir.as_deref());
    load_content_item(&resolved).with_context(|| format!("Failed to load {}", resolved.display()))
}

fn viewer_options(config: &Config) -> Result<ViewerOptions> {
    let root_margin: RootMargin = config
        .tracker
        .root_margin
        .parse()
        .context("Invalid tracker.root_margin in config")?;
    Ok(ViewerOptions {
        observer: ObserverOptions {
            root_margin,
            threshold: config.tracker.threshold,
        },
        heading_offset: config.viewer.heading_offset,
        smooth_scroll: config.viewer.smooth_scroll,
    })
}

fn format_toc(toc: &[TocItem]) -> String {
    toc.iter()
        .map(|item| {
            let indent = "  ".repeat(usize::from(item.level.as_u8().saturating_sub(2)));
            format!("{indent}{} #{}\n", item.text, item.id)
        })
        .collect()
}
