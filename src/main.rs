//! navtree: lazy-loading navigation tree for generated documentation
//!
//! Builds the expandable contents tree of a documentation site from its
//! navigation table and shows it for a page, interactively or as text.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use navtree::{
    cli,
    config::{AppConfig, ConfigPreset, FindConfig, ViewConfig},
    host::GlyphStyle,
    pipeline::{OutputFormat, exit_codes},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "navtree")]
#[command(version)]
#[command(about = "Lazy-loading navigation tree for generated documentation", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Page not found (find --no-fallback)
    2  Error occurred

EXAMPLES:
    # Browse the tree with the current page opened
    navtree view html/navtree.js modules.html

    # Print the tree a page shows, for diffs and logs
    navtree view html/navtree.js graph.html -o text --glyphs ascii

    # Locate a page in the table
    navtree find html/navtree.js graph.html -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by commands that build a tree
#[derive(clap::Args)]
struct TreeArgs {
    /// Page selected when the requested page is not in the table
    #[arg(long)]
    index_page: Option<String>,

    /// Prefix for every link and icon, e.g. "../" for pages in a subdirectory
    #[arg(long)]
    relpath: Option<String>,

    /// Id of the element the tree attaches to
    #[arg(long)]
    anchor: Option<String>,

    /// Directory searched for split tables (defaults to the table's directory)
    #[arg(long)]
    resolve_dir: Option<PathBuf>,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Path to the navigation table (navtree.js or a JSON array)
    table: PathBuf,

    /// Page to open (defaults to the index page)
    page: Option<String>,

    /// Output format (auto detects TTY: tui if interactive, text otherwise)
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Glyphs used to draw tree lines
    #[arg(long)]
    glyphs: Option<GlyphStyle>,

    /// TUI theme (dark or light)
    #[arg(long)]
    theme: Option<String>,

    #[command(flatten)]
    tree: TreeArgs,
}

/// Arguments for the `find` subcommand
#[derive(Parser)]
struct FindArgs {
    /// Path to the navigation table (navtree.js or a JSON array)
    table: PathBuf,

    /// Page to look up
    page: String,

    /// Report a miss instead of falling back to the index page
    #[arg(long)]
    no_fallback: bool,

    /// Output format (text or json)
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    #[command(flatten)]
    tree: TreeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the navigation tree for a page
    View(ViewArgs),

    /// Print the index path and labels leading to a page
    Find(FindArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .navtree.yaml in the current directory
    Init {
        /// Start from a preset: default, plain or ci
        #[arg(long, default_value = "default")]
        preset: String,
    },
}

/// CLI settings layered over the config file.
fn cli_overrides(
    tree: &TreeArgs,
    output: Option<OutputFormat>,
    output_file: Option<PathBuf>,
    glyphs: Option<GlyphStyle>,
    theme: Option<&str>,
    no_color: bool,
) -> AppConfig {
    let mut builder = AppConfig::builder()
        .output_file(output_file)
        .no_color(no_color);
    if let Some(page) = &tree.index_page {
        builder = builder.index_page(page.clone());
    }
    if let Some(relpath) = &tree.relpath {
        builder = builder.relpath(relpath.clone());
    }
    if let Some(format) = output {
        builder = builder.output_format(format);
    }
    if let Some(glyphs) = glyphs {
        builder = builder.glyphs(glyphs);
    }
    if let Some(theme) = theme {
        builder = builder.theme(theme);
    }
    let mut config = builder.build();
    if let Some(anchor) = &tree.anchor {
        config.tree.anchor.clone_from(anchor);
    }
    config
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::View(args) => {
            let overrides = cli_overrides(
                &args.tree,
                args.output,
                args.output_file,
                args.glyphs,
                args.theme.as_deref(),
                cli.no_color,
            );
            let (app_config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }

            let page = args
                .page
                .unwrap_or_else(|| app_config.tree.index_page.clone());
            let config = ViewConfig {
                table_path: args.table,
                page,
                resolve_dir: args.tree.resolve_dir,
                tree: app_config.tree,
                output: app_config.output,
                tui: app_config.tui,
                quiet: cli.quiet,
            };

            let exit_code = cli::run_view(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Find(args) => {
            let overrides = cli_overrides(
                &args.tree,
                args.output,
                args.output_file,
                None,
                None,
                cli.no_color,
            );
            let (app_config, _) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);

            let config = FindConfig {
                table_path: args.table,
                page: args.page,
                no_fallback: args.no_fallback,
                resolve_dir: args.tree.resolve_dir,
                tree: app_config.tree,
                output: app_config.output,
                quiet: cli.quiet,
            };

            let exit_code = cli::run_find(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "navtree", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = navtree::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = navtree::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    navtree::config::user_config_dir().map(|p| p.display().to_string()),
                    ::dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in &[".navtree.yaml", ".navtree.yml", "navtree.yaml", "navtree.yml"] {
                    eprintln!("  {name}");
                }
                eprintln!();
                match navtree::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init { preset } => {
                let Some(preset) = ConfigPreset::from_name(&preset) else {
                    let known: Vec<&str> = ConfigPreset::all().iter().map(|p| p.name()).collect();
                    anyhow::bail!("unknown preset '{preset}' (expected one of: {})", known.join(", "));
                };
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".navtree.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content =
                    navtree::config::generate_example_config(&AppConfig::from_preset(preset));
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {} ({preset} preset)", target.display());
                Ok(())
            }
        },
    }
}
