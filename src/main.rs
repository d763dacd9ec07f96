use blogfolio::{config, generate, output};
use clap::{ArgAction, Parser, Subcommand};
use log::{LevelFilter, info};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blogfolio")]
#[command(about = "Static site generator for a blog and portfolio")]
#[command(long_about = "\
Static site generator for a blog and portfolio

Posts are Markdown files with a front-matter block. The about page combines
a Markdown intro with a JSON list of past roles.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── about.md                     # About page intro
  ├── experience.json              # [{ dates, role, company, description, logo }]
  ├── assets/                      # Copied verbatim to the output root
  └── posts/
      ├── protocol-witnesses.md    # Slug from filename → posts/protocol-witnesses/
      └── swift-concurrency.md

Post front matter:

  ---
  layout: post
  title: Protocol Witnesses
  description: Replacing protocols with plain structs
  dateFormatted: Mar 14, 2022
  ---

Run 'blogfolio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load, render and write the site
    Build,
    /// Load and render everything without writing
    Check,
    /// Print posts in build order
    List,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Build => {
            let site = load(&cli.source)?;
            output::print_load_output(&site, &cli.source);
            println!();
            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&site, &cli.source, &cli.output)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = load(&cli.source)?;
            output::print_load_output(&site, &cli.source);
            let pages = generate::render_site(&site)?;
            info!("{} pages rendered, nothing written", pages.len());
            println!("==> Content is valid");
        }
        Command::List => {
            let site = load(&cli.source)?;
            output::print_post_list(&site.posts);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config, size the thread pool, then load the site.
fn load(source: &std::path::Path) -> Result<generate::Site, Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    init_thread_pool(&site_config.build);
    Ok(generate::load_site(source, site_config)?)
}

fn init_logging(verbose: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    SimpleLogger::new().with_level(level).init()
}

/// Initialize the rayon thread pool based on build config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(build: &config::BuildConfig) {
    let threads = config::effective_threads(build);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
