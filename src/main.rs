use clap::{Parser, Subcommand};
use folio::pipeline::{self, BuildEvent};
use folio::types::BuildContext;
use folio::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Build a blog and project portfolio site")]
#[command(long_about = "\
Build a blog and project portfolio site

Posts are markdown files with a front matter block; projects are JSON
descriptors. Each build renders the blog pages from HTML templates, rewrites
the project grid of the landing page, and writes JSON snapshots of both
collections.

Site structure:

  site/
  ├── folio.toml                  # Build config (optional)
  ├── index.html                  # Landing page, project grid rewritten in place
  ├── blog-content/
  │   ├── posts/                  # hello-world.md → posts/hello-world.html
  │   └── templates/
  │       ├── blog-list.html      # → blog.html
  │       └── blog-post.html      # → posts/<slug>.html
  └── portfolio-content/
      └── projects/               # compiler.json → card in index.html

Post front matter:

  ---
  title: Hello World
  date: 2024-06-01
  category: Notes
  icon: 👋
  ---

Run 'folio gen-config' to generate a documented folio.toml.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build every page and snapshot (default)
    Build,
    /// Parse all content and report problems without writing anything
    Check,
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let config = config::load_config(&cli.root)?;
            let ctx = BuildContext::now();
            println!("==> Building {}", cli.root.display());
            let summary = pipeline::build(&cli.root, &config, &ctx, &mut |event| {
                output::print_build_event(&event, &cli.root)
            })?;
            output::print_build_summary(&summary);
        }
        Command::Check => {
            let config = config::load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let mut skipped = 0;
            let content = pipeline::load_content(&cli.root, &config, &mut |event| {
                if matches!(event, BuildEvent::Skipped { .. }) {
                    skipped += 1;
                }
                // Per-file lines are repeated by the inventory below
                if !matches!(
                    event,
                    BuildEvent::Parsed { .. } | BuildEvent::StageStarted(_)
                ) {
                    output::print_build_event(&event, &cli.root);
                }
            })?;
            println!();
            output::print_check_output(&content);
            if skipped > 0 {
                return Err(format!("{skipped} source file(s) could not be parsed").into());
            }
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
