use anyhow::{Context as AnyhowContext, Result};
use catalog_cli::{navigate, pick_path, print_stdout, render_tree, render_view, CatalogConfig, Snapshot};
use catalog_protocol::ActiveTag;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse a category/content snapshot the way the portal does", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to catalog.toml
    #[arg(long, global = true, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a query string into the rendered view (JSON)
    View(ViewArgs),

    /// Print the category forest as an indented outline
    Tree(TreeArgs),
}

#[derive(Args)]
struct ViewArgs {
    /// Category snapshot (JSON array)
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Content snapshot (JSON array)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Query string, e.g. "type=akademik&category_id=3"
    #[arg(long, default_value = "")]
    query: String,

    /// Free-text search within the selected scope
    #[arg(long)]
    search: Option<String>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct TreeArgs {
    /// Category snapshot (JSON array)
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Only show roots of this classification tag
    #[arg(long, default_value = "all")]
    tag: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = CatalogConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::View(args) => run_view(args, &config),
        Commands::Tree(args) => run_tree(args, &config),
    }
}

fn run_view(args: ViewArgs, config: &CatalogConfig) -> Result<()> {
    let categories = pick_path(args.categories, config.snapshot.categories.as_ref(), "categories")?;
    let content = args.content.or_else(|| config.snapshot.content.clone());
    let labels = config.tag_catalog();
    let snapshot = Snapshot::load(&categories, content.as_deref(), &labels)?;

    let state = navigate(&snapshot.graph, &args.query, args.search.as_deref());
    let json = render_view(&snapshot, &state, &labels, args.pretty)?;
    print_stdout(&json)
}

fn run_tree(args: TreeArgs, config: &CatalogConfig) -> Result<()> {
    let categories = pick_path(args.categories, config.snapshot.categories.as_ref(), "categories")?;
    let snapshot = Snapshot::load(&categories, None, &config.tag_catalog())?;
    let tree = render_tree(&snapshot.graph, &ActiveTag::parse(&args.tag));
    print_stdout(tree.trim_end())
}
