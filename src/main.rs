use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use html_shelf::config::ShelfConfig;
use html_shelf::state::{validate_display_name, Catalog, Entry, PresentationList};
use html_shelf::ui::tiles::short_id;
use html_shelf::ui::{render_grid, ViewRequest};

/// Top-level CLI parser for the `html-shelf` binary.
#[derive(Debug, Parser)]
#[command(
    name = "html-shelf",
    version,
    about = "Keep private copies of HTML files and open them later"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (overrides config files and HTML_SHELF_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Extra TOML config file, layered over the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
enum Commands {
    /// List documents, pinned first.
    List,
    /// Import an HTML file into the shelf.
    Import {
        file: PathBuf,
        /// Display name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Import every .html/.htm file below a folder.
    #[command(name = "import-dir")]
    ImportDir { folder: PathBuf },
    /// Rename a document.
    Rename { id: String, name: String },
    /// Pin or unpin a document.
    Pin { id: String },
    /// Delete a document and its private copy.
    Delete { id: String },
    /// Print the title and file URL to hand to a browser.
    Open { id: String },
    /// List documents whose private copy is missing.
    Verify,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("html-shelf error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let catalog = open_catalog(&cli)?;
    let stdout = io::stdout();
    execute(cli.command, &catalog, &mut stdout.lock())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("HTML_SHELF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn open_catalog(cli: &Cli) -> anyhow::Result<Catalog> {
    if let Some(path) = &cli.config {
        if !path.is_file() {
            bail!("config file '{}' does not exist", path.display());
        }
    }

    let mut config =
        ShelfConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }

    Catalog::from_config(&config).context("invalid configuration")
}

/// Resolve a full id or unique id prefix against the current catalog.
fn resolve(catalog: &Catalog, key: &str) -> anyhow::Result<Entry> {
    PresentationList::load(catalog)
        .find(key)
        .cloned()
        .with_context(|| format!("no document matches '{key}' (use an id or a unique id prefix)"))
}

fn execute(command: Commands, catalog: &Catalog, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::List => {
            let list = PresentationList::load(catalog);
            write!(out, "{}", render_grid(&list))?;
        }
        Commands::Import { file, name } => {
            let name = name.map(|name| validate_display_name(&name)).transpose()?;
            let entry = catalog
                .import_file(&file, name.as_deref())
                .context("Failed to embed file.")?;
            writeln!(
                out,
                "File embedded successfully: {} ({})",
                entry.display_name,
                short_id(&entry.id)
            )?;
        }
        Commands::ImportDir { folder } => {
            let summary = catalog
                .import_folder(&folder)
                .context("Failed to embed files.")?;
            for entry in &summary.imported {
                writeln!(out, "  {} ({})", entry.display_name, short_id(&entry.id))?;
            }
            writeln!(
                out,
                "Imported {} files, {} failed.",
                summary.imported_count(),
                summary.failed_count
            )?;
        }
        Commands::Rename { id, name } => {
            let name = validate_display_name(&name)?;
            let entry = resolve(catalog, &id)?;
            if catalog.rename(&entry.id, &name)?.is_none() {
                bail!("Error renaming file");
            }
            writeln!(out, "File renamed")?;
        }
        Commands::Pin { id } => {
            let entry = resolve(catalog, &id)?;
            let Some(updated) = catalog.toggle_pin(&entry.id)? else {
                bail!("Error pinning file");
            };
            let verb = if updated.pinned { "Pinned" } else { "Unpinned" };
            writeln!(out, "{verb} {}", updated.display_name)?;
        }
        Commands::Delete { id } => {
            let entry = resolve(catalog, &id)?;
            if !catalog.delete_content(&entry)? {
                bail!("Error deleting file");
            }
            writeln!(out, "File deleted")?;
        }
        Commands::Open { id } => {
            let entry = resolve(catalog, &id)?;
            let request = ViewRequest::for_entry(&entry);
            if !request.available {
                tracing::warn!(url = %request.url, "content file is missing");
            }
            writeln!(out, "{}", request.title)?;
            writeln!(out, "{}", request.url)?;
        }
        Commands::Verify => {
            let missing = catalog.verify_files();
            if missing.is_empty() {
                writeln!(out, "All content files present.")?;
            }
            for entry in &missing {
                writeln!(
                    out,
                    "missing: {} ({}) -> {}",
                    entry.display_name,
                    short_id(&entry.id),
                    entry.source_path.display()
                )?;
            }
        }
    }

    Ok(())
}
