use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use planview::app::App;
use planview::catalog::Catalog;
use planview::config::Config;
use planview::service::LayoutSnapshot;
use planview::tiling::TilingEngine;
use planview::{logging, plan, tui};

#[derive(Parser)]
#[command(name = "planview", about = "Browse map floor plans in tiled terminal panes")]
struct Cli {
    /// Map to open first (by slug)
    #[arg(short, long)]
    map: Option<String>,
    /// Catalog JSON to use instead of the built-in maps
    #[arg(short, long)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List maps and their levels
    Maps,
    /// Apply +<level> / -<level> / ~<level> steps to an empty layout and print it as JSON
    Plan {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        ops: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();
    let catalog_path = cli.catalog.clone().or_else(|| config.catalog.clone());
    let catalog = load_catalog(catalog_path.as_deref())?;

    match cli.command {
        None => {
            let log_path = logging::init(&config)?;
            info!(log = %log_path.display(), maps = catalog.maps.len(), "starting viewer");
            tui::install_panic_hook();
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(App::run(catalog, config, cli.map.as_deref()))
        }
        Some(Commands::Maps) => {
            logging::init_stderr(&config);
            print_maps(&catalog);
            Ok(())
        }
        Some(Commands::Plan { ops }) => {
            logging::init_stderr(&config);
            let ops = plan::parse_ops(&ops)?;
            plan::check_levels(&ops, &catalog)?;

            let mut engine = TilingEngine::with_split_side(config.viewer.split_side);
            plan::apply(&mut engine, &ops)?;
            let snapshot = LayoutSnapshot::from(&engine);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load_from(path)
            .with_context(|| format!("loading catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

fn print_maps(catalog: &Catalog) {
    for map in &catalog.maps {
        if map.location.is_empty() {
            println!("{:<12} {}", map.slug, map.name);
        } else {
            println!("{:<12} {} ({})", map.slug, map.name, map.location);
        }
        for id in &map.levels {
            let kind = catalog.level(*id).map(|l| l.kind.label()).unwrap_or("?");
            println!("    {:>3}  {}", id, kind);
        }
    }
}
