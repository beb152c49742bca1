use anyhow::Context;
use clap::Parser;

use geoperm_cli::args::ResourcesArgs;
use geoperm_infra::{Config, JsonFileCatalog};

fn main() -> anyhow::Result<()> {
    let args = ResourcesArgs::parse();
    let config = Config::from_env()?.with_catalog_path(args.common.catalog.clone());
    geoperm_observability::init(config.log_format);

    let catalog = JsonFileCatalog::open(&config.catalog_path)
        .with_context(|| format!("opening catalog {}", config.catalog_path.display()))?;

    let stdout = std::io::stdout();
    let outcome = geoperm_cli::resources::run(&catalog, &args, &mut stdout.lock())?;
    tracing::debug!(?outcome, "finished");
    Ok(())
}
