use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use game_catalog::config::DEFAULT_CONFIG_FILE;
use game_catalog::{Catalog, CatalogConfig, Player, SaveManager, SaveType};

fn main() {
    let config = match CatalogConfig::load_or_default(DEFAULT_CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}, using defaults", e);
            CatalogConfig::default()
        }
    };
    init_logging(&config);

    if let Err(e) = run(&config) {
        tracing::error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &CatalogConfig) -> Result<()> {
    let save_dir = config.resolve_save_directory();
    let save_manager = SaveManager::new(&save_dir)
        .with_context(|| format!("failed to create save directory {}", save_dir.display()))?;

    let mut catalog = Catalog::new();
    catalog.add(Box::new(Player::new("Hero", 100, 1)));
    catalog.add(Box::new(Player::new("Mage", 80, 2)));
    catalog.add(Box::new(Player::new("Warrior", 120, 3)));

    let path = save_manager
        .save(&catalog, &config.save_name, SaveType::Manual)
        .context("failed to save catalog")?;

    let mut loaded = Catalog::new();
    save_manager
        .load(&mut loaded, &config.save_name)
        .with_context(|| format!("failed to load {}", path.display()))?;

    println!("Loaded characters:");
    for line in loaded.describe_all() {
        println!("{}", line);
    }

    Ok(())
}

fn init_logging(config: &CatalogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}
