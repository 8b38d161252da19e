mod aggregate;
mod archive;
mod config;
mod dates;
mod error;
mod models;
mod run;
mod service;
mod sheet;
mod sync;

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let cfg = config::Config::from_env()?;
    let store = sheet::SheetStore::open(&cfg.workbook_path)?;
    let tracker = service::Tracker::new(store, cfg.archive.clone());

    if args.len() < 2 {
        run::print_usage();
        return Ok(());
    }
    run::as_cli(&args, &tracker, &cfg)
}
