mod balance;
mod cli;
mod description;
mod error;
mod exporter;
mod fmt;
mod importer;
mod ledger;
mod models;
mod session;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            export_dir,
            month_first,
            decimal_comma,
        } => cli::init::run(export_dir, month_first, decimal_comma),
        Commands::Preview { file, rows } => cli::preview::run(&file, rows),
        Commands::Periods { file } => cli::periods::run(&file),
        Commands::Remittants {
            file,
            year,
            month,
            filter,
        } => cli::remittants::run(&file, year, month, filter.as_deref()),
        Commands::Assign {
            file,
            year,
            month,
            sheet,
        } => cli::assign::run(&file, year, month, sheet),
        Commands::Apply {
            file,
            year,
            month,
            remittant,
            category,
            sheet,
        } => cli::apply::run(&file, year, month, &remittant, &category, &sheet),
        Commands::Categories => cli::categories::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
