use crate::{
    commands::{Commands, InputArgs},
    error::CliError,
};
use clap::Parser;
use engine_config::{
    env::EnvManager,
    settings::{self, LoadSettings, connection::ConnectionSettings, input},
};
use engine_core::connectors::{destination::Destination, memory::MemoryDestination};
use engine_runtime::execution::{executor, extract::extract, factory};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "salesload",
    version,
    about = "Loads customers, products and sales CSV files into a relational database"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Read additional variables from this .env file")]
    env_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = &cli.env_file {
        env.load_from_file(path)?;
    }

    match cli.command {
        Commands::Run { input, batch_size } => {
            apply_input_overrides(&mut env, input);
            if let Some(size) = batch_size {
                env.set(settings::BATCH_SIZE, size.to_string());
            }
            let settings = LoadSettings::from_env(&env)?;
            info!("Starting load with {:?}", settings.connection);

            // Reject bad input before touching the database
            let prepared = executor::prepare(extract(&settings.input)?)?;

            let destination =
                factory::create_destination(&settings.connection, settings.batch_size).await?;
            let result = executor::load(prepared, &destination).await;
            if let Err(err) = destination.close().await {
                warn!("Failed to close the database connection: {err}");
            }
            result?;
        }
        Commands::Validate { input, output } => {
            apply_input_overrides(&mut env, input);
            let input = input::InputSettings::from_env(&env)?;

            let store = MemoryDestination::new();
            let report = executor::run(&input, &store).await?;

            match output {
                Some(path) => output::write_report(&report, &path).await?,
                None => output::print_report(&report)?,
            }
        }
        Commands::TestConn => {
            let settings = ConnectionSettings::from_env(&env)?;
            factory::test_connection(&settings).await?;
            println!("Connection OK");
        }
    }

    Ok(())
}

/// Command-line values win over the environment and the .env file.
fn apply_input_overrides(env: &mut EnvManager, args: InputArgs) {
    let paths = [
        (input::DATA_DIR, args.data_dir),
        (input::CUSTOMERS_FILE, args.customers),
        (input::PRODUCTS_FILE, args.products),
        (input::SALES_FILE, args.sales),
    ];
    for (name, value) in paths {
        if let Some(path) = value {
            env.set(name, path.display().to_string());
        }
    }
    if let Some(delimiter) = args.delimiter {
        env.set(input::DELIMITER, delimiter);
    }
}
