use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Load the three input files into the configured database
    Run {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, help = "Rows per INSERT statement")]
        batch_size: Option<usize>,
    },
    /// Run the whole job against an in-memory store and print the report
    Validate {
        #[command(flatten)]
        input: InputArgs,

        #[arg(
            long,
            help = "If specified, writes the JSON report to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
    /// Connect to the configured database and run `SELECT 1`
    TestConn,
}

/// Overrides for the input file settings.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    #[arg(long, help = "Directory holding the input files")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Customers CSV file")]
    pub customers: Option<PathBuf>,

    #[arg(long, help = "Products CSV file")]
    pub products: Option<PathBuf>,

    #[arg(long, help = "Sales CSV file")]
    pub sales: Option<PathBuf>,

    #[arg(long, help = "Field delimiter, a single character or \\t")]
    pub delimiter: Option<String>,
}
