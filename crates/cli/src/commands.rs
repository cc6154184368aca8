use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the configured chains and print their stage order.
    Plan {
        /// Path to the JSON run config.
        #[arg(long)]
        config: String,
    },
    /// Copy the configured chains between fixture-backed in-memory
    /// clusters and report per-table row counts.
    Run {
        /// Path to the JSON run config.
        #[arg(long)]
        config: String,
        /// Path to the JSON cluster fixture.
        #[arg(long)]
        fixture: String,
        /// Write the summary as JSON here instead of printing it.
        #[arg(long)]
        output: Option<String>,
    },
}
