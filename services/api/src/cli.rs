use crate::inspect::{run_resolve, run_sitemap, ResolveArgs, SitemapArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tourbook::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tourbook",
    about = "Serve and inspect the Tourbook locale routing and sitemap layer",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the aggregated sitemap entries
    Sitemap(SitemapArgs),
    /// Show how a request path is routed
    Resolve(ResolveArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Catalog CSV export to serve offers from (overrides CATALOG_CSV)
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Sitemap(args) => run_sitemap(args).await,
        Command::Resolve(args) => run_resolve(args),
    }
}
