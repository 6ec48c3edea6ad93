use clap::{Args, Parser, Subcommand};

use crate::demo::{run_upload, UploadArgs};
use crate::server;
use maidlink::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "maidlink",
    about = "Run the maid placement marketplace API and agency roster tools",
    version
)]
struct Cli {
    /// Defaults to `serve` when no subcommand is given.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service
    Serve(ServeArgs),
    /// Import an agency roster sheet and run it through the bulk upload
    Upload(UploadArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve(ServeArgs::default())
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Bind address, overriding APP_HOST
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Listening port, overriding APP_PORT
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    match Cli::parse().command.unwrap_or_default() {
        Command::Serve(args) => server::run(args).await,
        Command::Upload(args) => run_upload(args),
    }
}
