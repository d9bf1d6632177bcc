//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to the appropriate
//! command handlers.

use crate::commands;
use crate::logging;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lectern",
    version,
    about = "Record lectures locally and upload them for AI summarization"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the local recording catalog, newest first
    List,
    /// Upload a recording to the summarization server
    Upload {
        /// Audio file to upload
        file: PathBuf,
        /// Presentation slides to attach alongside the audio
        #[arg(long)]
        slides: Option<PathBuf>,
        /// Title sent with the upload
        #[arg(long)]
        title: Option<String>,
        /// Description sent with the upload
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete recordings together with their metadata sidecars
    Delete {
        /// Audio files to delete
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Set a new title for a recording
    Rename {
        /// Audio file to retitle
        file: PathBuf,
        /// New title
        title: String,
    },
    /// Operate on lectures already uploaded to the server
    Remote {
        #[command(subcommand)]
        command: commands::remote::RemoteCommand,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Parses the command line and runs the selected command.
pub async fn run() -> anyhow::Result<()> {
    logging::init_logging()?;

    let cli = Cli::parse();
    match cli.command {
        Command::List => commands::handle_list().await,
        Command::Upload {
            file,
            slides,
            title,
            description,
        } => commands::handle_upload(file, slides, title, description).await,
        Command::Delete { files } => commands::handle_delete(files).await,
        Command::Rename { file, title } => commands::handle_rename(file, title),
        Command::Remote { command } => commands::handle_remote(command).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
