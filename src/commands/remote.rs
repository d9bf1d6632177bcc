//! Remote lecture commands: inspect and delete lectures on the server.

use crate::config::LecternConfig;
use crate::server::ServerClient;
use clap::Subcommand;
use console::style;

#[derive(Subcommand)]
pub enum RemoteCommand {
    /// List lectures stored on the server
    List,
    /// Show one lecture with its summary
    Show {
        /// Server-side lecture id
        id: i64,
    },
    /// Delete a lecture from the server
    Delete {
        /// Server-side lecture id
        id: i64,
    },
}

pub async fn handle_remote(command: RemoteCommand) -> anyhow::Result<()> {
    let config = LecternConfig::load()?;
    let client = ServerClient::new(&config.server.base_url, config.server.api_key.clone());

    match command {
        RemoteCommand::List => {
            let lectures = client.list().await?;
            if lectures.is_empty() {
                println!("No lectures on the server");
                return Ok(());
            }
            for lecture in lectures {
                let status = if lecture.summary.is_some() {
                    style("summarized").green()
                } else {
                    style("processing").yellow()
                };
                println!("{:>6}  {}  {}", lecture.id, status, lecture.title);
            }
        }
        RemoteCommand::Show { id } => {
            let lecture = client.detail(id).await?;
            println!("{}", style(&lecture.title).bold());
            if let Some(created) = &lecture.created_at {
                println!("Uploaded: {created}");
            }
            match &lecture.summary {
                Some(summary) => {
                    println!();
                    println!("{summary}");
                }
                None => println!("Summary not ready yet"),
            }
        }
        RemoteCommand::Delete { id } => {
            client.delete(id).await?;
            println!("Deleted lecture {id} from the server");
        }
    }
    Ok(())
}
