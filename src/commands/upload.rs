//! Upload command: stream a recording to the summarization server.
//!
//! Drives one upload session to its terminal event, printing progress along
//! the way. Ctrl-C cancels the session; the in-flight request is aborted and
//! a retry later restarts from byte zero.

use crate::config::LecternConfig;
use crate::upload::{UploadEvent, UploadPipeline, UploadRequest};
use console::style;
use std::io::Write;
use std::path::PathBuf;

pub async fn handle_upload(
    file: PathBuf,
    slides: Option<PathBuf>,
    title: Option<String>,
    description: Option<String>,
) -> anyhow::Result<()> {
    let config = LecternConfig::load()?;
    anyhow::ensure!(file.is_file(), "No such recording: {}", file.display());
    if let Some(slides) = &slides {
        anyhow::ensure!(slides.is_file(), "No such slides file: {}", slides.display());
    }

    let pipeline = UploadPipeline::new(&config.server.base_url, config.server.api_key.clone());
    let mut session = pipeline.upload(UploadRequest {
        audio_path: file.clone(),
        slides_path: slides,
        title,
        description,
    });

    loop {
        let event = tokio::select! {
            event = session.next_event() => event,
            _ = tokio::signal::ctrl_c() => {
                session.cancel();
                println!();
                println!("Upload cancelled");
                return Ok(());
            }
        };

        match event {
            Some(UploadEvent::Loading) => {
                println!("Uploading {}...", file.display());
            }
            Some(UploadEvent::Progress(percent)) => {
                print!("\r{percent:>3}%");
                let _ = std::io::stdout().flush();
            }
            Some(UploadEvent::Success(lecture)) => {
                println!();
                match lecture {
                    Some(lecture) => println!(
                        "{} Uploaded as lecture {}; the summary will appear under 'lectern remote'",
                        style("ok").green(),
                        lecture.id
                    ),
                    None => println!("{} Uploaded", style("ok").green()),
                }
                return Ok(());
            }
            Some(UploadEvent::Error(e)) => {
                println!();
                return Err(anyhow::anyhow!("Upload failed: {e}"));
            }
            None => return Ok(()),
        }
    }
}
