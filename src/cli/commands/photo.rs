use crate::cli::output::*;
use crate::core::session::CapturedImage;
use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PhotoArgs {
    #[command(subcommand)]
    pub command: PhotoCommands,
}

#[derive(Subcommand)]
pub enum PhotoCommands {
    /// Attach an already-watermarked image to a unit
    Add {
        unit: String,
        /// JPEG file produced by the capture pipeline
        file: PathBuf,
        /// Pixel width reported by the capture pipeline
        #[arg(long, default_value = "0")]
        width: u32,
        /// Pixel height reported by the capture pipeline
        #[arg(long, default_value = "0")]
        height: u32,
    },

    /// Detach a unit's photo by its 1-based position
    Remove { unit: String, index: usize },
}

pub async fn run(args: PhotoArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let mut session = super::open_session(config).await?;

    match args.command {
        PhotoCommands::Add {
            unit,
            file,
            width,
            height,
        } => {
            super::ensure_known_unit(session.config(), &unit)?;
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read image {}", file.display()))?;

            session.open_unit(&unit);
            let stored = session
                .capture_photo(CapturedImage {
                    bytes: &bytes,
                    width,
                    height,
                })
                .await;
            session.save_and_close().await;

            match stored.as_ref().and_then(|p| p.blob_id()) {
                Some(id) => success(&format!("Stored photo for {} as {}", unit, id)),
                None => warning("Photo could not be stored; see log for details"),
            }
        }
        PhotoCommands::Remove { unit, index } => {
            super::ensure_known_unit(session.config(), &unit)?;
            session.open_unit(&unit);
            let removed = session.remove_photo(super::zero_based(index)).await;
            session.save_and_close().await;

            if removed.is_some() {
                success(&format!("Removed photo {} from {}", index, unit));
            } else {
                empty(&format!("{} has no photo {}", unit, index));
            }
        }
    }
    Ok(())
}
