use crate::cli::output::*;
use crate::report::ReportGenerator;
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ExportArgs {
    /// Output directory for the photo files
    #[arg(short, long)]
    pub out: PathBuf,

    /// Only export this contractor's photos
    #[arg(long)]
    pub contractor: Option<String>,

    /// Also write each contractor's report text as <contractor>.txt
    #[arg(long)]
    pub with_text: bool,
}

pub async fn run(args: ExportArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let session = super::open_session(config).await?;
    let file_date = session.persistence().clock().file_date();
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    let generator = ReportGenerator::new(session.report(), session.persistence());
    let reports = match &args.contractor {
        Some(contractor) => vec![generator.generate(contractor).await],
        None => {
            generator
                .generate_all(&session.config().report.priority)
                .await
        }
    };

    let mut written = 0;
    for report in &reports {
        for photo in &report.photos {
            let path = args.out.join(photo.filename(&file_date));
            std::fs::write(&path, &photo.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written += 1;
        }
        if args.with_text {
            let path = args.out.join(format!("{}.txt", report.contractor));
            std::fs::write(&path, &report.text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    if written == 0 {
        empty("No photos to export");
    } else {
        success(&format!("Exported {} photo(s) to {}", written, args.out.display()));
    }
    Ok(())
}
