use crate::report::{fallback_link, share_payload};
use clap::Args;
use std::path::Path;

#[derive(Args)]
pub struct ShareArgs {
    pub contractor: String,

    /// Emit a native share payload as JSON instead of a text-only link
    #[arg(long)]
    pub native: bool,

    /// The share target accepts file attachments
    #[arg(long, requires = "native")]
    pub files: bool,
}

pub async fn run(args: ShareArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let session = super::open_session(config).await?;
    let report = session.generate(&args.contractor).await;
    let report_config = &session.config().report;

    if args.native {
        let file_date = session.persistence().clock().file_date();
        let payload = share_payload(&report, &report_config.share_title, &file_date, args.files);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", fallback_link(&report_config.share_fallback_url, &report.text));
    }
    Ok(())
}
