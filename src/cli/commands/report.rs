use crate::cli::output::*;
use clap::Args;
use std::path::Path;

#[derive(Args)]
pub struct ReportArgs {
    /// Contractor to report on (all contractors when omitted)
    pub contractor: Option<String>,

    /// Print only the report text, without headers or photo listings
    #[arg(long)]
    pub plain: bool,
}

pub async fn run(args: ReportArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let session = super::open_session(config).await?;
    let file_date = session.persistence().clock().file_date();

    let reports = match &args.contractor {
        Some(contractor) => vec![session.generate(contractor).await],
        None => {
            if session.report().is_empty() {
                empty("No reports yet.");
                return Ok(());
            }
            session.render_all().await;
            session.renderer().board().reports()
        }
    };

    for report in &reports {
        if args.plain {
            println!("{}\n", report.text);
        } else {
            print_contractor_report(report, &file_date);
        }
    }
    Ok(())
}
