use crate::cli::output::*;
use clap::Args;
use std::path::Path;

#[derive(Args)]
pub struct UnitsArgs {
    /// Only list units of this contractor
    #[arg(long)]
    pub contractor: Option<String>,
}

pub async fn run(args: UnitsArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let session = super::open_session(config).await?;
    let report = session.report();

    let mut table = unit_table();
    let mut rows = 0;
    for unit in &session.config().site.units {
        let contractor = session.contractor_of(unit);
        if args.contractor.as_deref().is_some_and(|c| c != contractor) {
            continue;
        }
        let (tasks, photos) = report
            .unit(contractor, unit)
            .map(|r| (r.tasks.len(), r.photos.len()))
            .unwrap_or((0, 0));
        add_unit_row(&mut table, unit, contractor, tasks, photos);
        rows += 1;
    }

    section_header("Site Units");
    if rows == 0 {
        empty("No units match");
    } else {
        println!("{}", table);
    }
    Ok(())
}
