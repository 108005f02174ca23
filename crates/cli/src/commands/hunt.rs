use anyhow::Result;
use clap::Args;

use m365sec_graph::models::{HuntingQueryResults, RunHuntingQueryPostRequestBody};

use super::Context;
use crate::output::{self, Table, json_cell};
use crate::progress;

#[derive(Args)]
pub struct HuntArgs {
    /// KQL query, e.g. "DeviceProcessEvents | take 10"
    query: String,

    /// ISO 8601 lookback window, e.g. P7D
    #[arg(long)]
    timespan: Option<String>,
}

pub async fn run(ctx: &Context, args: HuntArgs) -> Result<()> {
    let graph = ctx.graph()?;
    let mut body = RunHuntingQueryPostRequestBody::with_query(args.query);
    if args.timespan.is_some() {
        body.set_timespan(args.timespan);
    }

    let spinner = progress::create_spinner("Running query...");
    let results = graph.security().run_hunting_query().post(&body, None).await;
    spinner.finish_and_clear();
    let results = results?.unwrap_or_default();

    if ctx.json {
        return output::print_json(&results);
    }
    print_results(&results);
    Ok(())
}

fn print_results(results: &HuntingQueryResults) {
    let rows = results.results().unwrap_or_default();
    if rows.is_empty() {
        println!("No results.");
        return;
    }
    let columns = results.column_names();
    let mut table = Table::new(columns.iter().map(String::as_str));
    for row in &rows {
        let data = row.additional_data();
        table.row(columns.iter().map(|c| json_cell(data.get(c))).collect());
    }
    table.print();
    println!("{} rows", rows.len());
}
