use anyhow::Result;
use clap::Args;

use m365sec_core::{CollectionQuery, RequestConfiguration};
use m365sec_graph::models::SecureScore;

use super::Context;
use crate::output::{self, Table, date_time, or_dash};

#[derive(Args)]
pub struct ScoresArgs {
    /// Number of daily scores to show
    #[arg(long, default_value_t = 7)]
    days: i32,

    /// Break the latest score down by control
    #[arg(long)]
    controls: bool,
}

pub async fn run(ctx: &Context, args: ScoresArgs) -> Result<()> {
    let graph = ctx.graph()?;
    let query = CollectionQuery::new()
        .top(args.days)
        .orderby(["createdDateTime desc"]);
    let scores = graph
        .security()
        .secure_scores()
        .get(Some(RequestConfiguration::with_query(query)))
        .await?
        .value;

    if ctx.json {
        return output::print_json(&scores);
    }
    if scores.is_empty() {
        println!("No secure scores recorded yet.");
        return Ok(());
    }

    let mut table = Table::new(["DATE", "SCORE", "MAX", "PERCENT"]);
    for score in &scores {
        table.row(vec![
            date_time(score.created_date_time()),
            or_dash(score.current_score().map(|s| format!("{s:.1}"))),
            or_dash(score.max_score().map(|s| format!("{s:.1}"))),
            or_dash(score.percentage().map(|p| format!("{p:.1}%"))),
        ]);
    }
    table.print();

    if args.controls
        && let Some(latest) = scores.first()
    {
        println!();
        print_controls(latest);
    }
    Ok(())
}

fn print_controls(score: &SecureScore) {
    let mut controls = score.control_scores().unwrap_or_default();
    controls.sort_by(|a, b| {
        b.score()
            .unwrap_or(0.0)
            .total_cmp(&a.score().unwrap_or(0.0))
    });
    let mut table = Table::new(["CATEGORY", "CONTROL", "SCORE"]);
    for control in &controls {
        table.row(vec![
            or_dash(control.control_category()),
            or_dash(control.control_name()),
            or_dash(control.score().map(|s| format!("{s:.1}"))),
        ]);
    }
    table.print();
}
