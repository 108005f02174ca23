use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use m365sec_core::{ItemQuery, RequestConfiguration};
use m365sec_graph::models::{AlertClassification, AlertDetermination, Incident, IncidentStatus};

use super::{Context, ListArgs};
use crate::output::{self, Table, date_time, or_dash};

#[derive(Args)]
pub struct IncidentsArgs {
    #[command(subcommand)]
    action: IncidentsAction,
}

#[derive(Subcommand)]
enum IncidentsAction {
    /// List incidents, most recently updated first
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one incident and its alerts
    Get {
        /// Incident ID
        id: String,
    },
    /// Change the triage state of an incident
    Update {
        /// Incident ID
        id: String,
        /// active, inProgress, resolved or redirected
        #[arg(long)]
        status: Option<IncidentStatus>,
        #[arg(long)]
        classification: Option<AlertClassification>,
        #[arg(long)]
        determination: Option<AlertDetermination>,
        #[arg(long)]
        assigned_to: Option<String>,
        /// Replace the custom tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Comment recorded when resolving
        #[arg(long)]
        comment: Option<String>,
    },
}

pub async fn run(ctx: &Context, args: IncidentsArgs) -> Result<()> {
    let graph = ctx.graph()?;
    let incidents = graph.security().incidents();

    match args.action {
        IncidentsAction::List { list } => {
            let query = list.query().orderby(["lastUpdateDateTime desc"]);
            let first = incidents
                .get(Some(RequestConfiguration::with_query(query)))
                .await?;
            let items = list.collect(&graph, first).await?;
            if ctx.json {
                return output::print_json(&items);
            }
            print_table(&items);
        }
        IncidentsAction::Get { id } => {
            let config = RequestConfiguration::with_query(ItemQuery::new().expand(["alerts"]));
            let incident = incidents.by_incident_id(&id).get(Some(config)).await?;
            if ctx.json {
                return output::print_json(&incident);
            }
            print_details(&incident);
        }
        IncidentsAction::Update {
            id,
            status,
            classification,
            determination,
            assigned_to,
            tags,
            comment,
        } => {
            let mut update = Incident::new();
            let mut changed = false;
            if status.is_some() {
                update.set_status(status);
                changed = true;
            }
            if classification.is_some() {
                update.set_classification(classification);
                changed = true;
            }
            if determination.is_some() {
                update.set_determination(determination);
                changed = true;
            }
            if assigned_to.is_some() {
                update.set_assigned_to(assigned_to);
                changed = true;
            }
            if !tags.is_empty() {
                update.set_custom_tags(Some(tags));
                changed = true;
            }
            if comment.is_some() {
                update.set_resolving_comment(comment);
                changed = true;
            }
            if !changed {
                anyhow::bail!("nothing to update");
            }

            let updated = incidents.by_incident_id(&id).patch(&update, None).await?;
            match updated {
                Some(incident) if ctx.json => output::print_json(&incident)?,
                _ => println!("{} incident {id}", style("Updated").green()),
            }
        }
    }
    Ok(())
}

fn print_table(incidents: &[Incident]) {
    if incidents.is_empty() {
        println!("No incidents.");
        return;
    }
    let mut table = Table::new(["ID", "UPDATED", "SEVERITY", "STATUS", "ASSIGNED TO", "NAME"]);
    for incident in incidents {
        table.row(vec![
            or_dash(incident.id()),
            date_time(incident.last_update_date_time()),
            or_dash(incident.severity()),
            or_dash(incident.status()),
            or_dash(incident.assigned_to()),
            or_dash(incident.display_name()),
        ]);
    }
    table.print();
}

fn print_details(incident: &Incident) {
    println!("Incident:       {}", or_dash(incident.id()));
    println!("Name:           {}", or_dash(incident.display_name()));
    println!("Severity:       {}", or_dash(incident.severity()));
    println!("Status:         {}", or_dash(incident.status()));
    println!("Classification: {}", or_dash(incident.classification()));
    println!("Determination:  {}", or_dash(incident.determination()));
    println!("Assigned to:    {}", or_dash(incident.assigned_to()));
    println!("Created:        {}", date_time(incident.created_date_time()));
    println!("Updated:        {}", date_time(incident.last_update_date_time()));
    let tags = incident.custom_tags().unwrap_or_default();
    if !tags.is_empty() {
        println!("Tags:           {}", tags.join(", "));
    }

    let alerts = incident.alerts().unwrap_or_default();
    if alerts.is_empty() {
        return;
    }
    println!();
    println!("Alerts ({}):", alerts.len());
    for alert in &alerts {
        println!(
            "  {} [{}] {}",
            or_dash(alert.id()),
            or_dash(alert.severity()),
            or_dash(alert.title())
        );
    }
}
