use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use m365sec_core::RequestConfiguration;
use m365sec_graph::models::{Alert, AlertClassification, AlertDetermination, AlertStatus};

use super::{Context, ListArgs};
use crate::output::{self, Table, date_time, or_dash};

#[derive(Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    action: AlertsAction,
}

#[derive(Subcommand)]
enum AlertsAction {
    /// List alerts, newest first
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one alert
    Get {
        /// Alert ID
        id: String,
    },
    /// Change the triage state of an alert
    Update {
        /// Alert ID
        id: String,
        /// new, inProgress or resolved
        #[arg(long)]
        status: Option<AlertStatus>,
        /// truePositive, falsePositive or informationalExpectedActivity
        #[arg(long)]
        classification: Option<AlertClassification>,
        /// e.g. malware, phishing, securityTesting
        #[arg(long)]
        determination: Option<AlertDetermination>,
        /// Owner of the alert
        #[arg(long)]
        assigned_to: Option<String>,
    },
}

pub async fn run(ctx: &Context, args: AlertsArgs) -> Result<()> {
    let graph = ctx.graph()?;
    let alerts = graph.security().alerts_v2();

    match args.action {
        AlertsAction::List { list } => {
            let query = list.query().orderby(["createdDateTime desc"]);
            let first = alerts
                .get(Some(RequestConfiguration::with_query(query)))
                .await?;
            let items = list.collect(&graph, first).await?;
            if ctx.json {
                return output::print_json(&items);
            }
            print_table(&items);
        }
        AlertsAction::Get { id } => {
            let alert = alerts.by_alert_id(&id).get(None).await?;
            if ctx.json {
                return output::print_json(&alert);
            }
            print_details(&alert);
        }
        AlertsAction::Update {
            id,
            status,
            classification,
            determination,
            assigned_to,
        } => {
            if status.is_none()
                && classification.is_none()
                && determination.is_none()
                && assigned_to.is_none()
            {
                anyhow::bail!(
                    "nothing to update: pass --status, --classification, --determination or --assigned-to"
                );
            }
            // Only the fields passed on the command line are sent.
            let mut update = Alert::new();
            if status.is_some() {
                update.set_status(status);
            }
            if classification.is_some() {
                update.set_classification(classification);
            }
            if determination.is_some() {
                update.set_determination(determination);
            }
            if assigned_to.is_some() {
                update.set_assigned_to(assigned_to);
            }
            let updated = alerts.by_alert_id(&id).patch(&update, None).await?;
            match updated {
                Some(alert) if ctx.json => output::print_json(&alert)?,
                Some(alert) => {
                    println!("{} alert {id}", style("Updated").green());
                    print_details(&alert);
                }
                None => println!("{} alert {id}", style("Updated").green()),
            }
        }
    }
    Ok(())
}

fn print_table(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("No alerts.");
        return;
    }
    let mut table = Table::new(["ID", "CREATED", "SEVERITY", "STATUS", "SOURCE", "TITLE"]);
    for alert in alerts {
        table.row(vec![
            or_dash(alert.id()),
            date_time(alert.created_date_time()),
            or_dash(alert.severity()),
            or_dash(alert.status()),
            or_dash(alert.service_source()),
            or_dash(alert.title()),
        ]);
    }
    table.print();
}

fn print_details(alert: &Alert) {
    println!("Alert:          {}", or_dash(alert.id()));
    println!("Title:          {}", or_dash(alert.title()));
    println!("Severity:       {}", or_dash(alert.severity()));
    println!("Status:         {}", or_dash(alert.status()));
    println!("Classification: {}", or_dash(alert.classification()));
    println!("Determination:  {}", or_dash(alert.determination()));
    println!("Assigned to:    {}", or_dash(alert.assigned_to()));
    println!("Source:         {}", or_dash(alert.service_source()));
    println!("Incident:       {}", or_dash(alert.incident_id()));
    println!("Created:        {}", date_time(alert.created_date_time()));
    println!("Last activity:  {}", date_time(alert.last_activity_date_time()));
    if let Some(techniques) = alert.mitre_techniques()
        && !techniques.is_empty()
    {
        println!("MITRE:          {}", techniques.join(", "));
    }
    if let Some(url) = alert.alert_web_url() {
        println!("Portal:         {url}");
    }
    if let Some(description) = alert.description() {
        println!();
        println!("{description}");
    }
}
