use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::json;

use m365sec_core::RequestConfiguration;
use m365sec_graph::models::{Host, Vulnerability};

use super::{Context, ListArgs};
use crate::output::{self, Table, date_time, or_dash};

#[derive(Args)]
pub struct IntelArgs {
    #[command(subcommand)]
    action: IntelAction,
}

#[derive(Subcommand)]
enum IntelAction {
    /// Look up a hostname or IP address
    Host {
        /// Hostname or IP address
        id: String,
    },
    /// List vulnerabilities, highest priority first
    Vulns {
        #[command(flatten)]
        list: ListArgs,
    },
}

pub async fn run(ctx: &Context, args: IntelArgs) -> Result<()> {
    let graph = ctx.graph()?;
    let intel = graph.security().threat_intelligence();

    match args.action {
        IntelAction::Host { id } => {
            let item = intel.hosts().by_host_id(&id);
            let host = item.get(None).await?;
            // Not every host has a reputation yet.
            let reputation = match item.reputation().get(None).await {
                Ok(reputation) => Some(reputation),
                Err(e) if e.is_not_found() => None,
                Err(e) => return Err(e.into()),
            };
            if ctx.json {
                return output::print_json(&json!({"host": host, "reputation": reputation}));
            }
            print_host(&host);
            if let Some(reputation) = reputation {
                println!("Reputation:  {}", or_dash(reputation.classification()));
                println!("Score:       {}", or_dash(reputation.score()));
            }
        }
        IntelAction::Vulns { list } => {
            let query = list.query().orderby(["priorityScore desc"]);
            let first = intel
                .vulnerabilities()
                .get(Some(RequestConfiguration::with_query(query)))
                .await?;
            let items = list.collect(&graph, first).await?;
            if ctx.json {
                return output::print_json(&items);
            }
            print_vulnerabilities(&items);
        }
    }
    Ok(())
}

fn print_host(host: &Host) {
    let kind = match host {
        Host::Hostname(_) => "hostname",
        Host::IpAddress(_) => "ip address",
        Host::Generic(_) => "host",
    };
    println!("Host:        {} ({kind})", or_dash(host.id()));
    println!("First seen:  {}", date_time(host.first_seen_date_time()));
    println!("Last seen:   {}", date_time(host.last_seen_date_time()));
    match host {
        Host::Hostname(h) => {
            println!("Registrar:   {}", or_dash(h.registrar()));
            println!("Registrant:  {}", or_dash(h.registrant()));
        }
        Host::IpAddress(ip) => {
            println!("Country:     {}", or_dash(ip.country_or_region()));
            println!("Provider:    {}", or_dash(ip.hosting_provider()));
            println!("Netblock:    {}", or_dash(ip.netblock()));
        }
        Host::Generic(_) => {}
    }
}

fn print_vulnerabilities(vulns: &[Vulnerability]) {
    if vulns.is_empty() {
        println!("No vulnerabilities.");
        return;
    }
    let mut table = Table::new(["ID", "SEVERITY", "PRIORITY", "EXPLOITED", "PUBLISHED"]);
    for vuln in vulns {
        table.row(vec![
            or_dash(vuln.id()),
            or_dash(vuln.severity()),
            or_dash(vuln.priority_score()),
            match vuln.active_exploits_observed() {
                Some(true) => "yes".into(),
                Some(false) => "no".into(),
                None => "-".into(),
            },
            date_time(vuln.published_date_time()),
        ]);
    }
    table.print();
}
