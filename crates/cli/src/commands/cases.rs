use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use m365sec_graph::models::{CaseOperation, EdiscoveryCase, EdiscoveryCustodian};

use super::{Context, ListArgs};
use crate::output::{self, Table, date_time, or_dash};
use crate::progress;

#[derive(Args)]
pub struct CasesArgs {
    #[command(subcommand)]
    action: CasesAction,
}

#[derive(Subcommand)]
enum CasesAction {
    /// List eDiscovery cases
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Create a case
    Create {
        /// Case name
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Reference in an external system
        #[arg(long)]
        external_id: Option<String>,
    },
    /// Close a case
    Close {
        /// Case ID
        id: String,
    },
    /// Reopen a closed case
    Reopen {
        /// Case ID
        id: String,
    },
    /// List the custodians of a case, or add new ones
    Custodians {
        /// Case ID
        case_id: String,
        /// Add a custodian by email address (repeatable)
        #[arg(long = "add")]
        add: Vec<String>,
    },
    /// List long-running operations of a case
    Operations {
        /// Case ID
        case_id: String,
    },
}

pub async fn run(ctx: &Context, args: CasesArgs) -> Result<()> {
    let graph = ctx.graph()?;
    let cases = graph.security().cases().ediscovery_cases();

    match args.action {
        CasesAction::List { list } => {
            let first = cases.get(Some(list.config())).await?;
            let items = list.collect(&graph, first).await?;
            if ctx.json {
                return output::print_json(&items);
            }
            print_cases(&items);
        }
        CasesAction::Create {
            name,
            description,
            external_id,
        } => {
            let mut case = EdiscoveryCase::new();
            case.set_display_name(Some(name));
            if description.is_some() {
                case.set_description(description);
            }
            if external_id.is_some() {
                case.set_external_id(external_id);
            }
            let created = cases
                .post(&case, None)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Graph returned no case"))?;
            if ctx.json {
                return output::print_json(&created);
            }
            println!(
                "{} case {} ({})",
                style("Created").green(),
                or_dash(created.display_name()),
                or_dash(created.id())
            );
        }
        CasesAction::Close { id } => {
            if !ctx.confirm(&format!("Close case {id}?"))? {
                println!("Aborted.");
                return Ok(());
            }
            let spinner = progress::create_spinner(&format!("Closing case {id}..."));
            cases.by_ediscovery_case_id(&id).close().post(None).await?;
            spinner.finish_with_message(format!("Case {id} closed"));
        }
        CasesAction::Reopen { id } => {
            cases.by_ediscovery_case_id(&id).reopen().post(None).await?;
            println!("{} case {id}", style("Reopened").green());
        }
        CasesAction::Custodians { case_id, add } => {
            let custodians = cases.by_ediscovery_case_id(&case_id).custodians();
            if add.is_empty() {
                let items = custodians.get_all(None).await?;
                if ctx.json {
                    return output::print_json(&items);
                }
                print_custodians(&items);
                return Ok(());
            }
            let mut added = Vec::with_capacity(add.len());
            for email in add {
                let mut custodian = EdiscoveryCustodian::new();
                custodian.set_email(Some(email.clone()));
                let created = custodians.post(&custodian, None).await?;
                if !ctx.json {
                    println!("{} custodian {email}", style("Added").green());
                }
                added.extend(created);
            }
            if ctx.json {
                output::print_json(&added)?;
            }
        }
        CasesAction::Operations { case_id } => {
            let items = cases
                .by_ediscovery_case_id(&case_id)
                .operations()
                .get_all(None)
                .await?;
            if ctx.json {
                return output::print_json(&items);
            }
            print_operations(&items);
        }
    }
    Ok(())
}

fn print_cases(cases: &[EdiscoveryCase]) {
    if cases.is_empty() {
        println!("No cases.");
        return;
    }
    let mut table = Table::new(["ID", "CREATED", "STATUS", "NAME"]);
    for case in cases {
        table.row(vec![
            or_dash(case.id()),
            date_time(case.created_date_time()),
            or_dash(case.status()),
            or_dash(case.display_name()),
        ]);
    }
    table.print();
}

fn print_custodians(custodians: &[EdiscoveryCustodian]) {
    if custodians.is_empty() {
        println!("No custodians.");
        return;
    }
    let mut table = Table::new(["ID", "EMAIL", "STATUS", "HOLD"]);
    for custodian in custodians {
        table.row(vec![
            or_dash(custodian.id()),
            or_dash(custodian.email()),
            or_dash(custodian.status()),
            or_dash(custodian.hold_status()),
        ]);
    }
    table.print();
}

fn print_operations(operations: &[CaseOperation]) {
    if operations.is_empty() {
        println!("No operations.");
        return;
    }
    let mut table = Table::new(["ID", "ACTION", "STATUS", "PROGRESS"]);
    for op in operations {
        table.row(vec![
            or_dash(op.id()),
            or_dash(op.action()),
            or_dash(op.status()),
            op.percent_progress()
                .map(|p| format!("{p}%"))
                .unwrap_or_else(|| "-".into()),
        ]);
    }
    table.print();
}
