pub mod alerts;
pub mod cases;
pub mod get;
pub mod hunt;
pub mod incidents;
pub mod intel;
pub mod scores;
pub mod tenant;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use dialoguer::Confirm;
use tracing::debug;

use m365sec_core::{CollectionQuery, CollectionResponse, Parsable, RequestConfiguration};
use m365sec_graph::GraphServiceClient;

use crate::config::AppConfig;
use crate::progress;

#[derive(Subcommand)]
pub enum Command {
    /// Manage tenants
    Tenant(tenant::TenantArgs),
    /// List, inspect and triage alerts
    Alerts(alerts::AlertsArgs),
    /// List, inspect and triage incidents
    Incidents(incidents::IncidentsArgs),
    /// Work with eDiscovery cases
    Cases(cases::CasesArgs),
    /// Run an advanced hunting query
    Hunt(hunt::HuntArgs),
    /// Show Microsoft Secure Score
    Scores(scores::ScoresArgs),
    /// Look up threat intelligence
    Intel(intel::IntelArgs),
    /// GET any Graph path and print the raw JSON
    Get(get::GetArgs),
}

/// Global options shared by every command.
pub struct Context {
    pub config_path: PathBuf,
    pub tenant: Option<String>,
    pub json: bool,
    pub yes: bool,
}

impl Context {
    pub fn load_config(&self) -> Result<AppConfig> {
        AppConfig::load(&self.config_path)
    }

    /// Client for the selected tenant, configured from the `[graph]` section.
    pub fn graph(&self) -> Result<GraphServiceClient> {
        let config = self.load_config()?;
        let tenant = config.select_tenant(self.tenant.as_deref())?;
        debug!(tenant = %tenant.name, "using tenant");
        let graph = GraphServiceClient::with_client_credentials(
            tenant.credentials(),
            config.graph.authority_host.as_deref(),
            config.graph.client_options(),
        )?;
        Ok(graph)
    }

    /// Ask before a destructive operation. `--yes` skips the prompt.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

/// Paging flags shared by the list commands.
#[derive(clap::Args)]
pub struct ListArgs {
    /// OData filter expression
    #[arg(long)]
    pub filter: Option<String>,

    /// Page size
    #[arg(long, default_value_t = 25)]
    pub top: i32,

    /// Follow every page instead of stopping after the first
    #[arg(long)]
    pub all: bool,
}

impl ListArgs {
    pub fn query(&self) -> CollectionQuery {
        let query = CollectionQuery::new().top(self.top);
        match self.filter {
            Some(ref filter) => query.filter(filter.clone()),
            None => query,
        }
    }

    pub fn config(&self) -> RequestConfiguration<CollectionQuery> {
        RequestConfiguration::with_query(self.query())
    }

    /// The first page's items, or every page's with `--all`.
    pub async fn collect<T: Parsable>(
        &self,
        graph: &GraphServiceClient,
        first: CollectionResponse<T>,
    ) -> Result<Vec<T>> {
        if !self.all {
            return Ok(first.value);
        }
        let spinner = progress::create_spinner("Fetching pages...");
        let mut items = Vec::new();
        graph
            .page_iterator(first)
            .iterate(|item| {
                items.push(item);
                spinner.set_message(format!("Fetched {} items...", items.len()));
                true
            })
            .await?;
        spinner.finish_and_clear();
        Ok(items)
    }
}
