use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde_json::json;

use super::Context;
use crate::config::{AppConfig, TenantConfig};
use crate::output::{self, Table};

#[derive(Args)]
pub struct TenantArgs {
    #[command(subcommand)]
    action: TenantAction,
}

#[derive(Subcommand)]
enum TenantAction {
    /// Add a new tenant
    Add {
        /// Tenant display name
        #[arg(long)]
        name: String,
        /// Entra ID tenant ID
        #[arg(long)]
        tenant_id: String,
        /// App registration client ID
        #[arg(long)]
        client_id: String,
        /// App registration client secret
        #[arg(long)]
        client_secret: String,
    },
    /// List configured tenants
    List,
    /// Remove a tenant
    Remove {
        /// Tenant name to remove
        name: String,
    },
}

pub async fn run(ctx: &Context, args: TenantArgs) -> Result<()> {
    match args.action {
        TenantAction::Add {
            name,
            tenant_id,
            client_id,
            client_secret,
        } => {
            let mut config = AppConfig::load_or_default(&ctx.config_path)?;
            if config.find_tenant(&name).is_some() {
                anyhow::bail!("tenant '{name}' already exists");
            }
            config.tenants.push(TenantConfig {
                name: name.clone(),
                tenant_id,
                client_id,
                client_secret,
            });
            config.save(&ctx.config_path)?;
            println!("Tenant '{}' added.", style(&name).green());
        }
        TenantAction::List => {
            let config = AppConfig::load_or_default(&ctx.config_path)?;
            if ctx.json {
                // Secrets stay out of the output.
                let tenants: Vec<_> = config
                    .tenants
                    .iter()
                    .map(|t| json!({"name": t.name, "tenantId": t.tenant_id, "clientId": t.client_id}))
                    .collect();
                return output::print_json(&tenants);
            }
            if config.tenants.is_empty() {
                println!("No tenants configured.");
                return Ok(());
            }
            let mut table = Table::new(["NAME", "TENANT ID", "CLIENT ID"]);
            for t in &config.tenants {
                table.row(vec![t.name.clone(), t.tenant_id.clone(), t.client_id.clone()]);
            }
            table.print();
        }
        TenantAction::Remove { name } => {
            let mut config = AppConfig::load(&ctx.config_path)?;
            let before = config.tenants.len();
            config
                .tenants
                .retain(|t| !t.name.eq_ignore_ascii_case(&name));
            if config.tenants.len() == before {
                anyhow::bail!("tenant '{name}' not found");
            }
            config.save(&ctx.config_path)?;
            println!("Tenant '{name}' removed.");
        }
    }
    Ok(())
}
