use anyhow::Result;
use clap::Args;
use serde_json::Value;

use m365sec_core::{BaseRequestBuilder, NoQuery};

use super::Context;
use crate::output;

#[derive(Args)]
pub struct GetArgs {
    /// Path relative to the Graph base URL, e.g. security/alerts_v2?$top=1,
    /// or an absolute URL such as an @odata.nextLink
    path: String,
}

pub async fn run(ctx: &Context, args: GetArgs) -> Result<()> {
    let graph = ctx.graph()?;
    let url = resolve(graph.adapter().base_url(), &args.path);
    let body = BaseRequestBuilder::with_raw_url(graph.adapter().clone(), "", url)
        .get::<Value, NoQuery>(None)
        .await?;
    match body {
        Some(value) => output::print_json(&value),
        None => Ok(()),
    }
}

fn resolve(base_url: &str, path: &str) -> String {
    if path.starts_with("https://") || path.starts_with("http://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
