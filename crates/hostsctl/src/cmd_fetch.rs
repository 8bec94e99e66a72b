use anyhow::{Context, Result};
use fritzhosts::{fetch_host_list, ReqwestHttp};
use tracing::info;

use crate::common::{self, ViewArgs};

pub fn run(url: String, timeout_ms: u64, view: ViewArgs, json: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("start tokio runtime")?;
    let config = common::config_with_timeout(timeout_ms);
    let http = ReqwestHttp::new(runtime.handle().clone(), &config)
        .context("create HTTP client")?;
    info!(url = %url, "fetching host list");
    let hosts = fetch_host_list(&http, &url).with_context(|| format!("fetch host list {url}"))?;
    common::report(&hosts, view, json)
}
