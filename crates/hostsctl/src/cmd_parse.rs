use std::path::PathBuf;

use anyhow::{Context, Result};
use fritzhosts::hostlist_core::HostAttributes;
use fritzhosts::hostlist_xml;
use tracing::info;

use crate::common::{self, ViewArgs};

pub fn run(file: PathBuf, view: ViewArgs, json: bool) -> Result<()> {
    let xml = std::fs::read_to_string(&file)
        .with_context(|| format!("read {}", file.display()))?;
    let list = hostlist_xml::parse(&xml)
        .with_context(|| format!("parse host list {}", file.display()))?;
    info!(file = %file.display(), hosts = list.len(), "loaded host list");
    let hosts: Vec<HostAttributes> = list.items.into_iter().map(HostAttributes::from).collect();
    common::report(&hosts, view, json)
}
