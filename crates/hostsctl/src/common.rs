use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use fritzhosts::hostlist_core::HostAttributes;
use fritzhosts::{HostRecord, HostsConfig};
use serde::Serialize;
use tracing::debug;

/// Output selection shared by the commands reading a host list.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ViewArgs {
    /// Only list active hosts
    #[arg(long)]
    pub active: bool,
    /// Print every coerced attribute instead of the record summary
    #[arg(long)]
    pub attributes: bool,
}

pub fn config_with_timeout(timeout_ms: u64) -> HostsConfig {
    let config = HostsConfig::default();
    if timeout_ms == 0 {
        config
    } else {
        config.with_timeout(Duration::from_millis(timeout_ms))
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialise JSON output")?;
    println!("{text}");
    Ok(())
}

pub fn records(hosts: &[HostAttributes], active_only: bool) -> Result<Vec<HostRecord>> {
    let mut records = Vec::with_capacity(hosts.len());
    for (idx, host) in hosts.iter().enumerate() {
        let record = HostRecord::from_attributes(host)
            .with_context(|| format!("convert host item {idx}"))?;
        if active_only && !record.status {
            continue;
        }
        records.push(record);
    }
    debug!(total = hosts.len(), shown = records.len(), "host records");
    Ok(records)
}

pub fn report(hosts: &[HostAttributes], view: ViewArgs, json: bool) -> Result<()> {
    if view.attributes {
        let mut snapshots = Vec::with_capacity(hosts.len());
        for host in hosts {
            if view.active && !host.get_bool("Active").context("read Active")? {
                continue;
            }
            snapshots.push(host);
        }
        if json {
            let values = snapshots
                .iter()
                .map(|host| host.attributes())
                .collect::<Result<Vec<_>, _>>()
                .context("coerce host attributes")?;
            return print_json(&values);
        }
        for (idx, host) in snapshots.iter().enumerate() {
            if idx > 0 {
                println!();
            }
            println!("{host}");
        }
        return Ok(());
    }

    let records = records(hosts, view.active)?;
    if json {
        return print_json(&records);
    }
    if records.is_empty() {
        println!("No hosts listed.");
        return Ok(());
    }
    println!("{}", table_row(["IP", "MAC", "NAME", "ACTIVE", "INTERFACE"]));
    for host in &records {
        println!("{}", record_row(host));
    }
    Ok(())
}

fn record_row(host: &HostRecord) -> String {
    table_row([
        dash(&host.ip),
        dash(&host.mac),
        dash(&host.name),
        if host.status { "yes" } else { "no" },
        dash(&host.interface_type),
    ])
}

fn table_row(columns: [&str; 5]) -> String {
    let [ip, mac, name, active, interface] = columns;
    format!("{ip:<16} {mac:<18} {name:<20} {active:<7} {interface}")
}

fn dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
