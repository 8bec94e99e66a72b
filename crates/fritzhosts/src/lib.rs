#![cfg_attr(docsrs, feature(doc_cfg))]
//! Known-host access for TR-064 routers: enumeration, lookups, status, mesh
//! topology and the bulk host list feed.
//!
//! ```rust,no_run
//! use fritzhosts::{HostStatus, Hosts, HostsConfig, HostsError, HttpGet, HttpResponse};
//! use fritzhosts::tr064::{ActionInvoker, Arguments, Tr064Error};
//!
//! # struct Soap;
//! # impl ActionInvoker for Soap {
//! #     fn call_action(&self, _s: &str, _a: &str, _args: &Arguments) -> Result<Arguments, Tr064Error> {
//! #         Err(Tr064Error::from_upnp(713, "SpecifiedArrayIndexInvalid"))
//! #     }
//! # }
//! # struct Web;
//! # impl HttpGet for Web {
//! #     fn get(&self, _url: &str) -> Result<HttpResponse, HostsError> {
//! #         Ok(HttpResponse { status: 200, body: "{}".into() })
//! #     }
//! # }
//! # fn run() -> Result<(), HostsError> {
//! let hosts = Hosts::new(Soap, Web, HostsConfig::default());
//! for host in hosts.active_hosts()? {
//!     println!("{:<16} {:<18} {}", host.ip, host.mac, host.name);
//! }
//! if hosts.host_status("AA:BB:CC:00:11:22")? == HostStatus::Unknown {
//!     println!("device not known to the router");
//! }
//! # Ok(())
//! # }
//! ```

pub use hostlist_core;
pub use hostlist_xml;
pub use tr064;

pub mod config;
pub mod entries;
pub mod http;
pub mod names;
pub mod record;

#[cfg(test)]
mod mock;

use hostlist_core::{AttrError, AttributeSnapshot};
use hostlist_xml::XmlError;
use thiserror::Error;
use tr064::{ActionInvoker, Arguments, Tr064Error};
use tracing::{debug, info, warn};

pub use config::HostsConfig;
pub use entries::{HostEntries, HostInfos};
pub use http::{fetch_host_list, HttpGet, HttpResponse, ReqwestHttp};
pub use record::HostRecord;

/// Error type produced by the host facade.
#[derive(Debug, Error)]
pub enum HostsError {
    /// The remote action failed (argument, lookup, out-of-range or action error).
    #[error(transparent)]
    Action(#[from] Tr064Error),
    /// A typed field held a value that cannot be converted.
    #[error(transparent)]
    Conversion(#[from] AttrError),
    /// The host list document could not be parsed.
    #[error(transparent)]
    Xml(#[from] XmlError),
    /// Fetching a document over HTTP failed.
    #[error("retrieval: {0}")]
    Retrieval(String),
    /// The topology body is not valid JSON.
    #[error("topology: {0}")]
    Topology(String),
}

/// Activity of a host as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStatus {
    /// The device knows the host; `true` when it is active.
    Known(bool),
    /// The device does not recognise the MAC address (or rejected it).
    Unknown,
}

impl HostStatus {
    pub fn is_active(self) -> bool {
        matches!(self, HostStatus::Known(true))
    }
}

/// Mesh topology as raw body text or decoded JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshTopology {
    Raw(String),
    Json(serde_json::Value),
}

/// Host facade combining an [`ActionInvoker`] with an [`HttpGet`] transport.
#[derive(Debug)]
pub struct Hosts<A: ActionInvoker, H: HttpGet> {
    invoker: A,
    http: H,
    config: HostsConfig,
}

impl<A: ActionInvoker, H: HttpGet> Hosts<A, H> {
    pub fn new(invoker: A, http: H, config: HostsConfig) -> Self {
        Self {
            invoker,
            http,
            config,
        }
    }

    pub fn invoker(&self) -> &A {
        &self.invoker
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn config(&self) -> &HostsConfig {
        &self.config
    }

    /// Number of hosts currently known to the device.
    pub fn host_numbers(&self) -> Result<u32, HostsError> {
        let result = self.action(names::GET_HOST_NUMBER_OF_ENTRIES, Arguments::new())?;
        let count = required_int(&result, names::NEW_HOST_NUMBER_OF_ENTRIES)?;
        u32::try_from(count).map_err(|_| {
            AttrError::Conversion {
                name: names::NEW_HOST_NUMBER_OF_ENTRIES.to_string(),
                value: count.to_string(),
            }
            .into()
        })
    }

    /// Raw entry at the zero based `index` of the host table.
    pub fn generic_host_entry(&self, index: u32) -> Result<Arguments, HostsError> {
        generic_host_entry(&self.invoker, index)
    }

    /// Lazily walk the host table yielding raw entries with device field names.
    pub fn generic_host_entries(&self) -> HostEntries<'_, A> {
        HostEntries::new(&self.invoker)
    }

    /// Lazily walk the host table yielding normalized records.
    pub fn hosts_info_iter(&self) -> HostInfos<'_, A> {
        HostInfos::new(&self.invoker)
    }

    /// All hosts of the table as normalized records.
    pub fn hosts_info(&self) -> Result<Vec<HostRecord>, HostsError> {
        let hosts = self.hosts_info_iter().collect::<Result<Vec<_>, _>>()?;
        info!(count = hosts.len(), "enumerated hosts");
        Ok(hosts)
    }

    /// Hosts whose status is active.
    pub fn active_hosts(&self) -> Result<Vec<HostRecord>, HostsError> {
        let mut hosts = self.hosts_info()?;
        hosts.retain(|host| host.status);
        debug!(count = hosts.len(), "active hosts");
        Ok(hosts)
    }

    /// Raw entry of the host with `mac`.
    pub fn specific_host_entry(&self, mac: &str) -> Result<Arguments, HostsError> {
        self.action(
            names::GET_SPECIFIC_HOST_ENTRY,
            Arguments::new().with(names::NEW_MAC_ADDRESS, mac),
        )
    }

    /// Raw entry of the host with `ip`, including speed and update details.
    pub fn specific_host_entry_by_ip(&self, ip: &str) -> Result<Arguments, HostsError> {
        self.action(
            names::GET_SPECIFIC_HOST_ENTRY_BY_IP,
            Arguments::new().with(names::NEW_IP_ADDRESS, ip),
        )
    }

    /// Normalized record of the host with `mac`.
    pub fn host_by_mac(&self, mac: &str) -> Result<HostRecord, HostsError> {
        let entry = self.specific_host_entry(mac)?;
        let mut record = HostRecord::from_entry(&entry)?;
        if record.mac.is_empty() {
            record.mac = mac.to_string();
        }
        Ok(record)
    }

    /// Normalized record of the host with `ip`.
    pub fn host_by_ip(&self, ip: &str) -> Result<HostRecord, HostsError> {
        let entry = self.specific_host_entry_by_ip(ip)?;
        let mut record = HostRecord::from_entry(&entry)?;
        if record.ip.is_empty() {
            record.ip = ip.to_string();
        }
        Ok(record)
    }

    /// Activity of the host with `mac`.
    ///
    /// A MAC the device rejects or does not know yields [`HostStatus::Unknown`];
    /// both cases are merged. Every other failure propagates.
    pub fn host_status(&self, mac: &str) -> Result<HostStatus, HostsError> {
        match self.specific_host_entry(mac) {
            Ok(entry) => {
                let active = record::entry_flag(&entry, names::NEW_ACTIVE)?.unwrap_or(false);
                Ok(HostStatus::Known(active))
            }
            Err(HostsError::Action(err)) if err.is_unknown_key() => {
                warn!(mac, error = %err, "host status unknown");
                Ok(HostStatus::Unknown)
            }
            Err(err) => Err(err),
        }
    }

    /// Host name of the host with `mac`.
    pub fn host_name(&self, mac: &str) -> Result<String, HostsError> {
        let entry = self.specific_host_entry(mac)?;
        Ok(record::entry_text(&entry, names::NEW_HOST_NAME))
    }

    /// Rename the host with `mac`.
    pub fn set_host_name(&self, mac: &str, name: &str) -> Result<(), HostsError> {
        let args = Arguments::new()
            .with(names::NEW_MAC_ADDRESS, mac)
            .with(names::NEW_HOST_NAME, name);
        self.action(names::SET_HOST_NAME, args)?;
        info!(mac, name, "host renamed");
        Ok(())
    }

    /// Whether a wake on LAN signal is sent to `mac` on remote access.
    pub fn wakeonlan_status(&self, mac: &str) -> Result<bool, HostsError> {
        let result = self.action(
            names::GET_AUTO_WOL,
            Arguments::new().with(names::NEW_MAC_ADDRESS, mac),
        )?;
        required_flag(&result, names::NEW_AUTO_WOL_ENABLED)
    }

    /// Enable or disable the automatic wake on LAN signal for `mac`.
    pub fn set_wakeonlan_status(&self, mac: &str, enabled: bool) -> Result<(), HostsError> {
        let args = Arguments::new()
            .with(names::NEW_MAC_ADDRESS, mac)
            .with(names::NEW_AUTO_WOL_ENABLED, enabled);
        self.action(names::SET_AUTO_WOL, args)?;
        Ok(())
    }

    /// Ask the host with `mac` to run a system update.
    ///
    /// Returns as soon as the device accepted the request; the update itself
    /// runs on the host afterwards.
    pub fn run_host_update(&self, mac: &str) -> Result<(), HostsError> {
        self.action(
            names::HOST_DO_UPDATE,
            Arguments::new().with(names::NEW_MAC_ADDRESS, mac),
        )?;
        info!(mac, "host update triggered");
        Ok(())
    }

    /// Mesh network topology, as body text when `raw` is set, decoded JSON otherwise.
    pub fn mesh_topology(&self, raw: bool) -> Result<MeshTopology, HostsError> {
        let result = self.action(names::GET_MESH_LIST_PATH, Arguments::new())?;
        let path = required_text(&result, names::NEW_MESH_LIST_PATH)?;
        let url = self.config.url_for(path);
        debug!(url = %url, "fetching mesh topology");
        let response = self.http.get(&url)?;
        if !response.is_success() {
            warn!(status = response.status, "mesh topology request failed");
            return Err(Tr064Error::Action(format!(
                "Error {}: Device has no access to topology information.",
                response.status
            ))
            .into());
        }
        if raw {
            return Ok(MeshTopology::Raw(response.body));
        }
        serde_json::from_str(&response.body)
            .map(MeshTopology::Json)
            .map_err(|err| HostsError::Topology(err.to_string()))
    }

    /// Coerced attributes of every host listed in the host list feed.
    pub fn hosts_attributes(&self) -> Result<Vec<AttributeSnapshot>, HostsError> {
        let url = self.host_list_url()?;
        fetch_host_list(&self.http, &url)?
            .iter()
            .map(|host| host.attributes().map_err(HostsError::from))
            .collect()
    }

    /// Hosts of the host list feed as normalized records.
    pub fn hosts_via_xml_feed(&self) -> Result<Vec<HostRecord>, HostsError> {
        let url = self.host_list_url()?;
        let hosts = fetch_host_list(&self.http, &url)?
            .iter()
            .map(|host| HostRecord::from_attributes(host).map_err(HostsError::from))
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = hosts.len(), "hosts from host list feed");
        Ok(hosts)
    }

    fn host_list_url(&self) -> Result<String, HostsError> {
        let result = self.action(names::GET_HOST_LIST_PATH, Arguments::new())?;
        let path = required_text(&result, names::NEW_HOST_LIST_PATH)?;
        Ok(self.config.url_for(path))
    }

    fn action(&self, action: &str, arguments: Arguments) -> Result<Arguments, HostsError> {
        call(&self.invoker, action, &arguments)
    }
}

pub(crate) fn generic_host_entry<A: ActionInvoker + ?Sized>(
    invoker: &A,
    index: u32,
) -> Result<Arguments, HostsError> {
    call(
        invoker,
        names::GET_GENERIC_HOST_ENTRY,
        &Arguments::new().with(names::NEW_INDEX, index),
    )
}

fn call<A: ActionInvoker + ?Sized>(
    invoker: &A,
    action: &str,
    arguments: &Arguments,
) -> Result<Arguments, HostsError> {
    debug!(service = names::SERVICE, action, args = arguments.len(), "call action");
    invoker
        .call_action(names::SERVICE, action, arguments)
        .map_err(HostsError::from)
}

fn required_text<'a>(result: &'a Arguments, name: &str) -> Result<&'a str, HostsError> {
    result
        .text(name)
        .ok_or_else(|| Tr064Error::Action(format!("response lacks {name}")).into())
}

fn required_int(result: &Arguments, name: &str) -> Result<i64, HostsError> {
    record::entry_int(result, name)?
        .ok_or_else(|| Tr064Error::Action(format!("response lacks {name}")).into())
}

fn required_flag(result: &Arguments, name: &str) -> Result<bool, HostsError> {
    record::entry_flag(result, name)?
        .ok_or_else(|| Tr064Error::Action(format!("response lacks {name}")).into())
}
