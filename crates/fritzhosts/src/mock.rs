//! In-memory device and HTTP collaborators for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use tr064::{ActionInvoker, Arguments, Tr064Error};

use crate::http::{HttpGet, HttpResponse};
use crate::names;
use crate::HostsError;

pub(crate) const MESH_PATH: &str = "/meshlist.lua?sid=0000";
pub(crate) const HOST_LIST_PATH: &str = "/devicehostlist.lua?sid=0000";

pub(crate) fn host_entry(mac: &str, ip: &str, name: &str, active: bool) -> Arguments {
    Arguments::new()
        .with(names::NEW_IP_ADDRESS, ip)
        .with(names::NEW_ADDRESS_SOURCE, "DHCP")
        .with(names::NEW_LEASE_TIME_REMAINING, 864_000i64)
        .with(names::NEW_MAC_ADDRESS, mac)
        .with(names::NEW_INTERFACE_TYPE, "Ethernet")
        .with(names::NEW_ACTIVE, active)
        .with(names::NEW_HOST_NAME, name)
}

#[derive(Default)]
pub(crate) struct MockDevice {
    hosts: RefCell<Vec<Arguments>>,
    failure: Option<(u32, Tr064Error)>,
    wol: RefCell<HashMap<String, bool>>,
    calls: RefCell<Vec<(String, Arguments)>>,
}

impl MockDevice {
    pub(crate) fn with_hosts(hosts: Vec<Arguments>) -> Self {
        Self {
            hosts: RefCell::new(hosts),
            ..Self::default()
        }
    }

    /// Fail `GetGenericHostEntry` at `index` with `err`.
    pub(crate) fn failing_at(mut self, index: u32, err: Tr064Error) -> Self {
        self.failure = Some((index, err));
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, Arguments)> {
        self.calls.borrow().clone()
    }

    pub(crate) fn requested_indices(&self) -> Vec<i64> {
        self.calls
            .borrow()
            .iter()
            .filter(|(action, _)| action == names::GET_GENERIC_HOST_ENTRY)
            .filter_map(|(_, args)| args.int(names::NEW_INDEX).and_then(Result::ok))
            .collect()
    }

    fn find(&self, field: &str, value: &str) -> Option<usize> {
        self.hosts
            .borrow()
            .iter()
            .position(|host| host.text(field) == Some(value))
    }

    fn mac_argument(args: &Arguments) -> Result<String, Tr064Error> {
        let mac = args.text(names::NEW_MAC_ADDRESS).unwrap_or_default();
        let well_formed = mac.len() == 17 && mac.split(':').count() == 6;
        if !well_formed {
            return Err(Tr064Error::from_upnp(402, "Invalid Args"));
        }
        Ok(mac.to_string())
    }

    fn known_mac(&self, args: &Arguments) -> Result<usize, Tr064Error> {
        let mac = Self::mac_argument(args)?;
        self.find(names::NEW_MAC_ADDRESS, &mac)
            .ok_or_else(|| Tr064Error::from_upnp(714, "NoSuchEntryInArray"))
    }
}

impl ActionInvoker for MockDevice {
    fn call_action(
        &self,
        service: &str,
        action: &str,
        arguments: &Arguments,
    ) -> Result<Arguments, Tr064Error> {
        self.calls
            .borrow_mut()
            .push((action.to_string(), arguments.clone()));
        if service != names::SERVICE {
            return Err(Tr064Error::Action(format!("unknown service {service}")));
        }
        match action {
            names::GET_HOST_NUMBER_OF_ENTRIES => Ok(Arguments::new().with(
                names::NEW_HOST_NUMBER_OF_ENTRIES,
                self.hosts.borrow().len() as i64,
            )),
            names::GET_GENERIC_HOST_ENTRY => {
                let index = arguments
                    .int(names::NEW_INDEX)
                    .and_then(Result::ok)
                    .ok_or_else(|| Tr064Error::from_upnp(402, "Invalid Args"))?;
                if let Some((fail_index, err)) = &self.failure {
                    if i64::from(*fail_index) == index {
                        return Err(err.clone());
                    }
                }
                usize::try_from(index)
                    .ok()
                    .and_then(|idx| self.hosts.borrow().get(idx).cloned())
                    .ok_or_else(|| Tr064Error::from_upnp(713, "SpecifiedArrayIndexInvalid"))
            }
            names::GET_SPECIFIC_HOST_ENTRY => {
                let idx = self.known_mac(arguments)?;
                let hosts = self.hosts.borrow();
                Ok(hosts[idx]
                    .iter()
                    .filter(|(name, _)| *name != names::NEW_MAC_ADDRESS)
                    .map(|(name, value)| (name, value.clone()))
                    .collect())
            }
            names::GET_SPECIFIC_HOST_ENTRY_BY_IP => {
                let ip = arguments.text(names::NEW_IP_ADDRESS).unwrap_or_default();
                let idx = self
                    .find(names::NEW_IP_ADDRESS, ip)
                    .ok_or_else(|| Tr064Error::from_upnp(714, "NoSuchEntryInArray"))?;
                let hosts = self.hosts.borrow();
                Ok(hosts[idx]
                    .iter()
                    .filter(|(name, _)| *name != names::NEW_IP_ADDRESS)
                    .map(|(name, value)| (name, value.clone()))
                    .collect::<Arguments>()
                    .with("NewX_AVM-DE_Speed", 1000i64)
                    .with("NewX_AVM-DE_UpdateAvailable", false))
            }
            names::SET_HOST_NAME => {
                let idx = self.known_mac(arguments)?;
                let name = arguments.text(names::NEW_HOST_NAME).unwrap_or_default();
                let mut hosts = self.hosts.borrow_mut();
                hosts[idx] = hosts[idx].clone().with(names::NEW_HOST_NAME, name);
                Ok(Arguments::new())
            }
            names::GET_AUTO_WOL => {
                let mac = Self::mac_argument(arguments)?;
                let enabled = self.wol.borrow().get(&mac).copied().unwrap_or(false);
                Ok(Arguments::new().with(names::NEW_AUTO_WOL_ENABLED, enabled))
            }
            names::SET_AUTO_WOL => {
                let mac = Self::mac_argument(arguments)?;
                let enabled = arguments
                    .flag(names::NEW_AUTO_WOL_ENABLED)
                    .and_then(Result::ok)
                    .ok_or_else(|| Tr064Error::from_upnp(402, "Invalid Args"))?;
                self.wol.borrow_mut().insert(mac, enabled);
                Ok(Arguments::new())
            }
            names::HOST_DO_UPDATE => {
                self.known_mac(arguments)?;
                Ok(Arguments::new())
            }
            names::GET_MESH_LIST_PATH => {
                Ok(Arguments::new().with(names::NEW_MESH_LIST_PATH, MESH_PATH))
            }
            names::GET_HOST_LIST_PATH => {
                Ok(Arguments::new().with(names::NEW_HOST_LIST_PATH, HOST_LIST_PATH))
            }
            _ => Err(Tr064Error::from_upnp(401, "Invalid Action")),
        }
    }
}

#[derive(Default)]
pub(crate) struct MockHttp {
    responses: HashMap<String, HttpResponse>,
    requests: RefCell<Vec<String>>,
}

impl MockHttp {
    pub(crate) fn with(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            HttpResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl HttpGet for MockHttp {
    fn get(&self, url: &str) -> Result<HttpResponse, HostsError> {
        self.requests.borrow_mut().push(url.to_string());
        Ok(self.responses.get(url).cloned().unwrap_or(HttpResponse {
            status: 404,
            body: String::new(),
        }))
    }
}
