//! The normalized host record shared by both enumeration paths.

use hostlist_core::{AttrError, HostAttributes};
use tr064::{ArgValue, Arguments};

use crate::names::{self, feed};

/// One known host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostRecord {
    pub ip: String,
    pub name: String,
    pub mac: String,
    pub status: bool,
    pub interface_type: String,
    pub address_source: String,
    /// Seconds left on the DHCP lease.
    pub lease_time_remaining: i64,
}

impl HostRecord {
    /// Build a record from an action result (`GetGenericHostEntry` and friends).
    ///
    /// Missing fields take their defaults; a present but non-numeric flag or
    /// lease time is a conversion error.
    pub fn from_entry(entry: &Arguments) -> Result<Self, AttrError> {
        Ok(HostRecord {
            ip: entry_text(entry, names::NEW_IP_ADDRESS),
            name: entry_text(entry, names::NEW_HOST_NAME),
            mac: entry_text(entry, names::NEW_MAC_ADDRESS),
            status: entry_flag(entry, names::NEW_ACTIVE)?.unwrap_or(false),
            interface_type: entry_text(entry, names::NEW_INTERFACE_TYPE),
            address_source: entry_text(entry, names::NEW_ADDRESS_SOURCE),
            lease_time_remaining: entry_int(entry, names::NEW_LEASE_TIME_REMAINING)?.unwrap_or(0),
        })
    }

    /// Build a record from one `Item` of the host list feed.
    pub fn from_attributes(attrs: &HostAttributes) -> Result<Self, AttrError> {
        Ok(HostRecord {
            ip: attrs.get_text(feed::IP_ADDRESS).to_string(),
            name: attrs.get_text(feed::HOST_NAME).to_string(),
            mac: attrs.get_text(feed::MAC_ADDRESS).to_string(),
            status: attrs.get_bool(feed::ACTIVE)?,
            interface_type: attrs.get_text(feed::INTERFACE_TYPE).to_string(),
            address_source: attrs.get_text(feed::ADDRESS_SOURCE).to_string(),
            lease_time_remaining: attrs.get_int(feed::LEASE_TIME_REMAINING)?,
        })
    }
}

pub(crate) fn entry_text(entry: &Arguments, name: &str) -> String {
    entry.get(name).map(ArgValue::to_string).unwrap_or_default()
}

pub(crate) fn entry_flag(entry: &Arguments, name: &str) -> Result<Option<bool>, AttrError> {
    entry
        .flag(name)
        .transpose()
        .map_err(|_| conversion(entry, name))
}

pub(crate) fn entry_int(entry: &Arguments, name: &str) -> Result<Option<i64>, AttrError> {
    entry
        .int(name)
        .transpose()
        .map_err(|_| conversion(entry, name))
}

fn conversion(entry: &Arguments, name: &str) -> AttrError {
    AttrError::Conversion {
        name: name.to_string(),
        value: entry_text(entry, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_the_seven_public_fields() {
        let entry = Arguments::new()
            .with(names::NEW_IP_ADDRESS, "192.168.178.20")
            .with(names::NEW_HOST_NAME, "laptop")
            .with(names::NEW_MAC_ADDRESS, "AA:BB:CC:00:11:22")
            .with(names::NEW_ACTIVE, true)
            .with(names::NEW_INTERFACE_TYPE, "802.11")
            .with(names::NEW_ADDRESS_SOURCE, "DHCP")
            .with(names::NEW_LEASE_TIME_REMAINING, 600i64)
            .with("NewX_AVM-DE_Port", 0i64);
        let record = HostRecord::from_entry(&entry).expect("record");
        assert_eq!(
            record,
            HostRecord {
                ip: "192.168.178.20".into(),
                name: "laptop".into(),
                mac: "AA:BB:CC:00:11:22".into(),
                status: true,
                interface_type: "802.11".into(),
                address_source: "DHCP".into(),
                lease_time_remaining: 600,
            }
        );
    }

    #[test]
    fn missing_entry_fields_default() {
        let entry = Arguments::new().with(names::NEW_MAC_ADDRESS, "AA:BB:CC:00:11:22");
        let record = HostRecord::from_entry(&entry).expect("record");
        assert!(!record.status);
        assert_eq!(record.lease_time_remaining, 0);
        assert_eq!(record.ip, "");
    }

    #[test]
    fn malformed_entry_flag_is_a_conversion_error() {
        let entry = Arguments::new().with(names::NEW_ACTIVE, "maybe");
        let err = HostRecord::from_entry(&entry).unwrap_err();
        assert_eq!(
            err,
            AttrError::Conversion {
                name: names::NEW_ACTIVE.into(),
                value: "maybe".into()
            }
        );
    }

    #[test]
    fn maps_feed_attributes() {
        let mut attrs = HostAttributes::new();
        attrs.set("Index", "1");
        attrs.set(feed::IP_ADDRESS, "192.168.178.21");
        attrs.set(feed::MAC_ADDRESS, "AA:BB:CC:00:11:23");
        attrs.set(feed::ACTIVE, "0");
        attrs.set(feed::HOST_NAME, "printer");
        attrs.set(feed::INTERFACE_TYPE, "Ethernet");
        let record = HostRecord::from_attributes(&attrs).expect("record");
        assert_eq!(record.mac, "AA:BB:CC:00:11:23");
        assert_eq!(record.name, "printer");
        assert!(!record.status);
        assert_eq!(record.address_source, "");
        assert_eq!(record.lease_time_remaining, 0);
    }
}
