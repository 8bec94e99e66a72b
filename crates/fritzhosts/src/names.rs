//! Service, action and argument names of the `Hosts1` service.

/// Service all host actions belong to.
pub const SERVICE: &str = "Hosts1";

pub const GET_HOST_NUMBER_OF_ENTRIES: &str = "GetHostNumberOfEntries";
pub const GET_GENERIC_HOST_ENTRY: &str = "GetGenericHostEntry";
pub const GET_SPECIFIC_HOST_ENTRY: &str = "GetSpecificHostEntry";
pub const GET_SPECIFIC_HOST_ENTRY_BY_IP: &str = "X_AVM-DE_GetSpecificHostEntryByIP";
pub const GET_MESH_LIST_PATH: &str = "X_AVM-DE_GetMeshListPath";
pub const GET_HOST_LIST_PATH: &str = "X_AVM-DE_GetHostListPath";
pub const GET_AUTO_WOL: &str = "X_AVM-DE_GetAutoWakeOnLANByMACAddress";
pub const SET_AUTO_WOL: &str = "X_AVM-DE_SetAutoWakeOnLANByMACAddress";
pub const SET_HOST_NAME: &str = "X_AVM-DE_SetHostNameByMACAddress";
pub const HOST_DO_UPDATE: &str = "X_AVM-DE_HostDoUpdate";

pub const NEW_INDEX: &str = "NewIndex";
pub const NEW_HOST_NUMBER_OF_ENTRIES: &str = "NewHostNumberOfEntries";
pub const NEW_IP_ADDRESS: &str = "NewIPAddress";
pub const NEW_HOST_NAME: &str = "NewHostName";
pub const NEW_MAC_ADDRESS: &str = "NewMACAddress";
pub const NEW_ACTIVE: &str = "NewActive";
pub const NEW_INTERFACE_TYPE: &str = "NewInterfaceType";
pub const NEW_ADDRESS_SOURCE: &str = "NewAddressSource";
pub const NEW_LEASE_TIME_REMAINING: &str = "NewLeaseTimeRemaining";
pub const NEW_AUTO_WOL_ENABLED: &str = "NewAutoWOLEnabled";
pub const NEW_MESH_LIST_PATH: &str = "NewX_AVM-DE_MeshListPath";
pub const NEW_HOST_LIST_PATH: &str = "NewX_AVM-DE_HostListPath";

/// Field names of an `Item` node in the host list feed.
pub mod feed {
    pub const IP_ADDRESS: &str = "IPAddress";
    pub const HOST_NAME: &str = "HostName";
    pub const MAC_ADDRESS: &str = "MACAddress";
    pub const ACTIVE: &str = "Active";
    pub const INTERFACE_TYPE: &str = "InterfaceType";
    pub const ADDRESS_SOURCE: &str = "AddressSource";
    pub const LEASE_TIME_REMAINING: &str = "LeaseTimeRemaining";
}
