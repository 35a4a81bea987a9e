//! Core SAI data types used across the HAL boundary.
//!
//! These are plain Rust renditions of the C types the HAL exchanges with its
//! host process: API identifiers, log levels, switch attributes, and the
//! payloads carried by asynchronous notifications.

use std::fmt;

/// Identifier of a switch profile, passed back on every configuration
/// service callback. A single-switch host always uses [`ProfileId::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProfileId(pub u32);

impl ProfileId {
    /// The default (and only) profile on a single-switch system.
    pub const DEFAULT: Self = ProfileId(0);
}

/// SAI API categories, used to address per-API log verbosity.
///
/// Matches `sai_api_t` for the APIs this host configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiApi {
    Switch,
    Fdb,
    Port,
    Vlan,
    Route,
    VirtualRouter,
    RouterInterface,
    NextHop,
    NextHopGroup,
    Neighbor,
    Acl,
    Mirror,
    Lag,
    Buffers,
}

impl SaiApi {
    /// Every API category whose verbosity is raised at bring-up.
    pub const ALL: [SaiApi; 14] = [
        SaiApi::Switch,
        SaiApi::Fdb,
        SaiApi::Port,
        SaiApi::Vlan,
        SaiApi::Route,
        SaiApi::VirtualRouter,
        SaiApi::RouterInterface,
        SaiApi::NextHop,
        SaiApi::NextHopGroup,
        SaiApi::Neighbor,
        SaiApi::Acl,
        SaiApi::Mirror,
        SaiApi::Lag,
        SaiApi::Buffers,
    ];

    /// Returns the API name as spelled in the SAI headers.
    pub fn name(&self) -> &'static str {
        match self {
            SaiApi::Switch => "SAI_API_SWITCH",
            SaiApi::Fdb => "SAI_API_FDB",
            SaiApi::Port => "SAI_API_PORT",
            SaiApi::Vlan => "SAI_API_VLAN",
            SaiApi::Route => "SAI_API_ROUTE",
            SaiApi::VirtualRouter => "SAI_API_VIRTUAL_ROUTER",
            SaiApi::RouterInterface => "SAI_API_ROUTER_INTERFACE",
            SaiApi::NextHop => "SAI_API_NEXT_HOP",
            SaiApi::NextHopGroup => "SAI_API_NEXT_HOP_GROUP",
            SaiApi::Neighbor => "SAI_API_NEIGHBOR",
            SaiApi::Acl => "SAI_API_ACL",
            SaiApi::Mirror => "SAI_API_MIRROR",
            SaiApi::Lag => "SAI_API_LAG",
            SaiApi::Buffers => "SAI_API_BUFFERS",
        }
    }
}

impl fmt::Display for SaiApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// HAL log verbosity, matching `sai_log_level_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SaiLogLevel {
    Debug,
    Info,
    Notice,
    Warn,
    Error,
    Critical,
}

impl SaiLogLevel {
    /// Returns the level name as spelled in the SAI headers.
    pub fn name(&self) -> &'static str {
        match self {
            SaiLogLevel::Debug => "SAI_LOG_DEBUG",
            SaiLogLevel::Info => "SAI_LOG_INFO",
            SaiLogLevel::Notice => "SAI_LOG_NOTICE",
            SaiLogLevel::Warn => "SAI_LOG_WARN",
            SaiLogLevel::Error => "SAI_LOG_ERROR",
            SaiLogLevel::Critical => "SAI_LOG_CRITICAL",
        }
    }
}

/// Base of the vendor-specific switch attribute range
/// (`SAI_SWITCH_ATTR_CUSTOM_RANGE_BASE`).
pub const SWITCH_ATTR_CUSTOM_RANGE_BASE: u32 = 0x1000_0000;

/// Value carried by a switch attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaiAttributeValue {
    /// No value; the attribute id alone is meaningful.
    Unspecified,
    Bool(bool),
    U32(u32),
    U64(u64),
    S32(i32),
    ObjectId(u64),
}

/// A single switch attribute, the unit of HAL get/set operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaiAttribute {
    pub id: u32,
    pub value: SaiAttributeValue,
}

impl SaiAttribute {
    /// Creates an attribute carrying no value.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            value: SaiAttributeValue::Unspecified,
        }
    }

    /// Creates an attribute with a value.
    pub fn with_value(id: u32, value: SaiAttributeValue) -> Self {
        Self { id, value }
    }
}

/// A 48-bit Ethernet MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

/// Switch operational status, matching `sai_switch_oper_status_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchOperStatus {
    Unknown,
    Up,
    Down,
    Failed,
}

/// Port operational status, matching `sai_port_oper_status_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortOperStatus {
    Unknown,
    Up,
    Down,
    Testing,
    NotPresent,
}

/// Kind of forwarding-table change reported by the HAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FdbEventKind {
    Learned,
    Aged,
    Flushed,
    Moved,
}

/// One forwarding-table (address learning) notification entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdbEvent {
    pub kind: FdbEventKind,
    pub mac: MacAddress,
    pub vlan_id: u16,
    /// Bridge port the address was learned or aged on.
    pub bridge_port_id: u64,
}

/// One port operational-status change notification entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortStateChange {
    pub port_id: u64,
    pub status: PortOperStatus,
}

/// Kind of port hotplug event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortEventKind {
    Add,
    Delete,
}

/// One port hotplug notification entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortEvent {
    pub port_id: u64,
    pub kind: PortEventKind,
}

/// Well-known profile keys the HAL reads during its own initialization.
pub mod profile_keys {
    /// Path to the ASIC initialization file.
    pub const INIT_CONFIG_FILE: &str = "SAI_INIT_CONFIG_FILE";

    /// Boot type (cold, warm, fast).
    pub const BOOT_TYPE: &str = "SAI_BOOT_TYPE";
}
