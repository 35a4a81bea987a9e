//! Typed boundary to the SAI switch hardware abstraction layer.
//!
//! The vendor switch library is consumed through a small set of traits
//! rather than raw FFI, so the host process can be written, tested, and
//! reasoned about without the ASIC SDK present.
//!
//! # Architecture
//!
//! - [`error`]: `sai_status_t` codes and Result conversion
//! - [`types`]: API identifiers, log levels, attributes, event payloads
//! - [`profile`]: the two-function configuration service the host
//!   supplies to the HAL
//! - [`notify`]: the six-slot switch notification table
//! - [`switch`]: the initialize/query/switch-init contract and the
//!   software stub backend
//!
//! # Example
//!
//! ```ignore
//! use sai_hal::{StubSwitch, SwitchHal, ProfileId};
//!
//! let hal = StubSwitch::new();
//! hal.api_initialize(0, services)?;
//! let switch = hal.switch_api()?;
//! switch.initialize_switch(ProfileId::DEFAULT, "", "", handler)?;
//! ```

pub mod error;
pub mod notify;
pub mod profile;
pub mod switch;
pub mod types;

pub use error::{SaiError, SaiResult, SaiStatus, SaiStatusExt};
pub use notify::SwitchEventHandler;
pub use profile::{NextValueStatus, ProfileProvider};
pub use switch::{StubFaults, StubSwitch, SwitchApi, SwitchHal};
pub use types::{
    profile_keys, FdbEvent, FdbEventKind, MacAddress, PortEvent, PortEventKind, PortOperStatus,
    PortStateChange, ProfileId, SaiApi, SaiAttribute, SaiAttributeValue, SaiLogLevel,
    SwitchOperStatus, SWITCH_ATTR_CUSTOM_RANGE_BASE,
};
