//! # upnpdig Description Document Model
//!
//! File: cli/src/core/description.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! In-memory representation of the two UPnP documents upnpdig works with:
//!
//! - the **device description** (`<root><device>…</device></root>`), a recursive tree of
//!   devices, each with an ordered service list and an ordered list of embedded devices;
//! - the **service description** (SCPD, `<scpd>…</scpd>`), an ordered state variable
//!   table plus an ordered action list.
//!
//! The types derive `serde::Deserialize` so that `quick-xml` can build them straight
//! from the XML body returned by a device. Element order is document order and is
//! never altered afterwards: nothing in this module sorts, deduplicates or mutates.
//!
//! ## Usage
//!
//! ```rust
//! let description = DeviceDescription::from_xml(&body)?;
//! for service in description.device.services() {
//!     println!("{}", service.service_id);
//! }
//! ```
//!
use serde::Deserialize;
use std::fmt;

/// Root of a device description document (`<root>`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename = "root")]
pub struct DeviceDescription {
    /// The root device. Embedded devices hang off it.
    pub device: DeviceNode,
}

impl DeviceDescription {
    /// Parses a device description from its XML text.
    pub fn from_xml(xml: &str) -> Result<Self, quick_xml::DeError> {
        quick_xml::de::from_str(xml)
    }
}

/// A `<device>` element. All identity fields are opaque strings, empty when absent.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceNode {
    #[serde(rename = "deviceType")]
    pub device_type: String,
    #[serde(rename = "friendlyName")]
    pub friendly_name: String,
    pub manufacturer: String,
    #[serde(rename = "manufacturerURL")]
    pub manufacturer_url: String,
    #[serde(rename = "modelName")]
    pub model_name: String,
    #[serde(rename = "modelDescription")]
    pub model_description: String,
    #[serde(rename = "modelURL")]
    pub model_url: String,
    #[serde(rename = "serialNumber")]
    pub serial_number: String,
    #[serde(rename = "presentationURL")]
    pub presentation_url: String,
    #[serde(rename = "UPC")]
    pub upc: String,
    #[serde(rename = "UDN")]
    pub udn: String,
    #[serde(rename = "serviceList")]
    pub service_list: ServiceList,
    #[serde(rename = "deviceList")]
    pub device_list: DeviceList,
}

impl DeviceNode {
    /// Services declared directly on this device, in document order.
    pub fn services(&self) -> &[ServiceRef] {
        &self.service_list.services
    }

    /// Devices embedded directly in this device, in document order.
    pub fn embedded_devices(&self) -> &[DeviceNode] {
        &self.device_list.devices
    }
}

/// `<serviceList>` wrapper.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceList {
    #[serde(rename = "service", default)]
    pub services: Vec<ServiceRef>,
}

impl From<Vec<ServiceRef>> for ServiceList {
    fn from(services: Vec<ServiceRef>) -> Self {
        Self { services }
    }
}

/// `<deviceList>` wrapper.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct DeviceList {
    #[serde(rename = "device", default)]
    pub devices: Vec<DeviceNode>,
}

impl From<Vec<DeviceNode>> for DeviceList {
    fn from(devices: Vec<DeviceNode>) -> Self {
        Self { devices }
    }
}

/// A `<service>` entry of a device's service list.
///
/// `service_id` is the lookup key used by the resolver. The protocol does not
/// guarantee it is unique and nothing here enforces it. `scpd_url` may be absolute
/// or relative to the URL the owning description document was retrieved from.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceRef {
    #[serde(rename = "serviceType")]
    pub service_type: String,
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "SCPDURL")]
    pub scpd_url: String,
    #[serde(rename = "controlURL")]
    pub control_url: String,
    #[serde(rename = "eventSubURL")]
    pub event_sub_url: String,
}

/// Root of a service description document (`<scpd>`).
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename = "scpd", default)]
pub struct ServiceDescription {
    #[serde(rename = "actionList")]
    pub action_list: ActionList,
    #[serde(rename = "serviceStateTable")]
    pub state_table: ServiceStateTable,
}

impl ServiceDescription {
    /// Parses a service description (SCPD) from its XML text.
    pub fn from_xml(xml: &str) -> Result<Self, quick_xml::DeError> {
        quick_xml::de::from_str(xml)
    }

    /// State variables in document order.
    pub fn state_variables(&self) -> &[StateVariable] {
        &self.state_table.variables
    }

    /// Actions in document order.
    pub fn actions(&self) -> &[Action] {
        &self.action_list.actions
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStateTable {
    #[serde(rename = "stateVariable", default)]
    pub variables: Vec<StateVariable>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ActionList {
    #[serde(rename = "action", default)]
    pub actions: Vec<Action>,
}

/// A `<stateVariable>` of the service state table.
///
/// `multicast` and `send_events` hold the attribute text as written by the device
/// (normally `"yes"` or `"no"`), or an empty string when the attribute is absent.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StateVariable {
    #[serde(rename = "@multicast")]
    pub multicast: String,
    #[serde(rename = "@sendEvents")]
    pub send_events: String,
    pub name: String,
    #[serde(rename = "dataType")]
    pub data_type: String,
    #[serde(rename = "defaultValue")]
    pub default_value: String,
    #[serde(rename = "allowedValueList")]
    pub allowed_value_list: Option<AllowedValueList>,
    #[serde(rename = "allowedValueRange")]
    pub allowed_value_range: Option<AllowedValueRange>,
}

/// `<allowedValueList>`: the enumerated values a string variable may take.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AllowedValueList {
    #[serde(rename = "allowedValue", default)]
    pub values: Vec<String>,
}

/// `<allowedValueRange>`. Bounds are kept as text; their type follows `dataType`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AllowedValueRange {
    pub minimum: String,
    pub maximum: String,
    pub step: String,
}

/// An `<action>` and its ordered argument list.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Action {
    pub name: String,
    #[serde(rename = "argumentList")]
    pub argument_list: ArgumentList,
}

impl Action {
    /// Arguments in document order.
    pub fn arguments(&self) -> &[Argument] {
        &self.argument_list.arguments
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ArgumentList {
    #[serde(rename = "argument", default)]
    pub arguments: Vec<Argument>,
}

/// An `<argument>` of an action.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(rename = "relatedStateVariable", default)]
    pub related_state_variable: String,
    /// Present (as an empty `<retval/>` element) when the argument is the action's return value.
    #[serde(default)]
    pub retval: Option<Retval>,
}

impl Argument {
    pub fn is_retval(&self) -> bool {
        self.retval.is_some()
    }
}

/// Marker for the empty `<retval/>` element.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Retval {}

/// Direction of an action argument.
///
/// `in` and `out` are matched case-insensitively. Any other value, including a
/// missing `<direction>`, is kept verbatim in `Other`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String")]
pub enum Direction {
    In,
    Out,
    Other(String),
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Other(String::new())
    }
}

impl From<String> for Direction {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "in" => Direction::In,
            "out" => Direction::Out,
            _ => Direction::Other(value),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => f.write_str("in"),
            Direction::Out => f.write_str("out"),
            Direction::Other(raw) => f.write_str(raw),
        }
    }
}
