//! TR-064: transport-agnostic action invocation, argument values and error mapping.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Error kinds reported by a remote action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Tr064Error {
    /// The caller supplied an invalid argument (bad MAC/IP format, ...).
    #[error("argument error: {0}")]
    Argument(String),
    /// The action could not resolve the requested key.
    #[error("lookup error: {0}")]
    Lookup(String),
    /// An index based fetch went past the end of the collection.
    #[error("array index out of range: {0}")]
    IndexOutOfRange(String),
    /// The action layer itself failed.
    #[error("action error: {0}")]
    Action(String),
}

impl Tr064Error {
    /// Classify a UPnP error code returned by the device.
    pub fn from_upnp(code: u16, description: &str) -> Self {
        let message = format!("UPnPError {code}: {description}");
        match UpnpErrorCode::from_raw(code) {
            UpnpErrorCode::InvalidArgs
            | UpnpErrorCode::ArgumentValueInvalid
            | UpnpErrorCode::ArgumentValueOutOfRange => Tr064Error::Argument(message),
            UpnpErrorCode::SpecifiedArrayIndexInvalid => Tr064Error::IndexOutOfRange(message),
            UpnpErrorCode::NoSuchEntryInArray => Tr064Error::Lookup(message),
            UpnpErrorCode::InvalidAction
            | UpnpErrorCode::ActionFailed
            | UpnpErrorCode::ActionNotAuthorized
            | UpnpErrorCode::InternalError
            | UpnpErrorCode::Unknown(_) => Tr064Error::Action(message),
        }
    }

    /// Message carried by the error, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Tr064Error::Argument(msg)
            | Tr064Error::Lookup(msg)
            | Tr064Error::IndexOutOfRange(msg)
            | Tr064Error::Action(msg) => msg,
        }
    }

    /// `true` for the errors meaning "the device does not know this key".
    pub fn is_unknown_key(&self) -> bool {
        matches!(self, Tr064Error::Argument(_) | Tr064Error::Lookup(_))
    }
}

/// UPnP error codes used by the device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpnpErrorCode {
    /// No action by that name at this service.
    InvalidAction,
    /// Missing or surplus arguments.
    InvalidArgs,
    /// The action failed on the device.
    ActionFailed,
    /// An argument value is invalid.
    ArgumentValueInvalid,
    /// An argument value is out of range.
    ArgumentValueOutOfRange,
    /// The caller is not allowed to invoke the action.
    ActionNotAuthorized,
    /// Index based access past the end of an array.
    SpecifiedArrayIndexInvalid,
    /// Key based access to an entry that does not exist.
    NoSuchEntryInArray,
    /// Internal device error.
    InternalError,
    /// A code not known to this implementation.
    Unknown(u16),
}

impl UpnpErrorCode {
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            401 => UpnpErrorCode::InvalidAction,
            402 => UpnpErrorCode::InvalidArgs,
            501 => UpnpErrorCode::ActionFailed,
            600 => UpnpErrorCode::ArgumentValueInvalid,
            601 => UpnpErrorCode::ArgumentValueOutOfRange,
            606 => UpnpErrorCode::ActionNotAuthorized,
            713 => UpnpErrorCode::SpecifiedArrayIndexInvalid,
            714 => UpnpErrorCode::NoSuchEntryInArray,
            820 => UpnpErrorCode::InternalError,
            other => UpnpErrorCode::Unknown(other),
        }
    }

    pub const fn to_raw(self) -> u16 {
        match self {
            UpnpErrorCode::InvalidAction => 401,
            UpnpErrorCode::InvalidArgs => 402,
            UpnpErrorCode::ActionFailed => 501,
            UpnpErrorCode::ArgumentValueInvalid => 600,
            UpnpErrorCode::ArgumentValueOutOfRange => 601,
            UpnpErrorCode::ActionNotAuthorized => 606,
            UpnpErrorCode::SpecifiedArrayIndexInvalid => 713,
            UpnpErrorCode::NoSuchEntryInArray => 714,
            UpnpErrorCode::InternalError => 820,
            UpnpErrorCode::Unknown(code) => code,
        }
    }
}

/// A single argument or result value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl ArgValue {
    /// Integer view; textual values are parsed as decimal.
    pub fn as_int(&self) -> Result<i64, std::num::ParseIntError> {
        match self {
            ArgValue::Int(value) => Ok(*value),
            ArgValue::Bool(value) => Ok(i64::from(*value)),
            ArgValue::Text(text) => text.trim().parse(),
        }
    }

    /// Boolean view; integers and their textual form map non-zero to `true`.
    pub fn as_bool(&self) -> Result<bool, std::num::ParseIntError> {
        match self {
            ArgValue::Bool(value) => Ok(*value),
            other => other.as_int().map(|value| value != 0),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Text(text) => f.write_str(text),
            ArgValue::Int(value) => write!(f, "{value}"),
            ArgValue::Bool(value) => f.write_str(if *value { "1" } else { "0" }),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::Int(i64::from(value))
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

/// Named values passed to, or returned from, an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: BTreeMap<String, ArgValue>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Text of a field; only `Text` values qualify.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Integer value of a field, `None` when absent.
    pub fn int(&self, name: &str) -> Option<Result<i64, std::num::ParseIntError>> {
        self.values.get(name).map(ArgValue::as_int)
    }

    /// Boolean value of a field, `None` when absent.
    pub fn flag(&self, name: &str) -> Option<Result<bool, std::num::ParseIntError>> {
        self.values.get(name).map(ArgValue::as_bool)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Arguments::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

/// Action invocation abstraction backed by a SOAP/TR-064 transport.
pub trait ActionInvoker {
    /// Invoke `action` of `service` with `arguments` and return the result fields.
    fn call_action(
        &self,
        service: &str,
        action: &str,
        arguments: &Arguments,
    ) -> Result<Arguments, Tr064Error>;
}

impl<T: ActionInvoker + ?Sized> ActionInvoker for &T {
    fn call_action(
        &self,
        service: &str,
        action: &str,
        arguments: &Arguments,
    ) -> Result<Arguments, Tr064Error> {
        (**self).call_action(service, action, arguments)
    }
}
