//! Field name driven coercion of raw attribute text.

use thiserror::Error;

/// Fields read as integers.
pub const INTEGER_FIELDS: &[&str] = &["Index", "X_AVM-DE_Port", "X_AVM-DE_Speed"];

/// Fields read as booleans (`0` is false, any other integer is true).
pub const BOOLEAN_FIELDS: &[&str] = &[
    "Active",
    "X_AVM-DE_UpdateAvailable",
    "X_AVM-DE_Guest",
    "X_AVM-DE_VPN",
    "X_AVM-DE_Disallow",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttrError {
    /// A typed field held text that does not parse as an integer.
    #[error("cannot convert field {name}: {value:?} is not an integer")]
    Conversion { name: String, value: String },
}

/// How the raw text of a field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionKind {
    Integer,
    Boolean,
    Text,
}

impl CoercionKind {
    /// Coercion kind of the field `name`; unknown names pass through as text.
    pub fn of(name: &str) -> Self {
        if INTEGER_FIELDS.contains(&name) {
            CoercionKind::Integer
        } else if BOOLEAN_FIELDS.contains(&name) {
            CoercionKind::Boolean
        } else {
            CoercionKind::Text
        }
    }

    /// Value used for a field that was never populated.
    pub fn default_value(self) -> AttrValue {
        match self {
            CoercionKind::Integer => AttrValue::Int(0),
            CoercionKind::Boolean => AttrValue::Bool(false),
            CoercionKind::Text => AttrValue::Text(String::new()),
        }
    }
}

/// A coerced attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl AttrValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Coerce the raw text of `name` according to [`CoercionKind::of`].
///
/// `None` means "not populated" and yields the default. Present text in a typed
/// field must parse, including empty text.
pub fn coerce(name: &str, raw: Option<&str>) -> Result<AttrValue, AttrError> {
    coerce_as(CoercionKind::of(name), name, raw)
}

pub(crate) fn coerce_as(
    kind: CoercionKind,
    name: &str,
    raw: Option<&str>,
) -> Result<AttrValue, AttrError> {
    let Some(text) = raw else {
        return Ok(kind.default_value());
    };
    match kind {
        CoercionKind::Text => Ok(AttrValue::Text(text.to_string())),
        CoercionKind::Integer => parse_int(name, text).map(AttrValue::Int),
        CoercionKind::Boolean => parse_int(name, text).map(|value| AttrValue::Bool(value != 0)),
    }
}

fn parse_int(name: &str, text: &str) -> Result<i64, AttrError> {
    text.trim().parse().map_err(|_| AttrError::Conversion {
        name: name.to_string(),
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_is_fixed() {
        assert_eq!(CoercionKind::of("Index"), CoercionKind::Integer);
        assert_eq!(CoercionKind::of("X_AVM-DE_Port"), CoercionKind::Integer);
        assert_eq!(CoercionKind::of("Active"), CoercionKind::Boolean);
        assert_eq!(CoercionKind::of("X_AVM-DE_VPN"), CoercionKind::Boolean);
        assert_eq!(CoercionKind::of("HostName"), CoercionKind::Text);
        assert_eq!(CoercionKind::of("active"), CoercionKind::Text);
        for name in INTEGER_FIELDS {
            assert!(!BOOLEAN_FIELDS.contains(name));
        }
    }

    #[test]
    fn boolean_parses_integer_first() {
        assert_eq!(coerce("Active", Some("1")), Ok(AttrValue::Bool(true)));
        assert_eq!(coerce("Active", Some("0")), Ok(AttrValue::Bool(false)));
        assert_eq!(coerce("Active", Some("2")), Ok(AttrValue::Bool(true)));
        assert!(matches!(
            coerce("Active", Some("maybe")),
            Err(AttrError::Conversion { .. })
        ));
        assert!(coerce("Active", Some("true")).is_err());
    }

    #[test]
    fn integer_fields_reject_text() {
        assert_eq!(coerce("X_AVM-DE_Speed", Some(" 100 ")), Ok(AttrValue::Int(100)));
        assert_eq!(coerce("Index", Some("-1")), Ok(AttrValue::Int(-1)));
        let err = coerce("X_AVM-DE_Port", Some("lan1")).unwrap_err();
        assert_eq!(
            err,
            AttrError::Conversion {
                name: "X_AVM-DE_Port".into(),
                value: "lan1".into()
            }
        );
    }

    #[test]
    fn unpopulated_fields_use_defaults() {
        assert_eq!(coerce("Index", None), Ok(AttrValue::Int(0)));
        assert_eq!(coerce("X_AVM-DE_Guest", None), Ok(AttrValue::Bool(false)));
        assert_eq!(coerce("HostName", None), Ok(AttrValue::Text(String::new())));
    }

    #[test]
    fn present_but_empty_typed_fields_fail() {
        assert_eq!(
            coerce("X_AVM-DE_Speed", Some("")),
            Err(AttrError::Conversion {
                name: "X_AVM-DE_Speed".into(),
                value: String::new()
            })
        );
        assert!(matches!(
            coerce("Active", Some("  ")),
            Err(AttrError::Conversion { ref name, .. }) if name == "Active"
        ));
    }

    #[test]
    fn text_passes_through_unchanged() {
        assert_eq!(
            coerce("X_AVM-DE_Model", Some(" FRITZ!Repeater ")),
            Ok(AttrValue::Text(" FRITZ!Repeater ".into()))
        );
        assert_eq!(
            coerce("X_AVM-DE_Model", Some("   ")),
            Ok(AttrValue::Text("   ".into()))
        );
        assert_eq!(coerce("HostName", Some("")), Ok(AttrValue::Text(String::new())));
    }
}
