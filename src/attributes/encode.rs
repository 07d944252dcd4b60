//! Mapping between [`Attribute`] and the flat marketplace attribute object.
//!
//! | Variant | `trait_type` | `display_type` | `value` | `max_value` |
//! |---|---|---|---|---|
//! | Simple | – | – | text | – |
//! | StringLabel | yes | – | text | – |
//! | DateLabel | yes | `date` | Unix seconds | – |
//! | NumberLabel | yes | `number` | numeric | – |
//! | BoostNumber | yes | `boost_number` | numeric | numeric |
//! | BoostPercentage | yes | `boost_percentage` | numeric | – |
//! | RankedNumber | yes | – | numeric | – |
//!
//! Absent fields are omitted, never written as `null`.

use chrono::DateTime;

use crate::attributes::model::{Attribute, NumericValue};
use crate::foundation::error::{TraitsmithError, TraitsmithResult};

const DISPLAY_DATE: &str = "date";
const DISPLAY_NUMBER: &str = "number";
const DISPLAY_BOOST_NUMBER: &str = "boost_number";
const DISPLAY_BOOST_PERCENTAGE: &str = "boost_percentage";

/// One entry of the `attributes` array, exactly as it appears on the wire.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WireAttribute {
    /// Trait name; absent for simple attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trait_type: Option<String>,
    /// Rendering hint for the marketplace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    /// Trait value.
    pub value: WireValue,
    /// Upper bound, only for `boost_number`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<NumericValue>,
}

/// The `value` field of a [`WireAttribute`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    /// Integer or float.
    Number(NumericValue),
    /// Text.
    Text(String),
}

/// A wire attribute that does not correspond to any [`Attribute`] variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid wire attribute: {0}")]
pub struct WireError(String);

impl From<&Attribute> for WireAttribute {
    fn from(attr: &Attribute) -> Self {
        let labelled = |trait_type: &str, display: Option<&str>, value: WireValue| Self {
            trait_type: Some(trait_type.to_string()),
            display_type: display.map(str::to_string),
            value,
            max_value: None,
        };

        match attr {
            Attribute::Simple { value } => Self {
                trait_type: None,
                display_type: None,
                value: WireValue::Text(value.clone()),
                max_value: None,
            },
            Attribute::StringLabel { trait_type, value } => {
                labelled(trait_type, None, WireValue::Text(value.clone()))
            }
            Attribute::DateLabel { trait_type, value } => labelled(
                trait_type,
                Some(DISPLAY_DATE),
                WireValue::Number(NumericValue::Int(value.timestamp())),
            ),
            Attribute::NumberLabel { trait_type, value } => {
                labelled(trait_type, Some(DISPLAY_NUMBER), WireValue::Number(*value))
            }
            Attribute::BoostNumber {
                trait_type,
                value,
                max_value,
            } => Self {
                max_value: Some(*max_value),
                ..labelled(
                    trait_type,
                    Some(DISPLAY_BOOST_NUMBER),
                    WireValue::Number(*value),
                )
            },
            Attribute::BoostPercentage { trait_type, value } => labelled(
                trait_type,
                Some(DISPLAY_BOOST_PERCENTAGE),
                WireValue::Number(*value),
            ),
            Attribute::RankedNumber { trait_type, value } => {
                labelled(trait_type, None, WireValue::Number(*value))
            }
        }
    }
}

impl From<Attribute> for WireAttribute {
    fn from(attr: Attribute) -> Self {
        Self::from(&attr)
    }
}

impl TryFrom<WireAttribute> for Attribute {
    type Error = WireError;

    fn try_from(wire: WireAttribute) -> Result<Self, Self::Error> {
        let WireAttribute {
            trait_type,
            display_type,
            value,
            max_value,
        } = wire;

        if max_value.is_some() && display_type.as_deref() != Some(DISPLAY_BOOST_NUMBER) {
            return Err(WireError(
                "max_value is only allowed with display_type 'boost_number'".to_string(),
            ));
        }

        let Some(trait_type) = trait_type else {
            return match (display_type, value) {
                (None, WireValue::Text(value)) => Ok(Attribute::Simple { value }),
                (None, WireValue::Number(_)) => Err(WireError(
                    "attribute without trait_type must have a text value".to_string(),
                )),
                (Some(d), _) => Err(WireError(format!(
                    "display_type '{d}' requires a trait_type"
                ))),
            };
        };

        let number = |value: WireValue, display: &str| match value {
            WireValue::Number(n) => Ok(n),
            WireValue::Text(_) => Err(WireError(format!(
                "display_type '{display}' requires a numeric value"
            ))),
        };

        match display_type.as_deref() {
            None => Ok(match value {
                WireValue::Text(value) => Attribute::StringLabel { trait_type, value },
                WireValue::Number(value) => Attribute::RankedNumber { trait_type, value },
            }),
            Some(DISPLAY_DATE) => {
                let NumericValue::Int(secs) = number(value, DISPLAY_DATE)? else {
                    return Err(WireError(
                        "date value must be integer Unix seconds".to_string(),
                    ));
                };
                let value = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                    WireError(format!("date value {secs} is out of range"))
                })?;
                Ok(Attribute::DateLabel { trait_type, value })
            }
            Some(DISPLAY_NUMBER) => Ok(Attribute::NumberLabel {
                trait_type,
                value: number(value, DISPLAY_NUMBER)?,
            }),
            Some(DISPLAY_BOOST_NUMBER) => Ok(Attribute::BoostNumber {
                trait_type,
                value: number(value, DISPLAY_BOOST_NUMBER)?,
                max_value: max_value.ok_or_else(|| {
                    WireError("boost_number requires max_value".to_string())
                })?,
            }),
            Some(DISPLAY_BOOST_PERCENTAGE) => Ok(Attribute::BoostPercentage {
                trait_type,
                value: number(value, DISPLAY_BOOST_PERCENTAGE)?,
            }),
            Some(other) => Err(WireError(format!("unknown display_type '{other}'"))),
        }
    }
}

/// Encode one attribute into its wire object.
pub fn encode(attr: &Attribute) -> TraitsmithResult<serde_json::Value> {
    serde_json::to_value(WireAttribute::from(attr))
        .map_err(|e| TraitsmithError::serde(format!("encode attribute: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/attributes/encode.rs"]
mod tests;
