use chrono::{DateTime, Utc};

/// A numeric attribute value that remembers whether it was an integer or a float.
///
/// The tag survives all the way to the wire: `Int(3)` serializes as `3`, `Float(3.0)` as `3.0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl NumericValue {
    /// `true` for [`NumericValue::Float`].
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float(_))
    }

    fn key(self) -> NumericKey {
        match self {
            Self::Int(v) => NumericKey::Int(v),
            // -0.0 and 0.0 encode differently but are the same value
            Self::Float(v) if v == 0.0 => NumericKey::Float(0f64.to_bits()),
            Self::Float(v) => NumericKey::Float(v.to_bits()),
        }
    }
}

impl From<i64> for NumericValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for NumericValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// One resolved trait of an item, in the shape it will take in the metadata document.
///
/// Serialization goes through [`WireAttribute`](crate::WireAttribute), which picks the field
/// set and `display_type` for each variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    into = "crate::attributes::encode::WireAttribute",
    try_from = "crate::attributes::encode::WireAttribute"
)]
pub enum Attribute {
    /// A bare value with no trait type.
    Simple {
        /// Displayed value.
        value: String,
    },
    /// A named trait with a text value.
    StringLabel {
        /// Trait name.
        trait_type: String,
        /// Text value.
        value: String,
    },
    /// A named trait holding a point in time.
    DateLabel {
        /// Trait name.
        trait_type: String,
        /// Date value (encoded as Unix seconds).
        value: DateTime<Utc>,
    },
    /// A named trait with a numeric value, shown as a number.
    NumberLabel {
        /// Trait name.
        trait_type: String,
        /// Numeric value.
        value: NumericValue,
    },
    /// A numeric boost with an upper bound.
    BoostNumber {
        /// Trait name.
        trait_type: String,
        /// Boost value.
        value: NumericValue,
        /// Maximum boost value.
        max_value: NumericValue,
    },
    /// A percentage boost.
    BoostPercentage {
        /// Trait name.
        trait_type: String,
        /// Percentage value.
        value: NumericValue,
    },
    /// A ranked numeric trait (no `display_type`).
    RankedNumber {
        /// Trait name.
        trait_type: String,
        /// Rank value.
        value: NumericValue,
    },
}

/// Discriminant of [`Attribute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKind {
    /// [`Attribute::Simple`]
    Simple,
    /// [`Attribute::StringLabel`]
    StringLabel,
    /// [`Attribute::DateLabel`]
    DateLabel,
    /// [`Attribute::NumberLabel`]
    NumberLabel,
    /// [`Attribute::BoostNumber`]
    BoostNumber,
    /// [`Attribute::BoostPercentage`]
    BoostPercentage,
    /// [`Attribute::RankedNumber`]
    RankedNumber,
}

/// Deduplication key of an attribute: kind, trait type (if any) and value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeIdentity {
    kind: AttributeKind,
    trait_type: Option<String>,
    value: IdentityValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum IdentityValue {
    Text(String),
    Timestamp(i64),
    Number(NumericKey),
    Bounded(NumericKey, NumericKey),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum NumericKey {
    Int(i64),
    Float(u64),
}

impl Attribute {
    /// Shorthand for [`Attribute::Simple`].
    pub fn simple(value: impl Into<String>) -> Self {
        Self::Simple {
            value: value.into(),
        }
    }

    /// Shorthand for [`Attribute::StringLabel`].
    pub fn string_label(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::StringLabel {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`Attribute::NumberLabel`].
    pub fn number_label(trait_type: impl Into<String>, value: impl Into<NumericValue>) -> Self {
        Self::NumberLabel {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }

    /// Variant discriminant.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Simple { .. } => AttributeKind::Simple,
            Self::StringLabel { .. } => AttributeKind::StringLabel,
            Self::DateLabel { .. } => AttributeKind::DateLabel,
            Self::NumberLabel { .. } => AttributeKind::NumberLabel,
            Self::BoostNumber { .. } => AttributeKind::BoostNumber,
            Self::BoostPercentage { .. } => AttributeKind::BoostPercentage,
            Self::RankedNumber { .. } => AttributeKind::RankedNumber,
        }
    }

    /// Trait name, or `None` for [`Attribute::Simple`].
    pub fn trait_type(&self) -> Option<&str> {
        match self {
            Self::Simple { .. } => None,
            Self::StringLabel { trait_type, .. }
            | Self::DateLabel { trait_type, .. }
            | Self::NumberLabel { trait_type, .. }
            | Self::BoostNumber { trait_type, .. }
            | Self::BoostPercentage { trait_type, .. }
            | Self::RankedNumber { trait_type, .. } => Some(trait_type),
        }
    }

    /// Key under which two attributes are considered duplicates.
    pub fn identity(&self) -> AttributeIdentity {
        let value = match self {
            Self::Simple { value } | Self::StringLabel { value, .. } => {
                IdentityValue::Text(value.clone())
            }
            Self::DateLabel { value, .. } => IdentityValue::Timestamp(value.timestamp()),
            Self::NumberLabel { value, .. }
            | Self::BoostPercentage { value, .. }
            | Self::RankedNumber { value, .. } => IdentityValue::Number(value.key()),
            Self::BoostNumber {
                value, max_value, ..
            } => IdentityValue::Bounded(value.key(), max_value.key()),
        };
        AttributeIdentity {
            kind: self.kind(),
            trait_type: self.trait_type().map(str::to_string),
            value,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/attributes/model.rs"]
mod tests;
