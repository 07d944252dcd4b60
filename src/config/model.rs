use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};

use crate::attributes::model::NumericValue;
use crate::foundation::error::{TraitsmithError, TraitsmithResult};

/// Root of the configuration document.
///
/// Only the `metadata` section is read; other sections (layer order, combinations, serial
/// drawing) belong to the image side of the tool and are ignored here.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct AssetConfig {
    /// Metadata generation settings.
    #[serde(default)]
    pub metadata: Option<MetadataConfig>,
}

impl AssetConfig {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TraitsmithResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TraitsmithError::config(format!("parse config JSON: {e}")))
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> TraitsmithResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| TraitsmithError::config(format!("parse config JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TraitsmithResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TraitsmithError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// The `metadata` section, which is required for generation.
    pub fn metadata(&self) -> TraitsmithResult<&MetadataConfig> {
        self.metadata
            .as_ref()
            .ok_or_else(|| TraitsmithError::config("config has no 'metadata' section"))
    }
}

/// The `metadata` section as written.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataConfig {
    /// printf-style template for the image URL.
    pub image_url_format: String,
    /// printf-style template for the item name.
    pub default_name_format: String,
    /// printf-style template for the description.
    pub default_description_format: String,
    /// Optional printf-style template for the external URL.
    #[serde(default)]
    pub external_url_format: Option<String>,
    /// Six hex digits; defaults to `ffffff`.
    #[serde(default)]
    pub background_color: Option<String>,
    /// Simple (valueless trait) rules.
    #[serde(default)]
    pub texts: Option<Vec<SimpleDef>>,
    /// Text label rules.
    #[serde(default)]
    pub text_labels: Option<Vec<LabelDef<String>>>,
    /// Date label rules.
    #[serde(default)]
    pub date_labels: Option<Vec<LabelDef<ConfigDate>>>,
    /// Integer label rules.
    #[serde(default)]
    pub int_labels: Option<Vec<LabelDef<i64>>>,
    /// Float label rules.
    #[serde(default)]
    pub float_labels: Option<Vec<LabelDef<f64>>>,
    /// Ranked number rules.
    #[serde(default)]
    pub ranked_numbers: Option<Vec<LabelDef<NumericValue>>>,
    /// Boost number rules.
    #[serde(default)]
    pub boost_numbers: Option<Vec<BoostDef>>,
    /// Boost percentage rules.
    #[serde(default)]
    pub boost_percentages: Option<Vec<LabelDef<NumericValue>>>,
    /// Attribute ordering.
    #[serde(default)]
    pub order: Option<OrderDef>,
}

/// A `(layer, name)` condition. A null or missing `name` never matches.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct SubjectDef {
    /// Layer category.
    pub layer: String,
    /// Regular expression searched in the layer's chosen name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A simple rule.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct SimpleDef {
    /// Value to emit.
    pub value: String,
    /// Activation conditions (OR).
    pub conditions: Vec<SubjectDef>,
}

/// A labelled rule with a typed value.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct LabelDef<T> {
    /// Trait name.
    #[serde(rename = "trait")]
    pub trait_type: String,
    /// Trait value.
    pub value: T,
    /// Activation conditions (OR).
    pub conditions: Vec<SubjectDef>,
}

/// A boost rule with an upper bound.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct BoostDef {
    /// Trait name.
    #[serde(rename = "trait")]
    pub trait_type: String,
    /// Boost value.
    pub value: NumericValue,
    /// Maximum value.
    pub max: NumericValue,
    /// Activation conditions (OR).
    pub conditions: Vec<SubjectDef>,
}

/// The `metadata.order` section.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct OrderDef {
    /// Required trait order.
    #[serde(default, rename = "trait")]
    pub traits: Option<Vec<String>>,
}

/// A date in configuration: RFC 3339, `YYYY-MM-DD` (midnight UTC), or integer Unix seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigDate(pub DateTime<Utc>);

impl ConfigDate {
    /// Parse the string forms.
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }

    fn from_secs<E: serde::de::Error>(secs: i64) -> Result<Self, E> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| E::custom(format!("timestamp {secs} is out of range")))
    }
}

impl<'de> serde::Deserialize<'de> for ConfigDate {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = ConfigDate;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an RFC 3339 timestamp, a YYYY-MM-DD date, or Unix seconds")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<ConfigDate, E> {
                ConfigDate::parse(v).ok_or_else(|| E::custom(format!("invalid date '{v}'")))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<ConfigDate, E> {
                ConfigDate::from_secs(v)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<ConfigDate, E> {
                let secs = i64::try_from(v)
                    .map_err(|_| E::custom(format!("timestamp {v} is out of range")))?;
                ConfigDate::from_secs(secs)
            }
        }

        d.deserialize_any(Visitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
