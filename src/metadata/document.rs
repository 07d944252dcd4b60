use url::{ParseError, Url};

use crate::attributes::model::Attribute;
use crate::foundation::error::{TraitsmithError, TraitsmithResult};
use crate::foundation::template::SerialTemplate;

/// Background color used when none is configured.
pub const DEFAULT_BACKGROUND_COLOR: &str = "ffffff";

/// A required document field could not be built.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// The formatted image URL is not a valid URL reference.
    #[error("invalid image url '{url}': {reason}")]
    InvalidImageUrl {
        /// The formatted string.
        url: String,
        /// Parser message.
        reason: String,
    },
}

/// Six hex digits, no leading `#`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundColor(String);

impl BackgroundColor {
    /// Validate a configured color.
    pub fn parse(s: &str) -> TraitsmithResult<Self> {
        if s.len() == 6 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(TraitsmithError::config(format!(
                "backgroundColor '{s}' must be six hexadecimal digits without '#'"
            )))
        }
    }

    /// The color as six hex digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self(DEFAULT_BACKGROUND_COLOR.to_string())
    }
}

/// Per-collection templates for the scalar document fields.
#[derive(Clone, Debug)]
pub struct DocumentTemplate {
    /// Image URL; must format to a valid URL for every item.
    pub image_url: SerialTemplate,
    /// Item name.
    pub name: SerialTemplate,
    /// Item description.
    pub description: SerialTemplate,
    /// Optional external URL; items whose formatted value is not a URL simply omit it.
    pub external_url: Option<SerialTemplate>,
    /// Marketplace background color.
    pub background_color: BackgroundColor,
}

/// One item's marketplace metadata, in wire key order.
///
/// Built by [`assemble`] and never modified afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetadataDocument {
    image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_url: Option<String>,
    description: String,
    name: String,
    attributes: Vec<Attribute>,
    background_color: String,
}

impl MetadataDocument {
    /// Image URL, exactly as formatted.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// External URL, when it could be built.
    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref()
    }

    /// Description text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered attributes.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Background color (six hex digits).
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Pretty-printed UTF-8 JSON.
    pub fn to_json_pretty(&self) -> TraitsmithResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TraitsmithError::serde(format!("encode metadata document: {e}")))
    }
}

/// Combine an item's ordered attributes with its formatted scalar fields.
pub fn assemble(
    serial: u64,
    template: &DocumentTemplate,
    attributes: Vec<Attribute>,
) -> Result<MetadataDocument, AssemblyError> {
    let image = template.image_url.format(serial);
    if let Err(reason) = check_url(&image) {
        return Err(AssemblyError::InvalidImageUrl { url: image, reason });
    }

    let external_url = template.external_url.as_ref().and_then(|t| {
        let s = t.format(serial);
        match check_url(&s) {
            Ok(()) => Some(s),
            Err(reason) => {
                tracing::warn!(serial, url = %s, %reason, "dropping invalid external url");
                None
            }
        }
    });

    Ok(MetadataDocument {
        image,
        external_url,
        description: template.description.format(serial),
        name: template.name.format(serial),
        attributes,
        background_color: template.background_color.as_str().to_string(),
    })
}

/// Accept `s` as an absolute URL or a relative reference, without rewriting it.
///
/// Characters a URL cannot carry unescaped (anything outside printable ASCII, the backtick, and
/// `" < > \ ^ { | }`) and malformed `%` escapes are rejected instead of being percent-encoded.
fn check_url(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("empty url".to_string());
    }

    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if !b.is_ascii_graphic() || b"\"<>\\^`{|}".contains(&b) {
            let c = s[i..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(format!("character {c:?} at byte {i} must be percent-encoded"));
        }
        if b == b'%'
            && !bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
        {
            return Err(format!("malformed percent escape at byte {i}"));
        }
    }

    match Url::parse(s) {
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/document.rs"]
mod tests;
