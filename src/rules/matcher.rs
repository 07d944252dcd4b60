use regex::Regex;

/// One resolved `(layer, name)` pair of a generated item.
///
/// An item is an ordered list of selections, one per layer category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LayerSelection {
    /// Layer category, e.g. `"Background"`.
    pub layer: String,
    /// Chosen value for that layer, e.g. `"gold"`.
    pub name: String,
}

impl LayerSelection {
    /// Build a selection from its parts.
    pub fn new(layer: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            name: name.into(),
        }
    }
}

/// A `(layer, pattern)` gate on a rule.
///
/// The pattern is searched (not anchored) in the selection's name, case-sensitively; use `^...$`
/// for a whole-name match. A condition without a pattern never matches.
#[derive(Clone, Debug)]
pub struct Condition {
    layer: String,
    pattern: Option<Regex>,
}

impl Condition {
    /// Condition with a compiled name pattern.
    pub fn new(layer: impl Into<String>, pattern: Regex) -> Self {
        Self {
            layer: layer.into(),
            pattern: Some(pattern),
        }
    }

    /// Condition that no selection satisfies (the name was omitted in configuration).
    pub fn never(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            pattern: None,
        }
    }

    /// Layer category this condition is scoped to.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Source of the name pattern, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// `true` when `selection` is in this condition's layer and its name matches the pattern.
    pub fn is_satisfied_by(&self, selection: &LayerSelection) -> bool {
        selection.layer == self.layer
            && self
                .pattern
                .as_ref()
                .is_some_and(|re| re.is_match(&selection.name))
    }
}

/// Free-function form of [`Condition::is_satisfied_by`].
pub fn matches(selection: &LayerSelection, condition: &Condition) -> bool {
    condition.is_satisfied_by(selection)
}

#[cfg(test)]
#[path = "../../tests/unit/rules/matcher.rs"]
mod tests;
