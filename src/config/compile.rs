use std::collections::HashMap;

use regex::Regex;

use crate::attributes::model::{Attribute, NumericValue};
use crate::attributes::order::TraitOrder;
use crate::config::model::{AssetConfig, MetadataConfig, SubjectDef};
use crate::foundation::error::{TraitsmithError, TraitsmithResult};
use crate::foundation::template::SerialTemplate;
use crate::metadata::document::{BackgroundColor, DocumentTemplate};
use crate::rules::matcher::Condition;
use crate::rules::set::{AttributeRule, AttributeRuleSet, RuleCategory};

/// Validated, ready-to-run configuration shared read-only by every item of a run.
#[derive(Clone, Debug)]
pub struct CompiledConfig {
    rules: AttributeRuleSet,
    trait_order: Option<TraitOrder>,
    document: DocumentTemplate,
}

impl CompiledConfig {
    /// Assemble from already-built parts.
    pub fn new(
        rules: AttributeRuleSet,
        trait_order: Option<TraitOrder>,
        document: DocumentTemplate,
    ) -> Self {
        Self {
            rules,
            trait_order,
            document,
        }
    }

    /// Attribute rules.
    pub fn rules(&self) -> &AttributeRuleSet {
        &self.rules
    }

    /// Required trait order, if configured.
    pub fn trait_order(&self) -> Option<&TraitOrder> {
        self.trait_order.as_ref()
    }

    /// Scalar field templates.
    pub fn document(&self) -> &DocumentTemplate {
        &self.document
    }
}

impl AssetConfig {
    /// Compile the `metadata` section.
    pub fn compile(&self) -> TraitsmithResult<CompiledConfig> {
        self.metadata()?.compile()
    }
}

impl MetadataConfig {
    /// Compile patterns and templates and validate values.
    ///
    /// Every configuration problem is reported here; generation itself only fails per item.
    pub fn compile(&self) -> TraitsmithResult<CompiledConfig> {
        let mut patterns = PatternCache::default();
        let mut rules = AttributeRuleSet::new();

        for (i, def) in self.texts.iter().flatten().enumerate() {
            let at = Location::new(RuleCategory::Simple, i);
            let conditions = patterns.conditions(&def.conditions, &at)?;
            rules.push(at.rule(Attribute::simple(&def.value), conditions)?);
        }

        for (i, def) in self.text_labels.iter().flatten().enumerate() {
            let at = Location::new(RuleCategory::TextLabel, i);
            let conditions = patterns.conditions(&def.conditions, &at)?;
            let attr = Attribute::string_label(&def.trait_type, &def.value);
            rules.push(at.rule(attr, conditions)?);
        }

        for (i, def) in self.date_labels.iter().flatten().enumerate() {
            let at = Location::new(RuleCategory::DateLabel, i);
            let conditions = patterns.conditions(&def.conditions, &at)?;
            let attr = Attribute::DateLabel {
                trait_type: def.trait_type.clone(),
                value: def.value.0,
            };
            rules.push(at.rule(attr, conditions)?);
        }

        for (i, def) in self.int_labels.iter().flatten().enumerate() {
            let at = Location::new(RuleCategory::IntLabel, i);
            let conditions = patterns.conditions(&def.conditions, &at)?;
            let attr = Attribute::number_label(&def.trait_type, NumericValue::Int(def.value));
            rules.push(at.rule(attr, conditions)?);
        }

        for (i, def) in self.float_labels.iter().flatten().enumerate() {
            let at = Location::new(RuleCategory::FloatLabel, i);
            let conditions = patterns.conditions(&def.conditions, &at)?;
            let value = at.finite(NumericValue::Float(def.value), "value")?;
            let attr = Attribute::number_label(&def.trait_type, value);
            rules.push(at.rule(attr, conditions)?);
        }

        for (i, def) in self.ranked_numbers.iter().flatten().enumerate() {
            let at = Location::new(RuleCategory::RankedNumber, i);
            let conditions = patterns.conditions(&def.conditions, &at)?;
            let attr = Attribute::RankedNumber {
                trait_type: def.trait_type.clone(),
                value: at.finite(def.value, "value")?,
            };
            rules.push(at.rule(attr, conditions)?);
        }

        for (i, def) in self.boost_numbers.iter().flatten().enumerate() {
            let at = Location::new(RuleCategory::BoostNumber, i);
            let conditions = patterns.conditions(&def.conditions, &at)?;
            let attr = Attribute::BoostNumber {
                trait_type: def.trait_type.clone(),
                value: at.finite(def.value, "value")?,
                max_value: at.finite(def.max, "max")?,
            };
            rules.push(at.rule(attr, conditions)?);
        }

        for (i, def) in self.boost_percentages.iter().flatten().enumerate() {
            let at = Location::new(RuleCategory::BoostPercentage, i);
            let conditions = patterns.conditions(&def.conditions, &at)?;
            let attr = Attribute::BoostPercentage {
                trait_type: def.trait_type.clone(),
                value: at.finite(def.value, "value")?,
            };
            rules.push(at.rule(attr, conditions)?);
        }

        let trait_order = self
            .order
            .as_ref()
            .and_then(|o| o.traits.clone())
            .map(TraitOrder::new);

        let document = DocumentTemplate {
            image_url: required_template("imageUrlFormat", &self.image_url_format)?,
            name: required_template("defaultNameFormat", &self.default_name_format)?,
            description: required_template(
                "defaultDescriptionFormat",
                &self.default_description_format,
            )?,
            external_url: self.external_url_format.as_deref().and_then(|s| {
                SerialTemplate::parse(s)
                    .inspect_err(|e| tracing::warn!(error = %e, "ignoring externalUrlFormat"))
                    .ok()
            }),
            background_color: match &self.background_color {
                Some(c) => BackgroundColor::parse(c)?,
                None => BackgroundColor::default(),
            },
        };

        tracing::debug!(
            rules = rules.len(),
            trait_order = trait_order.is_some(),
            "compiled metadata config"
        );

        Ok(CompiledConfig::new(rules, trait_order, document))
    }
}

fn required_template(field: &str, source: &str) -> TraitsmithResult<SerialTemplate> {
    SerialTemplate::parse(source).map_err(|e| TraitsmithError::config(format!("{field}: {e}")))
}

/// Position of a rule in the config, for error messages.
struct Location {
    category: RuleCategory,
    index: usize,
}

impl Location {
    fn new(category: RuleCategory, index: usize) -> Self {
        Self { category, index }
    }

    fn rule(
        &self,
        attribute: Attribute,
        conditions: Vec<Condition>,
    ) -> TraitsmithResult<AttributeRule> {
        AttributeRule::new(attribute, conditions)
            .map_err(|e| TraitsmithError::config(format!("{self}: {e}")))
    }

    fn finite(&self, value: NumericValue, field: &str) -> TraitsmithResult<NumericValue> {
        match value {
            NumericValue::Float(v) if !v.is_finite() => Err(TraitsmithError::config(format!(
                "{self}: {field} must be finite"
            ))),
            _ => Ok(value),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "metadata.{}[{}]", self.category.config_key(), self.index)
    }
}

/// Compiles each distinct pattern once per config.
#[derive(Default)]
struct PatternCache {
    compiled: HashMap<String, Regex>,
}

impl PatternCache {
    fn conditions(
        &mut self,
        subjects: &[SubjectDef],
        at: &Location,
    ) -> TraitsmithResult<Vec<Condition>> {
        subjects
            .iter()
            .map(|s| match &s.name {
                None => Ok(Condition::never(&s.layer)),
                Some(pattern) => Ok(Condition::new(&s.layer, self.regex(pattern, at)?)),
            })
            .collect()
    }

    fn regex(&mut self, pattern: &str, at: &Location) -> TraitsmithResult<Regex> {
        if let Some(re) = self.compiled.get(pattern) {
            return Ok(re.clone());
        }
        let re = Regex::new(pattern).map_err(|e| {
            TraitsmithError::config(format!("{at}: invalid pattern '{pattern}': {e}"))
        })?;
        self.compiled.insert(pattern.to_string(), re.clone());
        Ok(re)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/compile.rs"]
mod tests;
