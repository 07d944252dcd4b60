//! traitsmith derives marketplace metadata for layered generative collections.
//!
//! Each generated item is a set of layer selections (`Background = gold`, `Hat = crown`, ...).
//! A declarative rule set maps those selections to trait attributes, which are then written as
//! one OpenSea-style JSON document per item.
//!
//! # Pipeline overview
//!
//! 1. **Compile**: `AssetConfig -> CompiledConfig` (regexes, serial templates, trait order)
//! 2. **Build**: `[LayerSelection] + AttributeRuleSet -> [Attribute]` (every rule that fires)
//! 3. **Dedupe**: drop attributes with an identical kind, trait type and value
//! 4. **Order**: alphabetical, or by the configured trait order which must cover every trait
//! 5. **Assemble**: `serial + DocumentTemplate + [Attribute] -> MetadataDocument`
//! 6. **Write** (optional): `<serial>.json` per item, removed again if the item fails
//!
//! Steps 2-5 are pure and share nothing between items, so batches run item-parallel on rayon.
//! A failing item (uncovered trait, unparsable image URL) is reported on its own and never
//! affects the rest of the batch.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod attributes;
mod config;
mod foundation;
mod metadata;
mod pipeline;
mod rules;

pub use attributes::build::build;
pub use attributes::dedupe::dedupe;
pub use attributes::encode::{WireAttribute, WireError, WireValue, encode};
pub use attributes::model::{Attribute, AttributeIdentity, AttributeKind, NumericValue};
pub use attributes::order::{
    OrderError, TraitOrder, order, sort_alphabetically, sort_by_trait_order, validate_coverage,
};
pub use config::compile::CompiledConfig;
pub use config::model::{
    AssetConfig, BoostDef, ConfigDate, LabelDef, MetadataConfig, OrderDef, SimpleDef, SubjectDef,
};
pub use foundation::error::{TraitsmithError, TraitsmithResult};
pub use foundation::template::{MAX_TEMPLATE_WIDTH, SerialTemplate, TemplateError};
pub use metadata::document::{
    AssemblyError, BackgroundColor, DEFAULT_BACKGROUND_COLOR, DocumentTemplate, MetadataDocument,
    assemble,
};
pub use metadata::writer::MetadataWriter;
pub use pipeline::{
    BatchOptions, BatchReport, ItemOutcome, ItemSpec, generate_batch, generate_item,
    generate_to_dir,
};
pub use rules::matcher::{Condition, LayerSelection, matches};
pub use rules::set::{AttributeRule, AttributeRuleSet, RuleCategory};
