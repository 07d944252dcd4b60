//! Attribute model and the per-item attribute pipeline stages.
//!
//! Stages run in this order for every item: [`build`](build::build) evaluates the rule set,
//! [`dedupe`](dedupe::dedupe) collapses identical attributes, and [`order`](order::order)
//! applies the configured trait order. Encoding to the wire schema lives in [`encode`].

pub(crate) mod build;
pub(crate) mod dedupe;
pub(crate) mod encode;
pub(crate) mod model;
pub(crate) mod order;
