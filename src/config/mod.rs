//! JSON configuration: the decoded document and its compiled, immutable form.

pub(crate) mod compile;
pub(crate) mod model;
