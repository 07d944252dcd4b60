//! Metadata documents and their on-disk form.

pub(crate) mod document;
pub(crate) mod writer;
