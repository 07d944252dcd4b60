//! Shared error taxonomy and serial-number templates.

pub(crate) mod error;
pub(crate) mod template;
