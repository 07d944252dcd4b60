//! Layer conditions and the compiled attribute rule set.

pub(crate) mod matcher;
pub(crate) mod set;
