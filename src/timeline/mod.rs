pub(crate) mod builder;
pub(crate) mod motion;
pub(crate) mod sequence;
