pub(crate) mod archetype;
pub(crate) mod table;
