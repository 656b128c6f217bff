pub(crate) mod arc;
