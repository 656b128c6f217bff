pub(crate) mod calendar;
pub(crate) mod decompose;
