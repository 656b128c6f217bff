pub(crate) mod pipeline;
pub(crate) mod raster;
pub(crate) mod style;
pub(crate) mod svg;
