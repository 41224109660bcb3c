pub(crate) mod avatar;
pub(crate) mod drawing;
pub(crate) mod proportions;
pub(crate) mod raster;
