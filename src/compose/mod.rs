pub(crate) mod catalog;
pub(crate) mod composer;
pub(crate) mod part;
pub(crate) mod raster;
pub(crate) mod store;
pub(crate) mod validate;
