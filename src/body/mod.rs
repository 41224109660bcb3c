pub(crate) mod descriptor;
pub(crate) mod factors;
pub(crate) mod palette;
pub(crate) mod validate;
