pub(crate) mod shade;
