pub(crate) mod identifiers;
pub(crate) mod path;


pub(crate) use path::ApiPath;
