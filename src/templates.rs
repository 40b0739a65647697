pub const MAKEFILE_HEADER: &str = include_str!("templates/makefile-header.tmpl");
pub const MAKEFILE_OBJECT: &str = include_str!("templates/makefile-object.tmpl");

pub const USAGE: &str = include_str!("templates/usage.tmpl");
