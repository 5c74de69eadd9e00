//! JavaScript bindings for the browser front end

pub mod convert;
pub mod init;
