pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod sql_script;

pub use error::{Result, ScriptError};
