pub mod cmd_fetch;
pub mod cmd_parse;
pub mod common;
