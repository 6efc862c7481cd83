//! Lookahead parsing of compiler and static analysis output into
//! normalized issue reports.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod issue;
pub mod output;
pub mod parser;
pub mod runner;
pub mod source;
