//! trustgate: link protection trusted domains and webview editor
//! contributions for an editor workbench.

pub mod cli;
pub mod config;
pub mod domains;
pub mod error;
pub mod io;
pub mod quickinput;
pub mod storage;
pub mod workbench;

pub use error::{Result, TrustgateError};
