//! CampusChaos console - the text front end of the campus dice race
//!
//! Reads one command per line, runs it against the sessions of a
//! [`chaos_board::SessionManager`] and prints the result.
//!
//! # Architecture
//!
//! - **Command**: keyword classification and typed parameters
//! - **Console**: availability check, dispatch and output lines
//! - **Render**: grid, session listing, events and error lines
//! - **Config**: TOML settings for logging, map directory and greeting
//!
//! # Example
//!
//! ```
//! use campus_chaos::{Console, Response};
//!
//! let mut console = Console::default();
//! assert!(console.execute("show").is_err());
//! assert_eq!(console.execute("quit"), Ok(Response::Quit));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod command;
mod config;
mod help;
mod map_loader;
mod render;
mod repl;

// Crate-level exports - Board rules
pub use chaos_board::*;

// Crate-level exports - Command line and configuration
pub use cli::Cli;
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Parsing
pub use command::{Command, ConsoleError, ParseError, classify};

// Crate-level exports - Console
pub use help::{HelpTable, description};
pub use map_loader::MapLoader;
pub use render::{error_line, event_lines, render_grid, render_session_grid, session_line};
pub use repl::{Console, GREETING, Response, run};
