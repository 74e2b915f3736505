//! Terminal till: a line-oriented front-end over a sale session.

pub mod config;
pub mod console;
pub mod input;
pub mod till;

pub use config::Config;
pub use console::ConsoleSink;
pub use input::{Input, InputError};
pub use till::{Flow, Till};
