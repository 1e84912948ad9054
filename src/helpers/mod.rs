//! Helper functions for templates
//!
//! Plain functions behind the Tera filters registered by the template
//! renderer, usable from Rust code as well.

mod date;
mod text;

pub use date::*;
pub use text::*;
