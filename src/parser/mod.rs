//! Parser for template source

pub mod ast;
mod bare;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use bare::{parse_bare, MarkerRole};
pub use grammar::parse;
