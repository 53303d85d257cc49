#[macro_use]
extern crate lazy_static;

pub mod cli;
pub mod errors;
pub mod highlight;
pub mod pathlib;
pub mod span;
pub mod syntax;
