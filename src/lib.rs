#[macro_use]
extern crate log;

pub mod formula;
pub mod parser;
pub mod prelude;
pub mod process;
pub mod report;
pub mod solver;
pub mod variables;
