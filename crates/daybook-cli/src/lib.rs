//! `dbk`: command line front-end for daybook

pub mod cli;
pub mod commands;
pub mod context;
pub mod formatting;
pub mod logging;
