//! Inbound adapters: the `contacts` command line.

pub mod cli;
