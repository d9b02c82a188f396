//! Command families behind the `navaudit` subcommands.

pub mod audit;
pub mod correct;
pub mod renumber;
