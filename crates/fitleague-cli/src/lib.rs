// Command-line calling layer for the league engine: configuration, input
// files and the subcommands that print JSON.

pub mod commands;
pub mod config;
pub mod inputs;
