//! Cantor CLI: the `cantor` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Partition {
            fixture,
            depth,
            slots,
            json,
        } => commands::partition::run(fixture, depth, slots, json),

        Commands::Encode {
            fixture,
            depth,
            points,
            json,
        } => commands::encode::run(fixture, depth, points, json),

        Commands::Separation {
            fixture,
            depth,
            json,
        } => commands::separation::run(fixture, depth, json),

        Commands::Check {
            fixture,
            depth,
            json,
        } => commands::check::run(fixture, depth, json),
    }
}
