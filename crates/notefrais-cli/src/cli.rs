use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "notefrais")]
#[command(bin_name = "notefrais")]
#[command(version)]
#[command(about = "Employee expense bill tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Print the submitted bills, latest first")]
    List,
    #[command(about = "Submit a new expense bill")]
    New,
}
