pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ops",
    about = "Ops assistant operator CLI",
    long_about = "Apply migrations, load CSV seed data, inspect configuration, and run assistant tools \
                  against the record store.",
    after_help = "Examples:\n  ops migrate\n  ops seed --data-dir data\n  ops tool lookup_order ORD-5353"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load new rows from the CSV seed directory; existing ids are left untouched")]
    Seed {
        #[arg(long, help = "Directory holding users.csv, products.csv, orders.csv, messages.csv")]
        data_dir: Option<PathBuf>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Run one assistant tool and print the text it would hand the model")]
    Tool {
        #[arg(help = "Tool name, e.g. lookup_order, find_active_orders, get_order_sentiment")]
        name: String,
        #[arg(help = "Value for the tool's single argument (order code or company name)")]
        value: String,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed { data_dir } => commands::seed::run(data_dir),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Tool { name, value } => commands::tool::run(&name, &value),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
