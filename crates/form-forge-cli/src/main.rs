mod cli;
mod commands;
mod config;
#[allow(unused_assignments)]
mod diagnostic;
mod error;
mod logging;
mod output;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    let output = output::OutputContext::from_global(&cli.global);

    let config = match config::load_config(cli.global.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output.print_error(&e);
            std::process::exit(e.exit_code() as i32);
        }
    };

    logging::init(&logging::filter_directive(
        std::env::var("RUST_LOG").ok(),
        cli.global.verbose,
        cli.global.quiet,
        &config.log.filter,
    ));

    let result = match cli.command {
        cli::Commands::Check(args) => commands::check::run(args, &config, &output),
        cli::Commands::Validate(args) => commands::validate::run(args, &output),
        cli::Commands::Inspect(args) => commands::inspect::run(args, &output),
        cli::Commands::Reorder(args) => commands::reorder::run(args, &output),
        cli::Commands::Completions(args) => commands::completions::run(args),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::debug!(exit_code = e.exit_code() as i32, "command failed");
            output.print_error(&e);
            std::process::exit(e.exit_code() as i32);
        }
    }
}
