mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, check, list};
use gatecheck_common::config::Config;
use terminal::{logging, print};

fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg = Config {
        no_banner: commands.no_banner,
        quiet: commands.quiet,
    };

    print::banner(cfg.no_banner, cfg.quiet);

    let patterns: String = commands.allow_list()?;
    let checker = commands::compile(&patterns, cfg.quiet)?;

    let success: bool = match &commands.command {
        Commands::Check { addresses } => {
            print::header("checking addresses", cfg.quiet);
            check::check(&checker, addresses, &cfg)
        }
        Commands::List => {
            print::header("compiled allow-list", cfg.quiet);
            list::list(&checker, &cfg);
            true
        }
    };

    print::end_of_program(cfg.quiet);

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
