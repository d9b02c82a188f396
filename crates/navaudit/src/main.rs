use clap::Parser;
use navaudit::cli::Cli;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    navaudit::init_logging(cli.verbose);
    navaudit::exit_code(navaudit::execute(cli))
}
