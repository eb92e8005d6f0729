use clap::{Args, Parser, Subcommand};
use form_cli::config::{Config, ConfigOverrides};
use form_cli::dns::{self, RemoteHandlers};
use form_cli::output;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "form", version, about = "Manage your formation cloud resources")]
pub struct Form {
    #[clap(subcommand)]
    pub command: FormCommand,
}

#[derive(Debug, Subcommand)]
pub enum FormCommand {
    /// Manage DNS records for your domains (see `form dns --help`)
    #[command(disable_help_flag = true)]
    Dns(DnsArgs),
}

#[derive(Debug, Args)]
pub struct DnsArgs {
    /// Everything after `dns`, parsed by the dns command itself
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

fn init_logger(debug: bool) {
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = simple_logger::SimpleLogger::new().with_level(level).init() {
        eprintln!("Unable to initialize logger: {e}");
    }
}

fn no_color_requested(argv: &[String]) -> bool {
    argv.iter().take_while(|arg| *arg != "--").any(|arg| arg == "--no-color")
}

async fn run_dns(argv: Vec<String>) -> i32 {
    // Help output and parse errors are printed before the flags are known.
    if no_color_requested(&argv) {
        colored::control::set_override(false);
    }

    let flags = match dns::interpret(&argv) {
        Ok(flags) => flags,
        Err(status) => return status,
    };

    init_logger(flags.boolean("--debug"));

    let config = match Config::load(&ConfigOverrides::from_flags(&flags)) {
        Ok(config) => config,
        Err(e) => {
            output::handle_error(&format!("{e:#}"));
            return dns::EXIT_FAILURE;
        }
    };
    log::debug!("Using API {} (scope: {:?})", config.api_url, config.scope);

    dns::dispatch(&config.client(), &RemoteHandlers, &flags).await
}

#[tokio::main]
async fn main() {
    let parser = Form::parse();

    let status = match parser.command {
        FormCommand::Dns(dns_args) => run_dns(dns_args.args).await,
    };

    std::process::exit(status);
}
