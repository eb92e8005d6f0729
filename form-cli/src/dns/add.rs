use colored::Colorize;
use form_dns::{api, parse_add_args, Client, DnsApiError};

use crate::args::ParsedArgs;
use crate::output::{self, Stamp};
use super::{EXIT_FAILURE, EXIT_SUCCESS};

fn scope_name(client: &Client) -> String {
    client.team_id().unwrap_or("your personal account").to_string()
}

pub fn print_add_failure(err: &DnsApiError, domain: &str, client: &Client) {
    match err.status() {
        Some(403) => output::error(&format!(
            "You don't have permission to add records to {} under {}.",
            domain.bold(),
            scope_name(client).bold()
        )),
        Some(404) => output::error(&format!(
            "The domain {} can't be found under {}.",
            domain.bold(),
            scope_name(client).bold()
        )),
        Some(409) => output::error(&format!(
            "A conflicting record exists for {}: {}",
            domain.bold(),
            err
        )),
        _ => output::handle_error(err),
    }
}

/// `form dns add <domain> <name> <type> <value...>`
pub async fn add(client: &Client, flags: &ParsedArgs, args: &[String]) -> i32 {
    let (domain, record) = match parse_add_args(args) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            output::error(&format!(
                "Invalid number of arguments. See: {} for usage.",
                "`form dns --help`".cyan()
            ));
            return EXIT_FAILURE;
        }
        Err(e) => {
            output::handle_error(&e);
            return EXIT_FAILURE;
        }
    };

    log::debug!(
        "Adding {} record {} to {domain} (scope: {:?})",
        record.record_type,
        record.name,
        flags.string("--scope").or(client.team_id())
    );

    let stamp = Stamp::start();
    match api::create_record(client, &domain, &record).await {
        Ok(id) => {
            output::success(&format!(
                "DNS record for domain {} ({}) created {}",
                domain.bold(),
                id.dimmed(),
                stamp
            ));
            EXIT_SUCCESS
        }
        Err(e) => {
            print_add_failure(&e, &domain, client);
            EXIT_FAILURE
        }
    }
}
