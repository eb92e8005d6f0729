use colored::Colorize;
use form_dns::{api, Client};

use crate::args::ParsedArgs;
use crate::output::{self, Stamp};
use super::{EXIT_FAILURE, EXIT_SUCCESS};

/// `form dns import <domain> <zonefile>`
pub async fn import(client: &Client, flags: &ParsedArgs, args: &[String]) -> i32 {
    let [domain, path] = args else {
        output::error(&format!(
            "Invalid number of arguments. Usage: {}",
            "`form dns import <domain> <zonefile>`".cyan()
        ));
        return EXIT_FAILURE;
    };

    let zonefile = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) => {
            output::error(&format!("Couldn't read zone file {}: {e}", path.bold()));
            return EXIT_FAILURE;
        }
    };
    log::debug!(
        "Read {} bytes of zone file from {path} for {domain} (scope: {:?})",
        zonefile.len(),
        flags.string("--scope").or(client.team_id())
    );

    let stamp = Stamp::start();
    match api::import_zonefile(client, domain, zonefile).await {
        Ok(ids) => {
            output::success(&format!(
                "{} DNS records for domain {} created {}",
                ids.len(),
                domain.bold(),
                stamp
            ));
            EXIT_SUCCESS
        }
        Err(e) => {
            output::handle_error(&e);
            EXIT_FAILURE
        }
    }
}
