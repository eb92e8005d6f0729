use colored::Colorize;
use futures::future::join_all;
use form_dns::{api, Client, DnsRecord, Page};

use crate::args::ParsedArgs;
use crate::output::{self, Stamp};
use super::{EXIT_FAILURE, EXIT_SUCCESS};

pub const MAX_LIMIT: i64 = 100;

/// Page request from `--next` and `--limit`.
pub fn pagination(flags: &ParsedArgs) -> Result<Page, String> {
    let next = flags.integer("--next");
    if matches!(next, Some(n) if n < 0) {
        return Err("Please provide a non-negative number for option --next".to_string());
    }

    let limit = match flags.integer("--limit") {
        Some(limit) if (1..=MAX_LIMIT).contains(&limit) => Some(limit as u32),
        Some(_) => return Err(format!("Please provide a number up to {MAX_LIMIT} for option --limit")),
        None => None,
    };

    Ok(Page { limit, next })
}

pub fn records_table(records: &[DnsRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record.id.clone(),
                record.name.clone(),
                record.record_type.to_string(),
                record.display_value(),
                output::format_created(record.created_at),
            ]
        })
        .collect();
    output::table(&["id", "name", "type", "value", "created"], &rows)
}

fn print_next_page(domain: Option<&str>, next: i64) {
    let command = match domain {
        Some(domain) => format!("form dns ls {domain} --next {next}"),
        None => format!("form dns ls --next {next}"),
    };
    println!("To display the next page run {}", format!("`{command}`").cyan());
}

/// `form dns ls [domain]`
pub async fn ls(client: &Client, flags: &ParsedArgs, args: &[String]) -> i32 {
    if args.len() > 1 {
        output::error(&format!(
            "Invalid number of arguments. Usage: {}",
            "`form dns ls [domain]`".cyan()
        ));
        return EXIT_FAILURE;
    }

    let page = match pagination(flags) {
        Ok(page) => page,
        Err(message) => {
            output::error(&message);
            return EXIT_FAILURE;
        }
    };

    match args.first() {
        Some(domain) => list_domain(client, domain, page).await,
        None => list_all(client, page).await,
    }
}

async fn list_domain(client: &Client, domain: &str, page: Page) -> i32 {
    let stamp = Stamp::start();
    let result = match api::list_records(client, domain, page).await {
        Ok(result) => result,
        Err(e) => {
            output::handle_error(&e);
            return EXIT_FAILURE;
        }
    };

    output::log(&format!(
        "{} Records found under {} {}",
        result.records.len(),
        domain.bold(),
        stamp
    ));
    if !result.records.is_empty() {
        print!("\n{}", records_table(&result.records));
    }
    if let Some(next) = result.pagination.next {
        println!();
        print_next_page(Some(domain), next);
    }
    EXIT_SUCCESS
}

async fn list_all(client: &Client, page: Page) -> i32 {
    let stamp = Stamp::start();
    let domains = match api::list_domains(client, page).await {
        Ok(domains) => domains,
        Err(e) => {
            output::handle_error(&e);
            return EXIT_FAILURE;
        }
    };

    let lookups = domains
        .domains
        .iter()
        .map(|domain| api::list_records(client, &domain.name, Page::default()));
    let results = join_all(lookups).await;

    let mut status = EXIT_SUCCESS;
    let mut sections = Vec::new();
    let mut total = 0;
    for (domain, result) in domains.domains.iter().zip(results) {
        match result {
            Ok(records) => {
                total += records.records.len();
                sections.push((domain.name.as_str(), records.records));
            }
            Err(e) => {
                output::error(&format!("Unable to list records for {}: {e}", domain.name.bold()));
                status = EXIT_FAILURE;
            }
        }
    }

    output::log(&format!(
        "{} Records found under {} domains {}",
        total,
        sections.len(),
        stamp
    ));
    for (name, records) in sections {
        println!("\n{}", name.bold());
        if !records.is_empty() {
            print!("{}", records_table(&records));
        }
    }
    if let Some(next) = domains.pagination.next {
        println!();
        print_next_page(None, next);
    }
    status
}
