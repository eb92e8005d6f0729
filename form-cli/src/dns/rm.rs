use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use form_dns::{api, Client, DnsRecord};

use crate::args::ParsedArgs;
use crate::output::{self, Stamp};
use super::ls::records_table;
use super::{EXIT_FAILURE, EXIT_SUCCESS};

fn confirm_removal(record: &DnsRecord, domain: &str) -> std::io::Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Are you sure you want to remove the record {} from {}? This action cannot be undone.",
            record.id, domain
        ))
        .default(false)
        .interact()
}

/// `form dns rm <id>`
pub async fn rm(client: &Client, flags: &ParsedArgs, args: &[String]) -> i32 {
    remove_with(client, flags, args, confirm_removal).await
}

/// Removal with the confirmation step supplied by the caller.
pub async fn remove_with<F>(client: &Client, flags: &ParsedArgs, args: &[String], confirm: F) -> i32
where
    F: FnOnce(&DnsRecord, &str) -> std::io::Result<bool>,
{
    let [id] = args else {
        output::error(&format!("Invalid number of arguments. Usage: {}", "`form dns rm <id>`".cyan()));
        return EXIT_FAILURE;
    };
    log::debug!("Removing record {id} (scope: {:?})", flags.string("--scope").or(client.team_id()));

    let record = match api::get_record(client, id).await {
        Ok(record) => record,
        Err(e) if e.status() == Some(404) => {
            output::error(&format!("A DNS record with the id {} was not found.", id.bold()));
            return EXIT_FAILURE;
        }
        Err(e) => {
            output::handle_error(&e);
            return EXIT_FAILURE;
        }
    };

    let Some(domain) = record.domain.clone() else {
        output::error(&format!("The API did not report a domain for record {}.", id.bold()));
        return EXIT_FAILURE;
    };

    println!("The following record will be removed permanently\n");
    print!("{}", records_table(std::slice::from_ref(&record)));
    println!();

    match confirm(&record, &domain) {
        Ok(true) => {}
        Ok(false) => {
            println!("Operation cancelled.");
            return EXIT_SUCCESS;
        }
        Err(e) => {
            output::handle_error(&e);
            return EXIT_FAILURE;
        }
    }

    let stamp = Stamp::start();
    match api::delete_record(client, &domain, &record.id).await {
        Ok(()) => {
            output::success(&format!("Record {} removed {}", id.bold(), stamp));
            EXIT_SUCCESS
        }
        Err(e) => {
            output::handle_error(&e);
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{"record":{"id":"rec_1","name":"www","type":"A","value":"1.2.3.4","domain":"example.com"}}"#;

    fn client(server: &mockito::Server) -> Client {
        Client::new(server.url()).with_token(Some("token".to_string()))
    }

    #[tokio::test]
    async fn test_wrong_arity() {
        let status = remove_with(&Client::default(), &ParsedArgs::default(), &[], |_, _| Ok(true)).await;
        assert_eq!(status, EXIT_FAILURE);
    }

    #[tokio::test]
    async fn test_confirmed_removal() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/v5/domains/records/rec_1").with_body(RECORD).create_async().await;
        let delete = server
            .mock("DELETE", "/v2/domains/example.com/records/rec_1")
            .with_body("{}")
            .create_async()
            .await;

        let status = remove_with(&client(&server), &ParsedArgs::default(), &["rec_1".to_string()], |record, domain| {
            assert_eq!(record.id, "rec_1");
            assert_eq!(domain, "example.com");
            Ok(true)
        })
        .await;

        assert_eq!(status, EXIT_SUCCESS);
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_declined_removal_sends_no_delete() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/v5/domains/records/rec_1").with_body(RECORD).create_async().await;
        let delete = server
            .mock("DELETE", "/v2/domains/example.com/records/rec_1")
            .expect(0)
            .create_async()
            .await;

        let status = remove_with(&client(&server), &ParsedArgs::default(), &["rec_1".to_string()], |_, _| Ok(false)).await;

        assert_eq!(status, EXIT_SUCCESS);
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_removal_reads_parsed_flags() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/v5/domains/records/rec_1").with_body(RECORD).create_async().await;
        let delete = server
            .mock("DELETE", "/v2/domains/example.com/records/rec_1")
            .with_body("{}")
            .create_async()
            .await;

        let argv: Vec<String> = ["rm", "rec_1", "--scope", "team_1", "-d"].iter().map(|s| s.to_string()).collect();
        let flags = crate::args::parse(&argv, &crate::dns::DNS_SCHEMA).unwrap();
        assert_eq!(flags.string("--scope"), Some("team_1"));

        let status = remove_with(&client(&server), &flags, &flags.positional()[1..], |_, _| Ok(true)).await;

        assert_eq!(status, EXIT_SUCCESS);
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_record() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v5/domains/records/rec_404")
            .with_status(404)
            .with_body(r#"{"error":{"code":"not_found","message":"Not found"}}"#)
            .create_async()
            .await;

        let status = remove_with(&client(&server), &ParsedArgs::default(), &["rec_404".to_string()], |_, _| Ok(true)).await;
        assert_eq!(status, EXIT_FAILURE);
    }
}
