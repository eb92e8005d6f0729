use reqwest::{header::CONTENT_TYPE, Method};
use serde::{Serialize, Deserialize};

use crate::{Client, DnsApiError, DnsRecord, NewRecord};

/// Page request; `next` is the cursor returned by a previous page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u32>,
    pub next: Option<i64>,
}

impl Page {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(next) = self.next {
            query.push(("until", next.to_string()));
        }
        query
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub next: Option<i64>,
    #[serde(default)]
    pub prev: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordPage {
    pub records: Vec<DnsRecord>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DomainPage {
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct CreatedRecord {
    uid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedRecords {
    record_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecordLookup {
    record: DnsRecord,
}

/// Percent-encodes a single path segment
fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Creates a record and returns its id
pub async fn create_record(client: &Client, domain: &str, record: &NewRecord) -> Result<String, DnsApiError> {
    let path = format!("/v3/domains/{}/records", encode(domain));
    let req = client.request(Method::POST, &path)?.json(record);
    let created: CreatedRecord = client.send(req).await?;
    Ok(created.uid)
}

/// Uploads a zone file, returning the ids of the records it produced
pub async fn import_zonefile(client: &Client, domain: &str, zonefile: String) -> Result<Vec<String>, DnsApiError> {
    let path = format!("/v3/domains/{}/records", encode(domain));
    let req = client
        .request(Method::PUT, &path)?
        .header(CONTENT_TYPE, "text/plain")
        .body(zonefile);
    let imported: ImportedRecords = client.send(req).await?;
    Ok(imported.record_ids)
}

pub async fn list_records(client: &Client, domain: &str, page: Page) -> Result<RecordPage, DnsApiError> {
    let path = format!("/v4/domains/{}/records", encode(domain));
    let req = client.request(Method::GET, &path)?.query(&page.query());
    client.send(req).await
}

pub async fn list_domains(client: &Client, page: Page) -> Result<DomainPage, DnsApiError> {
    let req = client.request(Method::GET, "/v5/domains")?.query(&page.query());
    client.send(req).await
}

/// Looks a record up by id; the result carries its domain
pub async fn get_record(client: &Client, id: &str) -> Result<DnsRecord, DnsApiError> {
    let path = format!("/v5/domains/records/{}", encode(id));
    let req = client.request(Method::GET, &path)?;
    let lookup: RecordLookup = client.send(req).await?;
    Ok(lookup.record)
}

pub async fn delete_record(client: &Client, domain: &str, id: &str) -> Result<(), DnsApiError> {
    let path = format!("/v2/domains/{}/records/{}", encode(domain), encode(id));
    let req = client.request(Method::DELETE, &path)?;
    let _: serde_json::Value = client.send(req).await?;
    Ok(())
}
