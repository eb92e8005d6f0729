pub mod api;
pub mod client;
pub mod error;
pub mod record;

pub use api::{Domain, DomainPage, Page, Pagination, RecordPage};
pub use client::{Client, DEFAULT_API_URL};
pub use error::DnsApiError;
pub use record::{parse_add_args, DnsRecord, NewRecord, RecordType, SrvData};
