use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::DnsApiError;

/// Record types `form dns add` can create. Listings may carry types this
/// list doesn't know; those keep their name in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    ALIAS,
    CAA,
    CNAME,
    MX,
    NS,
    SRV,
    TXT,
    #[serde(untagged)]
    Other(String),
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::ALIAS => "ALIAS",
            RecordType::CAA => "CAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::NS => "NS",
            RecordType::SRV => "SRV",
            RecordType::TXT => "TXT",
            RecordType::Other(name) => name,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = DnsApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "ALIAS" => Ok(RecordType::ALIAS),
            "CAA" => Ok(RecordType::CAA),
            "CNAME" => Ok(RecordType::CNAME),
            "MX" => Ok(RecordType::MX),
            "NS" => Ok(RecordType::NS),
            "SRV" => Ok(RecordType::SRV),
            "TXT" => Ok(RecordType::TXT),
            other => Err(DnsApiError::InvalidRecord(format!("unsupported record type {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrvData {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// Body of a record creation request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx_priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srv: Option<SrvData>,
}

/// A record as the API returns it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub mx_priority: Option<u16>,
    #[serde(default)]
    pub priority: Option<u16>,
    /// Milliseconds since the UNIX epoch
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Only present when the record was looked up by id
    #[serde(default)]
    pub domain: Option<String>,
}

impl DnsRecord {
    /// Value column as shown to users, MX priority folded in
    pub fn display_value(&self) -> String {
        match self.mx_priority.or(self.priority) {
            Some(p) if self.record_type == RecordType::MX => format!("{p} {}", self.value),
            _ => self.value.clone(),
        }
    }
}

/// Parses `domain name type ...` into the domain and the record to create.
///
/// Returns `Ok(None)` when the arity or a numeric field does not match the
/// shape for the given type. An unknown type is an error.
pub fn parse_add_args(args: &[String]) -> Result<Option<(String, NewRecord)>, DnsApiError> {
    if args.len() < 4 {
        return Ok(None);
    }

    let domain = args[0].clone();
    let name = args[1].clone();
    let record_type: RecordType = args[2].parse()?;

    let record = match record_type {
        RecordType::MX => {
            if args.len() != 5 {
                return Ok(None);
            }
            let Ok(priority) = args[4].parse::<u16>() else {
                return Ok(None);
            };
            NewRecord {
                name,
                record_type,
                value: Some(args[3].clone()),
                mx_priority: Some(priority),
                srv: None,
            }
        }
        RecordType::SRV => {
            if args.len() != 7 {
                return Ok(None);
            }
            let numbers = (args[3].parse::<u16>(), args[4].parse::<u16>(), args[5].parse::<u16>());
            let (Ok(priority), Ok(weight), Ok(port)) = numbers else {
                return Ok(None);
            };
            NewRecord {
                name,
                record_type,
                value: None,
                mx_priority: None,
                srv: Some(SrvData { priority, weight, port, target: args[6].clone() }),
            }
        }
        _ => {
            if args.len() != 4 {
                return Ok(None);
            }
            NewRecord {
                name,
                record_type,
                value: Some(args[3].clone()),
                mx_priority: None,
                srv: None,
            }
        }
    };

    Ok(Some((domain, record)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_a_record() {
        let (domain, record) = parse_add_args(&args(&["example.com", "@", "A", "198.51.100.100"]))
            .unwrap()
            .unwrap();
        assert_eq!(domain, "example.com");
        assert_eq!(record.name, "@");
        assert_eq!(record.record_type, RecordType::A);
        assert_eq!(record.value.as_deref(), Some("198.51.100.100"));
        assert!(record.srv.is_none());
    }

    #[test]
    fn test_parse_mx_record() {
        let (_, record) = parse_add_args(&args(&["example.com", "@", "MX", "mail.example.com", "10"]))
            .unwrap()
            .unwrap();
        assert_eq!(record.mx_priority, Some(10));
        assert_eq!(record.value.as_deref(), Some("mail.example.com"));

        // Priority is mandatory for MX
        assert!(parse_add_args(&args(&["example.com", "@", "MX", "mail.example.com"])).unwrap().is_none());
        assert!(parse_add_args(&args(&["example.com", "@", "MX", "mail.example.com", "ten"])).unwrap().is_none());
    }

    #[test]
    fn test_parse_srv_record() {
        let (_, record) = parse_add_args(&args(&["example.com", "@", "SRV", "10", "0", "389", "example.party"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            record.srv,
            Some(SrvData { priority: 10, weight: 0, port: 389, target: "example.party".to_string() })
        );
        assert!(record.value.is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "SRV");
        assert_eq!(json["srv"]["port"], 389);
        assert!(json.get("value").is_none());
    }

    #[test]
    fn test_parse_caa_record_keeps_quoted_value() {
        let (_, record) = parse_add_args(&args(&["example.com", "@", "CAA", "0 issue \"example.com\""]))
            .unwrap()
            .unwrap();
        assert_eq!(record.value.as_deref(), Some("0 issue \"example.com\""));
    }

    #[test]
    fn test_parse_rejects_bad_arity_and_type() {
        assert!(parse_add_args(&args(&["example.com", "api", "A"])).unwrap().is_none());
        assert!(parse_add_args(&args(&["example.com", "api", "A", "1.2.3.4", "extra"])).unwrap().is_none());
        assert!(matches!(
            parse_add_args(&args(&["example.com", "api", "BOGUS", "x"])),
            Err(DnsApiError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_unlisted_record_type_keeps_its_name() {
        let record: DnsRecord = serde_json::from_value(serde_json::json!({
            "id": "rec_9",
            "name": "",
            "type": "HTTPS",
            "value": "1 . alpn=h2"
        }))
        .unwrap();
        assert_eq!(record.record_type, RecordType::Other("HTTPS".to_string()));
        assert_eq!(record.record_type.to_string(), "HTTPS");
        assert_eq!(record.display_value(), "1 . alpn=h2");
        assert_eq!(serde_json::to_value(&record.record_type).unwrap(), "HTTPS");

        // Creation still only takes the listed types
        assert!("HTTPS".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_record_display_value() {
        let record: DnsRecord = serde_json::from_value(serde_json::json!({
            "id": "rec_1",
            "name": "",
            "type": "MX",
            "value": "mail.example.com",
            "mxPriority": 10,
            "createdAt": 1584722256178i64
        }))
        .unwrap();
        assert_eq!(record.display_value(), "10 mail.example.com");
        assert_eq!(record.created_at, Some(1584722256178));
    }
}
