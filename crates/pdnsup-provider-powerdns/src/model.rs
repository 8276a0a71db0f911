//! Wire model for the authority zone-patch API
//!
//! Field names and the `REPLACE` change type are bit-exact requirements of
//! the PowerDNS API contract; renaming anything here breaks
//! interoperability. All three structures are built fresh for every publish
//! call and fully populated before serialization.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// A single resource record inside an rrset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record payload, the IPv4 literal
    pub content: String,
    /// Fully-qualified record name with trailing dot
    pub name: String,
    /// TTL in seconds
    pub ttl: u32,
    /// Record type, always "A"
    #[serde(rename = "type")]
    pub record_type: String,
    /// Always false
    pub disabled: bool,
}

/// A replacement record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RrSet {
    /// Record set name, mirrors the single record's name
    pub name: String,
    /// Record set type, mirrors the single record's type
    #[serde(rename = "type")]
    pub record_type: String,
    /// TTL in seconds, mirrors the single record's TTL
    pub ttl: u32,
    /// Always "REPLACE": overwrite the full set for this name+type
    pub changetype: String,
    /// Always exactly one record
    pub records: Vec<Record>,
}

/// The zone patch document submitted to the authority server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePatch {
    /// Always exactly one rrset
    pub rrsets: Vec<RrSet>,
}

impl ZonePatch {
    /// Build the single-rrset REPLACE document for an A record
    pub fn replace_a(record_name: &str, ip: Ipv4Addr, ttl: u32) -> Self {
        let record = Record {
            content: ip.to_string(),
            name: record_name.to_string(),
            ttl,
            record_type: "A".to_string(),
            disabled: false,
        };

        let rrset = RrSet {
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            ttl: record.ttl,
            changetype: "REPLACE".to_string(),
            records: vec![record],
        };

        Self {
            rrsets: vec![rrset],
        }
    }
}
