//! Cisco-to-Check-Point service name conversion table.
//!
//! Cisco ACLs reference services by protocol and port; the Check Point
//! object database references predefined service objects by name. The table
//! ships embedded in the binary and can be overridden with a TOML file.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::rules::Protocol;

/// One tcp/udp port-to-service-name mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceMapping {
    pub proto: String,
    pub port: String,
    pub name: String,
}

/// One ICMP type-token-to-service-name mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IcmpMapping {
    #[serde(rename = "type")]
    pub icmp_type: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ServiceFile {
    #[serde(default)]
    service: Vec<ServiceMapping>,
    #[serde(default)]
    icmp: Vec<IcmpMapping>,
}

/// Loaded conversion table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceMap {
    services: Vec<ServiceMapping>,
    icmp: Vec<IcmpMapping>,
}

impl ServiceMap {
    /// Check Point service name for a tcp/udp port value, `None` when the
    /// table has no entry.
    pub fn service_name(&self, proto: Protocol, port: &str) -> Option<&str> {
        let proto = proto.as_str();
        self.services
            .iter()
            .find(|m| m.proto == proto && m.port == port)
            .map(|m| m.name.as_str())
    }

    /// Check Point service name for an ICMP type token.
    pub fn icmp_name(&self, icmp_type: &str) -> Option<&str> {
        self.icmp
            .iter()
            .find(|m| m.icmp_type == icmp_type)
            .map(|m| m.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.icmp.is_empty()
    }
}

/// Errors returned when loading a service table file.
#[derive(Debug, Error)]
pub enum ServiceMapError {
    #[error("failed to read services file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse services file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load a service table from a TOML file.
pub fn load_service_map(path: &Path) -> Result<ServiceMap, ServiceMapError> {
    let raw = fs::read_to_string(path).map_err(|source| ServiceMapError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_service_map(&raw, path.display().to_string())
}

/// Built-in table compiled into the binary.
pub fn default_service_map() -> ServiceMap {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/mappings/services.toml"
    ));
    match parse_service_map(embedded, "embedded services".to_string()) {
        Ok(map) if !map.is_empty() => map,
        _ => fallback_service_map(),
    }
}

fn parse_service_map(raw: &str, path: String) -> Result<ServiceMap, ServiceMapError> {
    let parsed: ServiceFile =
        toml::from_str(raw).map_err(|source| ServiceMapError::Parse { path, source })?;
    Ok(ServiceMap {
        services: parsed.service,
        icmp: parsed.icmp,
    })
}

fn fallback_service_map() -> ServiceMap {
    let service = |proto: &str, port: &str, name: &str| ServiceMapping {
        proto: proto.to_string(),
        port: port.to_string(),
        name: name.to_string(),
    };
    let icmp = |icmp_type: &str, name: &str| IcmpMapping {
        icmp_type: icmp_type.to_string(),
        name: name.to_string(),
    };
    ServiceMap {
        services: vec![
            service("tcp", "22", "ssh"),
            service("tcp", "80", "http"),
            service("tcp", "443", "https"),
            service("udp", "53", "domain-udp"),
        ],
        icmp: vec![
            icmp("echo", "echo-request"),
            icmp("echo-reply", "echo-reply"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{default_service_map, load_service_map, parse_service_map, ServiceMapError};
    use crate::rules::Protocol;

    #[test]
    fn loads_valid_services_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("services.toml");
        fs::write(
            &path,
            r#"
[[service]]
proto = "tcp"
port = "8443"
name = "https-alt"

[[icmp]]
type = "echo"
name = "echo-request"
"#,
        )
        .expect("write services");

        let map = load_service_map(&path).expect("map should parse");
        assert_eq!(map.service_name(Protocol::Tcp, "8443"), Some("https-alt"));
        assert_eq!(map.icmp_name("echo"), Some("echo-request"));
    }

    #[test]
    fn lookup_distinguishes_protocols() {
        let map = default_service_map();
        assert!(map.service_name(Protocol::Tcp, "443").is_some());
        assert_eq!(map.service_name(Protocol::Udp, "443"), None);
    }

    #[test]
    fn unknown_entries_return_none() {
        let map = default_service_map();
        assert_eq!(map.service_name(Protocol::Tcp, "61000"), None);
        assert_eq!(map.icmp_name("mystery"), None);
    }

    #[test]
    fn returns_parse_error_for_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "not = [valid").expect("write broken file");

        let err = load_service_map(&path).expect_err("should fail parse");
        match err {
            ServiceMapError::Parse { .. } => {}
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn embedded_table_parses_and_is_non_empty() {
        let embedded = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/mappings/services.toml"
        ));
        let map = parse_service_map(embedded, "embedded services".to_string())
            .expect("embedded table should parse");
        assert!(map.service_name(Protocol::Tcp, "22").is_some());
        assert!(map.icmp_name("echo-reply").is_some());
    }
}
