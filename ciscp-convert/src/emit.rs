//! Output artifacts.
//!
//! Two textual artifacts for downstream import (one network object per
//! line, one positional rule tuple per line) plus Check Point management
//! API payloads shaped for `add-host`/`add-network`/`add-access-rule`.
//! Identical input always produces byte-identical output.

use cisco_acl_core::{NetObject, PortOp};
use serde::Serialize;
use serde_json::{json, Value};

use crate::extract::ObjectSet;
use crate::rules::{NormalizedRule, Protocol, RuleAction, RuleRef, Service};
use crate::service_map::ServiceMap;

/// Comment attached to every created object and rule, so migrated entries
/// stay identifiable in the target database.
pub const MIGRATION_COMMENT: &str = "Migrated from Cisco ACL";

/// Check Point predefined service matching the whole ICMP protocol.
const ICMP_PROTO_SERVICE: &str = "icmp-proto";

/// Artifact 1: ordered `address/prefix` descriptors, one per line.
pub fn render_objects(objects: &ObjectSet) -> String {
    let mut out = String::new();
    for object in objects.iter() {
        out.push_str(&object.to_string());
        out.push('\n');
    }
    out
}

/// Artifact 2: ordered positional rule tuples, one per line.
pub fn render_rules(rules: &[NormalizedRule]) -> String {
    let mut out = String::new();
    for rule in rules {
        out.push_str(&rule.to_string());
        out.push('\n');
    }
    out
}

/// Deterministic object name derived from the address, the same scheme the
/// provisioning side uses to look objects up again.
pub fn object_name(object: &NetObject) -> String {
    if object.is_host() {
        format!("host_{}", object.addr)
    } else {
        format!("net_{}_{}", object.addr, object.prefix)
    }
}

/// Check Point API payload export for one translation.
#[derive(Debug, Clone, Serialize)]
pub struct ApiExport {
    pub layer: String,
    pub objects: Vec<Value>,
    pub rules: Vec<Value>,
    /// Rules dropped because their service has no table entry (or no
    /// single-port form the target model accepts).
    pub skipped_services: usize,
}

/// Build API payloads for the object set and rule list.
///
/// Sources and destinations map the any-sentinel to `Any` and objects to
/// their deterministic names. tcp/udp rules survive only with an `eq` port
/// the service table knows; icmp rules need a table entry for their type
/// token unless the type is `any`.
pub fn build_api_export(
    objects: &ObjectSet,
    rules: &[NormalizedRule],
    services: &ServiceMap,
    layer: &str,
) -> ApiExport {
    let object_payloads = objects.iter().map(object_payload).collect();

    let mut rule_payloads = Vec::new();
    let mut skipped_services = 0;
    for rule in rules {
        match rule_service_name(rule, services) {
            Some(service) => rule_payloads.push(rule_payload(rule, &service, layer)),
            None => skipped_services += 1,
        }
    }

    ApiExport {
        layer: layer.to_string(),
        objects: object_payloads,
        rules: rule_payloads,
        skipped_services,
    }
}

fn object_payload(object: &NetObject) -> Value {
    if object.is_host() {
        json!({
            "command": "add-host",
            "payload": {
                "name": object_name(object),
                "ip-address": object.addr.to_string(),
                "comments": MIGRATION_COMMENT,
            }
        })
    } else {
        json!({
            "command": "add-network",
            "payload": {
                "name": object_name(object),
                "subnet": object.addr.to_string(),
                "mask-length": object.prefix,
                "comments": MIGRATION_COMMENT,
            }
        })
    }
}

fn rule_payload(rule: &NormalizedRule, service: &str, layer: &str) -> Value {
    json!({
        "command": "add-access-rule",
        "payload": {
            "layer": layer,
            "position": "bottom",
            "action": match rule.action {
                RuleAction::Accept => "Accept",
                RuleAction::Drop => "Drop",
            },
            "source": ref_name(&rule.source),
            "destination": ref_name(&rule.destination),
            "service": service,
            "track": { "type": "Log" },
            "comments": MIGRATION_COMMENT,
        }
    })
}

fn ref_name(rule_ref: &RuleRef) -> String {
    match rule_ref {
        RuleRef::Any => "Any".to_string(),
        RuleRef::Object(obj) => object_name(obj),
    }
}

/// Target service object for a rule, `None` when the rule cannot be
/// exported.
fn rule_service_name(rule: &NormalizedRule, services: &ServiceMap) -> Option<String> {
    match (&rule.protocol, &rule.service) {
        (Protocol::Ip, _) => Some("Any".to_string()),
        (Protocol::Icmp, Service::Any) => Some(ICMP_PROTO_SERVICE.to_string()),
        (Protocol::Icmp, Service::IcmpType(t)) => services.icmp_name(t).map(str::to_string),
        // only single eq ports map onto predefined service objects
        (
            Protocol::Tcp | Protocol::Udp,
            Service::Port {
                op: PortOp::Eq,
                port,
            },
        ) => services.service_name(rule.protocol, port).map(str::to_string),
        _ => None,
    }
}
