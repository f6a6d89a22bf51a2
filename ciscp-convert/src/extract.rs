//! Network-object extraction.
//!
//! A single pass over the parsed survivors collects every referenced host
//! and network into an order-preserving, identity-deduplicated set. The
//! whole set exists before rule construction begins, so the builder only
//! ever resolves against a complete set.

use cisco_acl_core::{NetObject, RuleLine};

/// Deduplicated, insertion-ordered set of referenced network objects.
///
/// Membership is an O(n) scan per candidate; ACL files are tens to low
/// hundreds of lines, so ordering stability matters more than lookup cost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSet {
    objects: Vec<NetObject>,
}

impl ObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object unless one with the same `(address, prefix)`
    /// identity is already present. Returns whether it was inserted.
    pub fn insert(&mut self, object: NetObject) -> bool {
        if self.objects.contains(&object) {
            return false;
        }
        self.objects.push(object);
        true
    }

    pub fn contains(&self, object: &NetObject) -> bool {
        self.objects.contains(object)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Collect the object set referenced by the given statements, in first
/// reference order (source before destination within a statement).
pub fn extract_objects<'a, I>(lines: I) -> ObjectSet
where
    I: IntoIterator<Item = &'a RuleLine>,
{
    let mut set = ObjectSet::new();
    for line in lines {
        if let Some(obj) = line.source.object() {
            set.insert(obj);
        }
        if let Some(obj) = line.destination.object() {
            set.insert(obj);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use cisco_acl_core::parse_statement;

    use super::extract_objects;

    fn rule(s: &str) -> cisco_acl_core::RuleLine {
        let tokens: Vec<String> = s.split_whitespace().map(str::to_string).collect();
        parse_statement(&tokens).expect("statement")
    }

    #[test]
    fn collects_hosts_and_networks_in_reference_order() {
        let lines = vec![
            rule("permit tcp host 10.1.1.1 10.2.2.0 0.0.0.255 eq 443"),
            rule("permit udp any host 10.2.2.53 eq 53"),
        ];
        let set = extract_objects(&lines);
        let rendered: Vec<String> = set.iter().map(|o| o.to_string()).collect();
        assert_eq!(rendered, vec!["10.1.1.1/32", "10.2.2.0/24", "10.2.2.53/32"]);
    }

    #[test]
    fn host_and_zero_wildcard_network_collapse_to_one_object() {
        let lines = vec![
            rule("permit ip host 10.0.0.5 any"),
            rule("permit ip 10.0.0.5 0.0.0.0 any"),
        ];
        let set = extract_objects(&lines);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().map(|o| o.to_string()).as_deref(), Some("10.0.0.5/32"));
    }

    #[test]
    fn repeated_references_are_deduplicated() {
        let lines = vec![
            rule("permit tcp host 10.1.1.1 any eq 80"),
            rule("deny tcp host 10.1.1.1 any eq 23"),
        ];
        let set = extract_objects(&lines);
        assert_eq!(set.len(), 1);
    }
}
