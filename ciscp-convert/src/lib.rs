//! Cisco IOS extended-ACL to Check Point translation.
//!
//! Takes one named extended ACL in router syntax and rewrites it into a
//! normalized object/rule model suitable for import into a Check Point
//! policy database. The filter logic of the two platforms differs enough
//! that translated rules always need manual review before activation; this
//! library automates the mechanical part and reports what it had to skip.
//!
//! # Pipeline
//!
//! Single-threaded batch processing, whole input consumed before any output:
//!
//! 1. Tokenize and type statements against their ACL header
//!    (`cisco-acl-core`)
//! 2. [`filter`] — drop statements that cannot be translated faithfully
//! 3. [`extract`] — collect the deduplicated set of referenced network
//!    objects
//! 4. [`build`] — construct normalized rules, resolving endpoints against
//!    the object set
//! 5. [`dedup`] — suppress structural duplicates and any-rule shadowed
//!    candidates
//! 6. [`emit`] — serialize object and rule artifacts, plus Check Point API
//!    payloads
//!
//! [`translate`] orchestrates the stages and accumulates skip counters and
//! findings; [`summary`] and [`report`] render them; [`service_map`] holds
//! the Cisco-to-Check-Point service name table; [`inspect`] previews
//! per-line dispositions.

pub mod build;
pub mod dedup;
pub mod emit;
pub mod extract;
pub mod filter;
pub mod inspect;
pub mod report;
pub mod rules;
pub mod service_map;
pub mod summary;
pub mod translate;
