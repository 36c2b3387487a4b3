//! Merge domain - entity resolution for duplicate records
//!
//! Merges stay within one kind. After a merge no surviving record references
//! a deleted duplicate: every weak reference aimed at one is repointed to the
//! keep record in the same transaction that deletes it.

pub mod activities;
pub mod policy;

pub use activities::{is_mergeable, merge_records, MergeReport, MergeRequest};
pub use policy::{absorb_record, Mergeable};
