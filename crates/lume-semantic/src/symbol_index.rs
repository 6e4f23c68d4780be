//! # Symbol Index Store
//!
//! Four parallel multi-maps over occurrence records, one per key space:
//!
//! - **class**: class name → nodes declaring that class
//! - **class member**: 64-bit composite key → nodes defining or touching a
//!   member slot; `member_key(class)` addresses "all members of this class",
//!   `member_key_of(class, member)` one specific member
//! - **super class**: class name → superclass declaration nodes. Maintained
//!   here (and cleared by [`SymbolIndex::remove_stubs`]) but populated by the
//!   inheritance resolver, not by the file indexer
//! - **short name**: bare identifier or class name → any node introducing it,
//!   independent of the owning class; powers fuzzy/global symbol search
//!
//! Member keys are hashes, not structural keys: collisions are tolerated and
//! only degrade precision, since consumers verify candidates by re-deriving
//! the same key. A value is always a reference to the syntax node, never a
//! copy of its text or position.
//!
//! Mutation is safe under concurrent calls for different files; concurrent
//! mutation for the *same* file is serialized by the file indexer's state
//! machine.

use std::hash::Hasher;

use dashmap::DashMap;
use rustc_hash::FxHasher;
use smol_str::SmolStr;

use lume_syntax::{FileId, NodeId};

/// The synthetic class owning top-level functions and global assignments.
pub const GLOBAL_CLASS: &str = "_G";

/// Separator between class and member in the composite member key.
const MEMBER_KEY_SEPARATOR: u8 = b'*';

/// Key for the "all members of `class`" bucket.
pub fn member_key(class: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(class.as_bytes());
    hasher.finish()
}

/// Key for one specific member slot of `class`.
pub fn member_key_of(class: &str, member: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(class.as_bytes());
    hasher.write(&[MEMBER_KEY_SEPARATOR]);
    hasher.write(member.as_bytes());
    hasher.finish()
}

/// One record in the index: a syntax node attributed to the file that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Occurrence {
    pub file: FileId,
    pub node: NodeId,
}

/// Which key space an occurrence is recorded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexKey {
    Class(SmolStr),
    ClassMember(u64),
    SuperClass(SmolStr),
    ShortName(SmolStr),
}

/// The session-wide symbol index.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    class: DashMap<SmolStr, Vec<Occurrence>>,
    class_member: DashMap<u64, Vec<Occurrence>>,
    super_class: DashMap<SmolStr, Vec<Occurrence>>,
    short_name: DashMap<SmolStr, Vec<Occurrence>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one occurrence record.
    pub fn occurrence(&self, file: FileId, key: IndexKey, node: NodeId) {
        let occurrence = Occurrence { file, node };
        match key {
            IndexKey::Class(name) => self.class.entry(name).or_default().push(occurrence),
            IndexKey::ClassMember(key) => {
                self.class_member.entry(key).or_default().push(occurrence)
            }
            IndexKey::SuperClass(name) => {
                self.super_class.entry(name).or_default().push(occurrence)
            }
            IndexKey::ShortName(name) => {
                self.short_name.entry(name).or_default().push(occurrence)
            }
        }
    }

    /// Remove every record `file` ever contributed, across all four key
    /// spaces. Emptied keys are dropped.
    pub fn remove_stubs(&self, file: FileId) {
        fn sweep<K: std::hash::Hash + Eq>(map: &DashMap<K, Vec<Occurrence>>, file: FileId) {
            map.retain(|_, occurrences| {
                occurrences.retain(|o| o.file != file);
                !occurrences.is_empty()
            });
        }
        sweep(&self.class, file);
        sweep(&self.class_member, file);
        sweep(&self.super_class, file);
        sweep(&self.short_name, file);
    }

    /// Nodes declaring the class `name`. Absent keys yield an empty list.
    pub fn classes(&self, name: &str) -> Vec<Occurrence> {
        Self::get(&self.class, name)
    }

    /// Records under a raw member key.
    pub fn members(&self, key: u64) -> Vec<Occurrence> {
        self.class_member
            .get(&key)
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// All member records of `class`.
    pub fn members_of(&self, class: &str) -> Vec<Occurrence> {
        self.members(member_key(class))
    }

    /// Records for one specific member slot.
    pub fn member(&self, class: &str, member: &str) -> Vec<Occurrence> {
        self.members(member_key_of(class, member))
    }

    /// Superclass declaration nodes recorded for `name`.
    pub fn super_classes(&self, name: &str) -> Vec<Occurrence> {
        Self::get(&self.super_class, name)
    }

    /// Nodes introducing the short name `name`.
    pub fn short_names(&self, name: &str) -> Vec<Occurrence> {
        Self::get(&self.short_name, name)
    }

    /// Total number of records across all key spaces.
    pub fn record_count(&self) -> usize {
        self.class.iter().map(|e| e.value().len()).sum::<usize>()
            + self
                .class_member
                .iter()
                .map(|e| e.value().len())
                .sum::<usize>()
            + self
                .super_class
                .iter()
                .map(|e| e.value().len())
                .sum::<usize>()
            + self
                .short_name
                .iter()
                .map(|e| e.value().len())
                .sum::<usize>()
    }

    fn get(map: &DashMap<SmolStr, Vec<Occurrence>>, name: &str) -> Vec<Occurrence> {
        map.get(name).map(|v| v.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl SymbolIndex {
    /// Full record set, sorted, for equality assertions in tests.
    pub(crate) fn dump(&self) -> Vec<(&'static str, String, Occurrence)> {
        let mut out = Vec::new();
        for entry in self.class.iter() {
            for &o in entry.value() {
                out.push(("class", entry.key().to_string(), o));
            }
        }
        for entry in self.class_member.iter() {
            for &o in entry.value() {
                out.push(("member", entry.key().to_string(), o));
            }
        }
        for entry in self.super_class.iter() {
            for &o in entry.value() {
                out.push(("super", entry.key().to_string(), o));
            }
        }
        for entry in self.short_name.iter() {
            for &o in entry.value() {
                out.push(("short", entry.key().to_string(), o));
            }
        }
        out.sort();
        out
    }
}
