//! Node id allocation.
//!
//! Allocators are owned by the canvas state rather than living in a global,
//! so two canvases (or two tests) never share a counter.  Ids handed out are
//! never handed out again for the lifetime of the allocator, regardless of
//! what happens to the nodes that carry them.

use uuid::Uuid;

pub trait IdAllocator {
    fn next_id(&mut self) -> String;
}

/// `agent_1`, `agent_2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Random v4 ids, for embedders that merge graphs from several sessions.
#[derive(Debug, Clone)]
pub struct UuidIds {
    prefix: String,
}

impl UuidIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl IdAllocator for UuidIds {
    fn next_id(&mut self) -> String {
        format!("{}{}", self.prefix, Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_start_at_one() {
        let mut ids = SequentialIds::new("agent_");
        assert_eq!(ids.next_id(), "agent_1");
        assert_eq!(ids.next_id(), "agent_2");
    }

    #[test]
    fn separate_allocators_do_not_share_state() {
        let mut a = SequentialIds::new("agent_");
        let mut b = SequentialIds::new("agent_");
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), "agent_1");
    }

    #[test]
    fn uuid_ids_are_distinct_and_prefixed() {
        let mut ids = UuidIds::new("agent_");
        let seen: HashSet<_> = (0..64).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 64);
        assert!(seen.iter().all(|id| id.starts_with("agent_")));
    }
}
