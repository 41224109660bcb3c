use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::compose::part::{BodyComposition, BodyPart};

/// Backing storage for parts and compositions.
///
/// Every method is one critical section: implementations must never expose a partially
/// applied write to concurrent readers. Listing methods return entries in first-insertion
/// order; overwriting an id keeps its original position.
pub trait CompositorStore: Send + Sync {
    fn parts(&self) -> Vec<BodyPart>;
    fn part(&self, id: &str) -> Option<BodyPart>;
    /// Insert or overwrite by `part.id`.
    fn upsert_part(&self, part: BodyPart);

    fn compositions(&self) -> Vec<BodyComposition>;
    fn composition(&self, id: &str) -> Option<BodyComposition>;
    /// Insert or overwrite by `composition.id`.
    fn insert_composition(&self, composition: BodyComposition);
    /// Apply `edit` to the stored composition. Returns `false` if `id` is absent.
    fn modify_composition(&self, id: &str, edit: &mut dyn FnMut(&mut BodyComposition)) -> bool;
    fn remove_composition(&self, id: &str) -> bool;
}

/// Id-keyed map that remembers first-insertion order.
#[derive(Debug)]
struct Registry<T> {
    next_seq: u64,
    entries: HashMap<String, (u64, T)>,
}

impl<T: Clone> Registry<T> {
    fn new() -> Self {
        Self {
            next_seq: 0,
            entries: HashMap::new(),
        }
    }

    fn upsert(&mut self, id: String, value: T) {
        if let Some(slot) = self.entries.get_mut(&id) {
            slot.1 = value;
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(id, (seq, value));
    }

    fn get(&self, id: &str) -> Option<T> {
        self.entries.get(id).map(|(_, v)| v.clone())
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.entries.get_mut(id).map(|(_, v)| v)
    }

    fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    fn ordered(&self) -> Vec<T> {
        let mut all: Vec<&(u64, T)> = self.entries.values().collect();
        all.sort_unstable_by_key(|(seq, _)| *seq);
        all.into_iter().map(|(_, v)| v.clone()).collect()
    }
}

#[derive(Debug)]
struct Maps {
    parts: Registry<BodyPart>,
    compositions: Registry<BodyComposition>,
}

/// Process-local store: both maps behind a single mutex.
#[derive(Debug)]
pub struct InMemoryStore {
    inner: Mutex<Maps>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Maps {
                parts: Registry::new(),
                compositions: Registry::new(),
            }),
        }
    }

    /// Every write is a single map operation, so a panic elsewhere cannot leave the maps
    /// half-updated and a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Maps> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CompositorStore for InMemoryStore {
    fn parts(&self) -> Vec<BodyPart> {
        self.lock().parts.ordered()
    }

    fn part(&self, id: &str) -> Option<BodyPart> {
        self.lock().parts.get(id)
    }

    fn upsert_part(&self, part: BodyPart) {
        self.lock().parts.upsert(part.id.clone(), part);
    }

    fn compositions(&self) -> Vec<BodyComposition> {
        self.lock().compositions.ordered()
    }

    fn composition(&self, id: &str) -> Option<BodyComposition> {
        self.lock().compositions.get(id)
    }

    fn insert_composition(&self, composition: BodyComposition) {
        self.lock()
            .compositions
            .upsert(composition.id.clone(), composition);
    }

    fn modify_composition(&self, id: &str, edit: &mut dyn FnMut(&mut BodyComposition)) -> bool {
        let mut maps = self.lock();
        match maps.compositions.get_mut(id) {
            Some(c) => {
                edit(c);
                true
            }
            None => false,
        }
    }

    fn remove_composition(&self, id: &str) -> bool {
        self.lock().compositions.remove(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/store.rs"]
mod tests;
