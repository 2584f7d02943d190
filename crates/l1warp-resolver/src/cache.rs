//! Bounded ValidationID -> registration payload cache.
//!
//! A registration payload never changes once its validator is registered, so
//! entries are never invalidated, only evicted oldest-first.

use std::collections::{HashMap, VecDeque};

use l1warp_types::ValidationId;

#[derive(Debug)]
pub struct RegistrationCache {
    capacity: usize,
    entries: HashMap<ValidationId, Vec<u8>>,
    order: VecDeque<ValidationId>,
}

impl RegistrationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, id: &ValidationId) -> Option<&[u8]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    pub fn insert(&mut self, id: ValidationId, payload: Vec<u8>) {
        if self.capacity == 0 || self.entries.contains_key(&id) {
            return;
        }

        self.entries.insert(id, payload);
        self.order.push_back(id);

        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use l1warp_types::ValidationId;

    use super::RegistrationCache;

    fn id(n: u8) -> ValidationId {
        ValidationId::new([n; 32])
    }

    #[test]
    fn evicts_oldest_first() {
        let mut cache = RegistrationCache::new(2);
        cache.insert(id(1), vec![1]);
        cache.insert(id(2), vec![2]);
        cache.insert(id(3), vec![3]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&id(1)).is_none());
        assert_eq!(cache.get(&id(3)), Some(&[3u8][..]));
    }

    #[test]
    fn reinsert_keeps_first_value() {
        let mut cache = RegistrationCache::new(4);
        cache.insert(id(1), vec![1]);
        cache.insert(id(1), vec![9]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&id(1)), Some(&[1u8][..]));
    }

    #[test]
    fn zero_capacity_disables() {
        let mut cache = RegistrationCache::new(0);
        cache.insert(id(1), vec![1]);
        assert!(cache.is_empty());
    }
}
