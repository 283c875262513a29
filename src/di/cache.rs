use super::instance::Instance;
use dashmap::DashMap;

/// Abstract name -> already constructed object.
#[derive(Default)]
pub struct InstanceCache {
    instances: DashMap<String, Instance>,
}

impl InstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Instance> {
        self.instances.get(name).map(|entry| entry.value().clone())
    }

    pub fn set(&self, name: impl Into<String>, instance: Instance) {
        self.instances.insert(name.into(), instance);
    }

    pub fn has(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    pub fn forget(&self, name: &str) -> Option<Instance> {
        self.instances.remove(name).map(|(_, instance)| instance)
    }

    pub fn forget_all(&self) {
        self.instances.clear();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_set_get_forget() {
        let cache = InstanceCache::new();
        let value: Instance = Arc::new(42_i32);

        cache.set("answer", value.clone());
        assert!(cache.has("answer"));
        assert!(Arc::ptr_eq(&cache.get("answer").unwrap(), &value));

        assert!(cache.forget("answer").is_some());
        assert!(!cache.has("answer"));
        assert!(cache.forget("answer").is_none());
    }

    #[test]
    fn test_forget_all() {
        let cache = InstanceCache::new();
        cache.set("a", Arc::new(1_u8));
        cache.set("b", Arc::new(2_u8));
        cache.forget_all();
        assert!(cache.is_empty());
    }
}
