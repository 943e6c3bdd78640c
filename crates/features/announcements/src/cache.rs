use moka::sync::Cache;

const MAX_ENTRIES: u64 = 64;

/// Small in-process store for the current announcement texts.
#[derive(Debug, Clone)]
pub struct AnnouncementCache {
    entries: Cache<String, String>,
}

impl Default for AnnouncementCache {
    fn default() -> Self {
        Self { entries: Cache::builder().max_capacity(MAX_ENTRIES).build() }
    }
}

impl AnnouncementCache {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key)
    }

    pub fn set(&self, key: &str, text: impl Into<String>) {
        self.entries.insert(key.to_owned(), text.into());
    }

    pub fn clear(&self, key: &str) {
        self.entries.invalidate(key);
    }
}
