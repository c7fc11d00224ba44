use std::path::PathBuf;

/// Store configuration
///
/// Controls where records are persisted and how listing pages are sized.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Data directory for the file-backed store. `None` keeps everything
    /// in memory (tests, preview environments).
    pub data_dir: Option<PathBuf>,

    /// Page size used when a `list` call passes no limit.
    pub default_page_limit: usize,

    /// Hard ceiling on a single listing page; larger requests are clamped.
    pub max_page_limit: usize,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self {
            data_dir: None,
            default_page_limit: 25,
            max_page_limit: 100,
        }
    }

    /// Persist records under the given directory.
    pub fn data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the default listing page size.
    pub fn default_page_limit(mut self, limit: usize) -> Self {
        self.default_page_limit = limit;
        self
    }

    /// Set the maximum listing page size.
    pub fn max_page_limit(mut self, limit: usize) -> Self {
        self.max_page_limit = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
