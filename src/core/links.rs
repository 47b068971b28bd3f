use crate::domain::ports::Storage;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub keyword: String,
    pub url: String,
}

/// Keyword to URL pairs parsed from `keyword: url` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    entries: Vec<LinkEntry>,
}

impl LinkTable {
    /// Lines that do not split into exactly two parts on `": "`, or whose URL is
    /// blank, are ignored.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(|line| {
                let parts: Vec<&str> = line.split(": ").collect();
                match parts.as_slice() {
                    [_, url] if url.trim().is_empty() => None,
                    [keyword, url] => Some(LinkEntry {
                        keyword: keyword.trim().to_string(),
                        url: url.trim().to_string(),
                    }),
                    _ => None,
                }
            })
            .collect();
        Self { entries }
    }

    /// First entry whose keyword equals `keyword` exactly.
    pub fn lookup(&self, keyword: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.keyword == keyword)
            .map(|entry| entry.url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LinkDirectory<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> LinkDirectory<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub async fn load(&self) -> Result<LinkTable> {
        let bytes = self.storage.read_file(&self.path).await?;
        let table = LinkTable::parse(&String::from_utf8_lossy(&bytes));
        tracing::debug!("Loaded {} links from {}", table.len(), self.path);
        Ok(table)
    }
}
