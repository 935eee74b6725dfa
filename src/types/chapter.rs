use serde::{Deserialize, Serialize};

/// Prefix of every per-chapter scroll record key.
pub const SCROLL_KEY_PREFIX: &str = "scrollPos_";

/// Identifiers of the chapter shown on the page. Either may be missing;
/// empty strings count as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChapterContext {
    pub book_id: Option<String>,
    pub chapter_id: Option<String>,
}

impl ChapterContext {
    pub fn new(book_id: &str, chapter_id: &str) -> Self {
        Self {
            book_id: Some(book_id.to_string()),
            chapter_id: Some(chapter_id.to_string()),
        }
    }

    /// A context with no identifiers; every scroll-record operation is a no-op.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.scroll_key().is_some()
    }

    /// Composite key `scrollPos_{bookId}_{chapterId}`.
    pub fn scroll_key(&self) -> Option<String> {
        let book = self.book_id.as_deref().filter(|s| !s.is_empty())?;
        let chapter = self.chapter_id.as_deref().filter(|s| !s.is_empty())?;
        Some(format!("{}{}_{}", SCROLL_KEY_PREFIX, book, chapter))
    }
}
