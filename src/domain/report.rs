use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::DetailLink;

/// What happened to one gallery page.
#[derive(Debug, Clone)]
pub struct PageOutcome {
    /// 0-based page index
    pub page: usize,
    pub offset: usize,
    pub url: String,
    pub result: PageResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResult {
    Scanned { links: usize },
    Failed { reason: String },
}

/// Output of a gallery crawl: every link in discovery order plus one
/// outcome per page requested.
#[derive(Debug, Clone, Default)]
pub struct LinkCollection {
    pub links: Vec<DetailLink>,
    pub pages: Vec<PageOutcome>,
}

impl LinkCollection {
    pub fn failed_pages(&self) -> impl Iterator<Item = &PageOutcome> {
        self.pages
            .iter()
            .filter(|p| matches!(p.result, PageResult::Failed { .. }))
    }
}

/// Outcome of processing one detail link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Written {
        /// 1-based ordinal among written items; also the file number
        index: usize,
        url: String,
        path: PathBuf,
    },
    Skipped {
        url: String,
        reason: String,
    },
}

impl ItemOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, ItemOutcome::Written { .. })
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub items: Vec<ItemOutcome>,
}

impl RunReport {
    pub fn start() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            items: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    pub fn written(&self) -> usize {
        self.items.iter().filter(|i| i.is_written()).count()
    }

    pub fn skipped(&self) -> usize {
        self.items.len() - self.written()
    }

    pub fn elapsed_secs(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
