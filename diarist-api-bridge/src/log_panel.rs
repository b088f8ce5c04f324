//! Log panel controller
//!
//! Tracks which derived-log categories are shown, whether the side panel is
//! visible, and the content of each block. Every render pass bumps a
//! generation counter; fetch results carrying an older generation are dropped.

use crate::data::{DerivedLog, LogCategory};
use crate::error::ApiResult;
use tracing::{debug, warn};

/// Placeholder shown while a block's content is in flight
pub const LOADING_TEXT: &str = "Loading...";

/// Render pass identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RenderGeneration(pub u64);

/// One content request issued by a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogFetch {
    pub generation: RenderGeneration,
    pub category: LogCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Loading,
    Loaded(String),
    Failed(String),
}

/// A rendered panel block
#[derive(Debug, Clone, PartialEq)]
pub struct LogBlock {
    pub category: LogCategory,
    /// Share of the panel height, `100 / active count`
    pub height_percent: f64,
    pub content: BlockContent,
}

#[derive(Debug, Default)]
pub struct LogPanel {
    /// Active categories, insertion order = top-to-bottom layout
    active: Vec<LogCategory>,
    visible: bool,
    generation: RenderGeneration,
    blocks: Vec<LogBlock>,
}

impl LogPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove a category.
    ///
    /// Re-adding appends at the end. Removing the last category closes the
    /// panel; otherwise the panel is re-rendered and the fetches for the new
    /// pass are returned.
    pub fn toggle_category(&mut self, category: LogCategory) -> Vec<LogFetch> {
        self.visible = true;

        if let Some(idx) = self.active.iter().position(|c| *c == category) {
            self.active.remove(idx);
        } else {
            self.active.push(category);
        }

        if self.active.is_empty() {
            self.close();
            return Vec::new();
        }

        self.render()
    }

    /// Clear everything and hide the panel
    pub fn close(&mut self) {
        self.active.clear();
        self.blocks.clear();
        self.visible = false;
        // Invalidate fetches still in flight
        self.generation.0 += 1;
    }

    /// Master toggle; opening with no categories shows an empty panel
    pub fn toggle_visibility(&mut self) -> bool {
        if self.visible {
            self.close();
        } else {
            self.visible = true;
        }
        self.visible
    }

    /// Rebuild all blocks for the active set and return one fetch per block
    pub fn render(&mut self) -> Vec<LogFetch> {
        self.generation.0 += 1;
        let generation = self.generation;

        if self.active.is_empty() {
            self.blocks.clear();
            return Vec::new();
        }

        let height_percent = 100.0 / self.active.len() as f64;
        self.blocks = self
            .active
            .iter()
            .map(|&category| LogBlock {
                category,
                height_percent,
                content: BlockContent::Loading,
            })
            .collect();

        debug!(
            "Log panel render pass {} for {:?}",
            generation.0, self.active
        );

        self.active
            .iter()
            .map(|&category| LogFetch {
                generation,
                category,
            })
            .collect()
    }

    /// Re-render if anything is shown (used after the backend saved a log)
    pub fn refresh(&mut self) -> Vec<LogFetch> {
        if self.active.is_empty() {
            return Vec::new();
        }
        self.render()
    }

    /// Apply a fetch result; stale generations are discarded.
    ///
    /// Returns true when a block changed.
    pub fn apply_fetch(&mut self, fetch: LogFetch, result: ApiResult<DerivedLog>) -> bool {
        if fetch.generation != self.generation {
            debug!(
                "Discarding stale {} result (generation {} != {})",
                fetch.category, fetch.generation.0, self.generation.0
            );
            return false;
        }

        let Some(block) = self.blocks.iter_mut().find(|b| b.category == fetch.category) else {
            return false;
        };

        block.content = match result {
            Ok(log) => BlockContent::Loaded(log.into_text()),
            Err(e) => {
                warn!("Failed to load {} log: {}", fetch.category, e);
                BlockContent::Failed(e.to_string())
            }
        };
        true
    }

    pub fn active(&self) -> &[LogCategory] {
        &self.active
    }

    pub fn is_active(&self, category: LogCategory) -> bool {
        self.active.contains(&category)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn blocks(&self) -> &[LogBlock] {
        &self.blocks
    }

    pub fn generation(&self) -> RenderGeneration {
        self.generation
    }

    /// Active look of each toolbar button, in [`LogCategory::ALL`] order
    pub fn button_states(&self) -> [(LogCategory, bool); 4] {
        LogCategory::ALL.map(|c| (c, self.is_active(c)))
    }
}
