use charades_types::{CategorySelection, SampledWord};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::debug;

use crate::CategoryCatalog;

/// Produces the random permutation a batch is cut from.
pub trait WordShuffler: Send {
    fn shuffle(&mut self, words: &mut [SampledWord]);
}

impl<F> WordShuffler for F
where
    F: FnMut(&mut [SampledWord]) + Send,
{
    fn shuffle(&mut self, words: &mut [SampledWord]) {
        self(words)
    }
}

/// Uniform shuffle backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngShuffler;

impl WordShuffler for ThreadRngShuffler {
    fn shuffle(&mut self, words: &mut [SampledWord]) {
        words.shuffle(&mut rand::rng());
    }
}

/// Reproducible shuffle for replays and tests.
#[derive(Debug, Clone)]
pub struct SeededShuffler {
    rng: StdRng,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl WordShuffler for SeededShuffler {
    fn shuffle(&mut self, words: &mut [SampledWord]) {
        words.shuffle(&mut self.rng);
    }
}

/// Leaves the pool in catalog order.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityShuffler;

impl WordShuffler for IdentityShuffler {
    fn shuffle(&mut self, _words: &mut [SampledWord]) {}
}

pub struct WordSampler {
    catalog: Arc<CategoryCatalog>,
    shuffler: Box<dyn WordShuffler>,
}

impl WordSampler {
    pub fn new(catalog: Arc<CategoryCatalog>) -> Self {
        Self::with_shuffler(catalog, ThreadRngShuffler)
    }

    pub fn with_shuffler(
        catalog: Arc<CategoryCatalog>,
        shuffler: impl WordShuffler + 'static,
    ) -> Self {
        Self::with_boxed_shuffler(catalog, Box::new(shuffler))
    }

    pub fn with_boxed_shuffler(
        catalog: Arc<CategoryCatalog>,
        shuffler: Box<dyn WordShuffler>,
    ) -> Self {
        Self { catalog, shuffler }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Every word the selection can draw from, annotated with its source
    /// category. An unknown category id yields an empty pool.
    pub fn pool(&self, selection: &CategorySelection) -> Vec<SampledWord> {
        match selection {
            CategorySelection::All => self
                .catalog
                .list_categories()
                .iter()
                .flat_map(|category| category.words.iter().map(|w| w.annotate(category)))
                .collect(),
            CategorySelection::Category(id) => match self.catalog.find_category(id) {
                Some(category) => category.words.iter().map(|w| w.annotate(category)).collect(),
                None => Vec::new(),
            },
        }
    }

    /// Draw up to `count` distinct words. Never pads: a small pool simply
    /// gives a shorter batch.
    pub fn sample(&mut self, selection: &CategorySelection, count: usize) -> Vec<SampledWord> {
        let mut pool = self.pool(selection);
        let available = pool.len();

        self.shuffler.shuffle(&mut pool);
        pool.truncate(count);

        if pool.len() < count {
            debug!(
                "Category {} has {} words, {} requested",
                selection.id(),
                available,
                count
            );
        }

        pool
    }
}

impl std::fmt::Debug for WordSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordSampler")
            .field("categories", &self.catalog.list_categories().len())
            .finish_non_exhaustive()
    }
}
