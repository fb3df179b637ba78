use crate::block::{BlockFetch, BlockId};
use crate::clock::{Clock, SystemClock};
use crate::error::{ChainError, FetchError, Result};
use crate::progress;
use crate::range::BlockRange;
use crate::source::{BlockSource, HttpBlockSource};
use log::{error, info};

/// Client for the indexing API: single block lookups, sequential range walks
/// and sync progress.
pub struct ChainClient<S, C = SystemClock> {
    source: S,
    clock: C,
}

impl ChainClient<HttpBlockSource> {
    pub fn connect(api_url: &str, api_key: Option<&str>) -> Result<Self> {
        let mut source = HttpBlockSource::new(api_url)?;
        if let Some(key) = api_key {
            source = source.with_api_key(key);
        }
        Ok(Self::new(source))
    }
}

impl<S: BlockSource> ChainClient<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            clock: SystemClock,
        }
    }
}

impl<S: BlockSource, C: Clock> ChainClient<S, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ChainClient<S, C2> {
        ChainClient {
            source: self.source,
            clock,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch one block. Network, status and decode failures come back as
    /// `BlockFetch::Failed`; only failures that happen before a request can
    /// be issued are returned as `Err`.
    pub async fn get_block(&self, id: impl Into<BlockId>) -> Result<BlockFetch> {
        let id = id.into();
        match self.source.fetch_block(&id).await {
            Ok(block) => Ok(BlockFetch::Found(block)),
            Err(e) if e.is_recoverable() => {
                error!("Error retrieving block {}: {}", id, e);
                Ok(BlockFetch::Failed(e))
            }
            Err(e) => Err(ChainError::Fetch(e)),
        }
    }

    /// Fetch blocks from `start` toward `end` (exclusive), one request at a
    /// time. `step` defaults to 1; see [`BlockRange::new`] for how it is
    /// checked against the direction. Invalid arguments fail before any
    /// request. A failed block is kept as a `Failed` entry and the walk goes
    /// on; an unexpected error stops the walk and returns what was gathered.
    pub async fn get_blocks_in_range(
        &self,
        start: i64,
        end: i64,
        step: Option<i64>,
    ) -> Result<Vec<BlockFetch>> {
        let range = BlockRange::new(start, end, step.unwrap_or(1))?;
        Ok(self.walk(&range).await)
    }

    pub async fn walk(&self, range: &BlockRange) -> Vec<BlockFetch> {
        let mut blocks = Vec::new();

        for cursor in range.heights() {
            let Ok(height) = u64::try_from(cursor) else {
                error!("Error retrieving block {}: below genesis", cursor);
                blocks.push(BlockFetch::Failed(FetchError::NegativeHeight(cursor)));
                continue;
            };
            match self.get_block(height).await {
                Ok(fetch) => blocks.push(fetch),
                Err(e) => {
                    error!(
                        "Error retrieving block {}, stopping after {} of {} blocks: {}",
                        height,
                        blocks.len(),
                        range.len(),
                        e
                    );
                    return blocks;
                }
            }
        }

        info!(
            "Fetched {} blocks from {} to {} (step {})",
            blocks.len(),
            range.start(),
            range.end(),
            range.step()
        );
        blocks
    }

    /// Progress of a sync that began at `start` and has reached `tip`, both
    /// in Unix seconds, against this client's clock.
    pub fn calc_progress(&self, start: i64, tip: i64) -> f64 {
        progress::calc_progress(start, tip, self.clock.now())
    }
}
