use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifies a block on the indexing API, either by height or by hash.
/// Hashes are passed through as given; their format is not checked.
/// Text parses as a height only in canonical decimal form ("0", "42");
/// anything else, including "007", is kept verbatim as a hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockId {
    Height(u64),
    Hash(String),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Height(h) => write!(f, "{}", h),
            BlockId::Hash(hash) => f.write_str(hash),
        }
    }
}

impl From<u64> for BlockId {
    fn from(height: u64) -> Self {
        BlockId::Height(height)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        let canonical = s == "0" || !s.starts_with('0');
        if canonical && !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(height) = s.parse() {
                return BlockId::Height(height);
            }
        }
        BlockId::Hash(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        BlockId::from(s.as_str())
    }
}

impl FromStr for BlockId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BlockId::from(s))
    }
}

/// A block as returned by the API. The body is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block(Value);

impl Block {
    pub fn new(body: Value) -> Self {
        Block(body)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }
}

/// Outcome of fetching one block.
#[derive(Debug)]
pub enum BlockFetch {
    Found(Block),
    Failed(FetchError),
}

impl BlockFetch {
    pub fn is_found(&self) -> bool {
        matches!(self, BlockFetch::Found(_))
    }

    pub fn block(&self) -> Option<&Block> {
        match self {
            BlockFetch::Found(block) => Some(block),
            BlockFetch::Failed(_) => None,
        }
    }

    pub fn into_block(self) -> Option<Block> {
        match self {
            BlockFetch::Found(block) => Some(block),
            BlockFetch::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            BlockFetch::Found(_) => None,
            BlockFetch::Failed(e) => Some(e),
        }
    }
}
