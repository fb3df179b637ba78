pub mod block;
pub mod chain;
pub mod clock;
pub mod endpoint;
pub mod error;
pub mod progress;
pub mod range;
pub mod source;

pub use block::{Block, BlockFetch, BlockId};
pub use chain::ChainClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use endpoint::Endpoints;
pub use error::{ChainError, FetchError};
pub use progress::{TIP_ALLOWANCE_SECS, calc_progress};
pub use range::BlockRange;
pub use source::{BlockSource, HttpBlockSource};
