//! Episode table: records, mention decoding and CSV loading

mod mentions;
mod range;
mod record;
mod table;

pub use mentions::{decode_mentions, DecodeError};
pub use range::EpisodeRange;
pub use record::{EpisodeRecord, Sentence};
pub use table::{EpisodeTable, LoadError, LoadResult};
