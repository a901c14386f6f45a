use std::time::Duration;

pub mod clock;
pub mod deck;
pub mod records;
pub mod session;
pub mod state;
pub mod store;

pub use clock::{Stopwatch, format_clock};
pub use deck::{build_deck, default_photo_pool, photo_pool_from_dir};
pub use records::{BestRecord, RecordStore, is_better};
pub use session::{Completion, Session, Selection};
pub use state::{Card, CardId, CardStatus, ConcealTicket, GameState, Reveal};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub const BOARD_SIZE: usize = 8;
pub const TOTAL_CARDS: usize = BOARD_SIZE * BOARD_SIZE;
pub const PAIR_COUNT: usize = TOTAL_CARDS / 2;

/// How long a mismatched pair stays face up before it is concealed.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(700);
/// Pause between the final match and the completion summary.
pub const SUMMARY_DELAY: Duration = Duration::from_millis(200);

pub const BEST_RECORD_KEY: &str = "memory-game-best-record-v1";
