use rand::Rng;

use super::PAIR_COUNT;
use super::clock::format_clock;
use super::records::{BestRecord, RecordStore};
use super::state::{Card, CardId, ConcealTicket, GameState, Reveal};
use super::store::KeyValueStore;

/// Result of a finished game, handed to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    pub generation: u64,
    pub final_moves: u32,
    pub final_seconds: u32,
    pub is_new_best: bool,
    pub best: Option<BestRecord>,
}

impl Completion {
    pub fn headline(&self) -> String {
        format!(
            "Finished in {} moves, {}",
            self.final_moves,
            format_clock(self.final_seconds)
        )
    }

    pub fn best_line(&self) -> Option<String> {
        if self.is_new_best {
            return Some("New best record!".to_string());
        }
        self.best.map(|best| format!("Best record: {}", best.label()))
    }

    pub fn summary(&self) -> String {
        match self.best_line() {
            Some(line) => format!("{}\n{}", self.headline(), line),
            None => self.headline(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Ignored,
    Revealed(Reveal),
    Finished { reveal: Reveal, completion: Completion },
}

impl Selection {
    pub fn reveal(&self) -> Option<&Reveal> {
        match self {
            Selection::Ignored => None,
            Selection::Revealed(reveal) | Selection::Finished { reveal, .. } => Some(reveal),
        }
    }
}

/// One player's game plus the best-record store it reports to.
pub struct Session<S> {
    game: GameState,
    records: RecordStore<S>,
    completed: bool,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(pool: Vec<String>, store: S) -> Self {
        Self::with_rng(pool, store, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(pool: Vec<String>, store: S, rng: &mut R) -> Self {
        Session {
            game: GameState::new(pool, PAIR_COUNT, rng),
            records: RecordStore::open(store),
            completed: false,
        }
    }

    pub fn reset(&mut self) {
        self.reset_with(&mut rand::rng());
    }

    pub fn reset_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.game.reset(rng);
        self.completed = false;
        glib::g_debug!(
            crate::LOG_DOMAIN,
            "new game, generation {}",
            self.game.generation()
        );
    }

    pub fn on_card_selected(&mut self, id: CardId) -> Selection {
        let reveal = self.game.select(id);
        match reveal {
            Reveal::Ignored => Selection::Ignored,
            Reveal::Matched { won: true, .. } if !self.completed => {
                let completion = self.complete();
                Selection::Finished { reveal, completion }
            }
            _ => Selection::Revealed(reveal),
        }
    }

    fn complete(&mut self) -> Completion {
        self.completed = true;
        self.game.stop_clock();
        let candidate = BestRecord {
            moves: self.game.moves(),
            seconds: self.game.elapsed_seconds(),
        };
        let is_new_best = self.records.offer(candidate);
        glib::g_info!(
            crate::LOG_DOMAIN,
            "game complete: {} moves in {}s (new best: {})",
            candidate.moves,
            candidate.seconds,
            is_new_best
        );
        Completion {
            generation: self.game.generation(),
            final_moves: candidate.moves,
            final_seconds: candidate.seconds,
            is_new_best,
            best: self.records.best(),
        }
    }

    pub fn conceal(&mut self, ticket: ConcealTicket) -> bool {
        self.game.conceal(ticket)
    }

    pub fn tick(&mut self, generation: u64) -> Option<u32> {
        self.game.tick(generation)
    }

    pub fn cards(&self) -> &[Card] {
        self.game.cards()
    }

    pub fn revealed(&self) -> &[CardId] {
        self.game.revealed()
    }

    pub fn moves(&self) -> u32 {
        self.game.moves()
    }

    pub fn matches(&self) -> u32 {
        self.game.matches()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.game.elapsed_seconds()
    }

    pub fn best_record(&self) -> Option<BestRecord> {
        self.records.best()
    }

    pub fn is_locked(&self) -> bool {
        self.game.is_locked()
    }

    pub fn is_won(&self) -> bool {
        self.game.is_won()
    }

    pub fn clock_running(&self) -> bool {
        self.game.clock().is_running()
    }

    pub fn generation(&self) -> u64 {
        self.game.generation()
    }

    pub fn pair_count(&self) -> usize {
        self.game.pair_count()
    }

    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }
}
