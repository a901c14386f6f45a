use rand::Rng;

use super::clock::Stopwatch;
use super::deck::build_deck;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardStatus {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub image: String,
    pub status: CardStatus,
}

impl Card {
    pub fn is_matched(&self) -> bool {
        self.status == CardStatus::Matched
    }
}

/// Pending concealment of a mismatched pair. Only valid for the game that
/// issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConcealTicket {
    pub generation: u64,
    pub pair: [CardId; 2],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reveal {
    Ignored,
    First {
        card: CardId,
        clock_started: bool,
    },
    Matched {
        pair: [CardId; 2],
        clock_started: bool,
        won: bool,
    },
    Mismatched {
        pair: [CardId; 2],
        clock_started: bool,
        ticket: ConcealTicket,
    },
}

impl Reveal {
    pub fn clock_started(&self) -> bool {
        match self {
            Reveal::Ignored => false,
            Reveal::First { clock_started, .. }
            | Reveal::Matched { clock_started, .. }
            | Reveal::Mismatched { clock_started, .. } => *clock_started,
        }
    }
}

pub struct GameState {
    pool: Vec<String>,
    pair_count: usize,
    cards: Vec<Card>,
    revealed: Vec<CardId>,
    locked: bool,
    moves: u32,
    matches: u32,
    clock: Stopwatch,
    generation: u64,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(pool: Vec<String>, pair_count: usize, rng: &mut R) -> Self {
        let mut st = GameState {
            pool,
            pair_count,
            cards: Vec::new(),
            revealed: Vec::with_capacity(2),
            locked: false,
            moves: 0,
            matches: 0,
            clock: Stopwatch::new(),
            generation: 0,
        };
        st.reset(rng);
        st
    }

    /// Discards the current game and deals a fresh deck. Bumps the
    /// generation so every outstanding ticket and tick becomes stale.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generation = self.generation.wrapping_add(1);
        self.revealed.clear();
        self.locked = false;
        self.moves = 0;
        self.matches = 0;
        self.clock.reset();
        self.cards = build_deck(&self.pool, self.pair_count, rng);
    }

    fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    pub fn select(&mut self, id: CardId) -> Reveal {
        if self.locked {
            return Reveal::Ignored;
        }
        let Some(pos) = self.position(id) else {
            return Reveal::Ignored;
        };
        if self.cards[pos].status != CardStatus::Hidden {
            return Reveal::Ignored;
        }

        let clock_started = self.clock.start();
        self.cards[pos].status = CardStatus::Revealed;
        self.revealed.push(id);

        if self.revealed.len() < 2 {
            return Reveal::First {
                card: id,
                clock_started,
            };
        }

        self.moves += 1;
        let pair = [self.revealed[0], self.revealed[1]];
        let (Some(a), Some(b)) = (self.position(pair[0]), self.position(pair[1])) else {
            self.revealed.clear();
            return Reveal::Ignored;
        };

        if self.cards[a].image == self.cards[b].image {
            self.cards[a].status = CardStatus::Matched;
            self.cards[b].status = CardStatus::Matched;
            self.revealed.clear();
            self.matches += 1;
            return Reveal::Matched {
                pair,
                clock_started,
                won: self.is_won(),
            };
        }

        self.locked = true;
        Reveal::Mismatched {
            pair,
            clock_started,
            ticket: ConcealTicket {
                generation: self.generation,
                pair,
            },
        }
    }

    /// Flips a mismatched pair back over and releases the input lock.
    /// Returns `false` for a stale ticket.
    pub fn conceal(&mut self, ticket: ConcealTicket) -> bool {
        if ticket.generation != self.generation || !self.locked {
            return false;
        }
        for id in ticket.pair {
            if let Some(pos) = self.position(id)
                && self.cards[pos].status == CardStatus::Revealed
            {
                self.cards[pos].status = CardStatus::Hidden;
            }
        }
        self.revealed.clear();
        self.locked = false;
        true
    }

    pub fn tick(&mut self, generation: u64) -> Option<u32> {
        if generation != self.generation {
            return None;
        }
        self.clock.tick()
    }

    pub fn stop_clock(&mut self) {
        self.clock.stop();
    }

    pub fn is_won(&self) -> bool {
        self.matches as usize == self.pair_count
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn revealed(&self) -> &[CardId] {
        &self.revealed
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.clock.elapsed()
    }

    pub fn clock(&self) -> &Stopwatch {
        &self.clock
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }
}
