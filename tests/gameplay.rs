// Whole-game scenarios driven through the public session API, without a
// display. Deterministic through seeded RNGs and in-memory storage.

use std::collections::BTreeMap;

use pairs::game::{
    BEST_RECORD_KEY, BestRecord, CardId, CardStatus, FileStore, KeyValueStore, MemoryStore,
    PAIR_COUNT, Reveal, Selection, Session,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn photo_pool() -> Vec<String> {
    (1..=PAIR_COUNT)
        .map(|n| format!("assets/photos/photo-{:02}.jpg", n))
        .collect()
}

fn session_with<S: KeyValueStore>(store: S, seed: u64) -> Session<S> {
    let mut rng = StdRng::seed_from_u64(seed);
    Session::with_rng(photo_pool(), store, &mut rng)
}

fn pairs_in_deal_order<S: KeyValueStore>(session: &Session<S>) -> Vec<[CardId; 2]> {
    let mut by_image: BTreeMap<&str, Vec<CardId>> = BTreeMap::new();
    let mut order = Vec::new();
    for card in session.cards() {
        let ids = by_image.entry(card.image.as_str()).or_default();
        if ids.is_empty() {
            order.push(card.image.as_str());
        }
        ids.push(card.id);
    }
    order
        .into_iter()
        .map(|image| [by_image[image][0], by_image[image][1]])
        .collect()
}

fn tick_for<S: KeyValueStore>(session: &mut Session<S>, seconds: u32) {
    let generation = session.generation();
    for _ in 0..seconds {
        session.tick(generation);
    }
}

/// Clears every pair, ticking `seconds_per_pair` between them. Returns how
/// many selections reported a finished game.
fn clear_board<S: KeyValueStore>(session: &mut Session<S>, seconds_per_pair: u32) -> usize {
    let mut finished = 0;
    for [a, b] in pairs_in_deal_order(session) {
        assert!(matches!(session.on_card_selected(a), Selection::Revealed(Reveal::First { .. })));
        tick_for(session, seconds_per_pair);
        if let Selection::Finished { .. } = session.on_card_selected(b) {
            finished += 1;
        }
    }
    finished
}

fn force_mismatch<S: KeyValueStore>(session: &mut Session<S>) {
    let pairs = pairs_in_deal_order(session);
    let (a, b) = (pairs[0][0], pairs[1][0]);
    session.on_card_selected(a);
    let Selection::Revealed(Reveal::Mismatched { ticket, .. }) = session.on_card_selected(b) else {
        panic!("expected a mismatch");
    };
    assert!(session.conceal(ticket));
}

#[test]
fn perfect_game_completes_once_and_sets_record() {
    let mut session = session_with(MemoryStore::new(), 1);
    let finished = clear_board(&mut session, 1);

    assert_eq!(finished, 1);
    assert_eq!(session.matches(), PAIR_COUNT as u32);
    assert_eq!(session.moves(), PAIR_COUNT as u32);
    assert!(session.is_won());
    assert!(!session.clock_running());
    assert!(session.cards().iter().all(|c| c.status == CardStatus::Matched));
    assert_eq!(
        session.best_record(),
        Some(BestRecord {
            moves: PAIR_COUNT as u32,
            seconds: PAIR_COUNT as u32
        })
    );
}

#[test]
fn completion_payload_reports_new_best() {
    let mut session = session_with(MemoryStore::new(), 2);
    let pairs = pairs_in_deal_order(&session);
    let (last, rest) = pairs.split_last().unwrap();
    for [a, b] in rest {
        session.on_card_selected(*a);
        session.on_card_selected(*b);
    }
    tick_for(&mut session, 5);
    session.on_card_selected(last[0]);
    let Selection::Finished { completion, .. } = session.on_card_selected(last[1]) else {
        panic!("final match should finish the game");
    };
    assert_eq!(completion.final_moves, PAIR_COUNT as u32);
    assert_eq!(completion.final_seconds, 5);
    assert!(completion.is_new_best);
    assert_eq!(completion.generation, session.generation());
    assert_eq!(
        completion.best,
        Some(BestRecord {
            moves: PAIR_COUNT as u32,
            seconds: 5
        })
    );
}

#[test]
fn clock_ignores_ticks_after_completion() {
    let mut session = session_with(MemoryStore::new(), 3);
    clear_board(&mut session, 0);
    let generation = session.generation();
    assert_eq!(session.tick(generation), None);
    assert_eq!(session.elapsed_seconds(), 0);
}

#[test]
fn worse_game_keeps_existing_record() {
    let store = MemoryStore::with_entry(BEST_RECORD_KEY, "{\"moves\":32,\"seconds\":10}");
    let mut session = session_with(store, 4);
    force_mismatch(&mut session);
    clear_board(&mut session, 0);

    assert_eq!(session.moves(), PAIR_COUNT as u32 + 1);
    assert_eq!(
        session.best_record(),
        Some(BestRecord {
            moves: 32,
            seconds: 10
        })
    );
    assert_eq!(
        session.records().load(),
        Some(BestRecord {
            moves: 32,
            seconds: 10
        })
    );
}

#[test]
fn equal_moves_faster_time_replaces_record() {
    let store = MemoryStore::with_entry(BEST_RECORD_KEY, "{\"moves\":32,\"seconds\":100}");
    let mut session = session_with(store, 5);
    clear_board(&mut session, 2);
    assert_eq!(
        session.records().load(),
        Some(BestRecord {
            moves: 32,
            seconds: 64
        })
    );
}

#[test]
fn exact_tie_is_not_a_new_best() {
    let store = MemoryStore::with_entry(BEST_RECORD_KEY, "{\"moves\":32,\"seconds\":0}");
    let mut session = session_with(store, 6);
    let pairs = pairs_in_deal_order(&session);
    let mut last = None;
    for [a, b] in pairs {
        session.on_card_selected(a);
        last = Some(session.on_card_selected(b));
    }
    let Some(Selection::Finished { completion, .. }) = last else {
        panic!("game should have finished");
    };
    assert!(!completion.is_new_best);
    assert_eq!(
        completion.best_line().as_deref(),
        Some("Best record: 32 moves / 00:00")
    );
}

#[test]
fn move_count_tracks_resolutions_not_clicks() {
    let mut session = session_with(MemoryStore::new(), 7);
    let pairs = pairs_in_deal_order(&session);

    session.on_card_selected(pairs[0][0]);
    assert_eq!(session.moves(), 0);
    // Clicking the same card again is not a second reveal.
    assert_eq!(session.on_card_selected(pairs[0][0]), Selection::Ignored);
    assert_eq!(session.moves(), 0);

    session.on_card_selected(pairs[1][0]);
    assert_eq!(session.moves(), 1);
    // Locked: nothing lands until the pair is concealed.
    assert_eq!(session.on_card_selected(pairs[2][0]), Selection::Ignored);
    assert_eq!(session.moves(), 1);
    assert_eq!(session.revealed().len(), 2);
}

#[test]
fn reset_discards_progress_and_pending_work() {
    let mut session = session_with(MemoryStore::new(), 8);
    let pairs = pairs_in_deal_order(&session);
    session.on_card_selected(pairs[0][0]);
    session.on_card_selected(pairs[0][1]);
    session.on_card_selected(pairs[1][0]);
    let Selection::Revealed(Reveal::Mismatched { ticket, .. }) =
        session.on_card_selected(pairs[2][0])
    else {
        panic!("expected a mismatch");
    };
    let old_generation = session.generation();
    tick_for(&mut session, 3);

    let mut rng = StdRng::seed_from_u64(80);
    for _ in 0..3 {
        session.reset_with(&mut rng);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.matches(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(session.revealed().is_empty());
        assert!(!session.is_locked());
    }

    assert!(!session.conceal(ticket));
    assert_eq!(session.tick(old_generation), None);
    assert!(session.cards().iter().all(|c| c.status == CardStatus::Hidden));
}

#[test]
fn record_survives_a_restart_on_disk() {
    let dir = std::env::temp_dir().join(format!("pairs-gameplay-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut first = session_with(FileStore::in_dir(&dir), 9);
    assert_eq!(first.best_record(), None);
    clear_board(&mut first, 1);
    let saved = first.best_record();
    assert!(saved.is_some());

    let second = session_with(FileStore::in_dir(&dir), 10);
    assert_eq!(second.best_record(), saved);
    assert_eq!(second.records().load(), saved);

    let _ = std::fs::remove_dir_all(&dir);
}
