use std::fs;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Card, CardId, CardStatus};

const PHOTO_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "svg"];

/// Builds a shuffled deck of `pair_count` pairs from the front of `pool`.
///
/// Ids are assigned before shuffling, so both copies of an image get distinct
/// ids and no id repeats within the deck. The pool must hold at least
/// `pair_count` references.
pub fn build_deck<R: Rng + ?Sized>(pool: &[String], pair_count: usize, rng: &mut R) -> Vec<Card> {
    debug_assert!(
        pool.len() >= pair_count,
        "image pool has {} entries, {} needed",
        pool.len(),
        pair_count
    );
    let selected = &pool[..pair_count.min(pool.len())];

    let mut cards: Vec<Card> = selected
        .iter()
        .chain(selected.iter())
        .enumerate()
        .map(|(idx, image)| Card {
            id: CardId(idx as u32),
            image: image.clone(),
            status: CardStatus::Hidden,
        })
        .collect();

    cards.shuffle(rng);
    cards
}

pub fn default_photo_pool(dir: &Path, pair_count: usize) -> Vec<String> {
    (1..=pair_count)
        .map(|n| {
            dir.join(format!("photo-{:02}.jpg", n))
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PHOTO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Lists the photos in `dir` by file name. When the directory cannot supply
/// `pair_count` images, the remainder is padded with default `photo-NN.jpg`
/// names not already present, so the deck builder always gets a full pool.
pub fn photo_pool_from_dir(dir: &Path, pair_count: usize) -> Vec<String> {
    let mut found: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_photo(path))
            .map(|path| path.to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };

    found.sort();
    found.truncate(pair_count);

    let missing = pair_count - found.len();
    if missing > 0 {
        glib::g_info!(
            crate::LOG_DOMAIN,
            "{} photos found in {}, padding with {} default names",
            found.len(),
            dir.display(),
            missing
        );
        let padding: Vec<String> = default_photo_pool(dir, pair_count + found.len())
            .into_iter()
            .filter(|name| !found.contains(name))
            .take(missing)
            .collect();
        found.extend(padding);
    }
    found
}
