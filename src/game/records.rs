use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BEST_RECORD_KEY;
use super::clock::format_clock;
use super::store::KeyValueStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRecord {
    pub moves: u32,
    pub seconds: u32,
}

impl BestRecord {
    pub fn label(&self) -> String {
        format!("{} moves / {}", self.moves, format_clock(self.seconds))
    }
}

/// Fewer moves wins; equal moves fall back to fewer seconds. Anything beats
/// an empty slot.
pub fn is_better(candidate: &BestRecord, current: Option<&BestRecord>) -> bool {
    let Some(current) = current else {
        return true;
    };
    candidate.moves < current.moves
        || (candidate.moves == current.moves && candidate.seconds < current.seconds)
}

fn whole_number(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.fract() != 0.0 || f < 0.0 || f > u32::MAX as f64 {
        return None;
    }
    Some(f as u32)
}

fn parse_record(raw: &str) -> Option<BestRecord> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let obj = value.as_object()?;
    Some(BestRecord {
        moves: whole_number(obj.get("moves")?)?,
        seconds: whole_number(obj.get("seconds")?)?,
    })
}

pub struct RecordStore<S> {
    store: S,
    best: Option<BestRecord>,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn open(store: S) -> Self {
        let mut records = RecordStore { store, best: None };
        records.best = records.load();
        records
    }

    /// Reads the persisted record. Anything missing or malformed counts as
    /// no record.
    pub fn load(&self) -> Option<BestRecord> {
        let raw = self.store.get(BEST_RECORD_KEY)?;
        let parsed = parse_record(&raw);
        if parsed.is_none() {
            glib::g_debug!(crate::LOG_DOMAIN, "ignoring malformed best record: {}", raw);
        }
        parsed
    }

    pub fn save(&mut self, record: BestRecord) {
        self.best = Some(record);
        let encoded = match serde_json::to_string(&record) {
            Ok(encoded) => encoded,
            Err(err) => {
                glib::g_warning!(crate::LOG_DOMAIN, "could not encode best record: {}", err);
                return;
            }
        };
        if let Err(err) = self.store.set(BEST_RECORD_KEY, &encoded) {
            glib::g_warning!(crate::LOG_DOMAIN, "could not persist best record: {}", err);
        }
    }

    /// Saves `candidate` if it beats the cached best. Returns whether it did.
    pub fn offer(&mut self, candidate: BestRecord) -> bool {
        if !is_better(&candidate, self.best.as_ref()) {
            return false;
        }
        self.save(candidate);
        true
    }

    pub fn best(&self) -> Option<BestRecord> {
        self.best
    }
}
