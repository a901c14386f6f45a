//! Runtime settings read from the environment.

use std::env;
use std::path::PathBuf;

const DEFAULT_PHOTO_DIR: &str = "assets/photos";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Directory the card photos are read from.
    pub photo_dir: PathBuf,
    /// Directory holding the best-record storage file.
    pub data_dir: PathBuf,
    /// Whether a tone plays when a card is revealed.
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            photo_dir: PathBuf::from(DEFAULT_PHOTO_DIR),
            data_dir: glib::user_config_dir().join("pairs"),
            sound: true,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    let v = raw.trim().to_ascii_lowercase();
    match v.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Settings {
    /// Reads `PAIRS_PHOTO_DIR`, `PAIRS_DATA_DIR` and `PAIRS_SOUND`. Unset or
    /// unusable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(non_empty_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();
        if let Some(dir) = lookup("PAIRS_PHOTO_DIR") {
            settings.photo_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("PAIRS_DATA_DIR") {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("PAIRS_SOUND") {
            match parse_flag(&raw) {
                Some(sound) => settings.sound = sound,
                None => glib::g_warning!(
                    crate::LOG_DOMAIN,
                    "PAIRS_SOUND has unrecognized value {:?}, keeping sound on",
                    raw
                ),
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.photo_dir, PathBuf::from(DEFAULT_PHOTO_DIR));
        assert!(settings.data_dir.ends_with("pairs"));
        assert!(settings.sound);
    }

    #[test]
    fn reads_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("PAIRS_PHOTO_DIR", "/srv/team"),
            ("PAIRS_DATA_DIR", "/tmp/pairs-data"),
            ("PAIRS_SOUND", " Off "),
        ]));
        assert_eq!(settings.photo_dir, PathBuf::from("/srv/team"));
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/pairs-data"));
        assert!(!settings.sound);
    }

    #[test]
    fn unknown_sound_flag_keeps_default() {
        let settings = Settings::from_lookup(lookup_from(&[("PAIRS_SOUND", "loud")]));
        assert!(settings.sound);
    }
}
