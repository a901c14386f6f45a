use std::collections::HashMap;

use gtk4 as gtk;
use gtk4::gdk;
use libadwaita as adw;

use pairs::config::Settings;
use pairs::game::{FileStore, PAIR_COUNT, Session, photo_pool_from_dir};

use super::audio::FlipCue;

pub struct UiState {
    pub window: Option<adw::ApplicationWindow>,
    pub board_container: Option<gtk::Box>,
    pub moves_label: Option<gtk::Label>,
    pub matches_label: Option<gtk::Label>,
    pub timer_label: Option<gtk::Label>,
    pub best_label: Option<gtk::Label>,

    // Game state
    pub session: Session<FileStore>,
    /// One button per card, in deal order.
    pub grid_buttons: Vec<gtk::Button>,
    pub timer_handle: Option<glib::SourceId>,
    pub cue: Option<FlipCue>,
    /// Decoded photos by image reference; `None` marks a failed load.
    pub textures: HashMap<String, Option<gdk::Texture>>,
}

impl UiState {
    pub fn new(settings: &Settings) -> Self {
        let pool = photo_pool_from_dir(&settings.photo_dir, PAIR_COUNT);
        let store = FileStore::in_dir(&settings.data_dir);
        glib::g_debug!(
            pairs::LOG_DOMAIN,
            "best record storage at {}",
            store.path().display()
        );
        UiState {
            window: None,
            board_container: None,
            moves_label: None,
            matches_label: None,
            timer_label: None,
            best_label: None,
            session: Session::new(pool, store),
            grid_buttons: Vec::new(),
            timer_handle: None,
            cue: settings.sound.then(FlipCue::new).filter(FlipCue::is_enabled),
            textures: HashMap::new(),
        }
    }
}
