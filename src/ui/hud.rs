use std::cell::RefCell;
use std::rc::Rc;

use gtk4::glib;

use pairs::game::format_clock;

use super::state::UiState;

pub(super) fn update_stats(st: &UiState) {
    if let Some(label) = &st.moves_label {
        label.set_text(&st.session.moves().to_string());
    }
    if let Some(label) = &st.matches_label {
        label.set_text(&format!(
            "{} / {}",
            st.session.matches(),
            st.session.pair_count()
        ));
    }
    update_clock(st);
}

pub(super) fn update_clock(st: &UiState) {
    if let Some(label) = &st.timer_label {
        label.set_text(&format_clock(st.session.elapsed_seconds()));
    }
}

pub(super) fn update_best_label(st: &UiState) {
    if let Some(label) = &st.best_label {
        match st.session.best_record() {
            Some(best) => label.set_text(&best.label()),
            None => label.set_text("None yet"),
        }
    }
}

pub(super) fn stop_timer(st: &mut UiState) {
    if let Some(handle) = st.timer_handle.take() {
        handle.remove();
    }
}

pub(super) fn start_timer(state: &Rc<RefCell<UiState>>) {
    let mut st = state.borrow_mut();
    stop_timer(&mut st);

    let generation = st.session.generation();
    let state_clone = state.clone();
    let handle = glib::timeout_add_local(std::time::Duration::from_secs(1), move || {
        let mut st = state_clone.borrow_mut();
        if st.session.tick(generation).is_none() {
            st.timer_handle = None;
            return glib::ControlFlow::Break;
        }
        update_clock(&st);
        glib::ControlFlow::Continue
    });
    st.timer_handle = Some(handle);
}
