use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use gio::SimpleAction;

use pairs::config::Settings;
use pairs::game::{
    CardId, Completion, ConcealTicket, MISMATCH_DELAY, Reveal, SUMMARY_DELAY, Selection,
};

use super::board::{CONTENT_MARGIN, build_board_grid, sync_board};
use super::dialogs::{show_about_dialog, show_instructions_dialog, show_summary_dialog};
use super::hud::{start_timer, stop_timer, update_best_label, update_stats};
use super::state::UiState;

const APP_ID: &str = "io.basshift.Pairs";
const STYLE_CSS: &str = include_str!("../../data/style.css");

fn load_css() {
    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLE_CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

pub(super) fn handle_card_click(state: &Rc<RefCell<UiState>>, card_id: CardId) {
    let selection = state.borrow_mut().session.on_card_selected(card_id);
    let Some(reveal) = selection.reveal() else {
        return;
    };

    if reveal.clock_started() {
        start_timer(state);
    }

    {
        let mut st = state.borrow_mut();
        if let Some(cue) = st.cue.as_mut() {
            cue.play();
        }
        sync_board(&st);
        update_stats(&st);
    }

    if let Reveal::Mismatched { ticket, .. } = reveal {
        schedule_conceal(state, *ticket);
    }
    if let Selection::Finished { completion, .. } = selection {
        finish_game(state, completion);
    }
}

fn schedule_conceal(state: &Rc<RefCell<UiState>>, ticket: ConcealTicket) {
    let state_clone = state.clone();
    glib::timeout_add_local_once(MISMATCH_DELAY, move || {
        let mut st = state_clone.borrow_mut();
        if st.session.conceal(ticket) {
            sync_board(&st);
        }
    });
}

fn finish_game(state: &Rc<RefCell<UiState>>, completion: Completion) {
    {
        let mut st = state.borrow_mut();
        stop_timer(&mut st);
        update_stats(&st);
        update_best_label(&st);
    }

    let state_clone = state.clone();
    glib::timeout_add_local_once(SUMMARY_DELAY, move || {
        let window = {
            let st = state_clone.borrow();
            if st.session.generation() != completion.generation {
                return;
            }
            st.window.clone()
        };
        let dialog = show_summary_dialog(window.as_ref(), &completion);
        let state_again = state_clone.clone();
        dialog.connect_response(Some("again"), move |_, _| {
            new_game(&state_again);
        });
    });
}

fn rebuild_board(state: &Rc<RefCell<UiState>>) {
    let Some(board_container) = state.borrow().board_container.clone() else {
        return;
    };
    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    board_container.append(&grid);
}

pub(super) fn new_game(state: &Rc<RefCell<UiState>>) {
    {
        let mut st = state.borrow_mut();
        stop_timer(&mut st);
        st.session.reset();
    }
    rebuild_board(state);
    let st = state.borrow();
    update_stats(&st);
    update_best_label(&st);
}

fn stat_block(title: &str, value: &gtk::Label) -> gtk::Box {
    let block = gtk::Box::new(gtk::Orientation::Vertical, 2);
    block.add_css_class("stat-block");
    block.set_hexpand(true);

    let caption = gtk::Label::new(Some(title));
    caption.add_css_class("caption");
    caption.add_css_class("dim-label");

    value.add_css_class("stat-value");
    value.add_css_class("numeric");

    block.append(&caption);
    block.append(value);
    block
}

fn build_game_view(state: &Rc<RefCell<UiState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");
    root.set_margin_top(CONTENT_MARGIN);
    root.set_margin_bottom(CONTENT_MARGIN);
    root.set_margin_start(CONTENT_MARGIN);
    root.set_margin_end(CONTENT_MARGIN);

    let moves_label = gtk::Label::new(Some("0"));
    let matches_label = gtk::Label::new(Some("0"));
    let timer_label = gtk::Label::new(Some("00:00"));
    let best_label = gtk::Label::new(None);

    let stats = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    stats.add_css_class("stats-bar");
    stats.set_homogeneous(true);
    stats.append(&stat_block("Moves", &moves_label));
    stats.append(&stat_block("Matches", &matches_label));
    stats.append(&stat_block("Time", &timer_label));
    stats.append(&stat_block("Best", &best_label));

    let board_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    board_frame.set_halign(gtk::Align::Fill);
    board_frame.set_valign(gtk::Align::Fill);
    board_frame.set_hexpand(true);
    board_frame.set_vexpand(true);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("pairs-board-container");
    board_frame.set_child(Some(&board_card));

    root.append(&stats);
    root.append(&board_frame);

    {
        let mut st = state.borrow_mut();
        st.board_container = Some(board_card);
        st.moves_label = Some(moves_label);
        st.matches_label = Some(matches_label);
        st.timer_label = Some(timer_label);
        st.best_label = Some(best_label);
    }

    root
}

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();

        let settings = Settings::from_env();
        glib::g_info!(
            pairs::LOG_DOMAIN,
            "photos from {}, data in {}, sound {}",
            settings.photo_dir.display(),
            settings.data_dir.display(),
            if settings.sound { "on" } else { "off" }
        );
        let state = Rc::new(RefCell::new(UiState::new(&settings)));

        let new_game_action = SimpleAction::new("new-game", None);
        new_game_action.connect_activate({
            let state = state.clone();
            move |_, _| new_game(&state)
        });
        app.add_action(&new_game_action);

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        app.set_accels_for_action("app.new-game", &["<Control>n", "F5"]);
        app.set_accels_for_action("app.quit", &["<Control>q"]);

        let title = gtk::Label::new(None);
        title.set_markup("<b>Pairs</b>");
        title.set_halign(gtk::Align::Center);

        let header = adw::HeaderBar::builder().title_widget(&title).build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .action_name("app.new-game")
            .build();
        restart_button.set_tooltip_text(Some("New Game"));
        header.pack_start(&restart_button);

        let menu_model = gio::Menu::new();
        menu_model.append(Some("New Game"), Some("app.new-game"));
        menu_model.append(Some("How to Play"), Some("app.instructions"));
        menu_model.append(Some("About Pairs"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();
        header.pack_end(&menu_button);

        let game_view = build_game_view(&state);
        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&game_view));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Pairs")
            .default_width(760)
            .default_height(860)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 480);
        win.add_css_class("app-window");

        win.connect_close_request({
            let state = state.clone();
            move |_| {
                let mut st = state.borrow_mut();
                stop_timer(&mut st);
                gtk::glib::Propagation::Proceed
            }
        });

        state.borrow_mut().window = Some(win.clone());
        new_game(&state);
        win.present();
    });

    app.run()
}
