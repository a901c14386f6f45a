use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

use pairs::game::Completion;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("How to Play"),
        Some(
            "Reveal two cards per turn to find matching photos.\n\
Mismatched cards flip back after a moment.\n\
Clear all 32 pairs in as few moves as you can.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Pairs")
        .developer_name("Basshift")
        .version(env!("CARGO_PKG_VERSION"))
        .comments("A photo memory game for finding pairs.")
        .build();
    dialog.add_legal_section("Pairs", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}

/// End-of-game summary. The `again` response starts a new game.
pub fn show_summary_dialog(
    parent: Option<&impl IsA<gtk::Widget>>,
    completion: &Completion,
) -> adw::AlertDialog {
    let heading = if completion.is_new_best {
        "New Best!"
    } else {
        "Board Cleared"
    };
    let dialog = adw::AlertDialog::new(Some(heading), Some(&completion.summary()));
    dialog.add_response("close", "Close");
    dialog.add_response("again", "Play Again");
    dialog.set_response_appearance("again", adw::ResponseAppearance::Suggested);
    dialog.set_default_response(Some("again"));
    dialog.set_close_response("close");
    dialog.present(parent);
    dialog
}
