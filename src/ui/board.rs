use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::gdk;
use gtk4::pango;
use gtk4::prelude::*;

use pairs::game::{BOARD_SIZE, Card, CardId, CardStatus};

use super::app::handle_card_click;
use super::state::UiState;

pub const CONTENT_MARGIN: i32 = 12;
pub const TILE_GAP: i32 = 6;

const FACE_BACK: &str = "back";
const FACE_FRONT: &str = "front";

fn texture_for(st: &mut UiState, image: &str) -> Option<gdk::Texture> {
    st.textures
        .entry(image.to_string())
        .or_insert_with(|| {
            match gdk::Texture::from_file(&gio::File::for_path(image)) {
                Ok(texture) => Some(texture),
                Err(err) => {
                    glib::g_debug!(
                        pairs::LOG_DOMAIN,
                        "using placeholder for {}: {}",
                        image,
                        err
                    );
                    None
                }
            }
        })
        .clone()
}

fn build_card_back() -> gtk::DrawingArea {
    let area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .build();
    area.add_css_class("pairs-card-back");
    area.set_draw_func(|area, cr, width, height| {
        let min_dim = width.min(height) as f64;

        cr.set_antialias(gtk::cairo::Antialias::Best);

        let layout = pangocairo::functions::create_layout(cr);
        let mut font_desc = pango::FontDescription::new();
        font_desc.set_family("Cantarell, Noto Sans, sans");
        font_desc.set_weight(pango::Weight::Bold);
        font_desc.set_size((min_dim * 0.34 * pango::SCALE as f64) as i32);
        layout.set_font_description(Some(&font_desc));
        layout.set_text("?");

        let fg = area.style_context().color();
        cr.set_source_rgba(
            fg.red() as f64,
            fg.green() as f64,
            fg.blue() as f64,
            fg.alpha() as f64,
        );

        let (text_width, text_height) = layout.pixel_size();
        cr.move_to(
            (width as f64 - text_width as f64) / 2.0,
            (height as f64 - text_height as f64) / 2.0,
        );
        pangocairo::functions::show_layout(cr, &layout);
    });
    area
}

fn rounded_rect(cr: &gtk::cairo::Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

/// Head-and-shoulders silhouette shown when a photo cannot be loaded.
fn build_placeholder() -> gtk::DrawingArea {
    let area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .build();
    area.add_css_class("pairs-card-placeholder");
    area.set_draw_func(|_, cr, width, height| {
        let side = width.min(height) as f64;
        let scale = side / 200.0;
        cr.translate(
            (width as f64 - side) / 2.0,
            (height as f64 - side) / 2.0,
        );
        cr.scale(scale, scale);

        cr.set_source_rgb(0.91, 0.945, 0.953);
        cr.rectangle(0.0, 0.0, 200.0, 200.0);
        let _ = cr.fill();

        cr.set_source_rgb(0.565, 0.643, 0.682);
        cr.arc(100.0, 75.0, 32.0, 0.0, 2.0 * PI);
        let _ = cr.fill();
        rounded_rect(cr, 45.0, 120.0, 110.0, 55.0, 22.0);
        let _ = cr.fill();
    });
    area
}

fn build_card_front(texture: Option<gdk::Texture>) -> gtk::Widget {
    match texture {
        Some(texture) => {
            let picture = gtk::Picture::for_paintable(&texture);
            picture.set_can_shrink(true);
            picture.add_css_class("pairs-card-photo");
            picture.upcast()
        }
        None => build_placeholder().upcast(),
    }
}

fn face_stack(button: &gtk::Button) -> Option<gtk::Stack> {
    button.child().and_then(|child| child.downcast::<gtk::Stack>().ok())
}

/// Brings one button in line with its card's status.
pub(super) fn sync_card(button: &gtk::Button, card: &Card) {
    let face = match card.status {
        CardStatus::Hidden => FACE_BACK,
        CardStatus::Revealed | CardStatus::Matched => FACE_FRONT,
    };
    if let Some(stack) = face_stack(button) {
        stack.set_visible_child_name(face);
    }
    match card.status {
        CardStatus::Hidden => {
            button.remove_css_class("revealed");
            button.remove_css_class("matched");
        }
        CardStatus::Revealed => {
            button.add_css_class("revealed");
            button.remove_css_class("matched");
        }
        CardStatus::Matched => {
            button.remove_css_class("revealed");
            button.add_css_class("matched");
        }
    }
    button.set_sensitive(card.status != CardStatus::Matched);
}

pub(super) fn sync_board(st: &UiState) {
    for (button, card) in st.grid_buttons.iter().zip(st.session.cards()) {
        sync_card(button, card);
    }
}

pub fn build_board_grid(state: &Rc<RefCell<UiState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("pairs-board");
    grid.set_row_spacing(TILE_GAP as u32);
    grid.set_column_spacing(TILE_GAP as u32);
    grid.set_row_homogeneous(true);
    grid.set_column_homogeneous(true);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let faces: Vec<(CardId, Option<gdk::Texture>)> = {
        let mut st = state.borrow_mut();
        let cards: Vec<(CardId, String)> = st
            .session
            .cards()
            .iter()
            .map(|card| (card.id, card.image.clone()))
            .collect();
        cards
            .into_iter()
            .map(|(id, image)| (id, texture_for(&mut st, &image)))
            .collect()
    };

    let cols = BOARD_SIZE as i32;
    let mut buttons = Vec::with_capacity(faces.len());

    for (i, (card_id, texture)) in faces.into_iter().enumerate() {
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let stack = gtk::Stack::new();
        stack.set_transition_type(gtk::StackTransitionType::Crossfade);
        stack.set_transition_duration(180);
        stack.add_named(&build_card_back(), Some(FACE_BACK));
        stack.add_named(&build_card_front(texture), Some(FACE_FRONT));
        stack.set_visible_child_name(FACE_BACK);

        let button = gtk::Button::builder()
            .css_classes(vec!["pairs-card"])
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);
        button.set_child(Some(&stack));

        let state_clone = state.clone();
        button.connect_clicked(move |_| {
            handle_card_click(&state_clone, card_id);
        });

        aspect_frame.set_child(Some(&button));

        let i = i as i32;
        grid.attach(&aspect_frame, i % cols, i / cols, 1, 1);
        buttons.push(button);
    }

    {
        let mut st = state.borrow_mut();
        st.grid_buttons = buttons;
        sync_board(&st);
    }

    grid
}
