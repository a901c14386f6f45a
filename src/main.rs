mod ui;

fn main() -> glib::ExitCode {
    ui::app::run()
}
