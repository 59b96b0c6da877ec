mod app;
mod browser;
mod config;
mod controller;
mod deferred;
mod error;
mod logging;
mod prefs;
mod render;
mod scroll;
mod theme;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(logging::level_from_query(&browser::location_search()));
    leptos::mount::mount_to_body(app::App);
}
