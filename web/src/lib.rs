use wasm_bindgen::prelude::*;

mod api;
mod app;
mod board;
mod channel;
mod config;
mod game;
mod identity;
mod lobby;
mod route;
mod utils;

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = config::Args::from_location_hash(&location_hash).unwrap_or_else(|err| {
        gloo::console::warn!("ignoring location hash arguments", err.to_string());
        config::Args::default()
    });
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!("error initializing logger", err.to_string());
        }
    }

    let endpoints = args.endpoints();
    log::debug!("endpoints: {endpoints:?}");

    let Some(root) = document().get_element_by_id("game") else {
        log::error!("could not find id=\"game\" element");
        return;
    };

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, app::AppProps { endpoints }).render();
}
