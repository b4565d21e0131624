use clap::Parser;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod card_view;
mod end_grid;
mod game;
mod grid;
mod journal;
mod remote;
mod settings;
mod theme;
mod utils;
mod waypoints;
mod widgets;

const DECK: &str = include_str!("../content/cards_en.json");

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Base URL of the REST backend, plays offline when absent
    #[arg(long)]
    api_url: Option<String>,

    /// Public API key sent with every backend request
    #[arg(long)]
    api_key: Option<String>,
}

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

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    let catalog = scape_core::Catalog::from_json(DECK).expect("Bundled card deck is invalid");
    log::debug!("loaded {} cards", catalog.cards().len());
    let props = game::GameProps {
        catalog: Rc::new(catalog),
        backend: Rc::new(remote::Backend::new(args.api_url, args.api_key)),
    };

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}
