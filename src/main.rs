#![allow(warnings)]
//! FixHub Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod draft;
mod error;
mod liveness;
mod models;
mod permissions;
mod project_scope;
mod routes;
mod session;
mod store;

use std::sync::Arc;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use session::{LocalStorageStore, Session};

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    if let Err(e) = console_logger::init_logger(config.log_level, console_logger::DEFAULT_CAPACITY) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }
    log::info!("[APP] FixHub UI starting, api={}", config.api_base_url);

    let session = Session::init(Arc::new(LocalStorageStore::new(config.token_storage_key.clone())));
    mount_to_body(move || view! { <App config=config.clone() session=session.clone() /> });
}
