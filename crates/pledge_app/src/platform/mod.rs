mod app;
mod config;
mod controller;
mod effects;
mod ui;

pub use app::run_app;

use pledge_core::Msg;

/// Everything the main loop reacts to, in arrival order.
#[derive(Debug)]
pub(crate) enum LoopEvent {
    Msg(Msg),
    Quit,
}
