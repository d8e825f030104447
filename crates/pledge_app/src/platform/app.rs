use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_info, engine_warn};

use super::config::AppConfig;
use super::controller::Controller;
use super::effects::EffectRunner;
use super::ui::input::{parse_intent, Intent, HELP};
use super::ui::notify::TerminalNotifier;
use super::ui::render::TerminalRenderer;
use super::LoopEvent;

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    engine_logging::initialize(config.log_destination, config.log_level, &config.log_path);
    engine_info!("Starting pledge table, source={}", config.fetch.source_url);

    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(config.fetch.clone(), event_tx.clone());
    let mut controller = Controller::new(
        config.table.clone(),
        TerminalRenderer::stdout(),
        TerminalNotifier::default(),
    );

    spawn_input_reader(event_tx);
    println!("{HELP}");

    runner.run(controller.start());

    // Messages are handled one at a time, so intents never interleave.
    while let Ok(event) = event_rx.recv() {
        match event {
            LoopEvent::Msg(msg) => runner.run(controller.dispatch(msg)),
            LoopEvent::Quit => break,
        }
    }

    engine_info!("Shutting down");
    Ok(())
}

fn spawn_input_reader(events: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    engine_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            match parse_intent(&line) {
                Ok(Intent::Send(msgs)) => {
                    for msg in msgs {
                        if events.send(LoopEvent::Msg(msg)).is_err() {
                            return;
                        }
                    }
                }
                Ok(Intent::Help) => println!("{HELP}"),
                Ok(Intent::Quit) => break,
                Err(message) => println!("{message}. {HELP}"),
            }
        }
        let _ = events.send(LoopEvent::Quit);
    });
}
