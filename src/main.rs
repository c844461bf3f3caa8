//! Number Rush entry point
//!
//! Handles platform-specific initialization and hands control to a host.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Number Rush (web) ready - construct a WebQuiz to play");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use number_rush::{QuizGame, Settings, ui::TerminalUi};

    env_logger::init();
    log::info!("Number Rush (native) starting...");

    let settings = Settings::load();
    let seed = settings.seed_or_random();
    log::info!("Using seed: {}", seed);

    let mut game = QuizGame::new(seed);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut ui = TerminalUi::new(stdin.lock(), stdout.lock(), settings);
    if let Err(e) = ui.run(&mut game) {
        log::error!("Terminal I/O failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
