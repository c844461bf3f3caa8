//! Browser host
//!
//! The page renders from `viewJson()` and forwards clicks/keys. While a game is
//! being played a `setInterval` refreshes the elapsed time and asks the page to
//! re-render; the interval is cleared as soon as the game leaves `Playing` or
//! the `WebQuiz` is freed.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::consts::TIMER_INTERVAL_MS;
use crate::error::QuizError;
use crate::quiz::{Difficulty, GamePhase, QuizGame};
use crate::settings::Settings;

/// A registered `setInterval`; cleared on drop
struct Interval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    fn start(millis: i32, callback: Closure<dyn FnMut()>) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        )?;
        Ok(Self {
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
            log::debug!("Cleared elapsed timer");
        }
    }
}

fn to_js(e: QuizError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Quiz handle exported to JavaScript
#[wasm_bindgen]
pub struct WebQuiz {
    game: Rc<RefCell<QuizGame>>,
    on_render: js_sys::Function,
    interval: Option<Interval>,
}

#[wasm_bindgen]
impl WebQuiz {
    /// `on_render` is called with no arguments whenever the timer changes the view
    #[wasm_bindgen(constructor)]
    pub fn new(on_render: js_sys::Function) -> WebQuiz {
        let seed = Settings::load().seed_or_random();
        log::info!("Created web quiz with seed: {}", seed);
        WebQuiz {
            game: Rc::new(RefCell::new(QuizGame::new(seed))),
            on_render,
            interval: None,
        }
    }

    #[wasm_bindgen(js_name = selectDifficulty)]
    pub fn select_difficulty(&mut self, value: &str) -> Result<(), JsValue> {
        let difficulty = Difficulty::from_str(value)
            .ok_or_else(|| JsValue::from_str(&format!("unknown difficulty {value:?}")))?;
        let result = self.game.borrow_mut().select_difficulty(difficulty);
        self.sync_timer()?;
        result.map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateInput)]
    pub fn update_input(&mut self, text: &str) -> Result<(), JsValue> {
        self.game.borrow_mut().update_input(text).map_err(to_js)
    }

    /// Returns whether the answer was correct
    #[wasm_bindgen(js_name = submitAnswer)]
    pub fn submit_answer(&mut self, text: &str) -> Result<bool, JsValue> {
        let result = self.game.borrow_mut().submit_answer(text);
        self.sync_timer()?;
        result.map(|outcome| outcome.correct).map_err(to_js)
    }

    /// Submit the text last passed to `updateInput`
    #[wasm_bindgen(js_name = submitInput)]
    pub fn submit_input(&mut self) -> Result<bool, JsValue> {
        let result = self.game.borrow_mut().submit_input();
        self.sync_timer()?;
        result.map(|outcome| outcome.correct).map_err(to_js)
    }

    #[wasm_bindgen(js_name = requestHint)]
    pub fn request_hint(&mut self) -> Result<(), JsValue> {
        self.game.borrow_mut().request_hint().map_err(to_js)
    }

    /// Pick a multiple-choice option by its 0-based position
    #[wasm_bindgen(js_name = chooseOption)]
    pub fn choose_option(&mut self, index: usize) -> Result<bool, JsValue> {
        let result = self.game.borrow_mut().choose_option(index);
        self.sync_timer()?;
        result.map(|outcome| outcome.correct).map_err(to_js)
    }

    #[wasm_bindgen(js_name = playAgain)]
    pub fn play_again(&mut self) -> Result<(), JsValue> {
        let result = self.game.borrow_mut().play_again();
        self.sync_timer()?;
        result.map_err(to_js)
    }

    /// Current `QuizView` as JSON
    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.borrow().view())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Queued `QuizEvent`s as a JSON array (empties the queue)
    #[wasm_bindgen(js_name = takeEventsJson)]
    pub fn take_events_json(&mut self) -> Result<String, JsValue> {
        let events = self.game.borrow_mut().drain_events();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Run the interval only while a game is being played
    fn sync_timer(&mut self) -> Result<(), JsValue> {
        let playing = self.game.borrow().phase() == GamePhase::Playing;
        match (playing, self.interval.is_some()) {
            (true, false) => {
                let game = Rc::clone(&self.game);
                let on_render = self.on_render.clone();
                let callback = Closure::<dyn FnMut()>::new(move || {
                    if game.borrow_mut().tick() {
                        if let Err(e) = on_render.call0(&JsValue::NULL) {
                            log::warn!("Render callback failed: {:?}", e);
                        }
                    }
                });
                self.interval = Some(Interval::start(TIMER_INTERVAL_MS as i32, callback)?);
            }
            (false, true) => self.interval = None,
            _ => {}
        }
        Ok(())
    }
}
