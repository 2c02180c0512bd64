use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use log::{debug, warn};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use lottie_interactivity_core::{
    AnimationSource, Chrome, ClickSource, Command, CommandOutcome, Controls, CursorSource,
    EngineConfig, FrameRange, HoverSource, InteractionMode, InteractivityEngine, ListenerId,
    Notification, PlaybackStateMachine, PlayerOptions, PositionSource, Rect, ScrollGeometry,
    ScrollSource, Scrubber, SharedPlayer,
};

mod renderer;

use renderer::JsRenderer;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn outcome_to_js(outcome: CommandOutcome) -> Result<JsValue, JsError> {
    swb::to_value(&outcome).map_err(|e| JsError::new(&format!("outcome error: {e}")))
}

/// Concrete source behind the attached engine, kept so raw events can be
/// routed to the right feeder.
enum AttachedSource {
    Scroll(Rc<RefCell<ScrollSource>>),
    Cursor(Rc<RefCell<CursorSource>>),
    Hover(Rc<RefCell<HoverSource>>),
    Click(Rc<RefCell<ClickSource>>),
}

impl AttachedSource {
    fn for_config(config: &EngineConfig) -> Self {
        match config.mode {
            InteractionMode::Scroll => {
                Self::Scroll(Rc::new(RefCell::new(ScrollSource::new(config.offset))))
            }
            InteractionMode::Cursor => {
                Self::Cursor(Rc::new(RefCell::new(CursorSource::new(config.axis))))
            }
            InteractionMode::Hover => Self::Hover(Rc::new(RefCell::new(HoverSource::new()))),
            InteractionMode::Click => Self::Click(Rc::new(RefCell::new(ClickSource::new()))),
        }
    }

    fn handle(&self) -> Rc<RefCell<dyn PositionSource>> {
        match self {
            Self::Scroll(s) => s.clone() as Rc<RefCell<dyn PositionSource>>,
            Self::Cursor(s) => s.clone() as Rc<RefCell<dyn PositionSource>>,
            Self::Hover(s) => s.clone() as Rc<RefCell<dyn PositionSource>>,
            Self::Click(s) => s.clone() as Rc<RefCell<dyn PositionSource>>,
        }
    }
}

struct Attached {
    engine: InteractivityEngine,
    source: AttachedSource,
}

/// One animation: playback state machine, optional interactivity engine and
/// the progress scrubber.
///
/// Subscriber callbacks run synchronously inside the call that caused them
/// and must not call back into the same instance.
#[wasm_bindgen]
pub struct LottieInteractivity {
    player: SharedPlayer,
    attached: Option<Attached>,
    scrubber: Scrubber,
}

#[wasm_bindgen]
impl LottieInteractivity {
    /// Wrap a JS renderer object. `options` is optional JSON matching
    /// PlayerOptions, e.g. `{ autoplay: false, loop: true, direction: 1 }`.
    #[wasm_bindgen(constructor)]
    pub fn new(renderer: JsValue, options: JsValue) -> Result<LottieInteractivity, JsError> {
        console_error_panic_hook::set_once();

        let renderer = JsRenderer::new(renderer).map_err(|e| JsError::new(&e))?;
        let options: PlayerOptions = if jsvalue_is_undefined_or_null(&options) {
            PlayerOptions::default()
        } else {
            swb::from_value(options).map_err(|e| JsError::new(&format!("options error: {e}")))?
        };
        Ok(LottieInteractivity {
            player: PlaybackStateMachine::new(Box::new(renderer), options).shared(),
            attached: None,
            scrubber: Scrubber::new(),
        })
    }

    /// Start loading. A string is a path/URL, anything else is inline
    /// animation data.
    pub fn load(&mut self, source: JsValue) -> Result<(), JsError> {
        let source = parse_source(source)?;
        self.player.borrow_mut().load(&source);
        Ok(())
    }

    pub fn reload(&mut self, source: JsValue) -> Result<(), JsError> {
        let source = parse_source(source)?;
        self.player.borrow_mut().reload(&source);
        Ok(())
    }

    // ---- renderer hooks ----

    pub fn on_ready(&mut self) {
        self.player.borrow_mut().on_ready();
    }

    pub fn on_data_failed(&mut self, reason: String) {
        self.player.borrow_mut().on_data_failed(reason);
    }

    pub fn on_enter_frame(&mut self, frame: f32) {
        self.player.borrow_mut().on_enter_frame(frame);
    }

    pub fn on_complete(&mut self) {
        self.player.borrow_mut().on_complete();
    }

    // ---- imperative API; each returns "applied" | "suppressed" | "rejected" ----

    pub fn play(&mut self) -> Result<JsValue, JsError> {
        outcome_to_js(self.player.borrow_mut().play())
    }

    pub fn pause(&mut self) -> Result<JsValue, JsError> {
        outcome_to_js(self.player.borrow_mut().pause())
    }

    pub fn stop(&mut self) -> Result<JsValue, JsError> {
        outcome_to_js(self.player.borrow_mut().stop())
    }

    pub fn seek(&mut self, frame: f32) -> Result<JsValue, JsError> {
        outcome_to_js(self.player.borrow_mut().seek(frame))
    }

    pub fn seek_range(
        &mut self,
        start: f32,
        end: f32,
        continue_playing: bool,
    ) -> Result<JsValue, JsError> {
        let range = FrameRange::new(start, end);
        outcome_to_js(self.player.borrow_mut().seek_range(range, continue_playing))
    }

    pub fn toggle_loop(&mut self) -> Result<JsValue, JsError> {
        outcome_to_js(self.player.borrow_mut().toggle_loop())
    }

    pub fn set_loop(&mut self, looping: bool) -> Result<JsValue, JsError> {
        outcome_to_js(self.player.borrow_mut().set_loop(looping))
    }

    pub fn change_direction(&mut self) -> Result<JsValue, JsError> {
        outcome_to_js(self.player.borrow_mut().change_direction())
    }

    /// Apply a command object, e.g. `{ type: "seek", frame: 12 }`.
    pub fn apply(&mut self, command: JsValue) -> Result<JsValue, JsError> {
        let command: Command =
            swb::from_value(command).map_err(|e| JsError::new(&format!("command error: {e}")))?;
        outcome_to_js(self.player.borrow_mut().apply(command))
    }

    pub fn state(&self) -> String {
        self.player.borrow().state().name().to_string()
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.player.borrow().snapshot())
            .map_err(|e| JsError::new(&format!("snapshot error: {e}")))
    }

    /// Register `callback(notification)`. Returns an id for `unsubscribe`.
    pub fn subscribe(&mut self, callback: Function) -> u32 {
        let id = self
            .player
            .borrow_mut()
            .subscribe(Box::new(move |n: &Notification| {
                let value = match swb::to_value(n) {
                    Ok(v) => v,
                    Err(e) => {
                        warn!("wasm: notification serialization failed: {e}");
                        return;
                    }
                };
                if let Err(e) = callback.call1(&JsValue::UNDEFINED, &value) {
                    warn!("wasm: subscriber threw: {e:?}");
                }
            }));
        id.0
    }

    pub fn unsubscribe(&mut self, id: u32) -> bool {
        self.player.borrow_mut().unsubscribe(ListenerId(id))
    }

    // ---- interactivity ----

    /// Attach an interactivity engine from a config object
    /// (`{ mode, actions, offset?, axis?, click_overflow? }`). Any previously
    /// attached engine is torn down first, even when the new config is
    /// rejected.
    pub fn attach_interactivity(&mut self, config: JsValue) -> Result<(), JsError> {
        self.detach_interactivity();
        let config: EngineConfig = swb::from_value(config)
            .map_err(|e| JsError::new(&format!("interactivity config error: {e}")))?;
        let source = AttachedSource::for_config(&config);
        let engine = InteractivityEngine::new(config, source.handle(), self.player.clone())
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.attached = Some(Attached { engine, source });
        Ok(())
    }

    /// Remove the interactivity engine. The player keeps its current state.
    pub fn detach_interactivity(&mut self) {
        if let Some(mut attached) = self.attached.take() {
            attached.engine.teardown();
        }
    }

    pub fn has_interactivity(&self) -> bool {
        self.attached.as_ref().is_some_and(|a| a.engine.is_active())
    }

    /// Scroll or resize with the element and viewport rects
    /// (`{ element: {left, top, width, height}, viewport: {...} }`).
    /// Returns false when no scroll engine is attached.
    pub fn scroll(&mut self, geometry: JsValue) -> Result<bool, JsError> {
        let geom: ScrollGeometry = swb::from_value(geometry)
            .map_err(|e| JsError::new(&format!("scroll geometry error: {e}")))?;
        match self.attached.as_ref().map(|a| &a.source) {
            Some(AttachedSource::Scroll(s)) => {
                s.borrow_mut().on_scroll(&geom);
                Ok(true)
            }
            _ => {
                debug!("wasm: scroll ignored, no scroll engine attached");
                Ok(false)
            }
        }
    }

    pub fn pointer_move(
        &mut self,
        element: JsValue,
        client_x: f32,
        client_y: f32,
    ) -> Result<bool, JsError> {
        let rect: Rect = swb::from_value(element)
            .map_err(|e| JsError::new(&format!("element rect error: {e}")))?;
        match self.attached.as_ref().map(|a| &a.source) {
            Some(AttachedSource::Cursor(s)) => {
                s.borrow_mut().on_pointer_move(&rect, client_x, client_y);
                Ok(true)
            }
            _ => {
                debug!("wasm: pointer move ignored, no cursor engine attached");
                Ok(false)
            }
        }
    }

    pub fn pointer_leave(&mut self) -> bool {
        match self.attached.as_ref().map(|a| &a.source) {
            Some(AttachedSource::Cursor(s)) => {
                s.borrow_mut().on_pointer_leave();
                true
            }
            _ => false,
        }
    }

    pub fn hover_enter(&mut self) -> bool {
        match self.attached.as_ref().map(|a| &a.source) {
            Some(AttachedSource::Hover(s)) => {
                s.borrow_mut().on_enter();
                true
            }
            _ => false,
        }
    }

    pub fn hover_leave(&mut self) -> bool {
        match self.attached.as_ref().map(|a| &a.source) {
            Some(AttachedSource::Hover(s)) => {
                s.borrow_mut().on_leave();
                true
            }
            _ => false,
        }
    }

    pub fn click(&mut self) -> bool {
        match self.attached.as_ref().map(|a| &a.source) {
            Some(AttachedSource::Click(s)) => {
                s.borrow_mut().on_click();
                true
            }
            _ => false,
        }
    }

    /// Call once per `requestAnimationFrame`. Delivers the latest pending
    /// position to the engine; returns whether one was delivered.
    pub fn animation_frame(&mut self) -> bool {
        let Some(attached) = &self.attached else {
            return false;
        };
        let source = attached.source.handle();
        let delivered = source.borrow_mut().flush();
        delivered
    }

    // ---- controls ----

    /// Slider moved: seek to the rounded frame and return the scrub event.
    pub fn scrub_input(&mut self, frame: f32) -> Result<JsValue, JsError> {
        let event = self.scrubber.on_input(frame);
        Scrubber::apply(&event, &mut self.player.borrow_mut());
        swb::to_value(&event).map_err(|e| JsError::new(&format!("scrub error: {e}")))
    }

    /// Slider released: commit the selected frame once. Returns null when no
    /// drag was in progress.
    pub fn scrub_release(&mut self) -> Result<JsValue, JsError> {
        match self.scrubber.on_release() {
            Some(event) => {
                Scrubber::apply(&event, &mut self.player.borrow_mut());
                swb::to_value(&event).map_err(|e| JsError::new(&format!("scrub error: {e}")))
            }
            None => Ok(JsValue::NULL),
        }
    }

    /// Frame the progress slider should show.
    pub fn display_frame(&self) -> f32 {
        self.scrubber.display_frame(self.player.borrow().current_frame())
    }

    /// Which overlays and control elements to mount for the current state.
    /// `controls` is `true`, `false` or a list like `["play_pause", "loop"]`.
    pub fn chrome_layout(&self, controls: JsValue) -> Result<JsValue, JsError> {
        let controls: Controls = if jsvalue_is_undefined_or_null(&controls) {
            Controls::default()
        } else {
            swb::from_value(controls)
                .map_err(|e| JsError::new(&format!("controls error: {e}")))?
        };
        let layout = Chrome::layout(self.player.borrow().state(), &controls);
        swb::to_value(&layout).map_err(|e| JsError::new(&format!("layout error: {e}")))
    }
}

fn parse_source(source: JsValue) -> Result<AnimationSource, JsError> {
    if let Some(path) = source.as_string() {
        return Ok(AnimationSource::Path(path));
    }
    if jsvalue_is_undefined_or_null(&source) {
        return Err(JsError::new("load: source is null/undefined"));
    }
    let data: serde_json::Value = swb::from_value(source)
        .map_err(|e| JsError::new(&format!("animation data error: {e}")))?;
    Ok(AnimationSource::Data(data))
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
