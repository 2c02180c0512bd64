use js_sys::{Array, Function, Object, Reflect};
use log::warn;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::{JsCast, JsValue};

use lottie_interactivity_core::{AnimationSource, Direction, FrameRange, Renderer, RendererError};

/// Renderer backed by a JS object exposing the lottie-web `AnimationItem`
/// surface (`goToAndStop`, `playSegments`, `setDirection`, ...) plus a
/// `loadAnimation(source)` method supplied by the host.
pub(crate) struct JsRenderer {
    target: Object,
}

fn describe(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{err:?}")
}

impl JsRenderer {
    pub(crate) fn new(target: JsValue) -> Result<Self, String> {
        let target = target
            .dyn_into::<Object>()
            .map_err(|_| "renderer must be an object".to_string())?;
        Ok(Self { target })
    }

    fn invoke(&self, name: &str, args: &[JsValue]) -> Result<JsValue, String> {
        let f = Reflect::get(&self.target, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
            .ok_or_else(|| format!("renderer has no `{name}` method"))?;
        let argv = args.iter().collect::<Array>();
        f.apply(&self.target, &argv).map_err(|e| describe(&e))
    }

    fn fire(&self, name: &str, args: &[JsValue]) {
        if let Err(e) = self.invoke(name, args) {
            warn!("renderer: {name} failed: {e}");
        }
    }
}

fn source_to_js(source: &AnimationSource) -> Result<JsValue, String> {
    match source {
        AnimationSource::Path(path) => Ok(JsValue::from_str(path)),
        AnimationSource::Data(data) => data
            .serialize(&swb::Serializer::json_compatible())
            .map_err(|e| e.to_string()),
    }
}

impl Renderer for JsRenderer {
    fn load_animation(&mut self, source: &AnimationSource) -> Result<(), RendererError> {
        let arg = source_to_js(source).map_err(RendererError::load_failed)?;
        self.invoke("loadAnimation", &[arg])
            .map(|_| ())
            .map_err(RendererError::load_failed)
    }

    fn go_to_and_stop(&mut self, frame: f32) {
        self.fire(
            "goToAndStop",
            &[JsValue::from_f64(frame as f64), JsValue::TRUE],
        );
    }

    fn play_segments(&mut self, range: FrameRange, force: bool) {
        let segment = Array::of2(
            &JsValue::from_f64(range.start() as f64),
            &JsValue::from_f64(range.end() as f64),
        );
        self.fire("playSegments", &[segment.into(), JsValue::from_bool(force)]);
    }

    fn reset_segments(&mut self) {
        self.fire("resetSegments", &[JsValue::TRUE]);
    }

    fn play(&mut self) {
        self.fire("play", &[]);
    }

    fn pause(&mut self) {
        self.fire("pause", &[]);
    }

    fn stop(&mut self) {
        self.fire("stop", &[]);
    }

    fn set_direction(&mut self, direction: Direction) {
        self.fire("setDirection", &[JsValue::from_f64(direction.sign() as f64)]);
    }

    fn set_loop(&mut self, looping: bool) {
        self.fire("setLoop", &[JsValue::from_bool(looping)]);
    }

    // lottie-web reports the frame count through `getDuration(true)`; plain
    // adapters may expose a `totalFrames` property or getter instead.
    fn total_frames(&self) -> f32 {
        if let Ok(n) = self.invoke("getDuration", &[JsValue::TRUE]) {
            if let Some(n) = n.as_f64() {
                return n as f32;
            }
        }
        let value = match Reflect::get(&self.target, &JsValue::from_str("totalFrames")) {
            Ok(v) => v,
            Err(e) => {
                warn!("renderer: totalFrames unreadable: {}", describe(&e));
                return 0.0;
            }
        };
        let value = match value.dyn_ref::<Function>() {
            Some(f) => f.call0(&self.target).unwrap_or(JsValue::UNDEFINED),
            None => value,
        };
        value.as_f64().map_or(0.0, |n| n as f32)
    }
}
