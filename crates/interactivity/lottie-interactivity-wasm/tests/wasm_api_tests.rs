#![cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Object, Reflect};
use lottie_interactivity_wasm::{abi_version, LottieInteractivity};
use serde_json::json;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Minimal AnimationItem stand-in: every method records its name and args
/// into `calls`.
fn fake_renderer(total_frames: f64) -> (JsValue, Array) {
    let obj = Object::new();
    let calls = Array::new();
    Reflect::set(&obj, &"calls".into(), &calls).unwrap();
    Reflect::set(&obj, &"totalFrames".into(), &JsValue::from_f64(total_frames)).unwrap();
    for name in [
        "loadAnimation",
        "goToAndStop",
        "playSegments",
        "resetSegments",
        "play",
        "pause",
        "stop",
        "setDirection",
        "setLoop",
    ] {
        let body = format!("this.calls.push(['{name}'].concat(Array.from(arguments)));");
        let f = Function::new_no_args(&body);
        Reflect::set(&obj, &name.into(), &f).unwrap();
    }
    (obj.into(), calls)
}

fn call_names(calls: &Array) -> Vec<String> {
    calls
        .iter()
        .map(|c| Array::from(&c).get(0).as_string().unwrap())
        .collect()
}

fn ready(options: serde_json::Value) -> (LottieInteractivity, Array) {
    let (renderer, calls) = fake_renderer(38.0);
    let opts = swb::to_value(&options).unwrap();
    let mut li = LottieInteractivity::new(renderer, opts).unwrap();
    li.load(JsValue::from_str("like-button.json")).unwrap();
    li.on_ready();
    calls.set_length(0);
    (li, calls)
}

fn current_frame(li: &LottieInteractivity) -> f64 {
    let snap = li.snapshot().unwrap();
    Reflect::get(&snap, &"current_frame".into())
        .unwrap()
        .as_f64()
        .unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn non_object_renderer_is_rejected() {
    assert!(LottieInteractivity::new(JsValue::from_f64(3.0), JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn commands_before_ready_are_rejected() {
    let (renderer, _calls) = fake_renderer(38.0);
    let mut li = LottieInteractivity::new(renderer, JsValue::NULL).unwrap();
    li.load(JsValue::from_str("a.json")).unwrap();
    assert_eq!(li.state(), "loading");
    assert_eq!(li.play().unwrap().as_string().as_deref(), Some("rejected"));
}

#[wasm_bindgen_test]
fn seek_drives_renderer_and_notifies() {
    let (mut li, calls) = ready(json!({ "autoplay": false }));
    let seen = Array::new();
    let push = Function::new_with_args("n", "this.push(n)").bind(&seen);
    let id = li.subscribe(push);

    assert_eq!(li.seek(12.0).unwrap().as_string().as_deref(), Some("applied"));
    assert_eq!(li.seek(12.0).unwrap().as_string().as_deref(), Some("suppressed"));
    assert_eq!(call_names(&calls), vec!["goToAndStop"]);
    assert_eq!(current_frame(&li), 12.0);
    assert_eq!(seen.length(), 2);

    assert!(li.unsubscribe(id));
    li.seek(3.0).unwrap();
    assert_eq!(seen.length(), 2);
}

#[wasm_bindgen_test]
fn scroll_engine_seeks_on_animation_frame() {
    let (mut li, _calls) = ready(json!({ "autoplay": false }));
    let cfg = swb::to_value(&json!({
        "mode": "scroll",
        "actions": [
            { "visibility": [0.0, 0.45], "type": "stop", "frames": [0] },
            { "visibility": [0.45, 1.0], "type": "seek", "frames": [0, 38] }
        ]
    }))
    .unwrap();
    li.attach_interactivity(cfg).unwrap();
    assert!(li.has_interactivity());

    // element fully scrolled past the viewport: progress 1
    let geom = swb::to_value(&json!({
        "element": { "left": 0.0, "top": -500.0, "width": 100.0, "height": 100.0 },
        "viewport": { "left": 0.0, "top": 0.0, "width": 100.0, "height": 400.0 }
    }))
    .unwrap();
    assert!(li.scroll(geom).unwrap());
    assert!(li.animation_frame());
    assert!(!li.animation_frame());
    assert_eq!(current_frame(&li), 38.0);

    li.detach_interactivity();
    assert!(!li.has_interactivity());
    assert!(!li.animation_frame());
}

#[wasm_bindgen_test]
fn invalid_config_leaves_nothing_attached() {
    let (mut li, _calls) = ready(json!({}));
    let cfg = swb::to_value(&json!({
        "mode": "scroll",
        "actions": [
            { "visibility": [0.0, 0.6], "type": "seek", "frames": [0, 10] },
            { "visibility": [0.5, 1.0], "type": "seek", "frames": [10, 20] }
        ]
    }))
    .unwrap();
    assert!(li.attach_interactivity(cfg).is_err());
    assert!(!li.has_interactivity());
    assert!(!li.click());
}

#[wasm_bindgen_test]
fn scrubber_commits_on_release() {
    let (mut li, _calls) = ready(json!({ "autoplay": false }));
    li.scrub_input(7.4).unwrap();
    assert_eq!(li.display_frame(), 7.0);
    let committed = li.scrub_release().unwrap();
    assert_eq!(
        Reflect::get(&committed, &"drag_ended".into()).unwrap().as_bool(),
        Some(true)
    );
    assert!(li.scrub_release().unwrap().is_null());
}

fn total_frames(li: &LottieInteractivity) -> f64 {
    let snap = li.snapshot().unwrap();
    Reflect::get(&snap, &"total_frames".into())
        .unwrap()
        .as_f64()
        .unwrap()
}

#[wasm_bindgen_test]
fn frame_count_prefers_get_duration() {
    let (renderer, _calls) = fake_renderer(38.0);
    let get_duration = Function::new_with_args("inFrames", "return inFrames ? 90 : 3;");
    Reflect::set(&renderer, &"getDuration".into(), &get_duration).unwrap();
    let mut li = LottieInteractivity::new(renderer, JsValue::NULL).unwrap();
    li.load(JsValue::from_str("a.json")).unwrap();
    li.on_ready();
    assert_eq!(total_frames(&li), 90.0);

    let (fallback, _calls) = ready(json!({}));
    assert_eq!(total_frames(&fallback), 38.0);
}

#[wasm_bindgen_test]
fn seek_after_segment_resets_segments() {
    let (mut li, calls) = ready(json!({ "autoplay": false }));
    li.seek_range(45.0, 60.0, true).unwrap();
    li.seek(30.0).unwrap();
    assert_eq!(
        call_names(&calls),
        vec!["playSegments", "resetSegments", "goToAndStop"]
    );
    let reset = Array::from(&calls.get(1));
    assert_eq!(reset.get(1).as_bool(), Some(true));
}
