use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use catalog::named::southern_cross;
use catalog::{CatalogError, ChunkedParser, LoaderConfig, StarRecord};
use gpu::{
    ContextLifecycle, ContextRegistry, ContextState, Diagnostics, DragControls, FallbackReason,
    PointerKind,
};
use runtime::{Frame, RenderTicker};
use starfield::{GlobeConfig, PointField, PointMaterial, Projector};

mod wgpu;
use wgpu::{StarContext, init_stars_from_canvas_id, render_stars, resize_stars, set_star_field};

/// Fixed timestep; the browser drives ticks from requestAnimationFrame.
const DT_S: f64 = 1.0 / 60.0;

/// Parser batches consumed between yields back to the event loop.
const YIELD_EVERY_BATCHES: usize = 5;

/// One mounted globe per wasm instance. The host loads a separate module
/// instance per canvas, so the registry sees one id per instance plus the
/// stale ids left behind by re-inits on the same instance.
pub struct ViewerState {
    pub config: GlobeConfig,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub wgpu: Option<StarContext>,
    pub ticker: RenderTicker,
    pub lifecycle: ContextLifecycle,
    pub registry: ContextRegistry,
    pub next_context_id: u64,
    pub context_id: Option<u64>,
    pub controls: DragControls,
    pub diagnostics: Diagnostics,
    pub field: Option<PointField>,
    pub material: PointMaterial,
    pub ready_cb: Option<js_sys::Function>,
    pub progress_cb: Option<js_sys::Function>,
}

thread_local! {
    static STATE: RefCell<ViewerState> = RefCell::new({
        let config = GlobeConfig::night();
        ViewerState {
            config,
            canvas_width: 1280.0,
            canvas_height: 720.0,
            wgpu: None,
            ticker: RenderTicker::new(DT_S),
            lifecycle: ContextLifecycle::default(),
            registry: ContextRegistry::default(),
            next_context_id: 1,
            context_id: None,
            controls: DragControls::new(config.rotation_speed),
            diagnostics: Diagnostics::new(),
            field: None,
            material: PointMaterial::from_config(&config),
            ready_cb: None,
            progress_cb: None,
        }
    });
}

fn console_log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn vec3_sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn vec3_mul(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn vec3_dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn vec3_cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn vec3_normalize(a: [f64; 3]) -> [f64; 3] {
    let n = vec3_dot(a, a).sqrt();
    if n <= 0.0 { [0.0, 0.0, 0.0] } else { vec3_mul(a, 1.0 / n) }
}

fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    // Column-major matrix multiply: c = a * b
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> [[f32; 4]; 4] {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    // Column-major (WGSL) perspective matrix, RH, depth range [0, 1].
    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

fn mat4_look_at_rh(eye: [f64; 3], target: [f64; 3], up: [f64; 3]) -> [[f32; 4]; 4] {
    let f = vec3_normalize(vec3_sub(target, eye));
    let s = vec3_normalize(vec3_cross(f, up));
    let u = vec3_cross(s, f);

    let ex = -vec3_dot(s, eye);
    let ey = -vec3_dot(u, eye);
    let ez = vec3_dot(f, eye);

    // Column-major (WGSL) view matrix.
    [
        [s[0] as f32, u[0] as f32, (-f[0]) as f32, 0.0],
        [s[1] as f32, u[1] as f32, (-f[1]) as f32, 0.0],
        [s[2] as f32, u[2] as f32, (-f[2]) as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

/// Viewer-centered sky camera: the eye sits at the origin inside the star
/// sphere and looks along the drag-plus-spin direction.
fn sky_view_proj(
    yaw_rad: f64,
    pitch_rad: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> [[f32; 4]; 4] {
    let aspect = if canvas_height <= 0.0 {
        1.0
    } else {
        (canvas_width / canvas_height).max(1e-6)
    };
    let dir = [
        pitch_rad.cos() * yaw_rad.cos(),
        pitch_rad.sin(),
        pitch_rad.cos() * yaw_rad.sin(),
    ];
    let view = mat4_look_at_rh([0.0, 0.0, 0.0], dir, [0.0, 1.0, 0.0]);
    let proj = mat4_perspective_rh_z0(60f64.to_radians(), aspect, 0.1, 1000.0);
    mat4_mul(proj, view)
}

fn fire_ready() {
    let cb = STATE.with(|state| {
        let mut s = state.borrow_mut();
        if s.diagnostics.notify_ready() {
            s.ready_cb.clone()
        } else {
            None
        }
    });
    if let Some(cb) = cb {
        let _ = cb.call0(&JsValue::NULL);
    }
}

fn enter_fallback(reason: FallbackReason) {
    console_log(&format!("star globe fallback: {}", reason.label()));
    STATE.with(|state| state.borrow_mut().diagnostics.enter_fallback(reason));
    fire_ready();
}

fn report_progress(pct: f64) {
    let cb = STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.diagnostics.set_progress(pct);
        let pct = s.diagnostics.progress_pct();
        s.progress_cb.clone().map(|cb| (cb, pct))
    });
    if let Some((cb, pct)) = cb {
        let _ = cb.call1(&JsValue::NULL, &JsValue::from_f64(pct as f64));
    }
}

/// Ready fires once the context is live and the field is uploaded; fallback
/// paths fire it through `enter_fallback` instead.
fn fire_ready_if_presentable() {
    let presentable = STATE.with(|state| {
        let s = state.borrow();
        s.lifecycle.is_live() && s.field.is_some()
    });
    if presentable {
        fire_ready();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Selects the variant before init. Accepts "night" or "paper".
#[wasm_bindgen]
pub fn configure(variant: &str) {
    let config = match variant {
        "paper" => GlobeConfig::paper(),
        _ => GlobeConfig::night(),
    };
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.config = config;
        s.material = PointMaterial::from_config(&config);
        s.controls = DragControls::new(config.rotation_speed);
        s.controls.set_enabled(config.interactive);
        let (w, h) = (s.canvas_width, s.canvas_height);
        s.controls.set_canvas_size(w, h);
    });
}

#[wasm_bindgen]
pub fn set_ready_callback(cb: js_sys::Function) {
    STATE.with(|state| state.borrow_mut().ready_cb = Some(cb));
}

#[wasm_bindgen]
pub fn set_progress_callback(cb: js_sys::Function) {
    STATE.with(|state| state.borrow_mut().progress_cb = Some(cb));
}

#[wasm_bindgen]
pub fn init_context(canvas_id: String) {
    spawn_local(async move {
        if let Err(err) = init_context_inner(&canvas_id).await {
            console_log(&format!("context init error: {err:?}"));
            enter_fallback(FallbackReason::ContextUnavailable);
        }
    });
}

async fn init_context_inner(canvas_id: &str) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.lifecycle
            .begin_create()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let id = s.next_context_id;
        s.next_context_id += 1;
        let evicted = s.registry.acquire(id);
        if let Some(old) = s.context_id
            && evicted.contains(&old)
        {
            // Our previous context lost its slot; drop its resources now.
            s.wgpu = None;
        }
        s.context_id = Some(id);
        Ok::<(), JsValue>(())
    })?;

    let ctx = init_stars_from_canvas_id(canvas_id).await?;

    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.wgpu = Some(ctx);
        s.lifecycle
            .mark_live()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        if let Some(field) = s.field.take() {
            // Catalog finished before the context did; upload now.
            let material = s.material;
            if let Some(ctx) = &mut s.wgpu {
                set_star_field(ctx, &field, &material);
            }
            s.field = Some(field);
        }
        Ok::<(), JsValue>(())
    })?;

    fire_ready_if_presentable();
    Ok(())
}

#[wasm_bindgen]
pub fn load_catalog(url: String) {
    spawn_local(async move {
        let text = match fetch_catalog(&url).await {
            Ok(text) => text,
            Err(err) => {
                console_log(&err.to_string());
                enter_fallback(FallbackReason::NoStars);
                return;
            }
        };
        load_from_text(text).await;
    });
}

async fn fetch_catalog(url: &str) -> Result<String, CatalogError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| CatalogError::Fetch(e.to_string()))?;
    resp.text()
        .await
        .map_err(|e| CatalogError::Fetch(e.to_string()))
}

async fn load_from_text(text: String) {
    let loader = LoaderConfig::default();
    let mut records = Vec::new();

    let mut parser = ChunkedParser::new(&text, loader.range, loader.chunk_rows);
    let mut batches = 0usize;
    while let Some(batch) = parser.next() {
        report_progress(batch.progress_pct as f64);
        records.extend(batch.records);
        batches += 1;
        // Yield so a large catalog cannot freeze the page mid-load.
        if batches % YIELD_EVERY_BATCHES == 0 {
            TimeoutFuture::new(0).await;
        }
    }
    drop(parser);

    let records = with_highlights(records);
    if records.is_empty() {
        enter_fallback(FallbackReason::NoStars);
        return;
    }
    report_progress(100.0);

    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let projector = Projector::new(&s.config, loader.range);
        let mut rng = rand::rng();
        let points: Vec<_> = records
            .iter()
            .map(|r| projector.project(r, &mut rng))
            .collect();
        let field = PointField::pack(&points);
        let material = s.material;
        if let Some(ctx) = &mut s.wgpu {
            set_star_field(ctx, &field, &material);
        }
        s.field = Some(field);
    });

    fire_ready_if_presentable();
}

/// The highlight stars keep the globe alive even when every catalog row was
/// invalid; fallback is reserved for a failed fetch.
fn with_highlights(mut records: Vec<StarRecord>) -> Vec<StarRecord> {
    records.extend(southern_cross());
    records
}

enum TickOutcome {
    Skipped,
    Rendered,
    GraceExpired,
    RenderFailed,
}

/// One animation frame. Safe to keep calling after pause or disposal.
#[wasm_bindgen]
pub fn tick() {
    let outcome = STATE.with(|state| {
        let mut s = state.borrow_mut();
        if s.diagnostics.should_fallback() {
            return TickOutcome::Skipped;
        }
        let Some(frame) = s.ticker.tick() else {
            return TickOutcome::Skipped;
        };

        s.controls.update(frame.dt_s);

        match s.lifecycle.state() {
            ContextState::Lost | ContextState::Restoring => {
                if s.lifecycle.grace_expired(&frame) {
                    TickOutcome::GraceExpired
                } else {
                    TickOutcome::Skipped
                }
            }
            ContextState::Live => {
                let view_proj = sky_view_proj(
                    s.controls.yaw(),
                    s.controls.pitch(),
                    s.canvas_width,
                    s.canvas_height,
                );
                match &s.wgpu {
                    Some(ctx) => match render_stars(ctx, view_proj) {
                        Ok(()) => TickOutcome::Rendered,
                        Err(err) => {
                            console_log(&format!("render error: {err:?}"));
                            TickOutcome::RenderFailed
                        }
                    },
                    None => TickOutcome::Skipped,
                }
            }
            _ => TickOutcome::Skipped,
        }
    });

    match outcome {
        TickOutcome::GraceExpired => enter_fallback(FallbackReason::LossGraceExpired),
        TickOutcome::RenderFailed => enter_fallback(FallbackReason::RenderFailed),
        TickOutcome::Skipped | TickOutcome::Rendered => {}
    }
}

/// Returns whether the gesture was accepted (touches in the scroll strip are
/// not, so the page keeps scrolling).
#[wasm_bindgen]
pub fn pointer_down(x_px: f64, y_px: f64, is_touch: bool) -> bool {
    STATE.with(|state| {
        let kind = if is_touch {
            PointerKind::Touch
        } else {
            PointerKind::Mouse
        };
        state.borrow_mut().controls.on_pointer_down([x_px, y_px], kind)
    })
}

#[wasm_bindgen]
pub fn pointer_move(x_px: f64, y_px: f64) {
    STATE.with(|state| state.borrow_mut().controls.on_pointer_move([x_px, y_px]));
}

#[wasm_bindgen]
pub fn pointer_up() {
    STATE.with(|state| state.borrow_mut().controls.on_pointer_up());
}

#[wasm_bindgen]
pub fn context_lost() {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let now = Frame::new(s.ticker.frame_index(), DT_S);
        if let Err(err) = s.lifecycle.mark_lost(&now) {
            console_log(&format!("context loss ignored: {err}"));
        }
        // Surface and buffers are gone with the context.
        s.wgpu = None;
    });
    console_log("graphics context lost; awaiting restore");
}

#[wasm_bindgen]
pub fn context_restored(canvas_id: String) {
    let accepted = STATE.with(|state| {
        let mut s = state.borrow_mut();
        match s.lifecycle.begin_restore() {
            Ok(()) => true,
            Err(err) => {
                console_log(&format!("restore ignored: {err}"));
                false
            }
        }
    });
    if !accepted {
        return;
    }

    spawn_local(async move {
        match init_stars_from_canvas_id(&canvas_id).await {
            Ok(ctx) => {
                STATE.with(|state| {
                    let mut s = state.borrow_mut();
                    s.wgpu = Some(ctx);
                    if let (Some(field), material) = (s.field.take(), s.material) {
                        if let Some(ctx) = &mut s.wgpu {
                            set_star_field(ctx, &field, &material);
                        }
                        s.field = Some(field);
                    }
                    if let Err(err) = s.lifecycle.mark_live() {
                        console_log(&format!("restore finish ignored: {err}"));
                    }
                });
                console_log("graphics context restored");
            }
            Err(err) => {
                console_log(&format!("context restore error: {err:?}"));
                enter_fallback(FallbackReason::ContextUnavailable);
            }
        }
    });
}

/// Document visibility. Hiding pauses the loop; showing resumes it and runs
/// a health check on the context.
#[wasm_bindgen]
pub fn set_visible(visible: bool) {
    let expired = STATE.with(|state| {
        let mut s = state.borrow_mut();
        if visible {
            s.ticker.resume();
            let now = Frame::new(s.ticker.frame_index(), DT_S);
            s.lifecycle.grace_expired(&now)
        } else {
            s.ticker.pause();
            false
        }
    });
    if expired {
        enter_fallback(FallbackReason::LossGraceExpired);
    }
}

#[wasm_bindgen]
pub fn resize(width: f64, height: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.canvas_width = width;
        s.canvas_height = height;
        s.controls.set_canvas_size(width, height);
        if let Some(ctx) = &mut s.wgpu {
            resize_stars(ctx, width as u32, height as u32);
        }
    });
}

#[wasm_bindgen]
pub fn dispose() {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.ticker.dispose();
        s.lifecycle.dispose();
        if let Some(id) = s.context_id.take() {
            s.registry.release(id);
        }
        s.wgpu = None;
        s.field = None;
    });
}

#[wasm_bindgen]
pub fn load_progress() -> u8 {
    STATE.with(|state| state.borrow().diagnostics.progress_pct())
}

#[wasm_bindgen]
pub fn in_fallback() -> bool {
    STATE.with(|state| state.borrow().diagnostics.should_fallback())
}

#[wasm_bindgen]
pub fn fallback_reason() -> Option<String> {
    STATE.with(|state| {
        state
            .borrow()
            .diagnostics
            .fallback_reason()
            .map(|r| r.label().to_string())
    })
}
