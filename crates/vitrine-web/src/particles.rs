//! Particle background drawn on a 2D canvas

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use vitrine_core::effects::{Bounds, ParticleField};
use vitrine_core::{SiteConfig, VitrineError};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::constants::PARTICLE_CANVAS_SELECTOR;

struct ParticleLoop {
    field: ParticleField,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// `r, g, b` triple
    color: String,
    running: bool,
    frame: Option<AnimationFrame>,
}

/// Animated particle layer; the loop stops when this is dropped
pub struct ParticleCanvas {
    state: Rc<RefCell<ParticleLoop>>,
    _resize: EventListener,
}

fn canvas_bounds(canvas: &HtmlCanvasElement) -> Bounds {
    Bounds::new(f64::from(canvas.client_width()), f64::from(canvas.client_height()))
}

fn fit_canvas(canvas: &HtmlCanvasElement) -> Bounds {
    let bounds = canvas_bounds(canvas);
    canvas.set_width(bounds.width as u32);
    canvas.set_height(bounds.height as u32);
    bounds
}

impl ParticleCanvas {
    pub fn new(window: &Window, document: &Document, config: &SiteConfig) -> Result<Self, VitrineError> {
        let canvas = document
            .query_selector(PARTICLE_CANVAS_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or(VitrineError::MissingElement("particle canvas"))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| VitrineError::Dom(format!("canvas context: {e:?}")))?
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| VitrineError::Dom("2d context unavailable".to_string()))?;

        let bounds = fit_canvas(&canvas);
        let mut rng = SmallRng::from_entropy();
        let field = ParticleField::new(&config.particles, bounds, &mut rng);
        log::info!(
            "particles: {} on {}x{}",
            field.particles().len(),
            bounds.width,
            bounds.height
        );

        let state = Rc::new(RefCell::new(ParticleLoop {
            field,
            canvas,
            ctx,
            color: config.particles.color.clone(),
            running: true,
            frame: None,
        }));

        let weak = Rc::downgrade(&state);
        let resize = EventListener::new(window, "resize", move |_| {
            if let Some(state) = weak.upgrade() {
                let mut state = state.borrow_mut();
                let bounds = fit_canvas(&state.canvas);
                state.field.resize(bounds);
            }
        });

        schedule(&state);
        Ok(Self { state, _resize: resize })
    }

    pub fn stop(&self) {
        let mut state = self.state.borrow_mut();
        state.running = false;
        state.frame.take();
    }
}

fn schedule(state: &Rc<RefCell<ParticleLoop>>) {
    let weak: Weak<RefCell<ParticleLoop>> = Rc::downgrade(state);
    let handle = request_animation_frame(move |_| {
        if let Some(state) = weak.upgrade() {
            tick(&state);
        }
    });
    state.borrow_mut().frame = Some(handle);
}

fn tick(state: &Rc<RefCell<ParticleLoop>>) {
    {
        let mut guard = state.borrow_mut();
        guard.frame.take();
        if !guard.running {
            return;
        }
        guard.field.step();
        draw(&guard);
    }
    schedule(state);
}

fn draw(state: &ParticleLoop) {
    let ctx = &state.ctx;
    let bounds = state.field.bounds();
    let particles = state.field.particles();
    ctx.clear_rect(0.0, 0.0, bounds.width, bounds.height);

    ctx.set_line_width(1.0);
    for link in state.field.links() {
        let (a, b) = (&particles[link.a], &particles[link.b]);
        ctx.set_stroke_style_str(&format!("rgba({}, {:.3})", state.color, link.alpha));
        ctx.begin_path();
        ctx.move_to(a.position.x, a.position.y);
        ctx.line_to(b.position.x, b.position.y);
        ctx.stroke();
    }

    for p in particles {
        ctx.set_fill_style_str(&format!("rgba({}, {:.3})", state.color, p.opacity));
        ctx.begin_path();
        if ctx.arc(p.position.x, p.position.y, p.size, 0.0, TAU).is_ok() {
            ctx.fill();
        }
    }
}
