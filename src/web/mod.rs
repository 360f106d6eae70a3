// web/ - Browser entry points
//
// `FestivePage` wires the scheduler, fireworks, launch queue and
// countdown to the document and exposes the handful of calls page
// scripts need.

mod canvas;
mod driver;
mod layers;

pub use canvas::CanvasSurface;
pub use layers::{JsEntity, ParallaxLayers};

use std::cell::RefCell;
use std::rc::Rc;

use fastrand::Rng;
use js_sys::{Function, Object};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::fx::Fireworks;
use crate::scheduler::{Entity, Scheduler};
use crate::show::{Countdown, Salvo, WishDeck};

const CANVAS_ID: &str = "fireworks";
const LAUNCH_BUTTON_ID: &str = "launchButton";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn seeded_rng() -> Rng {
    Rng::with_seed((js_sys::Math::random() * u64::MAX as f64) as u64)
}

#[wasm_bindgen]
pub struct FestivePage {
    scheduler: Rc<RefCell<Scheduler>>,
    fireworks: Rc<RefCell<Fireworks<CanvasSurface>>>,
    salvo: Rc<RefCell<Salvo>>,
    countdown: Rc<RefCell<Option<Countdown>>>,
    on_celebrate: Rc<RefCell<Option<Function>>>,
    js_entities: Vec<(Object, Entity)>,
    wishes: WishDeck<String>,
}

#[wasm_bindgen]
impl FestivePage {
    /// Build the engine and start the frame loop. `config_json` may be
    /// a partial document; missing keys keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<FestivePage, JsValue> {
        let cfg = match config_json {
            Some(json) => EngineConfig::from_json(&json)?,
            None => EngineConfig::default(),
        };
        Ok(Self::mount(cfg)?)
    }

    pub fn launch(&self, x: f64, y: f64) -> bool {
        self.fireworks.borrow_mut().launch(x, y)
    }

    #[wasm_bindgen(js_name = launchRandom)]
    pub fn launch_random(&self) -> bool {
        self.fireworks.borrow_mut().launch_random().is_some()
    }

    /// Queue the finale volleys now, regardless of the countdown.
    pub fn celebrate(&self) {
        self.salvo.borrow_mut().celebration(js_sys::Date::now());
    }

    #[wasm_bindgen(js_name = setOnCelebrate)]
    pub fn set_on_celebrate(&self, callback: Function) {
        *self.on_celebrate.borrow_mut() = Some(callback);
    }

    /// Zero-padded [days, hours, minutes, seconds]; empty once the target passed.
    #[wasm_bindgen(js_name = countdownDigits)]
    pub fn countdown_digits(&self) -> Vec<String> {
        self.countdown
            .borrow()
            .as_ref()
            .and_then(|c| c.remaining(js_sys::Date::now()))
            .map(|r| r.digits().to_vec())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = burstCount)]
    pub fn burst_count(&self) -> usize {
        self.fireworks.borrow().burst_count()
    }

    /// Replace the wish texts shown when a gift opens.
    #[wasm_bindgen(js_name = setWishes)]
    pub fn set_wishes(&mut self, wishes: Vec<String>) {
        self.wishes = WishDeck::new(wishes, seeded_rng());
    }

    /// Next wish, never repeating until every wish has been shown.
    #[wasm_bindgen(js_name = drawWish)]
    pub fn draw_wish(&mut self) -> Option<String> {
        self.wishes.draw()
    }

    /// Register a JS object exposing `update(x, y)` with the frame loop.
    #[wasm_bindgen(js_name = register)]
    pub fn register_js(&mut self, target: Object) -> bool {
        if self.js_entities.iter().any(|(o, _)| Object::is(o, &target)) {
            return false;
        }
        let entity: Entity = Rc::new(RefCell::new(JsEntity::new(target.clone())));
        self.scheduler.borrow_mut().register(entity.clone());
        self.js_entities.push((target, entity));
        true
    }

    #[wasm_bindgen(js_name = unregister)]
    pub fn unregister_js(&mut self, target: Object) -> bool {
        let Some(i) = self.js_entities.iter().position(|(o, _)| Object::is(o, &target)) else {
            return false;
        };
        let (_, entity) = self.js_entities.remove(i);
        self.scheduler.borrow_mut().unregister(&entity)
    }
}

impl FestivePage {
    fn mount(cfg: EngineConfig) -> EngineResult<Self> {
        let window = driver::window()?;
        let document = window
            .document()
            .ok_or_else(|| EngineError::Js("no document".into()))?;
        let viewport = driver::read_viewport(&window);

        let surface = match CanvasSurface::from_id(&document, CANVAS_ID) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        };
        let fireworks = Rc::new(RefCell::new(Fireworks::new(
            surface,
            viewport,
            cfg.fireworks.clone(),
            seeded_rng(),
        )?));
        let parallax = Rc::new(RefCell::new(ParallaxLayers::new(
            &document,
            cfg.parallax.clone(),
            viewport,
        )));

        let scheduler = Rc::new(RefCell::new(Scheduler::new(viewport)));
        {
            let mut s = scheduler.borrow_mut();
            s.register(fireworks.clone());
            s.register(parallax);
        }

        let now = js_sys::Date::now();
        let salvo = Rc::new(RefCell::new(Salvo::new(cfg.salvo.clone())));
        salvo.borrow_mut().opening(now);
        let countdown = Rc::new(RefCell::new(cfg.countdown.target_ms.map(Countdown::new)));
        let on_celebrate: Rc<RefCell<Option<Function>>> = Rc::new(RefCell::new(None));

        driver::track_input(&window, &scheduler)?;

        {
            let fireworks = fireworks.clone();
            let salvo = salvo.clone();
            driver::listen(&document, "click", move |e: MouseEvent| {
                let now = js_sys::Date::now();
                let on_button = e
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(&format!("#{LAUNCH_BUTTON_ID}")).ok().flatten())
                    .is_some();
                if on_button {
                    salvo.borrow_mut().click(now);
                } else {
                    fireworks
                        .borrow_mut()
                        .launch(e.client_x() as f64, e.client_y() as f64);
                }
            })?;
        }

        {
            let scheduler = scheduler.clone();
            let fireworks = fireworks.clone();
            let salvo = salvo.clone();
            let countdown = countdown.clone();
            let on_celebrate = on_celebrate.clone();
            driver::run_loop(move |_timestamp| {
                let now = js_sys::Date::now();

                let due = countdown.borrow_mut().as_mut().is_some_and(|c| c.poll(now));
                if due {
                    salvo.borrow_mut().celebration(now);
                    // Cloned out so the callback may replace itself.
                    let callback = on_celebrate.borrow().clone();
                    if let Some(f) = callback {
                        if let Err(e) = f.call0(&JsValue::NULL) {
                            log::warn!("celebrate callback threw: {e:?}");
                        }
                    }
                }

                salvo.borrow_mut().poll(now, &mut fireworks.borrow_mut());

                let frame = scheduler.borrow_mut().frame();
                frame.run();
            })?;
        }

        log::info!("festive page mounted ({}x{})", viewport.width, viewport.height);

        Ok(Self {
            scheduler,
            fireworks,
            salvo,
            countdown,
            on_celebrate,
            js_entities: Vec::new(),
            wishes: WishDeck::new(Vec::new(), seeded_rng()),
        })
    }
}
