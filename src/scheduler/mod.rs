// scheduler/ - Central tick driver
//
// One loop drives every animated entity. Entities never own timers;
// they get `update` once per displayed frame with the raw pointer
// position and `resize` whenever the viewport changes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::surface::Viewport;

/// Pointer coordinate before any pointer input arrives.
pub const POINTER_SENTINEL: f64 = -10_000.0;

pub trait Updatable {
    fn update(&mut self, pointer_x: f64, pointer_y: f64);

    fn resize(&mut self, _viewport: Viewport) {}
}

/// Shared handle to a registered entity. Identity is the allocation.
pub type Entity = Rc<RefCell<dyn Updatable>>;

pub struct Scheduler {
    entities: Vec<Entity>,
    pointer_x: f64,
    pointer_y: f64,
    viewport: Viewport,
    // Entities that were busy when the viewport last changed.
    stale: Vec<Entity>,
    frames: u64,
}

impl Scheduler {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            entities: Vec::new(),
            pointer_x: POINTER_SENTINEL,
            pointer_y: POINTER_SENTINEL,
            viewport,
            stale: Vec::new(),
            frames: 0,
        }
    }

    /// Add an entity. Returns false if it was already registered.
    pub fn register(&mut self, entity: Entity) -> bool {
        if self.is_registered(&entity) {
            return false;
        }
        self.entities.push(entity);
        log::debug!("scheduler: registered entity ({} active)", self.entities.len());
        true
    }

    /// Remove an entity. Returns false if it was not registered.
    pub fn unregister(&mut self, entity: &Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| !same_entity(e, entity));
        self.stale.retain(|e| !same_entity(e, entity));
        let removed = self.entities.len() != before;
        if removed {
            log::debug!("scheduler: unregistered entity ({} active)", self.entities.len());
        }
        removed
    }

    pub fn is_registered(&self, entity: &Entity) -> bool {
        self.entities.iter().any(|e| same_entity(e, entity))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer_x = x;
        self.pointer_y = y;
    }

    pub fn pointer(&self) -> (f64, f64) {
        (self.pointer_x, self.pointer_y)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Store the new viewport and forward it to every entity.
    ///
    /// An entity that is borrowed right now gets the latest viewport at
    /// the start of the next frame instead.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stale.clear();
        for entity in &self.entities {
            match entity.try_borrow_mut() {
                Ok(mut e) => e.resize(viewport),
                Err(_) => {
                    log::warn!("scheduler: entity busy during resize, deferred");
                    self.stale.push(entity.clone());
                }
            }
        }
    }

    fn resize_stale(&mut self) {
        let viewport = self.viewport;
        self.stale.retain(|entity| match entity.try_borrow_mut() {
            Ok(mut e) => {
                e.resize(viewport);
                false
            }
            Err(_) => true,
        });
    }

    /// Snapshot the entity set for one frame.
    ///
    /// Running the frame does not borrow the scheduler, so entities may
    /// register or unregister others; changes apply from the next frame.
    pub fn frame(&mut self) -> Frame {
        self.resize_stale();
        self.frames += 1;
        Frame {
            entities: self.entities.clone(),
            pointer_x: self.pointer_x,
            pointer_y: self.pointer_y,
        }
    }

    pub fn tick(&mut self) {
        self.frame().run();
    }
}

pub struct Frame {
    entities: Vec<Entity>,
    pointer_x: f64,
    pointer_y: f64,
}

impl Frame {
    pub fn run(self) {
        for entity in &self.entities {
            match entity.try_borrow_mut() {
                Ok(mut e) => e.update(self.pointer_x, self.pointer_y),
                Err(_) => log::warn!("scheduler: entity re-entered during tick, skipped"),
            }
        }
    }
}

fn same_entity(a: &Entity, b: &Entity) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
