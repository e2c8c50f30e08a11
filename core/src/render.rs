//! Rendering collaborator interface and an in-memory label pool.
//!
//! The core never owns UI resources. It asks the renderer for a
//! [`LabelHandle`], tells it what to draw through that handle, and hands the
//! handle back when the label goes away. The renderer recycles entities.

use crate::style::{LabelColors, LabelStyle};
use crate::view::Rect;
use serde::Serialize;
use thiserror::Error;

/// Reference to one label entity inside a renderer's pool.
///
/// The generation changes every time the slot is released, so a handle kept
/// past its release no longer addresses the entity that reused the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LabelHandle {
    index: u32,
    generation: u32,
}

impl LabelHandle {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("label pool exhausted ({capacity} entities in use)")]
    PoolExhausted { capacity: usize },
}

/// Draws jump labels over the text view.
pub trait LabelRenderer {
    /// Take a free label entity from the pool.
    fn acquire(&mut self) -> Result<LabelHandle, RenderError>;

    /// Place the entity at `bounds` showing `text`, and add it to the
    /// overlay.
    fn show(&mut self, handle: LabelHandle, text: &str, bounds: Rect, style: &LabelStyle);

    /// Change the text of a visible entity, keeping its position.
    fn update(&mut self, handle: LabelHandle, text: &str, style: &LabelStyle);

    fn set_colors(&mut self, handle: LabelHandle, colors: LabelColors);

    /// Remove the entity from the overlay and return it to the pool.
    fn release(&mut self, handle: LabelHandle);
}

/// What a pooled entity currently displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelEntity {
    pub text: String,
    pub bounds: Rect,
    pub colors: LabelColors,
    pub font_size: f32,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    in_use: bool,
    entity: Option<LabelEntity>,
}

/// Fixed-capacity recyclable pool of label entities.
#[derive(Debug)]
pub struct LabelPool {
    slots: Vec<Slot>,
    free: Vec<u32>,
    capacity: usize,
}

impl LabelPool {
    /// Create a pool that hands out at most `capacity` entities at a time.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            capacity: capacity.min(u32::MAX as usize),
        }
    }

    /// A pool limited only by the handle index range.
    pub fn unbounded() -> Self {
        Self::new(u32::MAX as usize)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entities currently handed out.
    pub fn in_use(&self) -> usize {
        self.slots.iter().filter(|s| s.in_use).count()
    }

    /// Number of entities ever created.
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Entity addressed by `handle`, if the handle is still live.
    pub fn get(&self, handle: LabelHandle) -> Option<&LabelEntity> {
        self.live_slot(handle).and_then(|s| s.entity.as_ref())
    }

    /// Entities currently on the overlay.
    pub fn visible(&self) -> impl Iterator<Item = &LabelEntity> {
        self.slots
            .iter()
            .filter(|s| s.in_use)
            .filter_map(|s| s.entity.as_ref())
    }

    fn live_slot(&self, handle: LabelHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.in_use && s.generation == handle.generation)
    }

    fn live_slot_mut(&mut self, handle: LabelHandle) -> Option<&mut Slot> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|s| s.in_use && s.generation == handle.generation);
        if slot.is_none() {
            tracing::warn!(?handle, "ignoring stale label handle");
        }
        slot
    }
}

impl LabelRenderer for LabelPool {
    fn acquire(&mut self) -> Result<LabelHandle, RenderError> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.in_use = true;
            return Ok(LabelHandle::new(index, slot.generation));
        }
        if self.slots.len() >= self.capacity {
            return Err(RenderError::PoolExhausted {
                capacity: self.capacity,
            });
        }
        self.slots.push(Slot {
            generation: 0,
            in_use: true,
            entity: None,
        });
        Ok(LabelHandle::new((self.slots.len() - 1) as u32, 0))
    }

    fn show(&mut self, handle: LabelHandle, text: &str, bounds: Rect, style: &LabelStyle) {
        if let Some(slot) = self.live_slot_mut(handle) {
            slot.entity = Some(LabelEntity {
                text: text.to_string(),
                bounds,
                colors: style.colors_for(text),
                font_size: style.font_size,
            });
        }
    }

    fn update(&mut self, handle: LabelHandle, text: &str, style: &LabelStyle) {
        if let Some(entity) = self.live_slot_mut(handle).and_then(|s| s.entity.as_mut()) {
            entity.text = text.to_string();
            entity.colors = style.colors_for(text);
        }
    }

    fn set_colors(&mut self, handle: LabelHandle, colors: LabelColors) {
        if let Some(entity) = self.live_slot_mut(handle).and_then(|s| s.entity.as_mut()) {
            entity.colors = colors;
        }
    }

    fn release(&mut self, handle: LabelHandle) {
        let Some(slot) = self.live_slot_mut(handle) else {
            return;
        };
        slot.in_use = false;
        slot.entity = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
    }
}
