#![forbid(unsafe_code)]

//! Drawable components and their z-ordered registry.

use std::fmt;

use halfcell_render::Canvas;

/// Something the loop draws on every update tick.
pub trait Component {
    /// Draw onto the canvas buffer.
    fn draw(&mut self, canvas: &mut Canvas);

    /// Ordering key; lower values are drawn first.
    fn z_index(&self) -> i32 {
        0
    }
}

impl<F: FnMut(&mut Canvas)> Component for F {
    fn draw(&mut self, canvas: &mut Canvas) {
        self(canvas);
    }
}

/// Handle returned when a component is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

/// Components kept in ascending z-order; equal keys keep insertion order.
#[derive(Default)]
pub(crate) struct ComponentList {
    entries: Vec<(ComponentId, Box<dyn Component>)>,
    next_id: u64,
}

impl ComponentList {
    pub(crate) fn add(&mut self, component: Box<dyn Component>) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, component));
        id
    }

    pub(crate) fn remove(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Draw every component, lowest z-index first.
    ///
    /// The order is re-established each call since z-indices may change
    /// between ticks.
    pub(crate) fn draw_all(&mut self, canvas: &mut Canvas) {
        self.entries.sort_by_key(|(_, component)| component.z_index());
        for (_, component) in &mut self.entries {
            component.draw(canvas);
        }
    }
}
