//! Interaction component for pointer picking
//!
//! Marks an entity as a hover/click target and carries the callbacks scene
//! code registers for it. Which entities are candidates, and which one is
//! hovered, is tracked per scene by [`PickableIndex`].

use crate::ecs::EntityId;

/// Callback fired on an interaction edge
pub type InteractionCallback = Box<dyn FnMut()>;

/// How an interaction target is hit-tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickingMethod {
    /// Screen-aligned quad derived from the world matrix, under a 2D camera
    Method2D,
    /// World-space bounding box against a camera ray, under a 3D camera
    Method3D,
}

/// Component making an entity hoverable and clickable
///
/// # Examples
/// ```
/// # use scene_engine::ecs::components::{Interaction, PickingMethod};
/// let mut interaction = Interaction::new(PickingMethod::Method2D)
///     .with_on_click(|| println!("clicked"));
/// interaction.on_hover_enter();
/// assert!(interaction.is_hovered());
/// ```
pub struct Interaction {
    method: PickingMethod,
    hovered: bool,
    on_click: Option<InteractionCallback>,
    on_hover_enter: Option<InteractionCallback>,
    on_hover_exit: Option<InteractionCallback>,
}

impl Interaction {
    /// Create an interaction target; the picking method is fixed from here on
    pub fn new(method: PickingMethod) -> Self {
        Self {
            method,
            hovered: false,
            on_click: None,
            on_hover_enter: None,
            on_hover_exit: None,
        }
    }

    /// Set the click callback
    pub fn with_on_click(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_click_callback(callback);
        self
    }

    /// Set the hover-enter callback
    pub fn with_on_hover_enter(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_hover_enter_callback(callback);
        self
    }

    /// Set the hover-exit callback
    pub fn with_on_hover_exit(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_hover_exit_callback(callback);
        self
    }

    /// Replace the click callback
    pub fn set_click_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(callback));
    }

    /// Replace the hover-enter callback
    pub fn set_hover_enter_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_hover_enter = Some(Box::new(callback));
    }

    /// Replace the hover-exit callback
    pub fn set_hover_exit_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_hover_exit = Some(Box::new(callback));
    }

    /// Hit-test method
    pub fn method(&self) -> PickingMethod {
        self.method
    }

    /// Whether the pointer is currently over this target
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Write the hovered flag without firing callbacks
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Fire the click callback
    ///
    /// Fires whether or not the target is hovered; the picking system only
    /// clicks the hovered entity.
    pub fn on_click(&mut self) {
        if let Some(callback) = self.on_click.as_mut() {
            callback();
        }
    }

    /// Mark hovered, firing the callback on the not-hovered to hovered edge only
    pub fn on_hover_enter(&mut self) {
        if self.hovered {
            return;
        }
        self.hovered = true;
        if let Some(callback) = self.on_hover_enter.as_mut() {
            callback();
        }
    }

    /// Clear hovered, firing the callback on the hovered to not-hovered edge only
    pub fn on_hover_exit(&mut self) {
        if !self.hovered {
            return;
        }
        self.hovered = false;
        if let Some(callback) = self.on_hover_exit.as_mut() {
            callback();
        }
    }
}

impl std::fmt::Debug for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interaction")
            .field("method", &self.method)
            .field("hovered", &self.hovered)
            .field("on_click", &self.on_click.is_some())
            .field("on_hover_enter", &self.on_hover_enter.is_some())
            .field("on_hover_exit", &self.on_hover_exit.is_some())
            .finish()
    }
}

/// Scene-scoped registry of interaction targets
///
/// Entries stay in registration order; 2D picking walks them newest first so
/// later-registered quads sit on top. At most one entry is hovered.
#[derive(Debug, Clone, Default)]
pub struct PickableIndex {
    entries: Vec<EntityId>,
    hovered: Option<EntityId>,
}

impl PickableIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity; registering twice is a no-op
    pub fn register(&mut self, entity: EntityId) -> bool {
        if self.entries.contains(&entity) {
            return false;
        }
        self.entries.push(entity);
        true
    }

    /// Remove an entity, returning whether it was present
    ///
    /// Clears the hovered slot when it pointed at `entity`. Firing the exit
    /// callback is up to the caller, which owns the component.
    pub fn deregister(&mut self, entity: EntityId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| *e != entity);
        if self.hovered == Some(entity) {
            self.hovered = None;
        }
        self.entries.len() != before
    }

    /// Whether an entity is registered
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entries.contains(&entity)
    }

    /// Registered entities in registration order
    pub fn entries(&self) -> &[EntityId] {
        &self.entries
    }

    /// Currently hovered entity
    pub fn hovered(&self) -> Option<EntityId> {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, entity: Option<EntityId>) {
        self.hovered = entity;
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and the hovered slot
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn test_hover_callbacks_fire_on_edges_only() {
        let (enters, on_enter) = counter();
        let (exits, on_exit) = counter();
        let mut interaction = Interaction::new(PickingMethod::Method3D)
            .with_on_hover_enter(on_enter)
            .with_on_hover_exit(on_exit);

        interaction.on_hover_exit();
        assert_eq!(exits.get(), 0);

        interaction.on_hover_enter();
        interaction.on_hover_enter();
        assert_eq!(enters.get(), 1);
        assert!(interaction.is_hovered());

        interaction.on_hover_exit();
        interaction.on_hover_exit();
        assert_eq!(exits.get(), 1);
        assert!(!interaction.is_hovered());
    }

    #[test]
    fn test_click_fires_regardless_of_hover() {
        let (clicks, on_click) = counter();
        let mut interaction = Interaction::new(PickingMethod::Method2D).with_on_click(on_click);

        interaction.on_click();
        interaction.on_hover_enter();
        interaction.on_click();
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn test_set_hovered_is_silent() {
        let (enters, on_enter) = counter();
        let mut interaction = Interaction::new(PickingMethod::Method2D).with_on_hover_enter(on_enter);

        interaction.set_hovered(true);
        interaction.on_hover_enter();
        assert_eq!(enters.get(), 0);
        assert!(interaction.is_hovered());
    }

    #[test]
    fn test_missing_callbacks_are_noops() {
        let mut interaction = Interaction::new(PickingMethod::Method2D);
        interaction.on_click();
        interaction.on_hover_enter();
        interaction.on_hover_exit();
        assert_eq!(interaction.method(), PickingMethod::Method2D);
    }

    #[test]
    fn test_index_registration() {
        let mut keys = slotmap::SlotMap::<EntityId, ()>::with_key();
        let a = keys.insert(());
        let b = keys.insert(());

        let mut index = PickableIndex::new();
        assert!(index.register(a));
        assert!(!index.register(a));
        assert!(index.register(b));
        assert_eq!(index.entries(), &[a, b]);

        index.set_hovered(Some(b));
        assert!(index.deregister(b));
        assert_eq!(index.hovered(), None);
        assert!(!index.deregister(b));
        assert_eq!(index.len(), 1);
    }
}
