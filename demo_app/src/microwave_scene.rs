//! Microwave oven UI on a 2D camera
//!
//! The oven body holds an interior with a light, a door window hinged on its
//! left edge, and a display with the timer and a 4×3 keypad. Keypad buttons
//! and the door window are clickable; keyboard shortcuts mirror them:
//! digits, Enter (start), Backspace (stop), Delete (clear), Space (door),
//! X (break) and R (repair).

use std::collections::HashMap;

use scene_engine::foundation::math::utils;
use scene_engine::prelude::*;

use crate::error::DemoError;
use crate::microwave::{DoorState, Microwave};
use crate::panel::{Color, Panel};
use crate::script::screen_position_of;

/// Door yaw when fully open, in degrees
pub const DOOR_OPEN_ANGLE: f32 = -180.0;
/// Seconds the door takes to swing
pub const DOOR_ANIMATION_SECONDS: f32 = 0.5;

const OVEN_SIZE: (f32, f32) = (400.0, 250.0);
const OVEN_PADDING: f32 = 20.0;
const DISPLAY_PADDING: f32 = 10.0;
const KEYPAD_ROWS: usize = 4;
const KEYPAD_COLUMNS: usize = 3;
const KEY_GAP: f32 = 0.02;

const LIGHT_ALPHA: f32 = 0.7;
const LIGHT_FADE_SPEED: f32 = 5.0;

const KEY_IDLE: Color = [0.0, 0.0, 0.0, 1.0];
const KEY_HOVERED: Color = [0.5, 0.5, 0.5, 1.0];

/// A keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadKey {
    /// Number key 0-9
    Digit(u8),
    /// Begin cooking
    Start,
    /// Pause, or clear when not cooking
    Stop,
}

impl KeypadKey {
    /// Buttons in row-major order, top-left first
    pub const LAYOUT: [Self; KEYPAD_ROWS * KEYPAD_COLUMNS] = [
        Self::Digit(1),
        Self::Digit(2),
        Self::Digit(3),
        Self::Digit(4),
        Self::Digit(5),
        Self::Digit(6),
        Self::Digit(7),
        Self::Digit(8),
        Self::Digit(9),
        Self::Start,
        Self::Digit(0),
        Self::Stop,
    ];

    /// Text printed on the button
    pub fn label(self) -> String {
        match self {
            Self::Digit(digit) => digit.to_string(),
            Self::Start => "START".to_string(),
            Self::Stop => "STOP".to_string(),
        }
    }
}

/// Handles to the entities the scene drives
#[derive(Debug, Clone)]
pub struct MicrowaveEntities {
    /// Active 2D camera
    pub camera: EntityId,
    /// Oven body, parent of everything else
    pub body: EntityId,
    /// Interior light panel
    pub light: EntityId,
    /// Hinge the door window rotates about
    pub window_pivot: EntityId,
    /// Clickable door window
    pub window: EntityId,
    /// Timer display panel
    pub timer: EntityId,
    /// Keypad buttons in layout order
    pub keys: Vec<(EntityId, KeypadKey)>,
}

impl MicrowaveEntities {
    /// Entity of a keypad button
    pub fn key_entity(&self, key: KeypadKey) -> Option<EntityId> {
        self.keys.iter().find(|(_, k)| *k == key).map(|(id, _)| *id)
    }
}

fn add_panel(tree: &mut EntityTree, parent: EntityId, name: &str, position: Vec3, scale: Vec3, color: Color) -> Option<EntityId> {
    let id = tree.add_child(parent, name, SpatialNode::from_position(position).with_scale(scale))?;
    tree.attach_behaviour(id, Panel::new(color));
    Some(id)
}

/// Build the oven and its 2D camera into `scene`
///
/// Sizes below the body are fractions of the parent, so the whole oven
/// scales with the body node.
pub fn build_microwave(scene: &mut Scene) -> Option<MicrowaveEntities> {
    let viewport = scene.viewport();
    let camera = scene.spawn_camera_2d("MainCamera", Vec3::zeros());
    scene.set_active_camera(camera);

    let (oven_w, oven_h) = OVEN_SIZE;
    let pad_x = OVEN_PADDING / oven_w;
    let pad_y = OVEN_PADDING / oven_h;
    let separation = OVEN_PADDING / oven_w;
    let available = 1.0 - 2.0 * pad_x - separation;
    let window_w = available * 0.7;
    let display_w = available * 0.3;
    let inner_h = 1.0 - 2.0 * pad_y;
    let hinge = Vec3::new(-0.5 + pad_x, -0.5 + pad_y + inner_h / 2.0, 0.0);

    let tree = scene.tree_mut();
    let background = tree.spawn(
        "Background",
        SpatialNode::from_position(Vec3::new(viewport.x / 2.0, viewport.y / 2.0, 0.0))
            .with_scale(Vec3::new(viewport.x, viewport.y, 1.0)),
    );
    tree.attach_behaviour(background, Panel::new([0.9, 0.85, 0.75, 1.0]));

    let body = tree.spawn(
        "MicrowaveBody",
        SpatialNode::from_position(Vec3::new(viewport.x / 2.0, viewport.y / 2.0 - 100.0, 0.0))
            .with_scale(Vec3::new(oven_w, oven_h, 1.0)),
    );
    tree.attach_behaviour(body, Panel::new([0.3, 0.3, 0.3, 1.0]));

    let interior = add_panel(
        tree,
        body,
        "InteriorContainer",
        hinge + Vec3::new(window_w / 2.0, 0.0, 0.0),
        Vec3::new(window_w, inner_h, 1.0),
        [0.8, 0.8, 0.8, 1.0],
    )?;
    let light = add_panel(tree, interior, "LightContainer", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), [1.0, 1.0, 0.0, 0.0])?;
    add_panel(tree, interior, "FoodContainer", Vec3::new(0.0, -0.2, 0.0), Vec3::new(0.5, 0.4, 1.0), [0.6, 0.4, 0.2, 1.0])?;

    let window_pivot = tree.add_child(body, "WindowPivot", SpatialNode::from_position(hinge))?;
    let window = add_panel(
        tree,
        window_pivot,
        "WindowActual",
        Vec3::new(window_w / 2.0, 0.0, 0.0),
        Vec3::new(window_w, inner_h, 1.0),
        [0.6, 0.8, 1.0, 0.3],
    )?;
    tree.attach(
        window,
        Interaction::new(PickingMethod::Method2D)
            .with_on_hover_enter(|| log::debug!("Hovering over door"))
            .with_on_hover_exit(|| log::debug!("Left door")),
    );

    let display_x = hinge.x + window_w + separation + display_w / 2.0;
    let display = add_panel(
        tree,
        body,
        "DisplayContainer",
        Vec3::new(display_x, hinge.y, 0.0),
        Vec3::new(display_w, inner_h, 1.0),
        [0.1, 0.1, 0.1, 1.0],
    )?;

    let display_pad_x = DISPLAY_PADDING / (display_w * oven_w);
    let display_pad_y = DISPLAY_PADDING / (inner_h * oven_h);
    let usable_w = 1.0 - 2.0 * display_pad_x;
    let usable_h = 1.0 - 2.0 * display_pad_y;

    let timer_h = 0.2;
    let timer = add_panel(
        tree,
        display,
        "TimerContainer",
        Vec3::new(0.0, usable_h / 2.0 - timer_h / 2.0 - display_pad_y / 2.0, 0.0),
        Vec3::new(usable_w, timer_h, 1.0),
        [0.0, 0.2, 0.0, 1.0],
    )?;

    let keypad_h = 0.5;
    let keypad = add_panel(
        tree,
        display,
        "KeyboardLayoutContainer",
        Vec3::new(0.0, -usable_h / 2.0 + keypad_h / 2.0 + display_pad_y / 2.0, 0.0),
        Vec3::new(usable_w, keypad_h, 1.0),
        [0.2, 0.2, 0.2, 1.0],
    )?;

    let columns = KEYPAD_COLUMNS as f32;
    let rows = KEYPAD_ROWS as f32;
    let key_w = (1.0 - (columns - 1.0) * KEY_GAP) / columns;
    let key_h = (1.0 - (rows - 1.0) * KEY_GAP) / rows;

    let mut keys = Vec::with_capacity(KeypadKey::LAYOUT.len());
    for (index, key) in KeypadKey::LAYOUT.iter().copied().enumerate() {
        let row = (index / KEYPAD_COLUMNS) as f32;
        let col = (index % KEYPAD_COLUMNS) as f32;
        let position = Vec3::new(
            -0.5 + col * (key_w + KEY_GAP) + key_w / 2.0,
            0.5 - row * (key_h + KEY_GAP) - key_h / 2.0,
            0.0,
        );
        let name = format!("Keypad_{}Button", key.label());
        let id = add_panel(tree, keypad, &name, position, Vec3::new(key_w, key_h, 1.0), KEY_IDLE)?;
        tree.attach(id, Interaction::new(PickingMethod::Method2D));
        keys.push((id, key));
    }

    Some(MicrowaveEntities {
        camera,
        body,
        light,
        window_pivot,
        window,
        timer,
        keys,
    })
}

/// Pointer positions of the clickable parts with the door closed
#[derive(Debug, Clone)]
pub struct ScreenTargets {
    /// Center of each keypad button
    pub keys: HashMap<KeypadKey, Vec2>,
    /// Center of the door window
    pub window: Vec2,
}

impl ScreenTargets {
    /// Lay the oven out in a scratch scene and read back where things land
    pub fn compute(config: &EngineConfig) -> Result<Self, DemoError> {
        let mut scene = Scene::new("layout", config);
        let entities = build_microwave(&mut scene).ok_or(DemoError::Layout)?;

        let mut keys = HashMap::new();
        for (id, key) in &entities.keys {
            let at = screen_position_of(&mut scene, *id).ok_or_else(|| DemoError::MissingKey(key.label()))?;
            keys.insert(*key, at);
        }
        let window = screen_position_of(&mut scene, entities.window).ok_or(DemoError::Layout)?;
        Ok(Self { keys, window })
    }

    /// Center of one keypad button
    pub fn key(&self, key: KeypadKey) -> Result<Vec2, DemoError> {
        self.keys.get(&key).copied().ok_or_else(|| DemoError::MissingKey(key.label()))
    }
}

/// Application driving the oven scene from pointer and keyboard input
#[derive(Debug, Default)]
pub struct MicrowaveApp {
    microwave: Microwave,
    entities: Option<MicrowaveEntities>,
    buttons: HashMap<EntityId, KeypadKey>,
    tick_accumulator: f32,
    door_target_angle: f32,
    door_animation_time: f32,
    display_text: String,
}

impl MicrowaveApp {
    /// App with an idle oven; the scene is built on initialize
    pub fn new() -> Self {
        Self::default()
    }

    /// Oven state machine
    pub fn microwave(&self) -> &Microwave {
        &self.microwave
    }

    /// Scene handles, once initialized
    pub fn entities(&self) -> Option<&MicrowaveEntities> {
        self.entities.as_ref()
    }

    /// Last text pushed to the timer display
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Yaw the door is animating toward
    pub fn door_target_angle(&self) -> f32 {
        self.door_target_angle
    }

    /// Act on a keypad button
    pub fn press(&mut self, key: KeypadKey) {
        match key {
            KeypadKey::Digit(digit) => self.microwave.input_number(digit),
            KeypadKey::Start => {
                if !self.microwave.start_cooking() {
                    log::debug!("Cannot start cooking in state {}", self.microwave.state());
                }
            }
            KeypadKey::Stop => self.microwave.stop_cooking(),
        }
        self.refresh_display();
    }

    /// Swing the door the other way and restart its animation
    pub fn toggle_door(&mut self) {
        self.door_target_angle = match self.microwave.toggle_door() {
            DoorState::Open => DOOR_OPEN_ANGLE,
            DoorState::Closed => 0.0,
        };
        self.door_animation_time = 0.0;
        log::info!("Microwave door: {}", self.microwave.door());
    }

    fn refresh_display(&mut self) {
        let text = self.microwave.display_text();
        if text != self.display_text {
            log::info!("Display: {} ({})", text, self.microwave.state());
            self.display_text = text;
        }
    }

    fn handle_keyboard(&mut self, input: &FrameInput) {
        for key in &input.keys_pressed {
            if let Some(digit) = key.digit() {
                self.press(KeypadKey::Digit(digit));
                continue;
            }
            match key {
                KeyCode::Enter => self.press(KeypadKey::Start),
                KeyCode::Backspace => self.press(KeypadKey::Stop),
                KeyCode::Delete => {
                    self.microwave.clear_input();
                    self.refresh_display();
                }
                KeyCode::R => {
                    self.microwave.repair();
                    self.refresh_display();
                }
                KeyCode::X => {
                    self.microwave.break_down();
                    self.door_target_angle = 0.0;
                    self.refresh_display();
                }
                KeyCode::Space => self.toggle_door(),
                _ => {}
            }
        }
    }

    fn advance_timer(&mut self, delta_time: f32) {
        self.tick_accumulator += delta_time;
        if self.tick_accumulator >= 1.0 {
            self.microwave.tick();
            self.tick_accumulator -= 1.0;
            self.refresh_display();
        }
    }

    fn fade_light(&self, scene: &mut Scene, delta_time: f32) {
        let Some(light) = self.entities.as_ref().map(|e| e.light) else {
            return;
        };
        let target = if self.microwave.is_light_on() { LIGHT_ALPHA } else { 0.0 };
        if let Some(panel) = scene.tree_mut().behaviour_mut::<Panel>(light) {
            let alpha = utils::lerp(panel.alpha(), target, (delta_time * LIGHT_FADE_SPEED).min(1.0));
            panel.set_alpha(alpha);
        }
    }

    fn animate_door(&mut self, scene: &mut Scene, delta_time: f32) {
        let Some(pivot) = self.entities.as_ref().map(|e| e.window_pivot) else {
            return;
        };
        let tree = scene.tree_mut();
        let Some(current) = tree.node(pivot).map(SpatialNode::local_yaw_degrees) else {
            return;
        };

        self.door_animation_time += delta_time;
        let progress = utils::clamp(self.door_animation_time / DOOR_ANIMATION_SECONDS, 0.0, 1.0);
        if progress >= 1.0 && (current - self.door_target_angle).abs() < 1e-3 {
            return;
        }

        let target = self.door_target_angle;
        let mut angle = utils::lerp(current, target, progress * 4.0);
        angle = if target > current { angle.min(target) } else { angle.max(target) };
        if progress >= 1.0 {
            angle = target;
        }
        tree.set_local_euler_degrees(pivot, Vec3::new(0.0, angle, 0.0));
    }

    fn set_key_color(scene: &mut Scene, id: EntityId, color: Color) {
        if let Some(panel) = scene.tree_mut().behaviour_mut::<Panel>(id) {
            panel.color = color;
        }
    }
}

impl Application for MicrowaveApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing microwave scene");
        let entities = build_microwave(engine.scene_mut())
            .ok_or_else(|| AppError::Custom(DemoError::Layout.to_string()))?;
        self.buttons = entities.keys.iter().map(|(id, key)| (*id, *key)).collect();
        self.entities = Some(entities);
        self.refresh_display();
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        let input = engine.frame_input().clone();
        self.advance_timer(delta_time);
        self.handle_keyboard(&input);

        let scene = engine.scene_mut();
        self.fade_light(scene, delta_time);
        self.animate_door(scene, delta_time);
        Ok(())
    }

    fn on_picking(&mut self, engine: &mut Engine, outcome: &PickingOutcome) -> Result<(), AppError> {
        let window = self.entities.as_ref().map(|e| e.window);
        for event in &outcome.events {
            match *event {
                PickingEvent::HoverEntered(id) => {
                    if let Some(key) = self.buttons.get(&id) {
                        log::info!("Hovering over {} button", key.label());
                        Self::set_key_color(engine.scene_mut(), id, KEY_HOVERED);
                    }
                }
                PickingEvent::HoverExited(id) => {
                    if self.buttons.contains_key(&id) {
                        Self::set_key_color(engine.scene_mut(), id, KEY_IDLE);
                    }
                }
                PickingEvent::Clicked(id) => {
                    if let Some(key) = self.buttons.get(&id).copied() {
                        self.press(key);
                    } else if Some(id) == window {
                        self.toggle_door();
                    }
                }
            }
        }
        Ok(())
    }

    fn shutdown(&mut self, _engine: &mut Engine) {
        log::info!(
            "Microwave scene shutting down: state {}, door {}, display {}",
            self.microwave.state(),
            self.microwave.door(),
            self.display_text
        );
        self.entities = None;
        self.buttons.clear();
    }
}
