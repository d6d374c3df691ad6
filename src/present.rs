//! Presentation sink driven by the simulation
//!
//! The simulation never draws anything itself. It only tells a sink which
//! visuals exist and where they are. A real frontend maps these calls onto
//! sprites; [`SceneMirror`] keeps a plain copy for headless runs and tests.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a visual owned by the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u32);

/// Texture a visual is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Texture {
    Background,
    Ship,
    Bullet,
    /// Asteroid art variant, 1-based
    Asteroid(u8),
}

impl Texture {
    /// Asset file name under `textures/`
    pub fn file_name(&self) -> String {
        match self {
            Texture::Background => "pemandangan.jpg".to_string(),
            Texture::Ship => "pistol.png".to_string(),
            Texture::Bullet => "bullet.png".to_string(),
            Texture::Asteroid(variant) => format!("animal{}.png", variant),
        }
    }
}

/// Capabilities the simulation invokes on the presentation layer.
///
/// Calls are fire-and-forget: the simulation never reads anything back
/// except the handle returned by `create_entity`.
pub trait PresentationSink {
    fn create_entity(
        &mut self,
        texture: Option<Texture>,
        pos: Vec2,
        depth: f32,
        scale: f32,
    ) -> VisualHandle;
    fn set_position(&mut self, handle: VisualHandle, pos: Vec2);
    fn set_scale(&mut self, handle: VisualHandle, scale: f32);
    fn set_rotation(&mut self, handle: VisualHandle, degrees: f32);
    fn set_texture(&mut self, handle: VisualHandle, texture: Texture);
    fn show(&mut self, handle: VisualHandle);
    fn hide(&mut self, handle: VisualHandle);
    fn destroy(&mut self, handle: VisualHandle);
}

/// Last known state of a visual in a [`SceneMirror`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub texture: Option<Texture>,
    pub pos: Vec2,
    pub depth: f32,
    pub scale: f32,
    pub rotation: f32,
    pub visible: bool,
}

/// Headless sink that mirrors every visual it is told about
#[derive(Debug, Default)]
pub struct SceneMirror {
    visuals: BTreeMap<VisualHandle, Visual>,
    next_handle: u32,
    /// Total visuals ever destroyed (for leak checks)
    pub destroyed: usize,
}

impl SceneMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: VisualHandle) -> Option<&Visual> {
        self.visuals.get(&handle)
    }

    /// Number of live visuals (visible or hidden)
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Number of visible visuals whose texture matches `pred`
    pub fn count_visible(&self, pred: impl Fn(Option<Texture>) -> bool) -> usize {
        self.visuals
            .values()
            .filter(|v| v.visible && pred(v.texture))
            .count()
    }

    fn visual_mut(&mut self, handle: VisualHandle) -> &mut Visual {
        match self.visuals.get_mut(&handle) {
            Some(visual) => visual,
            None => panic!("visual {:?} used after destroy", handle),
        }
    }
}

impl PresentationSink for SceneMirror {
    fn create_entity(
        &mut self,
        texture: Option<Texture>,
        pos: Vec2,
        depth: f32,
        scale: f32,
    ) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.visuals.insert(
            handle,
            Visual {
                texture,
                pos,
                depth,
                scale,
                rotation: 0.0,
                visible: true,
            },
        );
        handle
    }

    fn set_position(&mut self, handle: VisualHandle, pos: Vec2) {
        self.visual_mut(handle).pos = pos;
    }

    fn set_scale(&mut self, handle: VisualHandle, scale: f32) {
        self.visual_mut(handle).scale = scale;
    }

    fn set_rotation(&mut self, handle: VisualHandle, degrees: f32) {
        self.visual_mut(handle).rotation = degrees;
    }

    fn set_texture(&mut self, handle: VisualHandle, texture: Texture) {
        self.visual_mut(handle).texture = Some(texture);
    }

    fn show(&mut self, handle: VisualHandle) {
        self.visual_mut(handle).visible = true;
    }

    fn hide(&mut self, handle: VisualHandle) {
        self.visual_mut(handle).visible = false;
    }

    fn destroy(&mut self, handle: VisualHandle) {
        if self.visuals.remove(&handle).is_none() {
            panic!("visual {:?} destroyed twice", handle);
        }
        self.destroyed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_file_names() {
        assert_eq!(Texture::Ship.file_name(), "pistol.png");
        assert_eq!(Texture::Asteroid(2).file_name(), "animal2.png");
    }

    #[test]
    fn test_mirror_lifecycle() {
        let mut scene = SceneMirror::new();
        let h = scene.create_entity(None, Vec2::ZERO, 55.0, 1.0);
        assert_eq!(scene.len(), 1);

        scene.set_texture(h, Texture::Bullet);
        scene.set_position(h, Vec2::new(1.0, 2.0));
        scene.hide(h);
        let visual = scene.get(h).unwrap();
        assert_eq!(visual.texture, Some(Texture::Bullet));
        assert_eq!(visual.pos, Vec2::new(1.0, 2.0));
        assert!(!visual.visible);
        assert_eq!(scene.count_visible(|_| true), 0);

        scene.destroy(h);
        assert!(scene.is_empty());
        assert_eq!(scene.destroyed, 1);
    }

    #[test]
    #[should_panic]
    fn test_mirror_double_destroy_panics() {
        let mut scene = SceneMirror::new();
        let h = scene.create_entity(None, Vec2::ZERO, 55.0, 1.0);
        scene.destroy(h);
        scene.destroy(h);
    }
}
