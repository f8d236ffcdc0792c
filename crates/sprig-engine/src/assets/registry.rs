use std::collections::HashMap;

use glam::Vec2;

use crate::api::error::{EngineError, Result};
use crate::assets::content::Content;
use crate::assets::manifest::AssetManifest;
use crate::components::animation::{AnimationSet, SpriteAnimation};
use crate::components::sprite::Sprite;
use crate::extensions::Repeat;

/// A manifest animation, ready to clone onto a sprite.
#[derive(Debug, Clone)]
pub struct NamedAnimation {
    pub sprite: String,
    pub repeat: Repeat,
    pub animation: SpriteAnimation,
}

/// Registry of named sprites and animations, built from an [`AssetManifest`].
/// Provides convenient name-based lookup for game code: sprites are
/// prototypes, clone one per on-screen instance.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, Sprite>,
    animations: HashMap<String, NamedAnimation>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every texture the manifest lists through `content` and build the
    /// prototype sprites and animations.
    pub fn from_manifest(manifest: &AssetManifest, content: &mut Content) -> Result<Self> {
        let default_layout = content.config().vertex_layout;

        let mut textures = HashMap::with_capacity(manifest.textures.len());
        for (name, desc) in &manifest.textures {
            let texture = match desc.filter {
                Some(filter) => content.texture_with_filter(&desc.path, filter)?,
                None => content.texture(&desc.path)?,
            };
            textures.insert(name.as_str(), texture);
        }

        let mut sprites = HashMap::with_capacity(manifest.sprites.len());
        for (name, desc) in &manifest.sprites {
            let texture = textures.get(desc.texture.as_str()).ok_or_else(|| EngineError::UnknownAsset {
                kind: "texture",
                name: desc.texture.clone(),
            })?;
            let mut sprite = Sprite::with_layout(texture, default_layout);
            if let Some(region) = desc.region {
                sprite.set_source(region);
            }
            if let Some([x, y]) = desc.origin {
                sprite.set_origin(Some(Vec2::new(x, y)));
            }
            if let Some(color) = desc.color {
                sprite.set_color(color);
            }
            sprites.insert(name.clone(), sprite);
        }

        let mut animations = HashMap::with_capacity(manifest.animations.len());
        for (name, desc) in &manifest.animations {
            let sprite = sprites.get(&desc.sprite).ok_or_else(|| EngineError::UnknownAsset {
                kind: "sprite",
                name: desc.sprite.clone(),
            })?;
            let animation = match desc.start {
                Some(start) => {
                    let offsets: Vec<Vec2> = desc.offsets.iter().map(|&[x, y]| Vec2::new(x, y)).collect();
                    sprite.create_grid_animation(desc.interval, start, &offsets)?
                }
                None => sprite.create_animation(desc.interval, desc.frames.clone())?,
            };
            animations.insert(
                name.clone(),
                NamedAnimation {
                    sprite: desc.sprite.clone(),
                    repeat: desc.repeat,
                    animation,
                },
            );
        }

        log::info!(
            "registry loaded: {} textures, {} sprites, {} animations",
            textures.len(),
            sprites.len(),
            animations.len()
        );
        Ok(Self { sprites, animations })
    }

    /// Look up a sprite prototype by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    /// A fresh copy of the named sprite.
    pub fn sprite(&self, name: &str) -> Option<Sprite> {
        self.sprites.get(name).cloned()
    }

    pub fn animation(&self, name: &str) -> Option<&NamedAnimation> {
        self.animations.get(name)
    }

    /// Every animation bound to `sprite`, keyed by animation name.
    pub fn animation_set(&self, sprite: &str) -> AnimationSet {
        let mut set = AnimationSet::new();
        for (name, named) in &self.animations {
            if named.sprite == sprite {
                set.add(name.clone(), named.animation.clone());
            }
        }
        set
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::GameConfig;
    use crate::assets::device::HeadlessDevice;
    use crate::math::{Color, Rect};
    use crate::renderer::texture::FilterMode;

    const MANIFEST: &str = r#"{
        "textures": {
            "hero": { "path": "bundle://hero.png", "filter": "linear" },
            "bg": { "path": "bundle://bg.png" }
        },
        "sprites": {
            "hero": {
                "texture": "hero",
                "region": { "x": 0, "y": 0, "width": 16, "height": 16 },
                "color": { "r": 1, "g": 0, "b": 0, "a": 1 }
            },
            "sky": { "texture": "bg" }
        },
        "animations": {
            "walk": {
                "sprite": "hero",
                "interval": 0.1,
                "repeat": "Loop",
                "start": { "x": 0, "y": 0, "width": 16, "height": 16 },
                "offsets": [[1, 0], [2, 0], [3, 0]]
            },
            "idle": {
                "sprite": "hero",
                "interval": 1.0,
                "frames": [{ "x": 0, "y": 16, "width": 16, "height": 16 }]
            }
        }
    }"#;

    fn content() -> Content {
        let mut device = HeadlessDevice::new(320.0, 240.0);
        device.insert_solid("bundle://hero.png", 64, 32, [255; 4]).unwrap();
        device.insert_solid("bundle://bg.png", 320, 240, [0, 0, 80, 255]).unwrap();
        Content::new(Box::new(device), GameConfig::default())
    }

    #[test]
    fn loads_from_manifest() {
        let manifest = AssetManifest::from_json(MANIFEST).unwrap();
        let mut content = content();
        let reg = SpriteRegistry::from_manifest(&manifest, &mut content).unwrap();

        let hero = reg.get("hero").expect("hero should exist");
        assert_eq!(hero.source(), Rect::new(0.0, 0.0, 16.0, 16.0));
        assert_eq!(hero.color(), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(reg.get("sky").unwrap().source(), Rect::new(0.0, 0.0, 320.0, 240.0));

        let hero_texture = content.texture("bundle://hero.png").unwrap();
        assert_eq!(hero_texture.filter(), FilterMode::Linear);
        assert_eq!(hero.texture(), hero_texture.id());

        let walk = reg.animation("walk").unwrap();
        assert_eq!(walk.repeat, Repeat::Loop);
        assert_eq!(walk.animation.frame_count(), 4);
        assert_eq!(reg.animation_set("hero").len(), 2);
        assert!(reg.animation_set("sky").is_empty());
    }

    #[test]
    fn unknown_returns_none() {
        let reg = SpriteRegistry::new();
        assert!(reg.get("nonexistent").is_none());
        assert!(reg.sprite("nonexistent").is_none());
    }

    #[test]
    fn dangling_references_fail() {
        let manifest = AssetManifest::from_json(
            r#"{ "sprites": { "ghost": { "texture": "missing" } } }"#,
        )
        .unwrap();
        let err = SpriteRegistry::from_manifest(&manifest, &mut content());
        assert!(matches!(err, Err(EngineError::UnknownAsset { kind: "texture", .. })));
    }

    #[test]
    fn missing_texture_file_fails() {
        let manifest = AssetManifest::from_json(
            r#"{ "textures": { "t": { "path": "bundle://nope.png" } } }"#,
        )
        .unwrap();
        let err = SpriteRegistry::from_manifest(&manifest, &mut content());
        assert!(matches!(err, Err(EngineError::TextureLoad { .. })));
    }
}
