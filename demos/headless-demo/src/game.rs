use glam::Vec2;
use sprig_engine::api::error::Result;
use sprig_engine::{
    AnimationSet, AssetManifest, Camera, Color, Content, Easing, Game, GameConfig, Renderer, Repeat, Sprite,
    SpriteRegistry, Tween,
};

pub const MANIFEST: &str = r#"{
    "textures": {
        "hero": { "path": "bundle://hero.png" },
        "tiles": { "path": "bundle://tiles.png", "filter": "linear" }
    },
    "sprites": {
        "hero": {
            "texture": "hero",
            "region": { "x": 0, "y": 0, "width": 16, "height": 16 }
        },
        "ground": { "texture": "tiles" }
    },
    "animations": {
        "walk": {
            "sprite": "hero",
            "interval": 0.1,
            "repeat": "Loop",
            "start": { "x": 0, "y": 0, "width": 16, "height": 16 },
            "offsets": [[1, 0], [2, 0], [3, 0]]
        }
    }
}"#;

/// A hero walking back and forth over a strip of ground while pulsing.
#[derive(Default)]
pub struct WalkDemo {
    hero: Option<Sprite>,
    ground: Option<Sprite>,
    animations: AnimationSet,
    walk: Option<Tween<Vec2>>,
    pulse: Option<Tween<Color>>,
}

impl WalkDemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hero(&self) -> Option<&Sprite> {
        self.hero.as_ref()
    }
}

impl Game for WalkDemo {
    fn config(&self) -> GameConfig {
        GameConfig {
            clear_color: Color::from_argb(0xFF20_2838),
            initial_zoom: 2.0,
            ..GameConfig::default()
        }
    }

    fn load(&mut self, content: &mut Content) -> Result<()> {
        let manifest = AssetManifest::from_json(MANIFEST)?;
        let registry = SpriteRegistry::from_manifest(&manifest, content)?;

        self.hero = registry.sprite("hero");
        self.ground = registry
            .sprite("ground")
            .map(|ground| ground.with_position(Vec2::new(-64.0, 24.0)));
        self.animations = registry.animation_set("hero");
        self.animations.play("walk", Repeat::Loop);

        self.walk = Some(Tween::move_to(
            Vec2::new(-48.0, 0.0),
            Vec2::new(48.0, 0.0),
            2.0,
            Easing::EaseBoth,
            Repeat::LoopWithReverse,
        )?);
        self.pulse = Some(Tween::tint(Color::WHITE, Color::from_argb(0xFFFF_C080), 0.5, Easing::Linear, Repeat::LoopWithReverse)?);
        Ok(())
    }

    fn update(&mut self, camera: &mut Camera, delta: f64) -> Result<()> {
        let Some(hero) = self.hero.as_mut() else {
            return Ok(());
        };
        if let Some(walk) = self.walk.as_mut() {
            walk.advance(delta);
            hero.set_position(walk.value());
            camera.look_at(walk.value() * 0.5);
        }
        if let Some(pulse) = self.pulse.as_mut() {
            pulse.advance(delta);
            hero.set_color(pulse.value());
        }
        self.animations.update(delta, hero)
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        let sprites: Vec<&Sprite> = self.ground.iter().chain(self.hero.iter()).collect();
        renderer.draw(&sprites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_engine::{GameHost, HeadlessDevice};

    #[test]
    fn default_demo_walks_and_animates() {
        let mut device = HeadlessDevice::new(320.0, 180.0);
        device.insert_solid("bundle://hero.png", 64, 16, [255; 4]).unwrap();
        device.insert_solid("bundle://tiles.png", 128, 16, [255; 4]).unwrap();

        let mut host = GameHost::new(WalkDemo::default(), device);
        host.load().unwrap();
        for _ in 0..15 {
            host.frame(0.1).unwrap();
        }

        let hero = host.game().hero().unwrap();
        assert_ne!(hero.position(), Vec2::new(-48.0, 0.0));
        assert_eq!(host.renderer().unwrap().borrow().batches().len(), 2);
    }
}
