use std::rc::Rc;

use crate::api::error::{EngineError, Result};
use crate::api::game::{Game, GameConfig};
use crate::assets::content::Content;
use crate::assets::device::Device;
use crate::renderer::batch::SharedRenderer;
use crate::renderer::camera::Camera;
use crate::renderer::traits::Renderer;

/// Drives a [`Game`]: owns its content, camera and renderer and runs the
/// load / update / draw cycle the platform loop asks for.
pub struct GameHost<G: Game> {
    game: G,
    config: GameConfig,
    content: Content,
    camera: Camera,
    renderer: Option<Rc<SharedRenderer>>,
}

impl<G: Game> GameHost<G> {
    pub fn new(game: G, device: impl Device + 'static) -> Self {
        let config = game.config();
        let viewport = device.viewport();
        let mut camera = Camera::new(viewport.width, viewport.height);
        camera.zoom = config.initial_zoom;
        Self {
            content: Content::new(Box::new(device), config.clone()),
            config,
            game,
            camera,
            renderer: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.renderer.is_some()
    }

    /// Let the game load its content. Only the first call is allowed.
    pub fn load(&mut self) -> Result<()> {
        if self.is_loaded() {
            return Err(EngineError::AlreadyLoaded);
        }
        let renderer = self.content.renderer()?;
        self.game.load(&mut self.content)?;
        log::info!(
            "game loaded: {} resources, viewport {}x{}",
            self.content.len(),
            self.camera.width,
            self.camera.height
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Advance the game by `delta` seconds.
    pub fn update(&mut self, delta: f64) -> Result<()> {
        if !self.is_loaded() {
            return Err(EngineError::NotLoaded("update"));
        }
        self.game.update(&mut self.camera, delta)
    }

    /// Render one frame. The camera picks up the device viewport first.
    /// If the game fails mid-frame the partial frame is discarded.
    pub fn draw(&mut self) -> Result<()> {
        let renderer = self.renderer.as_ref().ok_or(EngineError::NotLoaded("draw"))?;
        let viewport = self.content.device().viewport();
        self.camera.resize(viewport.width, viewport.height);

        let mut renderer = renderer.borrow_mut();
        renderer.begin(&self.camera)?;
        if let Err(err) = self.game.draw(&mut *renderer) {
            log::warn!("draw failed, dropping frame: {}", err);
            renderer.abort();
            return Err(err);
        }
        renderer.end()
    }

    /// `update` then `draw`.
    pub fn frame(&mut self, delta: f64) -> Result<()> {
        self.update(delta)?;
        self.draw()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The renderer, once loaded.
    pub fn renderer(&self) -> Option<&Rc<SharedRenderer>> {
        self.renderer.as_ref()
    }
}
