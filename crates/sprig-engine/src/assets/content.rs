//! Content provider: creates resources on first request and hands out the same
//! instance for every later request with the same path and type.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::api::error::{EngineError, Result};
use crate::api::game::GameConfig;
use crate::assets::device::{Device, ResourcePath};
use crate::renderer::batch::{BatchRenderer, SharedRenderer};
use crate::renderer::shader::ShaderProgram;
use crate::renderer::texture::{FilterMode, Texture, TextureId};

/// The resource families the provider knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    ShaderProgram,
    Renderer,
}

/// Something [`Content::get`] can create.
pub trait Resource: Any + Sized {
    const KIND: ResourceKind;

    /// Build the resource for `path`. Nothing is registered if this fails.
    fn create(path: &str, loader: &mut Loader<'_>) -> Result<Self>;
}

/// What a resource may use while it is being created.
pub struct Loader<'a> {
    device: &'a dyn Device,
    config: &'a GameConfig,
    next_texture: &'a mut u32,
}

impl Loader<'_> {
    pub fn device(&self) -> &dyn Device {
        self.device
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    /// Reserve the next texture id. Call only once creation can no longer fail.
    pub fn allocate_texture_id(&mut self) -> TextureId {
        let id = TextureId(*self.next_texture);
        *self.next_texture += 1;
        id
    }
}

/// Fails unless `path` is empty: shader programs and renderers are singletons.
fn require_unnamed(kind: ResourceKind, path: &str) -> Result<()> {
    if path.is_empty() {
        Ok(())
    } else {
        Err(EngineError::UnsupportedResource {
            kind,
            path: path.to_string(),
        })
    }
}

fn create_texture(path: &str, filter: FilterMode, loader: &mut Loader<'_>) -> Result<Texture> {
    if path.is_empty() {
        return Err(EngineError::UnsupportedResource {
            kind: ResourceKind::Texture,
            path: String::new(),
        });
    }
    ResourcePath::parse(path)?;
    let data = loader.device().load_texture(path)?;
    let texture = Texture::new(TextureId::default(), path, data, filter)?;
    Ok(texture.with_id(loader.allocate_texture_id()))
}

impl Resource for Texture {
    const KIND: ResourceKind = ResourceKind::Texture;

    fn create(path: &str, loader: &mut Loader<'_>) -> Result<Self> {
        let filter = loader.config().default_filter;
        create_texture(path, filter, loader)
    }
}

impl Resource for ShaderProgram {
    const KIND: ResourceKind = ResourceKind::ShaderProgram;

    fn create(path: &str, loader: &mut Loader<'_>) -> Result<Self> {
        require_unnamed(Self::KIND, path)?;
        Ok(ShaderProgram::for_layout(loader.config().vertex_layout))
    }
}

impl Resource for SharedRenderer {
    const KIND: ResourceKind = ResourceKind::Renderer;

    fn create(path: &str, loader: &mut Loader<'_>) -> Result<Self> {
        require_unnamed(Self::KIND, path)?;
        Ok(RefCell::new(BatchRenderer::from_config(loader.config())))
    }
}

/// Identity-caching resource store. Owns every texture the game uses.
pub struct Content {
    device: Box<dyn Device>,
    config: GameConfig,
    resources: HashMap<(String, TypeId), Rc<dyn Any>>,
    textures: HashMap<TextureId, Rc<Texture>>,
    next_texture: u32,
}

impl Content {
    pub fn new(device: Box<dyn Device>, config: GameConfig) -> Self {
        Self {
            device,
            config,
            resources: HashMap::new(),
            textures: HashMap::new(),
            next_texture: 1,
        }
    }

    pub fn device(&self) -> &dyn Device {
        self.device.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get the resource of type `R` for `path`, creating it on first use.
    pub fn get<R: Resource>(&mut self, path: &str) -> Result<Rc<R>> {
        self.get_or_create(path, R::create)
    }

    /// The frame renderer shared by the game and the host.
    pub fn renderer(&mut self) -> Result<Rc<SharedRenderer>> {
        self.get::<SharedRenderer>("")
    }

    /// Shorthand for `get::<Texture>(path)`.
    pub fn texture(&mut self, path: &str) -> Result<Rc<Texture>> {
        self.get::<Texture>(path)
    }

    /// Like [`texture`](Self::texture) but picks the filter if this is the
    /// first request for `path`. Later requests return the cached texture as is.
    pub fn texture_with_filter(&mut self, path: &str, filter: FilterMode) -> Result<Rc<Texture>> {
        self.get_or_create(path, |path, loader| create_texture(path, filter, loader))
    }

    /// Look up an already loaded texture by id.
    pub fn texture_by_id(&self, id: TextureId) -> Option<&Rc<Texture>> {
        self.textures.get(&id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Drop every resource. Handles held elsewhere stay valid but are no
    /// longer returned by `get`.
    pub fn clear(&mut self) {
        log::debug!("releasing {} resources", self.resources.len());
        self.resources.clear();
        self.textures.clear();
    }

    fn get_or_create<R: Resource>(
        &mut self,
        path: &str,
        create: impl FnOnce(&str, &mut Loader<'_>) -> Result<R>,
    ) -> Result<Rc<R>> {
        let key = (path.to_string(), TypeId::of::<R>());
        if let Some(existing) = self.resources.get(&key) {
            if let Ok(resource) = Rc::clone(existing).downcast::<R>() {
                return Ok(resource);
            }
        }

        let mut loader = Loader {
            device: self.device.as_ref(),
            config: &self.config,
            next_texture: &mut self.next_texture,
        };
        let resource = match create(path, &mut loader) {
            Ok(resource) => Rc::new(resource),
            Err(err) => {
                log::warn!("failed to create {:?} \"{}\": {}", R::KIND, path, err);
                return Err(err);
            }
        };
        log::debug!("created {:?} \"{}\"", R::KIND, path);

        let erased: Rc<dyn Any> = resource.clone();
        if let Ok(texture) = Rc::clone(&erased).downcast::<Texture>() {
            self.textures.insert(texture.id(), texture);
        }
        self.resources.insert(key, erased);
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::device::HeadlessDevice;
    use crate::math::Rect;
    use crate::renderer::texture::TextureData;

    /// A device that fails the first texture decode, then succeeds.
    struct FlakyDevice {
        failures: std::cell::Cell<u32>,
    }

    impl Device for FlakyDevice {
        fn viewport(&self) -> Rect {
            Rect::new(0.0, 0.0, 10.0, 10.0)
        }

        fn load_texture(&self, path: &str) -> Result<TextureData> {
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(EngineError::TextureLoad {
                    path: path.to_string(),
                    reason: "decoder hiccup".to_string(),
                });
            }
            Ok(TextureData { pixels: vec![0; 16], width: 2, height: 2 })
        }
    }

    fn content() -> Content {
        let mut device = HeadlessDevice::new(640.0, 480.0);
        device.insert_solid("bundle://a.png", 4, 4, [1, 2, 3, 4]).unwrap();
        device.insert_solid("bundle://b.png", 8, 2, [5, 6, 7, 8]).unwrap();
        Content::new(Box::new(device), GameConfig::default())
    }

    #[test]
    fn repeated_requests_share_one_instance() {
        let mut content = content();
        let first = content.texture("bundle://a.png").unwrap();
        let second = content.get::<Texture>("bundle://a.png").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(content.len(), 1);
    }

    #[test]
    fn different_paths_get_different_ids() {
        let mut content = content();
        let a = content.texture("bundle://a.png").unwrap();
        let b = content.texture("bundle://b.png").unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(b.width(), 8);
        assert!(Rc::ptr_eq(content.texture_by_id(b.id()).unwrap(), &b));
    }

    #[test]
    fn same_path_different_kind_is_a_different_resource() {
        let mut content = content();
        let renderer = content.get::<SharedRenderer>("").unwrap();
        let shader = content.get::<ShaderProgram>("").unwrap();
        assert!(Rc::ptr_eq(&renderer, &content.get::<SharedRenderer>("").unwrap()));
        assert_eq!(shader.layout(), GameConfig::default().vertex_layout);
        assert_eq!(content.len(), 2);
    }

    #[test]
    fn unsupported_combinations_fail() {
        let mut content = content();
        assert!(matches!(
            content.get::<SharedRenderer>("bundle://renderer"),
            Err(EngineError::UnsupportedResource { kind: ResourceKind::Renderer, .. })
        ));
        assert!(matches!(
            content.get::<Texture>(""),
            Err(EngineError::UnsupportedResource { kind: ResourceKind::Texture, .. })
        ));
        assert!(matches!(content.texture("a.png"), Err(EngineError::InvalidPath(_))));
        assert!(content.is_empty());
    }

    #[test]
    fn failed_load_registers_nothing() {
        let device = FlakyDevice { failures: std::cell::Cell::new(1) };
        let mut content = Content::new(Box::new(device), GameConfig::default());

        assert!(content.texture("bundle://x.png").is_err());
        assert!(content.is_empty());

        let texture = content.texture("bundle://x.png").unwrap();
        assert_eq!(texture.id(), TextureId(1));
        assert_eq!(content.len(), 1);
    }

    #[test]
    fn first_request_picks_the_filter() {
        let mut content = content();
        let linear = content.texture_with_filter("bundle://a.png", FilterMode::Linear).unwrap();
        let again = content.texture("bundle://a.png").unwrap();
        assert_eq!(again.filter(), FilterMode::Linear);
        assert!(Rc::ptr_eq(&linear, &again));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut content = content();
        let old = content.texture("bundle://a.png").unwrap();
        content.clear();
        assert!(content.texture_by_id(old.id()).is_none());
        let fresh = content.texture("bundle://a.png").unwrap();
        assert!(!Rc::ptr_eq(&old, &fresh));
    }
}
