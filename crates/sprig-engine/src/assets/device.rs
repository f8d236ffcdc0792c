//! Platform capabilities the engine core consumes: viewport and texture decoding.
//!
//! Resource paths are namespaced: `bundle://` is read-only application data,
//! `local://` is writable per-install storage. Each device decides where those
//! live on disk (or in memory).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::api::error::{EngineError, Result};
use crate::math::Rect;
use crate::renderer::texture::TextureData;

pub const BUNDLE_SCHEME: &str = "bundle://";
pub const LOCAL_SCHEME: &str = "local://";

/// A parsed resource path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourcePath {
    /// Relative path inside the read-only app bundle.
    Bundle(String),
    /// Relative path inside writable local storage.
    Local(String),
}

impl ResourcePath {
    /// Split off the scheme. Paths without a known scheme, with an empty
    /// remainder, or that could leave their root (`..`, a leading separator,
    /// a drive prefix) are rejected.
    pub fn parse(path: &str) -> Result<Self> {
        let valid = |relative: &str| {
            !relative.is_empty()
                && !relative.starts_with(['/', '\\'])
                && !relative.contains(':')
                && !relative.split(['/', '\\']).any(|part| part == "..")
        };

        match (path.strip_prefix(BUNDLE_SCHEME), path.strip_prefix(LOCAL_SCHEME)) {
            (Some(rest), _) if valid(rest) => Ok(ResourcePath::Bundle(rest.to_string())),
            (_, Some(rest)) if valid(rest) => Ok(ResourcePath::Local(rest.to_string())),
            _ => Err(EngineError::InvalidPath(path.to_string())),
        }
    }

    pub fn relative(&self) -> &str {
        match self {
            ResourcePath::Bundle(p) | ResourcePath::Local(p) => p,
        }
    }

    /// Join onto the matching root directory.
    pub fn resolve(&self, bundle_root: &Path, local_root: &Path) -> PathBuf {
        match self {
            ResourcePath::Bundle(p) => bundle_root.join(p),
            ResourcePath::Local(p) => local_root.join(p),
        }
    }
}

/// Capabilities one platform provides.
pub trait Device {
    /// Drawable area in pixels.
    fn viewport(&self) -> Rect;

    /// Decode the image at a `bundle://` or `local://` path into RGBA8.
    fn load_texture(&self, path: &str) -> Result<TextureData>;
}

/// In-memory device for tests, tools and headless runs.
#[derive(Debug, Clone)]
pub struct HeadlessDevice {
    viewport: Rect,
    textures: HashMap<ResourcePath, TextureData>,
}

impl HeadlessDevice {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, width, height),
            textures: HashMap::new(),
        }
    }

    /// Register image data under a resource path.
    pub fn insert(&mut self, path: &str, data: TextureData) -> Result<()> {
        self.textures.insert(ResourcePath::parse(path)?, data);
        Ok(())
    }

    /// Register a solid-color image.
    pub fn insert_solid(&mut self, path: &str, width: u32, height: u32, rgba: [u8; 4]) -> Result<()> {
        let pixels = rgba.repeat(width as usize * height as usize);
        self.insert(path, TextureData { pixels, width, height })
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }
}

impl Device for HeadlessDevice {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn load_texture(&self, path: &str) -> Result<TextureData> {
        let key = ResourcePath::parse(path)?;
        self.textures.get(&key).cloned().ok_or_else(|| EngineError::TextureLoad {
            path: path.to_string(),
            reason: "no such image".to_string(),
        })
    }
}

/// Desktop device: resolves schemes against two directories and decodes
/// images with the `image` crate.
#[cfg(feature = "image-loader")]
#[derive(Debug, Clone)]
pub struct FsDevice {
    bundle_root: PathBuf,
    local_root: PathBuf,
    viewport: Rect,
}

#[cfg(feature = "image-loader")]
impl FsDevice {
    pub fn new(bundle_root: impl Into<PathBuf>, local_root: impl Into<PathBuf>, width: f32, height: f32) -> Self {
        Self {
            bundle_root: bundle_root.into(),
            local_root: local_root.into(),
            viewport: Rect::new(0.0, 0.0, width, height),
        }
    }

    pub fn platform_path(&self, path: &str) -> Result<PathBuf> {
        Ok(ResourcePath::parse(path)?.resolve(&self.bundle_root, &self.local_root))
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }
}

#[cfg(feature = "image-loader")]
impl Device for FsDevice {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn load_texture(&self, path: &str) -> Result<TextureData> {
        let file = self.platform_path(path)?;
        let bytes = std::fs::read(&file)?;
        let image = image::load_from_memory(&bytes).map_err(|e| EngineError::TextureLoad {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("decoded {} ({}x{}) from {}", path, width, height, file.display());
        Ok(TextureData {
            pixels: rgba.into_raw(),
            width,
            height,
        })
    }
}
