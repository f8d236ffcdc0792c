pub mod content;
pub mod device;
pub mod manifest;
pub mod registry;

pub use content::{Content, Loader, Resource, ResourceKind};
#[cfg(feature = "image-loader")]
pub use device::FsDevice;
pub use device::{Device, HeadlessDevice, ResourcePath, BUNDLE_SCHEME, LOCAL_SCHEME};
pub use manifest::{AnimationDescriptor, AssetManifest, SpriteDescriptor, TextureDescriptor};
pub use registry::{NamedAnimation, SpriteRegistry};
