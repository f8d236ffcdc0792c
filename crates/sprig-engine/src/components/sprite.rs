use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::{EngineError, Result};
use crate::components::animation::SpriteAnimation;
use crate::math::{rotate, Color, Rect};
use crate::renderer::texture::{Texture, TextureId};

/// Vertices per sprite: two triangles.
pub const VERTICES_PER_SPRITE: usize = 6;

/// Untinted vertex: position + UV. 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
}

/// Tinted vertex: position + UV + RGBA. 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Interleaving of the cached vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexLayout {
    /// `[x, y, u, v]`. The tint is ignored.
    PositionUv,
    /// `[x, y, u, v, r, g, b, a]`.
    #[default]
    PositionUvColor,
}

impl VertexLayout {
    pub const fn floats_per_vertex(self) -> usize {
        match self {
            VertexLayout::PositionUv => 4,
            VertexLayout::PositionUvColor => 8,
        }
    }

    pub const fn floats_per_sprite(self) -> usize {
        self.floats_per_vertex() * VERTICES_PER_SPRITE
    }
}

/// How the quad size is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryMode {
    /// The quad is as large as the source region (times scale).
    Region,
    /// The quad fills an explicit destination size.
    Stretch,
}

impl GeometryMode {
    pub fn name(self) -> &'static str {
        match self {
            GeometryMode::Region => "region",
            GeometryMode::Stretch => "stretch",
        }
    }
}

/// A textured quad whose vertex buffer is kept in sync with its properties.
///
/// Every setter that changes a property rebuilds the buffer immediately, so
/// [`vertices`](Sprite::vertices) is always current and reading it never
/// recomputes anything. [`revision`](Sprite::revision) counts the rebuilds.
///
/// Vertex order, with corners named on a y-down screen before rotation:
/// `[top-left, top-right, bottom-right, top-left, bottom-right, bottom-left]`.
#[derive(Debug, Clone)]
pub struct Sprite {
    texture: TextureId,
    texture_size: Vec2,
    source: Rect,
    position: Vec2,
    size: Option<Vec2>,
    origin: Option<Vec2>,
    rotation: f32,
    scale: f32,
    color: Color,
    layout: VertexLayout,
    vertices: Vec<f32>,
    revision: u32,
}

impl Sprite {
    /// Sprite showing the whole texture, top-left corner at the origin.
    pub fn new(texture: &Texture) -> Self {
        Self::with_layout(texture, VertexLayout::default())
    }

    pub fn with_layout(texture: &Texture, layout: VertexLayout) -> Self {
        let mut sprite = Self {
            texture: texture.id(),
            texture_size: texture.size(),
            source: texture.bounds(),
            position: Vec2::ZERO,
            size: None,
            origin: None,
            rotation: 0.0,
            scale: 1.0,
            color: Color::WHITE,
            layout,
            vertices: Vec::with_capacity(layout.floats_per_sprite()),
            revision: 0,
        };
        sprite.rebuild();
        sprite
    }

    // -- Builder pattern --

    pub fn with_source(mut self, source: Rect) -> Self {
        self.set_source(source);
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_destination(mut self, destination: Rect) -> Self {
        self.set_destination(destination);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.set_rotation(rotation);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    // -- Accessors --

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn source(&self) -> Rect {
        self.source
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Unscaled quad size.
    pub fn quad_size(&self) -> Vec2 {
        self.size.unwrap_or_else(|| self.source.size())
    }

    /// Where the unrotated, unscaled quad lands.
    pub fn destination(&self) -> Rect {
        Rect::from_parts(self.position, self.quad_size())
    }

    /// Pivot for rotation and scale, relative to the quad's top-left corner.
    /// Defaults to the quad center.
    pub fn origin(&self) -> Vec2 {
        self.origin.unwrap_or_else(|| self.quad_size() / 2.0)
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn mode(&self) -> GeometryMode {
        if self.size.is_some() {
            GeometryMode::Stretch
        } else {
            GeometryMode::Region
        }
    }

    /// Interleaved vertex data, `layout().floats_per_sprite()` floats.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of times the vertex buffer has been built.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    // -- Setters (each rebuilds the cache on change) --

    pub fn set_source(&mut self, source: Rect) {
        if self.source != source {
            self.source = source;
            self.rebuild();
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        if self.position != position {
            self.position = position;
            self.rebuild();
        }
    }

    /// Place the quad on `destination`, switching to stretch mode.
    pub fn set_destination(&mut self, destination: Rect) {
        if self.destination() != destination || self.size.is_none() {
            self.position = destination.location();
            self.size = Some(destination.size());
            self.rebuild();
        }
    }

    /// Go back to region mode: the quad follows the source size again.
    pub fn fit_to_source(&mut self) {
        if self.size.take().is_some() {
            self.rebuild();
        }
    }

    /// `None` restores the centered default.
    pub fn set_origin(&mut self, origin: Option<Vec2>) {
        if self.origin != origin {
            self.origin = origin;
            self.rebuild();
        }
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        if self.rotation != rotation {
            self.rotation = rotation;
            self.rebuild();
        }
    }

    pub fn set_scale(&mut self, scale: f32) {
        if self.scale != scale {
            self.scale = scale;
            self.rebuild();
        }
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.rebuild();
        }
    }

    pub fn set_layout(&mut self, layout: VertexLayout) {
        if self.layout != layout {
            self.layout = layout;
            self.rebuild();
        }
    }

    // -- Animations --

    /// Frame sequence over explicit source regions.
    ///
    /// Only region-mode sprites can be sequenced: frames drive the quad size.
    pub fn create_animation(&self, interval: f64, frames: Vec<Rect>) -> Result<SpriteAnimation> {
        self.ensure_sequencable()?;
        SpriteAnimation::new(interval, frames)
    }

    /// Frame sequence on a grid: frame 0 is `start_frame`, frame `i + 1` is
    /// `start_frame` moved by `offsets[i]` whole frames.
    pub fn create_grid_animation(&self, interval: f64, start_frame: Rect, offsets: &[Vec2]) -> Result<SpriteAnimation> {
        let step = start_frame.size();
        let frames = std::iter::once(Vec2::ZERO)
            .chain(offsets.iter().copied())
            .map(|offset| start_frame.with_location(start_frame.location() + offset * step))
            .collect();
        self.create_animation(interval, frames)
    }

    pub(crate) fn ensure_sequencable(&self) -> Result<()> {
        match self.mode() {
            GeometryMode::Region => Ok(()),
            mode => Err(EngineError::NotSupported {
                feature: "frame animation",
                mode: mode.name(),
            }),
        }
    }

    fn rebuild(&mut self) {
        let uv0 = self.source.location() / self.texture_size;
        let uv1 = uv0 + self.source.size() / self.texture_size;

        let size = self.quad_size();
        let origin = self.origin();
        let pivot = self.position + origin;
        let (rotation, scale) = (self.rotation, self.scale);
        let corner = |local: Vec2| pivot + rotate((local - origin) * scale, rotation);

        let top_left = (corner(Vec2::ZERO), Vec2::new(uv0.x, uv0.y));
        let top_right = (corner(Vec2::new(size.x, 0.0)), Vec2::new(uv1.x, uv0.y));
        let bottom_right = (corner(size), Vec2::new(uv1.x, uv1.y));
        let bottom_left = (corner(Vec2::new(0.0, size.y)), Vec2::new(uv0.x, uv1.y));

        self.vertices.clear();
        for (pos, uv) in [top_left, top_right, bottom_right, top_left, bottom_right, bottom_left] {
            match self.layout {
                VertexLayout::PositionUv => {
                    let v = Vertex { x: pos.x, y: pos.y, u: uv.x, v: uv.y };
                    self.vertices.extend_from_slice(&bytemuck::cast::<Vertex, [f32; 4]>(v));
                }
                VertexLayout::PositionUvColor => {
                    let c = self.color;
                    let v = ColoredVertex {
                        x: pos.x,
                        y: pos.y,
                        u: uv.x,
                        v: uv.y,
                        r: c.r,
                        g: c.g,
                        b: c.b,
                        a: c.a,
                    };
                    self.vertices.extend_from_slice(&bytemuck::cast::<ColoredVertex, [f32; 8]>(v));
                }
            }
        }
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::texture::{FilterMode, TextureData};
    use std::f32::consts::FRAC_PI_2;

    fn texture(width: u32, height: u32) -> Texture {
        let data = TextureData {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        };
        Texture::new(TextureId(1), "bundle://atlas.png", data, FilterMode::Nearest).unwrap()
    }

    fn positions(sprite: &Sprite) -> Vec<(f32, f32)> {
        let stride = sprite.layout().floats_per_vertex();
        sprite.vertices().chunks(stride).map(|v| (v[0], v[1])).collect()
    }

    fn uvs(sprite: &Sprite) -> Vec<(f32, f32)> {
        let stride = sprite.layout().floats_per_vertex();
        sprite.vertices().chunks(stride).map(|v| (v[2], v[3])).collect()
    }

    fn assert_close(actual: &[(f32, f32)], expected: &[(f32, f32)]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a.0 - e.0).abs() < 1e-4 && (a.1 - e.1).abs() < 1e-4, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn full_texture_quad() {
        let tex = texture(100, 100);
        let sprite = tex.create_sprite().with_destination(Rect::new(0.0, 0.0, 100.0, 100.0));

        assert_eq!(sprite.vertices().len(), 6 * 8);
        assert_eq!(
            positions(&sprite),
            vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 0.0), (100.0, 100.0), (0.0, 100.0)]
        );
        assert_eq!(
            uvs(&sprite),
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        );
        // Default tint is white.
        assert_eq!(&sprite.vertices()[4..8], &[1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn region_mode_matches_stretch_for_full_source() {
        let tex = texture(100, 100);
        let region = tex.create_sprite();
        let stretch = tex.create_sprite().with_destination(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(region.mode(), GeometryMode::Region);
        assert_eq!(stretch.mode(), GeometryMode::Stretch);
        assert_eq!(region.vertices(), stretch.vertices());
    }

    #[test]
    fn reading_twice_does_not_rebuild() {
        let tex = texture(64, 64);
        let sprite = tex.create_sprite();
        let revision = sprite.revision();
        let first = sprite.vertices().to_vec();
        let second = sprite.vertices().to_vec();
        assert_eq!(first, second);
        assert_eq!(sprite.revision(), revision);
    }

    #[test]
    fn setters_rebuild_only_on_change() {
        let tex = texture(64, 64);
        let mut sprite = tex.create_sprite();
        let r0 = sprite.revision();

        sprite.set_position(Vec2::new(5.0, 5.0));
        assert_eq!(sprite.revision(), r0 + 1);
        assert_eq!(positions(&sprite)[0], (5.0, 5.0));

        sprite.set_position(Vec2::new(5.0, 5.0));
        assert_eq!(sprite.revision(), r0 + 1);

        sprite.set_color(Color::new(1.0, 0.0, 0.0, 0.5));
        assert_eq!(sprite.revision(), r0 + 2);
        assert_eq!(&sprite.vertices()[4..8], &[1.0, 0.0, 0.0, 0.5]);

        sprite.set_rotation(0.5);
        sprite.set_scale(2.0);
        sprite.set_source(Rect::new(0.0, 0.0, 32.0, 32.0));
        assert_eq!(sprite.revision(), r0 + 5);
    }

    #[test]
    fn source_region_maps_to_uvs() {
        let tex = texture(128, 64);
        let sprite = tex.create_sprite().with_source(Rect::new(32.0, 16.0, 32.0, 16.0));
        let uv = uvs(&sprite);
        assert_eq!(uv[0], (0.25, 0.25));
        assert_eq!(uv[2], (0.5, 0.5));
        // Region mode: quad follows the source size.
        assert_eq!(sprite.destination(), Rect::new(0.0, 0.0, 32.0, 16.0));
    }

    #[test]
    fn rotation_turns_around_center() {
        let tex = texture(100, 100);
        let sprite = tex.create_sprite().with_rotation(FRAC_PI_2);
        // A quarter turn of a square about its center lands each corner on the next.
        assert_close(
            &positions(&sprite),
            &[(100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (100.0, 0.0), (0.0, 100.0), (0.0, 0.0)],
        );
    }

    #[test]
    fn scale_grows_around_center() {
        let tex = texture(10, 10);
        let sprite = tex.create_sprite().with_scale(2.0);
        assert_close(
            &positions(&sprite),
            &[(-5.0, -5.0), (15.0, -5.0), (15.0, 15.0), (-5.0, -5.0), (15.0, 15.0), (-5.0, 15.0)],
        );
    }

    #[test]
    fn custom_origin_pivots_at_corner() {
        let tex = texture(10, 10);
        let mut sprite = tex.create_sprite().with_position(Vec2::new(50.0, 50.0));
        sprite.set_origin(Some(Vec2::ZERO));
        sprite.set_scale(3.0);
        assert_close(&positions(&sprite)[..3], &[(50.0, 50.0), (80.0, 50.0), (80.0, 80.0)]);
    }

    #[test]
    fn untinted_layout_has_four_floats() {
        let tex = texture(16, 16);
        let sprite = Sprite::with_layout(&tex, VertexLayout::PositionUv);
        assert_eq!(sprite.vertices().len(), 6 * 4);
        assert_eq!(sprite.vertex_bytes().len(), 6 * std::mem::size_of::<Vertex>());
    }

    #[test]
    fn stretch_sprites_refuse_frame_animation() {
        let tex = texture(64, 64);
        let sprite = tex.create_sprite().with_destination(Rect::new(0.0, 0.0, 200.0, 100.0));
        let err = sprite.create_animation(0.1, vec![Rect::new(0.0, 0.0, 32.0, 32.0)]);
        assert!(matches!(err, Err(EngineError::NotSupported { mode: "stretch", .. })));
    }

    #[test]
    fn grid_animation_offsets_whole_frames() {
        let tex = texture(64, 64);
        let sprite = tex.create_sprite();
        let anim = sprite
            .create_grid_animation(0.1, Rect::new(0.0, 0.0, 16.0, 16.0), &[Vec2::new(1.0, 0.0), Vec2::new(0.0, 2.0)])
            .unwrap();
        assert_eq!(
            anim.frames(),
            &[
                Rect::new(0.0, 0.0, 16.0, 16.0),
                Rect::new(16.0, 0.0, 16.0, 16.0),
                Rect::new(0.0, 32.0, 16.0, 16.0),
            ]
        );
    }
}
