use crate::components::sprite::VertexLayout;

/// One vertex attribute as the GPU backend should bind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub location: u32,
    /// Float components (2 for position/uv, 4 for color).
    pub components: u32,
    /// Byte offset inside one vertex.
    pub offset: u32,
}

const POSITION: VertexAttribute = VertexAttribute { name: "a_position", location: 0, components: 2, offset: 0 };
const TEXCOORD: VertexAttribute = VertexAttribute { name: "a_texcoord", location: 1, components: 2, offset: 8 };
const COLOR: VertexAttribute = VertexAttribute { name: "a_color", location: 2, components: 4, offset: 16 };

const VERTEX_SOURCE: &str = r#"#version 300 es
uniform mat4 u_view;
uniform mat4 u_projection;
in vec2 a_position;
in vec2 a_texcoord;
in vec4 a_color;
out vec2 v_texcoord;
out vec4 v_color;
void main() {
    v_texcoord = a_texcoord;
    v_color = a_color;
    gl_Position = u_projection * u_view * vec4(a_position, 0.0, 1.0);
}
"#;

const VERTEX_SOURCE_UNTINTED: &str = r#"#version 300 es
uniform mat4 u_view;
uniform mat4 u_projection;
in vec2 a_position;
in vec2 a_texcoord;
out vec2 v_texcoord;
out vec4 v_color;
void main() {
    v_texcoord = a_texcoord;
    v_color = vec4(1.0);
    gl_Position = u_projection * u_view * vec4(a_position, 0.0, 1.0);
}
"#;

const FRAGMENT_SOURCE: &str = r#"#version 300 es
precision mediump float;
uniform sampler2D u_texture;
in vec2 v_texcoord;
in vec4 v_color;
out vec4 frag_color;
void main() {
    frag_color = texture(u_texture, v_texcoord) * v_color;
}
"#;

/// Sprite shader program: sources plus the attribute bindings matching a
/// [`VertexLayout`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderProgram {
    layout: VertexLayout,
    attributes: Vec<VertexAttribute>,
}

impl ShaderProgram {
    pub fn for_layout(layout: VertexLayout) -> Self {
        let attributes = match layout {
            VertexLayout::PositionUv => vec![POSITION, TEXCOORD],
            VertexLayout::PositionUvColor => vec![POSITION, TEXCOORD, COLOR],
        };
        Self { layout, attributes }
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> u32 {
        (self.layout.floats_per_vertex() * std::mem::size_of::<f32>()) as u32
    }

    pub fn vertex_source(&self) -> &'static str {
        match self.layout {
            VertexLayout::PositionUv => VERTEX_SOURCE_UNTINTED,
            VertexLayout::PositionUvColor => VERTEX_SOURCE,
        }
    }

    pub fn fragment_source(&self) -> &'static str {
        FRAGMENT_SOURCE
    }
}
