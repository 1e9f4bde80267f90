//! Shader stage registry.
//!
//! Every stage used by the texture-draw, spherical background, depth-peel
//! composite, depth copy and scalar colormap passes is declared here as an
//! immutable [`ShaderStageSpecification`]. The table is static; lookups are by
//! symbolic name.
//!
//! Vertex stages declare the output struct their paired fragment stages
//! consume (`TextureDrawOutput`, `SphereBgOutput`), so a vertex and fragment
//! source concatenate into one WGSL module.

/// The pipeline stage a shader source runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStageType {
    Vertex,
    Fragment,
}

/// Data types for declared uniforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Float,
    Vector3Float,
    Matrix33Float,
    Matrix44Float,
}

/// A uniform consumed by a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSpecUniform {
    pub name: &'static str,
    pub ty: DataType,
}

/// A per-vertex attribute consumed by a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSpecAttribute {
    pub name: &'static str,
    pub ty: DataType,
}

/// A texture binding consumed by a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSpecTexture {
    pub name: &'static str,
    /// Texture dimensionality (1 or 2).
    pub dim: u32,
}

/// An immutable, named shader stage: WGSL source plus its declared interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderStageSpecification {
    pub name: &'static str,
    pub stage: ShaderStageType,
    pub uniforms: &'static [ShaderSpecUniform],
    pub attributes: &'static [ShaderSpecAttribute],
    pub textures: &'static [ShaderSpecTexture],
    pub source: &'static str,
}

impl ShaderStageSpecification {
    /// WGSL entry point for this stage.
    #[must_use]
    pub fn entry_point(&self) -> &'static str {
        match self.stage {
            ShaderStageType::Vertex => "vs_main",
            ShaderStageType::Fragment => "fs_main",
        }
    }
}

pub const TEXTURE_DRAW_VERT_SHADER: ShaderStageSpecification = ShaderStageSpecification {
    name: "TEXTURE_DRAW_VERT_SHADER",
    stage: ShaderStageType::Vertex,
    uniforms: &[],
    attributes: &[],
    textures: &[],
    source: include_str!("shaders/texture_draw_vert.wgsl"),
};

pub const SPHEREBG_DRAW_VERT_SHADER: ShaderStageSpecification = ShaderStageSpecification {
    name: "SPHEREBG_DRAW_VERT_SHADER",
    stage: ShaderStageType::Vertex,
    uniforms: &[ShaderSpecUniform {
        name: "u_sphere_bg.inv_view_proj",
        ty: DataType::Matrix44Float,
    }],
    attributes: &[],
    textures: &[],
    source: include_str!("shaders/spherebg_draw_vert.wgsl"),
};

pub const SPHEREBG_DRAW_FRAG_SHADER: ShaderStageSpecification = ShaderStageSpecification {
    name: "SPHEREBG_DRAW_FRAG_SHADER",
    stage: ShaderStageType::Fragment,
    uniforms: &[],
    attributes: &[],
    textures: &[ShaderSpecTexture {
        name: "t_env",
        dim: 2,
    }],
    source: include_str!("shaders/spherebg_draw_frag.wgsl"),
};

pub const PLAIN_TEXTURE_DRAW_FRAG_SHADER: ShaderStageSpecification = ShaderStageSpecification {
    name: "PLAIN_TEXTURE_DRAW_FRAG_SHADER",
    stage: ShaderStageType::Fragment,
    uniforms: &[],
    attributes: &[],
    textures: &[ShaderSpecTexture {
        name: "t_image",
        dim: 2,
    }],
    source: include_str!("shaders/plain_texture_draw_frag.wgsl"),
};

pub const DOT3_TEXTURE_DRAW_FRAG_SHADER: ShaderStageSpecification = ShaderStageSpecification {
    name: "DOT3_TEXTURE_DRAW_FRAG_SHADER",
    stage: ShaderStageType::Fragment,
    uniforms: &[ShaderSpecUniform {
        name: "u_dot3.map_dot",
        ty: DataType::Vector3Float,
    }],
    attributes: &[],
    textures: &[ShaderSpecTexture {
        name: "t_image",
        dim: 2,
    }],
    source: include_str!("shaders/dot3_texture_draw_frag.wgsl"),
};

pub const MAP3_TEXTURE_DRAW_FRAG_SHADER: ShaderStageSpecification = ShaderStageSpecification {
    name: "MAP3_TEXTURE_DRAW_FRAG_SHADER",
    stage: ShaderStageType::Fragment,
    uniforms: &[ShaderSpecUniform {
        name: "u_map3.map",
        ty: DataType::Matrix33Float,
    }],
    attributes: &[],
    textures: &[ShaderSpecTexture {
        name: "t_image",
        dim: 2,
    }],
    source: include_str!("shaders/map3_texture_draw_frag.wgsl"),
};

pub const COMPOSITE_PEEL: ShaderStageSpecification = ShaderStageSpecification {
    name: "COMPOSITE_PEEL",
    stage: ShaderStageType::Fragment,
    uniforms: &[],
    attributes: &[],
    textures: &[ShaderSpecTexture {
        name: "t_image",
        dim: 2,
    }],
    source: include_str!("shaders/composite_peel.wgsl"),
};

pub const DEPTH_COPY: ShaderStageSpecification = ShaderStageSpecification {
    name: "DEPTH_COPY",
    stage: ShaderStageType::Fragment,
    uniforms: &[],
    attributes: &[],
    textures: &[ShaderSpecTexture {
        name: "t_depth",
        dim: 2,
    }],
    source: include_str!("shaders/depth_copy.wgsl"),
};

pub const SCALAR_TEXTURE_COLORMAP: ShaderStageSpecification = ShaderStageSpecification {
    name: "SCALAR_TEXTURE_COLORMAP",
    stage: ShaderStageType::Fragment,
    uniforms: &[
        ShaderSpecUniform {
            name: "u_colormap.range_low",
            ty: DataType::Float,
        },
        ShaderSpecUniform {
            name: "u_colormap.range_high",
            ty: DataType::Float,
        },
        ShaderSpecUniform {
            name: "u_colormap.alpha",
            ty: DataType::Float,
        },
    ],
    attributes: &[],
    textures: &[
        ShaderSpecTexture {
            name: "t_scalar",
            dim: 2,
        },
        ShaderSpecTexture {
            name: "t_colormap",
            dim: 1,
        },
    ],
    source: include_str!("shaders/scalar_texture_colormap.wgsl"),
};

static SHADER_STAGES: [ShaderStageSpecification; 9] = [
    TEXTURE_DRAW_VERT_SHADER,
    SPHEREBG_DRAW_VERT_SHADER,
    SPHEREBG_DRAW_FRAG_SHADER,
    PLAIN_TEXTURE_DRAW_FRAG_SHADER,
    DOT3_TEXTURE_DRAW_FRAG_SHADER,
    MAP3_TEXTURE_DRAW_FRAG_SHADER,
    COMPOSITE_PEEL,
    DEPTH_COPY,
    SCALAR_TEXTURE_COLORMAP,
];

/// Returns every registered shader stage.
#[must_use]
pub fn all_shader_stages() -> &'static [ShaderStageSpecification] {
    &SHADER_STAGES
}

/// Looks up a shader stage by its symbolic name.
#[must_use]
pub fn shader_stage(name: &str) -> Option<&'static ShaderStageSpecification> {
    SHADER_STAGES.iter().find(|spec| spec.name == name)
}

/// Returns the vertex stage a fragment stage is drawn with.
#[must_use]
pub fn paired_vertex_stage(
    fragment: &ShaderStageSpecification,
) -> Option<&'static ShaderStageSpecification> {
    match fragment.stage {
        ShaderStageType::Vertex => None,
        ShaderStageType::Fragment if fragment.name == SPHEREBG_DRAW_FRAG_SHADER.name => {
            shader_stage(SPHEREBG_DRAW_VERT_SHADER.name)
        }
        ShaderStageType::Fragment => shader_stage(TEXTURE_DRAW_VERT_SHADER.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique() {
        let names: HashSet<_> = all_shader_stages().iter().map(|s| s.name).collect();
        assert_eq!(names.len(), all_shader_stages().len());
    }

    #[test]
    fn test_lookup() {
        let spec = shader_stage("COMPOSITE_PEEL").unwrap();
        assert_eq!(spec.stage, ShaderStageType::Fragment);
        assert_eq!(spec.entry_point(), "fs_main");
        assert!(shader_stage("NOT_A_SHADER").is_none());
    }

    #[test]
    fn test_declared_textures_appear_in_source() {
        for spec in all_shader_stages() {
            for texture in spec.textures {
                assert!(
                    spec.source.contains(texture.name),
                    "{} does not bind {}",
                    spec.name,
                    texture.name
                );
            }
        }
    }

    #[test]
    fn test_entry_points_present() {
        for spec in all_shader_stages() {
            assert!(spec.source.contains(spec.entry_point()), "{}", spec.name);
        }
    }

    #[test]
    fn test_fragment_stages_pair_with_declaring_vertex_stage() {
        for spec in all_shader_stages()
            .iter()
            .filter(|s| s.stage == ShaderStageType::Fragment)
        {
            let vert = paired_vertex_stage(spec).unwrap();
            assert_eq!(vert.stage, ShaderStageType::Vertex);
            let input = if vert.name == SPHEREBG_DRAW_VERT_SHADER.name {
                "SphereBgOutput"
            } else {
                "TextureDrawOutput"
            };
            assert!(spec.source.contains(input), "{}", spec.name);
            assert!(vert.source.contains(&format!("struct {input}")));
        }
    }
}
