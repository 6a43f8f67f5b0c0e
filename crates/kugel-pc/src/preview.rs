//! Software rasterizer behind the render backend trait: the preview's
//! "shading stage". Implements enough of the fixed pipeline to render the
//! demo offline: z-buffered triangle fill, wireframe, wide lines and
//! points, alpha blending, Gouraud lighting with the directional plus
//! point/spot model, fog, and both demo textures.
//!
//! Texture-coordinate generation for the sphere (contour direction, eye
//! frame, tilt, lattice holes) is this backend's own rendition; the flags
//! select between the variants documented on [`DrawParams`].

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use image::RgbaImage;
use kugel_hal::{BlendMode, BufferId, PolygonMode, Primitive, RenderBackend, UniformValue};

/// Uniform names this stage accepts, the preview's side of the contract
/// checked by the dispatcher at startup.
pub const KNOWN_UNIFORMS: &[&str] = &[
    "projection",
    "model_view",
    "normal_matrix",
    "global_ambient",
    "directional_light_ambient",
    "directional_light_diffuse",
    "directional_light_specular",
    "directional_light_direction",
    "point_light_ambient",
    "point_light_diffuse",
    "point_light_specular",
    "point_light_position_eye",
    "point_const_att",
    "point_linear_att",
    "point_quad_att",
    "spotlight_destination_eye",
    "spotlight_exponent",
    "spotlight_cutoff_angle",
    "shading_flag",
    "light_source_flag",
    "vertical_slanted_flag",
    "object_eye_frame_flag",
    "upright_tilted_flag",
    "lattice_flag",
    "fog_flag",
    "fog_linear_start",
    "fog_linear_end",
    "fog_density",
    "fog_color",
    "elapsed_time",
    "material_ambient",
    "material_diffuse",
    "material_specular",
    "material_shininess",
    "lighting_flag",
    "is_sphere_flag",
    "is_sphere_shadow_flag",
    "is_floor_flag",
    "is_fireworks_flag",
    "texture_ground_flag",
    "texture_sphere_flag",
    "texture_select",
];

/// Attribute names this stage accepts.
pub const KNOWN_ATTRIBUTES: &[&str] = &["position", "color", "normal", "texcoord", "velocity"];

/// Clip-space w below this is treated as behind the camera; primitives
/// touching it are skipped rather than clipped.
const W_EPS: f32 = 1e-4;

/// Particle gravity, world units per second squared.
const GRAVITY: f32 = -9.8;

/// Particles below this height are expired until the cycle restarts.
const PARTICLE_MIN_Y: f32 = 0.1;

/// Lattice hole grid: cells per texture repeat and hole size within a cell.
const LATTICE_CELLS: f32 = 4.0;
const LATTICE_HOLE: f32 = 0.35;

/// Error type for the preview stage.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A uniform name outside [`KNOWN_UNIFORMS`].
    #[error("unknown uniform `{0}`")]
    UnknownUniform(String),
    /// An attribute name outside [`KNOWN_ATTRIBUTES`].
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    /// A draw needed a uniform that was never written.
    #[error("uniform `{0}` was never set")]
    UniformUnset(&'static str),
    /// A uniform held a different payload type than the draw expected.
    #[error("uniform `{0}` has the wrong type")]
    UniformType(&'static str),
    /// Attribute setup without a bound buffer.
    #[error("no buffer bound before attribute setup")]
    NoBufferBound,
    /// The bound buffer id was never uploaded.
    #[error("buffer {0} was never uploaded")]
    MissingBuffer(u32),
    /// An attribute read would run past the end of the bound buffer.
    #[error("attribute `{0}` reads past the end of the bound buffer")]
    AttributeOutOfRange(String),
    /// A draw needed an attribute that is not bound.
    #[error("draw requires attribute `{0}`")]
    AttributeUnbound(&'static str),
    /// `texture_select` pointed at a unit with no uploaded image.
    #[error("texture unit {0} has no image")]
    EmptyTexture(i32),
}

#[derive(Debug, Clone)]
struct TextureData {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

impl TextureData {
    /// Nearest-neighbor sample with repeat wrapping.
    fn sample(&self, u: f32, v: f32) -> Vec4 {
        let x = ((u.rem_euclid(1.0)) * self.width as f32) as usize % self.width;
        let y = ((v.rem_euclid(1.0)) * self.height as f32) as usize % self.height;
        let base = (y * self.width + x) * 4;
        Vec4::new(
            f32::from(self.rgba[base]) / 255.0,
            f32::from(self.rgba[base + 1]) / 255.0,
            f32::from(self.rgba[base + 2]) / 255.0,
            f32::from(self.rgba[base + 3]) / 255.0,
        )
    }
}

#[derive(Debug, Clone)]
struct Binding {
    name: String,
    components: usize,
    offset: usize,
}

/// Vertex-stage output carried into rasterization.
#[derive(Debug, Clone, Copy)]
struct Shaded {
    clip: Vec4,
    eye: Vec3,
    color: Vec4,
    uv: Vec2,
    /// Pre-transform position, the basis for generated sphere coordinates.
    object: Vec3,
    alive: bool,
}

/// Every uniform resolved once per draw call.
///
/// Generated sphere coordinates: contour mode samples the stripe along
/// `2.5 * x` (vertical) or `1.5 * (x + y + z)` (slanted); checkerboard
/// mode uses latitude/longitude of the position, optionally tilted 45
/// degrees about z; the eye-frame flag swaps the basis from object space
/// to eye space. Lattice mode discards fragments on a 4x4 hole grid in
/// texture space.
struct DrawParams {
    model_view: Mat4,
    projection: Mat4,
    normal_matrix: Mat3,
    lit: bool,
    smooth: bool,
    point_source: bool,
    fireworks: bool,
    sphere: bool,
    floor: bool,
    slanted: bool,
    eye_frame: bool,
    tilted: bool,
    lattice: bool,
    ground_textured: bool,
    sphere_texture_mode: i32,
    selected_texture: Option<TextureData>,
    material_ambient: Vec4,
    material_diffuse: Vec4,
    material_specular: Vec4,
    material_shininess: f32,
    global_ambient: Vec4,
    dir_ambient: Vec4,
    dir_diffuse: Vec4,
    dir_specular: Vec4,
    dir_direction: Vec3,
    pos_ambient: Vec4,
    pos_diffuse: Vec4,
    pos_specular: Vec4,
    pos_position_eye: Vec3,
    const_att: f32,
    linear_att: f32,
    quad_att: f32,
    spot_destination_eye: Vec3,
    spot_exponent: f32,
    spot_cutoff_cos: f32,
    fog_mode: i32,
    fog_start: f32,
    fog_end: f32,
    fog_density: f32,
    fog_color: Vec4,
    elapsed_s: f32,
}

/// Offline framebuffer plus the pipeline state the dispatcher drives.
pub struct PreviewBackend {
    width: usize,
    height: usize,
    color: Vec<Vec4>,
    depth: Vec<f32>,
    clear_color: Vec4,
    line_width: f32,
    point_size: f32,
    depth_mask: bool,
    color_mask: bool,
    blend: BlendMode,
    polygon_mode: PolygonMode,
    uniforms: HashMap<String, UniformValue>,
    buffers: HashMap<u32, Vec<f32>>,
    bound: Option<u32>,
    attributes: Vec<Binding>,
    textures: HashMap<u8, TextureData>,
    frames: usize,
}

impl PreviewBackend {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![Vec4::ZERO; width * height],
            depth: vec![f32::INFINITY; width * height],
            clear_color: Vec4::ZERO,
            line_width: 1.0,
            point_size: 1.0,
            depth_mask: true,
            color_mask: true,
            blend: BlendMode::Opaque,
            polygon_mode: PolygonMode::Fill,
            uniforms: HashMap::new(),
            buffers: HashMap::new(),
            bound: None,
            attributes: Vec::new(),
            textures: HashMap::new(),
            frames: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Frames presented so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Linear color of one pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Vec4 {
        self.color[y * self.width + x]
    }

    /// Convert the framebuffer to an 8-bit RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width as u32, self.height as u32);
        for (i, pixel) in image.pixels_mut().enumerate() {
            let c = self.color[i].clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
            *pixel = image::Rgba([
                c.x.round() as u8,
                c.y.round() as u8,
                c.z.round() as u8,
                c.w.round() as u8,
            ]);
        }
        image
    }

    fn float(&self, name: &'static str) -> Result<f32, PreviewError> {
        match self.uniforms.get(name) {
            Some(UniformValue::Float(v)) => Ok(*v),
            Some(_) => Err(PreviewError::UniformType(name)),
            None => Err(PreviewError::UniformUnset(name)),
        }
    }

    fn int(&self, name: &'static str) -> Result<i32, PreviewError> {
        match self.uniforms.get(name) {
            Some(UniformValue::Int(v)) => Ok(*v),
            Some(_) => Err(PreviewError::UniformType(name)),
            None => Err(PreviewError::UniformUnset(name)),
        }
    }

    fn vec4(&self, name: &'static str) -> Result<Vec4, PreviewError> {
        match self.uniforms.get(name) {
            Some(UniformValue::Vec4(v)) => Ok(*v),
            Some(_) => Err(PreviewError::UniformType(name)),
            None => Err(PreviewError::UniformUnset(name)),
        }
    }

    fn mat3(&self, name: &'static str) -> Result<Mat3, PreviewError> {
        match self.uniforms.get(name) {
            Some(UniformValue::Mat3(v)) => Ok(*v),
            Some(_) => Err(PreviewError::UniformType(name)),
            None => Err(PreviewError::UniformUnset(name)),
        }
    }

    fn mat4(&self, name: &'static str) -> Result<Mat4, PreviewError> {
        match self.uniforms.get(name) {
            Some(UniformValue::Mat4(v)) => Ok(*v),
            Some(_) => Err(PreviewError::UniformType(name)),
            None => Err(PreviewError::UniformUnset(name)),
        }
    }

    fn flag(&self, name: &'static str) -> Result<bool, PreviewError> {
        Ok(self.float(name)? > 0.5)
    }

    fn draw_params(&self) -> Result<DrawParams, PreviewError> {
        let ground_textured = self.flag("texture_ground_flag")?;
        let sphere = self.flag("is_sphere_flag")?;
        let floor = self.flag("is_floor_flag")?;
        let sphere_texture_mode = self.float("texture_sphere_flag")? as i32;

        // Resolve the selected texture up front so sampling cannot fail
        // mid-raster.
        let needs_texture = (floor && ground_textured) || (sphere && sphere_texture_mode > 0);
        let select = self.int("texture_select")?;
        let selected_texture = if needs_texture {
            let unit = u8::try_from(select).map_err(|_| PreviewError::EmptyTexture(select))?;
            Some(
                self.textures
                    .get(&unit)
                    .cloned()
                    .ok_or(PreviewError::EmptyTexture(select))?,
            )
        } else {
            None
        };

        Ok(DrawParams {
            model_view: self.mat4("model_view")?,
            projection: self.mat4("projection")?,
            normal_matrix: self.mat3("normal_matrix")?,
            lit: self.flag("lighting_flag")?,
            smooth: self.flag("shading_flag")?,
            point_source: self.flag("light_source_flag")?,
            fireworks: self.flag("is_fireworks_flag")?,
            sphere,
            floor,
            slanted: self.flag("vertical_slanted_flag")?,
            eye_frame: self.flag("object_eye_frame_flag")?,
            tilted: self.flag("upright_tilted_flag")?,
            lattice: self.flag("lattice_flag")?,
            ground_textured,
            sphere_texture_mode,
            selected_texture,
            material_ambient: self.vec4("material_ambient")?,
            material_diffuse: self.vec4("material_diffuse")?,
            material_specular: self.vec4("material_specular")?,
            material_shininess: self.float("material_shininess")?,
            global_ambient: self.vec4("global_ambient")?,
            dir_ambient: self.vec4("directional_light_ambient")?,
            dir_diffuse: self.vec4("directional_light_diffuse")?,
            dir_specular: self.vec4("directional_light_specular")?,
            dir_direction: self.vec4("directional_light_direction")?.truncate(),
            pos_ambient: self.vec4("point_light_ambient")?,
            pos_diffuse: self.vec4("point_light_diffuse")?,
            pos_specular: self.vec4("point_light_specular")?,
            pos_position_eye: self.vec4("point_light_position_eye")?.truncate(),
            const_att: self.float("point_const_att")?,
            linear_att: self.float("point_linear_att")?,
            quad_att: self.float("point_quad_att")?,
            spot_destination_eye: self.vec4("spotlight_destination_eye")?.truncate(),
            spot_exponent: self.float("spotlight_exponent")?,
            spot_cutoff_cos: self.float("spotlight_cutoff_angle")?.to_radians().cos(),
            fog_mode: self.float("fog_flag")? as i32,
            fog_start: self.float("fog_linear_start")?,
            fog_end: self.float("fog_linear_end")?,
            fog_density: self.float("fog_density")?,
            fog_color: self.vec4("fog_color")?,
            elapsed_s: self.float("elapsed_time")? / 1000.0,
        })
    }

    fn binding(&self, name: &str) -> Option<&Binding> {
        self.attributes.iter().find(|b| b.name == name)
    }

    /// Fetch one vertex's worth of an attribute, padded to vec4 with
    /// (0, 0, 0, 1).
    fn fetch(
        &self,
        buffer: &[f32],
        binding: &Binding,
        index: usize,
    ) -> Result<Vec4, PreviewError> {
        let start = binding.offset + index * binding.components;
        let end = start + binding.components;
        if end > buffer.len() {
            return Err(PreviewError::AttributeOutOfRange(binding.name.clone()));
        }
        let mut out = [0.0, 0.0, 0.0, 1.0];
        out[..binding.components].copy_from_slice(&buffer[start..end]);
        Ok(Vec4::from_array(out))
    }

    fn shade_vertices(
        &self,
        params: &DrawParams,
        count: usize,
    ) -> Result<Vec<Shaded>, PreviewError> {
        let bound = self.bound.ok_or(PreviewError::NoBufferBound)?;
        let buffer = self
            .buffers
            .get(&bound)
            .ok_or(PreviewError::MissingBuffer(bound))?;

        let position = self
            .binding("position")
            .ok_or(PreviewError::AttributeUnbound("position"))?;
        let color = self
            .binding("color")
            .ok_or(PreviewError::AttributeUnbound("color"))?;
        let normal = self.binding("normal");
        let texcoord = self.binding("texcoord");
        let velocity = self.binding("velocity");

        let mut shaded = Vec::with_capacity(count);
        for index in 0..count {
            let mut object = self.fetch(buffer, position, index)?.truncate();
            let base_color = self.fetch(buffer, color, index)?;
            let mut alive = true;

            if params.fireworks {
                let velocity = velocity.ok_or(PreviewError::AttributeUnbound("velocity"))?;
                let v = self.fetch(buffer, velocity, index)?.truncate();
                let t = params.elapsed_s;
                object += v * t + Vec3::new(0.0, 0.5 * GRAVITY * t * t, 0.0);
                alive = object.y >= PARTICLE_MIN_Y;
            }

            let eye4 = params.model_view * object.extend(1.0);
            let eye = eye4.truncate();

            let lit_color = if params.fireworks || !params.lit {
                base_color
            } else {
                let normal = normal.ok_or(PreviewError::AttributeUnbound("normal"))?;
                let n = params.normal_matrix * self.fetch(buffer, normal, index)?.truncate();
                light_vertex(params, eye, n)
            };

            let uv = match texcoord {
                Some(binding) => {
                    let t = self.fetch(buffer, binding, index)?;
                    Vec2::new(t.x, t.y)
                }
                None => Vec2::ZERO,
            };

            shaded.push(Shaded {
                clip: params.projection * eye4,
                eye,
                color: lit_color,
                uv,
                object,
                alive,
            });
        }
        Ok(shaded)
    }

    fn to_screen(&self, clip: Vec4) -> Option<(Vec2, f32)> {
        if clip.w < W_EPS {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x + 1.0) * 0.5 * (self.width as f32 - 1.0);
        let y = (1.0 - ndc.y) * 0.5 * (self.height as f32 - 1.0);
        Some((Vec2::new(x, y), ndc.z))
    }

    fn fill_triangle(&mut self, params: &DrawParams, tri: &[Shaded; 3]) {
        let Some((s0, z0)) = self.to_screen(tri[0].clip) else {
            return;
        };
        let Some((s1, z1)) = self.to_screen(tri[1].clip) else {
            return;
        };
        let Some((s2, z2)) = self.to_screen(tri[2].clip) else {
            return;
        };

        let area = edge(s0, s1, s2);
        if area.abs() < f32::EPSILON {
            return;
        }

        let min_x = s0.x.min(s1.x).min(s2.x).floor().max(0.0) as usize;
        let max_x = (s0.x.max(s1.x).max(s2.x).ceil() as usize).min(self.width - 1);
        let min_y = s0.y.min(s1.y).min(s2.y).floor().max(0.0) as usize;
        let max_y = (s0.y.max(s1.y).max(s2.y).ceil() as usize).min(self.height - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                // Signed-area normalization accepts either winding.
                let w0 = edge(s1, s2, p) / area;
                let w1 = edge(s2, s0, p) / area;
                let w2 = edge(s0, s1, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let depth = w0 * z0 + w1 * z1 + w2 * z2;
                let color = w0 * tri[0].color + w1 * tri[1].color + w2 * tri[2].color;
                let uv = w0 * tri[0].uv + w1 * tri[1].uv + w2 * tri[2].uv;
                let object = w0 * tri[0].object + w1 * tri[1].object + w2 * tri[2].object;
                let eye = w0 * tri[0].eye + w1 * tri[1].eye + w2 * tri[2].eye;
                if let Some(shaded) = shade_fragment(params, color, uv, object, eye) {
                    self.write_fragment(x, y, depth, shaded);
                }
            }
        }
    }

    fn draw_segment(&mut self, params: &DrawParams, a: &Shaded, b: &Shaded, width: f32) {
        let Some((sa, za)) = self.to_screen(a.clip) else {
            return;
        };
        let Some((sb, zb)) = self.to_screen(b.clip) else {
            return;
        };

        // Bresenham with a square brush sized to the line width.
        let half = (width / 2.0).floor() as isize;
        let (mut x0, mut y0) = (sa.x.round() as isize, sa.y.round() as isize);
        let (x1, y1) = (sb.x.round() as isize, sb.y.round() as isize);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let steps = dx.max(-dy).max(1) as f32;
        let mut step = 0.0f32;

        loop {
            let t = step / steps;
            let depth = za + (zb - za) * t;
            let color = a.color.lerp(b.color, t);
            let uv = a.uv.lerp(b.uv, t);
            let object = a.object.lerp(b.object, t);
            let eye = a.eye.lerp(b.eye, t);
            if let Some(shaded) = shade_fragment(params, color, uv, object, eye) {
                self.plot_block(x0, y0, half, depth, shaded);
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
            step += 1.0;
        }
    }

    fn draw_point(&mut self, vertex: &Shaded) {
        if !vertex.alive {
            return;
        }
        let Some((s, z)) = self.to_screen(vertex.clip) else {
            return;
        };
        let half = (self.point_size / 2.0).floor() as isize;
        // Fireworks bypass fog and textures; points carry their color.
        self.plot_block(s.x.round() as isize, s.y.round() as isize, half, z, vertex.color);
    }

    fn plot_block(&mut self, cx: isize, cy: isize, half: isize, depth: f32, color: Vec4) {
        for y in (cy - half)..=(cy + half) {
            for x in (cx - half)..=(cx + half) {
                if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
                    self.write_fragment(x as usize, y as usize, depth, color);
                }
            }
        }
    }

    fn write_fragment(&mut self, x: usize, y: usize, depth: f32, color: Vec4) {
        let idx = y * self.width + x;
        // Depth test stays on; the masks only gate writes.
        if depth >= self.depth[idx] {
            return;
        }
        if self.color_mask {
            let out = match self.blend {
                BlendMode::Opaque => color,
                BlendMode::Alpha => {
                    let dst = self.color[idx];
                    let a = color.w;
                    (color.truncate() * a + dst.truncate() * (1.0 - a))
                        .extend(a + dst.w * (1.0 - a))
                }
            };
            self.color[idx] = out.clamp(Vec4::ZERO, Vec4::ONE);
        }
        if self.depth_mask {
            self.depth[idx] = depth;
        }
    }
}

fn edge(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Gouraud lighting for one vertex in eye space.
fn light_vertex(p: &DrawParams, eye_pos: Vec3, normal_eye: Vec3) -> Vec4 {
    let n = normal_eye.normalize_or_zero();
    let v = (-eye_pos).normalize_or_zero();

    let mut color = p.global_ambient * p.material_ambient;

    // Directional light: `direction` is the travel direction of the light.
    let l = (-p.dir_direction).normalize_or_zero();
    color += blinn_phong(
        p,
        n,
        v,
        l,
        p.dir_ambient,
        p.dir_diffuse,
        p.dir_specular,
        1.0,
    );

    // Positional light, as a point source or a spotlight.
    let to_light = p.pos_position_eye - eye_pos;
    let dist = to_light.length();
    if dist > 0.0 {
        let l = to_light / dist;
        let att = 1.0 / (p.const_att + p.linear_att * dist + p.quad_att * dist * dist);
        let spot = if p.point_source {
            1.0
        } else {
            spot_factor(p, eye_pos)
        };
        color += blinn_phong(
            p,
            n,
            v,
            l,
            p.pos_ambient,
            p.pos_diffuse,
            p.pos_specular,
            att * spot,
        );
    }

    color.w = p.material_diffuse.w;
    color
}

#[allow(clippy::too_many_arguments)]
fn blinn_phong(
    p: &DrawParams,
    n: Vec3,
    v: Vec3,
    l: Vec3,
    ambient: Vec4,
    diffuse: Vec4,
    specular: Vec4,
    scale: f32,
) -> Vec4 {
    let n_dot_l = n.dot(l);
    let mut color = ambient * p.material_ambient;
    if n_dot_l > 0.0 {
        color += n_dot_l * diffuse * p.material_diffuse;
        let h = (l + v).normalize_or_zero();
        let spec = n.dot(h).max(0.0).powf(p.material_shininess);
        color += spec * specular * p.material_specular;
    }
    color * scale
}

/// Spotlight falloff for a fragment position in eye space.
fn spot_factor(p: &DrawParams, eye_pos: Vec3) -> f32 {
    let axis = (p.spot_destination_eye - p.pos_position_eye).normalize_or_zero();
    let to_fragment = (eye_pos - p.pos_position_eye).normalize_or_zero();
    let cos_angle = to_fragment.dot(axis);
    if cos_angle < p.spot_cutoff_cos {
        0.0
    } else {
        cos_angle.max(0.0).powf(p.spot_exponent)
    }
}

/// Per-fragment texturing, lattice discard, and fog. Returns `None` when
/// the fragment is discarded.
fn shade_fragment(
    params: &DrawParams,
    color: Vec4,
    uv: Vec2,
    object: Vec3,
    eye: Vec3,
) -> Option<Vec4> {
    let mut color = color;
    let mut lattice_uv = uv;

    if params.floor && params.ground_textured {
        if let Some(texture) = &params.selected_texture {
            let texel = texture.sample(uv.x, uv.y);
            color = (color.truncate() * texel.truncate()).extend(color.w);
        }
    }

    if params.sphere && params.sphere_texture_mode > 0 {
        let basis = if params.eye_frame { eye } else { object };
        if let Some(texture) = &params.selected_texture {
            if params.sphere_texture_mode == 1 {
                // Contour stripes along one generated coordinate.
                let s = if params.slanted {
                    1.5 * (basis.x + basis.y + basis.z)
                } else {
                    2.5 * basis.x
                };
                let texel = texture.sample(s, 0.0);
                color = (color.truncate() * texel.truncate()).extend(color.w);
                lattice_uv = Vec2::new(s, 0.0);
            } else {
                // Checkerboard over latitude/longitude coordinates.
                let q = if params.tilted {
                    Mat3::from_rotation_z(45f32.to_radians()) * basis
                } else {
                    basis
                };
                let r = q.length().max(f32::EPSILON);
                let u = 0.5 + q.z.atan2(q.x) / TAU;
                let v = 0.5 + (q.y / r).clamp(-1.0, 1.0).asin() / PI;
                let texel = texture.sample(u, v);
                color = (color.truncate() * texel.truncate()).extend(color.w);
                lattice_uv = Vec2::new(u, v);
            }
        }
    }

    if params.lattice && (params.floor || params.sphere) {
        let fu = (lattice_uv.x * LATTICE_CELLS).rem_euclid(1.0);
        let fv = (lattice_uv.y * LATTICE_CELLS).rem_euclid(1.0);
        if fu < LATTICE_HOLE && fv < LATTICE_HOLE {
            return None;
        }
    }

    Some(fog_blend(params, eye, color))
}

fn fog_blend(p: &DrawParams, eye: Vec3, color: Vec4) -> Vec4 {
    let d = eye.length();
    let factor = match p.fog_mode {
        1 => (p.fog_end - d) / (p.fog_end - p.fog_start),
        2 => (-p.fog_density * d).exp(),
        3 => (-(p.fog_density * d) * (p.fog_density * d)).exp(),
        _ => return color,
    }
    .clamp(0.0, 1.0);
    p.fog_color
        .truncate()
        .lerp(color.truncate(), factor)
        .extend(color.w)
}

impl RenderBackend for PreviewBackend {
    type Error = PreviewError;

    fn has_uniform(&self, name: &str) -> bool {
        KNOWN_UNIFORMS.contains(&name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        KNOWN_ATTRIBUTES.contains(&name)
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), PreviewError> {
        if !self.has_uniform(name) {
            return Err(PreviewError::UnknownUniform(name.to_string()));
        }
        self.uniforms.insert(name.to_string(), value);
        Ok(())
    }

    fn upload_buffer(&mut self, id: BufferId, data: &[f32]) -> Result<(), PreviewError> {
        self.buffers.insert(id.0, data.to_vec());
        Ok(())
    }

    fn upload_texture(
        &mut self,
        unit: u8,
        width: usize,
        height: usize,
        rgba: &[u8],
    ) -> Result<(), PreviewError> {
        self.textures.insert(
            unit,
            TextureData {
                width,
                height,
                rgba: rgba.to_vec(),
            },
        );
        Ok(())
    }

    fn bind_buffer(&mut self, id: BufferId) -> Result<(), PreviewError> {
        if !self.buffers.contains_key(&id.0) {
            return Err(PreviewError::MissingBuffer(id.0));
        }
        self.bound = Some(id.0);
        Ok(())
    }

    fn set_attribute(
        &mut self,
        name: &str,
        components: usize,
        offset: usize,
    ) -> Result<(), PreviewError> {
        if !self.has_attribute(name) {
            return Err(PreviewError::UnknownAttribute(name.to_string()));
        }
        if self.bound.is_none() {
            return Err(PreviewError::NoBufferBound);
        }
        self.attributes.push(Binding {
            name: name.to_string(),
            components,
            offset,
        });
        Ok(())
    }

    fn clear_attributes(&mut self) -> Result<(), PreviewError> {
        self.attributes.clear();
        Ok(())
    }

    fn draw(&mut self, primitive: Primitive, count: usize) -> Result<(), PreviewError> {
        let params = self.draw_params()?;
        let vertices = self.shade_vertices(&params, count)?;

        match primitive {
            Primitive::Triangles => {
                for chunk in vertices.chunks_exact(3) {
                    let mut tri = [chunk[0], chunk[1], chunk[2]];
                    if !params.smooth {
                        // Flat shading takes the last vertex's lit color.
                        tri[0].color = tri[2].color;
                        tri[1].color = tri[2].color;
                    }
                    if self.polygon_mode == PolygonMode::Line {
                        let width = self.line_width;
                        self.draw_segment(&params, &tri[0], &tri[1], width);
                        self.draw_segment(&params, &tri[1], &tri[2], width);
                        self.draw_segment(&params, &tri[2], &tri[0], width);
                    } else {
                        self.fill_triangle(&params, &tri);
                    }
                }
            }
            Primitive::Lines => {
                for pair in vertices.chunks_exact(2) {
                    let width = self.line_width;
                    self.draw_segment(&params, &pair[0], &pair[1], width);
                }
            }
            Primitive::Points => {
                for vertex in &vertices {
                    self.draw_point(vertex);
                }
            }
        }
        Ok(())
    }

    fn set_depth_mask(&mut self, enabled: bool) -> Result<(), PreviewError> {
        self.depth_mask = enabled;
        Ok(())
    }

    fn set_color_mask(&mut self, enabled: bool) -> Result<(), PreviewError> {
        self.color_mask = enabled;
        Ok(())
    }

    fn set_blend(&mut self, mode: BlendMode) -> Result<(), PreviewError> {
        self.blend = mode;
        Ok(())
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<(), PreviewError> {
        self.polygon_mode = mode;
        Ok(())
    }

    fn set_clear_color(&mut self, rgba: Vec4) -> Result<(), PreviewError> {
        self.clear_color = rgba;
        Ok(())
    }

    fn set_line_width(&mut self, width: f32) -> Result<(), PreviewError> {
        self.line_width = width;
        Ok(())
    }

    fn set_point_size(&mut self, size: f32) -> Result<(), PreviewError> {
        self.point_size = size;
        Ok(())
    }

    fn clear_frame(&mut self) -> Result<(), PreviewError> {
        self.color.fill(self.clear_color);
        self.depth.fill(f32::INFINITY);
        Ok(())
    }

    fn present(&mut self) -> Result<(), PreviewError> {
        self.frames += 1;
        log::debug!("presented frame {}", self.frames);
        Ok(())
    }
}
