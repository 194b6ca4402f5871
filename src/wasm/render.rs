use std::collections::HashMap;

use js_sys::{Float32Array, Uint32Array};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlCanvasElement, Node, WebGl2RenderingContext as GL, WebGlBuffer,
    WebGlContextAttributes, WebGlProgram, WebGlShader, WebGlTexture, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use super::texture::load_texture;
use crate::camera::PerspectiveCamera;
use crate::error::{Result, SketchError};
use crate::scene::{Mesh, MeshId, Scene};
use crate::sketch::Surface;
use crate::uniforms::UniformValue;

/// GPU-side state for one prepared mesh.
struct GpuMesh {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    attributes: Vec<WebGlBuffer>,
    triangles: WebGlBuffer,
    triangle_count: i32,
    lines: WebGlBuffer,
    line_count: i32,
    projection_loc: Option<WebGlUniformLocation>,
    model_view_loc: Option<WebGlUniformLocation>,
    uniforms: HashMap<String, WebGlUniformLocation>,
    textures: HashMap<u32, WebGlTexture>,
}

/// WebGL2 canvas the sketch draws into.
pub struct WebGlSurface {
    canvas: HtmlCanvasElement,
    node: Node,
    gl: GL,
    pixel_ratio: f64,
    css_size: (f64, f64),
    meshes: HashMap<MeshId, GpuMesh>,
}

impl WebGlSurface {
    /// Creates a detached canvas with an antialiased, alpha-enabled context.
    pub fn new(document: &Document) -> Result<Self> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SketchError::Dom("created element is not a canvas".into()))?;

        let attrs = WebGlContextAttributes::new();
        attrs.set_antialias(true);
        attrs.set_alpha(true);
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &attrs)?
            .ok_or_else(|| SketchError::Context("WebGL2 not supported".into()))?
            .dyn_into()
            .map_err(|_| SketchError::Context("context is not WebGL2".into()))?;

        gl.enable(GL::DEPTH_TEST);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        let node: Node = canvas.clone().into();
        Ok(Self {
            canvas,
            node,
            gl,
            pixel_ratio: 1.0,
            css_size: (0.0, 0.0),
            meshes: HashMap::new(),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn apply_size(&self) {
        let (w, h) = self.css_size;
        self.canvas.set_width((w * self.pixel_ratio).floor().max(0.0) as u32);
        self.canvas.set_height((h * self.pixel_ratio).floor().max(0.0) as u32);
        let style = self.canvas.style();
        if let Err(err) = style
            .set_property("width", &format!("{}px", w))
            .and_then(|_| style.set_property("height", &format!("{}px", h)))
        {
            log::warn!("failed to set canvas style size: {:?}", err);
        }
    }

    fn upload(&self, target: u32, data: &js_sys::Object) -> Result<WebGlBuffer> {
        let buffer = self
            .gl
            .create_buffer()
            .ok_or_else(|| SketchError::Buffer("create_buffer returned null".into()))?;
        self.gl.bind_buffer(target, Some(&buffer));
        self.gl
            .buffer_data_with_array_buffer_view(target, data, GL::STATIC_DRAW);
        Ok(buffer)
    }

    fn attribute(
        &self,
        program: &WebGlProgram,
        name: &str,
        data: &[f32],
        size: i32,
    ) -> Result<Option<WebGlBuffer>> {
        let location = self.gl.get_attrib_location(program, name);
        if location < 0 {
            // optimised out by the shader compiler
            log::debug!("attribute `{}` unused by program", name);
            return Ok(None);
        }
        let buffer = self.upload(GL::ARRAY_BUFFER, &Float32Array::from(data))?;
        self.gl.enable_vertex_attrib_array(location as u32);
        self.gl
            .vertex_attrib_pointer_with_i32(location as u32, size, GL::FLOAT, false, 0, 0);
        Ok(Some(buffer))
    }

    fn delete(&self, gpu: GpuMesh) {
        let gl = &self.gl;
        gl.delete_program(Some(&gpu.program));
        gl.delete_vertex_array(Some(&gpu.vao));
        for buffer in gpu.attributes.iter().chain([&gpu.triangles, &gpu.lines]) {
            gl.delete_buffer(Some(buffer));
        }
        for texture in gpu.textures.values() {
            gl.delete_texture(Some(texture));
        }
    }
}

impl Surface for WebGlSurface {
    type Node = Node;

    fn node(&self) -> &Node {
        &self.node
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.css_size = (width, height);
        self.apply_size();
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.apply_size();
    }

    fn prepare(&mut self, mesh: &Mesh) -> Result<()> {
        let gl = &self.gl;
        let material = &mesh.material;
        let vert = compile_shader(gl, GL::VERTEX_SHADER, material.vertex_shader)?;
        let frag = compile_shader(gl, GL::FRAGMENT_SHADER, material.fragment_shader)?;
        let program = link_program(gl, &vert, &frag)?;
        gl.delete_shader(Some(&vert));
        gl.delete_shader(Some(&frag));

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| SketchError::Buffer("create_vertex_array returned null".into()))?;
        gl.bind_vertex_array(Some(&vao));

        let geometry = &mesh.geometry;
        let attributes = [
            self.attribute(&program, "position", &geometry.positions, 3)?,
            self.attribute(&program, "normal", &geometry.normals, 3)?,
            self.attribute(&program, "uv", &geometry.uvs, 2)?,
        ]
        .into_iter()
        .flatten()
        .collect();
        let lines = self.upload(
            GL::ELEMENT_ARRAY_BUFFER,
            &Uint32Array::from(geometry.wire_indices.as_slice()),
        )?;
        let triangles = self.upload(
            GL::ELEMENT_ARRAY_BUFFER,
            &Uint32Array::from(geometry.indices.as_slice()),
        )?;
        gl.bind_vertex_array(None);

        let mut uniforms = HashMap::new();
        let mut textures = HashMap::new();
        for (name, value) in material.uniforms.iter() {
            match gl.get_uniform_location(&program, name) {
                Some(loc) => {
                    uniforms.insert(name.to_string(), loc);
                }
                None => log::debug!("uniform `{}` unused by program", name),
            }
            if let UniformValue::Texture(tex) = value {
                textures.insert(tex.unit, load_texture(gl, &tex.url)?);
            }
        }

        let gpu = GpuMesh {
            projection_loc: gl.get_uniform_location(&program, "projectionMatrix"),
            model_view_loc: gl.get_uniform_location(&program, "modelViewMatrix"),
            program,
            vao,
            attributes,
            triangles,
            triangle_count: geometry.indices.len() as i32,
            lines,
            line_count: geometry.wire_indices.len() as i32,
            uniforms,
            textures,
        };
        if let Some(previous) = self.meshes.insert(mesh.id, gpu) {
            self.delete(previous);
        }
        Ok(())
    }

    fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()> {
        let gl = &self.gl;
        if gl.is_context_lost() {
            return Err(SketchError::ContextLost);
        }

        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        let view = camera.view_matrix();
        let projection = camera.projection_matrix().to_cols_array();

        for mesh in scene.meshes() {
            let gpu = self
                .meshes
                .get(&mesh.id)
                .ok_or(SketchError::MeshNotPrepared(mesh.id.0))?;

            gl.use_program(Some(&gpu.program));
            let model_view = (view * mesh.model_matrix()).to_cols_array();
            gl.uniform_matrix4fv_with_f32_array(gpu.projection_loc.as_ref(), false, &projection);
            gl.uniform_matrix4fv_with_f32_array(gpu.model_view_loc.as_ref(), false, &model_view);

            for (name, value) in mesh.material.uniforms.iter() {
                let Some(loc) = gpu.uniforms.get(name) else {
                    continue;
                };
                match value {
                    UniformValue::Float(v) => gl.uniform1f(Some(loc), *v),
                    UniformValue::Vec2([x, y]) => gl.uniform2f(Some(loc), *x, *y),
                    UniformValue::Texture(tex) => {
                        gl.active_texture(GL::TEXTURE0 + tex.unit);
                        gl.bind_texture(GL::TEXTURE_2D, gpu.textures.get(&tex.unit));
                        gl.uniform1i(Some(loc), tex.unit as i32);
                    }
                }
            }

            gl.bind_vertex_array(Some(&gpu.vao));
            if mesh.material.wireframe {
                gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&gpu.lines));
                gl.draw_elements_with_i32(GL::LINES, gpu.line_count, GL::UNSIGNED_INT, 0);
            } else {
                gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&gpu.triangles));
                gl.draw_elements_with_i32(GL::TRIANGLES, gpu.triangle_count, GL::UNSIGNED_INT, 0);
            }
        }
        gl.bind_vertex_array(None);
        Ok(())
    }

    fn release(&mut self) {
        let meshes: Vec<GpuMesh> = self.meshes.drain().map(|(_, gpu)| gpu).collect();
        if meshes.is_empty() {
            return;
        }
        let count = meshes.len();
        for gpu in meshes {
            self.delete(gpu);
        }
        log::debug!("released GPU resources for {} mesh(es)", count);
    }
}

impl Drop for WebGlSurface {
    fn drop(&mut self) {
        self.release();
    }
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| SketchError::ShaderCompile("create_shader returned null".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error".into());
        gl.delete_shader(Some(&shader));
        Err(SketchError::ShaderCompile(info))
    }
}

fn link_program(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| SketchError::ProgramLink("create_program returned null".into()))?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error".into());
        gl.delete_program(Some(&program));
        Err(SketchError::ProgramLink(info))
    }
}
