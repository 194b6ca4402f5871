use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use crate::error::{Result, SketchError};

const PLACEHOLDER_PIXEL: [u8; 4] = [255, 255, 255, 255];

/// Creates a texture and starts loading `url` into it.
///
/// A 1x1 white pixel is uploaded immediately so the sampler is always
/// complete. The image replaces it once the browser has decoded it; a failed
/// load only logs a warning and leaves the placeholder bound.
pub fn load_texture(gl: &GL, url: &str) -> Result<WebGlTexture> {
    let texture = gl
        .create_texture()
        .ok_or_else(|| SketchError::Buffer("create_texture returned null".into()))?;

    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        1,
        1,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        Some(&PLACEHOLDER_PIXEL[..]),
    )?;
    set_sampling(gl);
    gl.bind_texture(GL::TEXTURE_2D, None);

    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));

    let onload = {
        let gl = gl.clone();
        let texture = texture.clone();
        let image = image.clone();
        let url = url.to_string();
        Closure::once_into_js(move || {
            gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
            let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
                GL::TEXTURE_2D,
                0,
                GL::RGBA as i32,
                GL::RGBA,
                GL::UNSIGNED_BYTE,
                &image,
            );
            set_sampling(&gl);
            gl.bind_texture(GL::TEXTURE_2D, None);
            match uploaded {
                Ok(()) => log::debug!(
                    "texture {} loaded ({}x{})",
                    url,
                    image.natural_width(),
                    image.natural_height()
                ),
                Err(err) => log::warn!("texture {} upload failed: {:?}", url, err),
            }
        })
    };

    let onerror = {
        let url = url.to_string();
        Closure::once_into_js(move |_event: JsValue| {
            log::warn!("texture {} failed to load; keeping placeholder", url);
        })
    };

    image.set_onload(Some(onload.unchecked_ref()));
    image.set_onerror(Some(onerror.unchecked_ref()));
    image.set_src(url);

    Ok(texture)
}

fn set_sampling(gl: &GL) {
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
}
