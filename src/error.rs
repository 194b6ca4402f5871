//! Error types for sketch setup and rendering.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SketchError>;

/// Errors raised while building or driving a sketch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SketchError {
    #[error("DOM error: {0}")]
    Dom(String),

    #[error("rendering context unavailable: {0}")]
    Context(String),

    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    #[error("program link failed: {0}")]
    ProgramLink(String),

    #[error("buffer allocation failed: {0}")]
    Buffer(String),

    #[error("rendering context lost")]
    ContextLost,

    #[error("scheduler error: {0}")]
    Scheduler(String),

    #[error("mesh not prepared: {0}")]
    MeshNotPrepared(u32),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("JavaScript error: {0}")]
    Js(String),
}

/// Errors produced while reading sketch options.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown variant `{0}` (expected `basic` or `progress`)")]
    UnknownVariant(String),

    #[error("invalid boolean for `{key}`: `{value}`")]
    InvalidBool { key: &'static str, value: String },

    #[error("invalid number for `{key}`: `{value}`")]
    InvalidNumber { key: &'static str, value: String },

    #[error("unknown log level `{0}`")]
    UnknownLogLevel(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SketchError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SketchError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SketchError> for wasm_bindgen::JsValue {
    fn from(err: SketchError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
