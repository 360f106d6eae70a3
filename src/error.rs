// error.rs - Engine errors
//
// Simulation never fails. Errors only come from config parsing and
// DOM lookup on the web side.

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing element #{0}")]
    MissingElement(String),

    #[error("2d context unavailable")]
    ContextUnavailable,

    #[error("js error: {0}")]
    Js(String),
}

impl EngineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for EngineError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<EngineError> for wasm_bindgen::JsValue {
    fn from(err: EngineError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(EngineError::config("x").to_string().starts_with("config error:"));
        assert_eq!(
            EngineError::MissingElement("fireworks".into()).to_string(),
            "missing element #fireworks"
        );
    }

    #[test]
    fn json_errors_convert() {
        let err: EngineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("config json:"));
    }
}
