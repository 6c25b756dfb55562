//! Extractors whose rejections render as JSON error bodies.

mod enhanced_json;
mod enhanced_path;
mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::validated_json::ValidateJson;

/// Keeps rejection details short and single-line.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    let lines = message.lines().take(2).collect::<Vec<_>>();
    lines.join(" ").chars().take(200).collect()
}
