pub mod calculator_result;
pub mod enums;
pub mod exam;
pub mod medication;
pub mod protocol;
pub mod study;

pub use calculator_result::*;
pub use enums::*;
pub use exam::*;
pub use medication::*;
pub use protocol::*;
pub use study::*;

/// Encode a string list as a JSON array for a TEXT column.
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".into())
}

/// Decode a JSON array TEXT column into a string list.
/// Malformed stored values decode as empty rather than failing the row.
pub fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
