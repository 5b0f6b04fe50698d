use serde_json::Value;

/// Top-level content member excluded from semantic comparison. Edits that
/// touch only this member never warrant a new version number.
pub const EXAMPLES_FIELD: &str = "examples";

/// Compares two parsed schema content trees.
///
/// Both comparisons are structural: object member order and formatting are
/// irrelevant, values are compared deeply.
#[derive(Debug, Default)]
pub struct ContentDiffer;

impl ContentDiffer {
    pub fn new() -> Self {
        Self
    }

    /// Deep equality over the full content tree, examples included.
    pub fn structurally_equal(&self, a: &Value, b: &Value) -> bool {
        a == b
    }

    /// Deep equality with the top-level examples member excluded on both
    /// sides. Nested members named "examples" are semantic and still compare.
    pub fn structurally_equal_ignoring_examples(&self, a: &Value, b: &Value) -> bool {
        match (a.as_object(), b.as_object()) {
            (Some(left), Some(right)) => {
                let left_len = left.keys().filter(|k| *k != EXAMPLES_FIELD).count();
                let right_len = right.keys().filter(|k| *k != EXAMPLES_FIELD).count();
                if left_len != right_len {
                    return false;
                }
                left.iter()
                    .filter(|(key, _)| *key != EXAMPLES_FIELD)
                    .all(|(key, value)| right.get(key) == Some(value))
            }
            _ => a == b,
        }
    }
}
