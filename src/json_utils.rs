use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Type of a JSON node found by the structure scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Object,
    Array,
}

/// Coordinates of a JSON structure within a larger text, including nested children.
#[derive(Debug, Clone)]
pub struct ObjCoords {
    pub start: usize,
    pub end: usize, // inclusive index of the closing bracket/brace
    pub kind: NodeType,
    pub children: Vec<ObjCoords>,
}

impl ObjCoords {
    pub fn new(start: usize, end: usize, kind: NodeType, children: Vec<ObjCoords>) -> Self {
        Self { start, end, kind, children }
    }

    fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..=self.end]
    }
}

#[derive(Debug)]
struct Frame {
    start: usize,
    kind: NodeType,
    children: Vec<ObjCoords>,
}

/// Find all JSON object/array structures in the given text. Coordinates are byte indices.
#[instrument(target = "quiz_forge::json", skip(text), fields(text_len = text.len()))]
pub fn find_json_structures(text: &str) -> Vec<ObjCoords> {
    let bytes = text.as_bytes();
    let mut results: Vec<ObjCoords> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    let mut in_string = false;
    let mut escape = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escape {
                escape = false;
                continue;
            }
            match b {
                b'\\' => escape = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let closing = match b {
            b'"' => {
                in_string = true;
                None
            }
            b'{' => {
                stack.push(Frame { start: i, kind: NodeType::Object, children: Vec::new() });
                None
            }
            b'[' => {
                stack.push(Frame { start: i, kind: NodeType::Array, children: Vec::new() });
                None
            }
            b'}' => Some(NodeType::Object),
            b']' => Some(NodeType::Array),
            _ => None,
        };

        let Some(kind) = closing else { continue };
        // Unbalanced closers are dropped along with the frame they mismatch.
        if let Some(frame) = stack.pop() {
            if frame.kind == kind {
                let node = ObjCoords::new(frame.start, i, kind, frame.children);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => results.push(node),
                }
            }
        }
    }

    debug!(target: "quiz_forge::json", count = results.len(), "found root structures");
    results
}

/// Deserialize the first top-level structure in `text` that matches `T`.
///
/// Nested structures are never tried on their own: a wrapper that does not
/// match `T` is a mismatch even if something inside it would.
pub fn extract_first<T: DeserializeOwned>(text: &str) -> Option<T> {
    find_json_structures(text)
        .iter()
        .find_map(|node| serde_json::from_str::<T>(node.slice(text)).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        x: i32,
    }

    #[test]
    fn finds_nested_structures() {
        let roots = find_json_structures(r#"pre {"a": [1, {"b": 2}]} post [3]"#);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].kind, NodeType::Object);
        assert_eq!(roots[0].children.len(), 1);
        assert_eq!(roots[0].children[0].children.len(), 1);
        assert_eq!(roots[1].kind, NodeType::Array);
    }

    #[test]
    fn ignores_brackets_inside_strings() {
        let roots = find_json_structures(r#"{"text": "a } and ] and \" {"}"#);
        assert_eq!(roots.len(), 1);
        assert!(roots[0].children.is_empty());
    }

    #[test]
    fn extract_first_skips_prose_and_fences() {
        let text = "Here you go:\n```json\n{\"x\": 7}\n```\nand another {\"x\": 8}";
        assert_eq!(extract_first::<Item>(text), Some(Item { x: 7 }));
    }

    #[test]
    fn extract_first_ignores_nested_matches() {
        let text = r#"{"wrapper": {"x": 3}}"#;
        assert_eq!(extract_first::<Item>(text), None);
        assert_eq!(extract_first::<Item>(r#"see {"wrapper": 1} then {"x": 4}"#), Some(Item { x: 4 }));
    }

    #[test]
    fn extract_first_none_without_match() {
        assert_eq!(extract_first::<Item>("no json at all"), None);
        assert_eq!(extract_first::<Item>(r#"{"y": 1}"#), None);
    }
}
