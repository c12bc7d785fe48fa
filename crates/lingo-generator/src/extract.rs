use serde::de::DeserializeOwned;

/// Which JSON value a prompt asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
    Any,
}

impl JsonShape {
    fn opens_with(self, c: char) -> bool {
        match self {
            JsonShape::Array => c == '[',
            JsonShape::Object => c == '{',
            JsonShape::Any => c == '[' || c == '{',
        }
    }
}

/// Result of reading structured data out of free model text.
///
/// Transport failures are errors; a reply without usable JSON is `Unparsed`
/// and keeps the raw text so the caller can still show it.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    Parsed(T),
    Unparsed { raw: String },
}

impl<T> Extraction<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Extraction::Parsed(_))
    }

    pub fn parsed(self) -> Option<T> {
        match self {
            Extraction::Parsed(value) => Some(value),
            Extraction::Unparsed { .. } => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            Extraction::Parsed(_) => None,
            Extraction::Unparsed { raw } => Some(raw),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extraction<U> {
        match self {
            Extraction::Parsed(value) => Extraction::Parsed(f(value)),
            Extraction::Unparsed { raw } => Extraction::Unparsed { raw },
        }
    }
}

/// Index of the bracket closing the one opened at `start`, honouring JSON strings
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.pop() != Some(c) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// Every balanced `{...}` / `[...]` substring of `text`, in order of its opening bracket
pub fn json_candidates(text: &str, shape: JsonShape) -> impl Iterator<Item = &str> + '_ {
    text.char_indices()
        .filter(move |(_, c)| shape.opens_with(*c))
        .filter_map(move |(start, _)| balanced_end(text, start).map(|end| &text[start..=end]))
}

/// First balanced JSON value of the wanted shape
pub fn extract_json(text: &str, shape: JsonShape) -> Option<serde_json::Value> {
    json_candidates(text, shape).find_map(|candidate| serde_json::from_str(candidate).ok())
}

/// First balanced JSON value that deserializes into `T`
pub fn extract<T: DeserializeOwned>(text: &str, shape: JsonShape) -> Extraction<T> {
    match json_candidates(text, shape)
        .find_map(|candidate| serde_json::from_str::<T>(candidate).ok())
    {
        Some(value) => Extraction::Parsed(value),
        None => {
            tracing::warn!("No usable JSON {:?} in model reply ({} chars)", shape, text.len());
            Extraction::Unparsed {
                raw: text.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[test]
    fn finds_array_inside_prose_and_fences() {
        let text = "Sure! Here you go:\n```json\n[{\"word\": \"Haus\"}]\n```\nEnjoy.";
        assert_eq!(
            extract_json(text, JsonShape::Array),
            Some(json!([{"word": "Haus"}]))
        );
    }

    #[test]
    fn brackets_inside_strings_do_not_confuse_matching() {
        let text = r#"{"sentence": "Use ] and } carefully \" [", "ok": true} trailing }"#;
        assert_eq!(
            extract_json(text, JsonShape::Object),
            Some(json!({"sentence": "Use ] and } carefully \" [", "ok": true}))
        );
    }

    #[test]
    fn picks_first_balanced_value_not_greedy_span() {
        let text = r#"First {"a": 1} then {"b": 2}"#;
        assert_eq!(extract_json(text, JsonShape::Object), Some(json!({"a": 1})));
    }

    #[test]
    fn skips_unbalanced_or_invalid_candidates() {
        let text = r#"[draft {"a": oops} ] final: {"a": 2}"#;
        assert_eq!(extract_json(text, JsonShape::Object), Some(json!({"a": 2})));
    }

    #[test]
    fn shape_restricts_candidates() {
        let text = r#"{"items": [1, 2]}"#;
        assert_eq!(extract_json(text, JsonShape::Array), Some(json!([1, 2])));
        assert_eq!(
            extract_json(text, JsonShape::Any),
            Some(json!({"items": [1, 2]}))
        );
    }

    #[test]
    fn missing_json_is_none() {
        assert_eq!(extract_json("no structure here", JsonShape::Any), None);
        assert_eq!(extract_json("[1, 2", JsonShape::Array), None);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Entry {
        word: String,
    }

    #[test]
    fn typed_extraction_skips_wrong_shapes() {
        let text = r#"[1, 2] and then [{"word": "Baum"}]"#;
        assert_eq!(
            extract::<Vec<Entry>>(text, JsonShape::Array),
            Extraction::Parsed(vec![Entry {
                word: "Baum".into()
            }])
        );
    }

    #[test]
    fn typed_extraction_keeps_raw_text_on_failure() {
        let result = extract::<Vec<Entry>>("I cannot help with that.", JsonShape::Array);

        assert!(!result.is_parsed());
        assert_eq!(result.raw(), Some("I cannot help with that."));
    }
}
