//! JSON extraction from free-form model text
//!
//! Models wrap the object they were asked for in prose or code fences. The
//! whole text is tried first, then each top-level balanced `{...}` span from
//! left to right. Objects nested inside a span are never tried on their own,
//! so a truncated selection stays unparseable.

use std::str::CharIndices;

use serde_json::Value;

/// Parse the first JSON value found in `text`
pub fn extract_json(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    find_json_spans(text).find_map(|span| serde_json::from_str(span).ok())
}

/// Top-level balanced brace spans in `text`, left to right.
///
/// Braces inside double-quoted strings within a span do not count toward
/// depth. A span that never closes yields nothing.
pub fn find_json_spans(text: &str) -> JsonSpans<'_> {
    JsonSpans {
        text,
        chars: text.char_indices(),
    }
}

/// Single-pass iterator returned by [`find_json_spans`]
pub struct JsonSpans<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
}

impl<'a> Iterator for JsonSpans<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let (start, _) = self.chars.by_ref().find(|(_, c)| *c == '{')?;

        let mut depth = 1usize;
        let mut in_string = false;
        let mut escaped = false;

        for (offset, c) in self.chars.by_ref() {
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
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&self.text[start..offset + c.len_utf8()]);
                    }
                }
                _ => {}
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        let value = extract_json(r#"{"name": "write_tweet", "args": {"subject": "cats"}}"#).unwrap();
        assert_eq!(value["name"], "write_tweet");
        assert_eq!(value["args"]["subject"], "cats");
    }

    #[test]
    fn test_json_surrounded_by_prose() {
        let text = "Sure! Here is the call:\n{\n  \"name\": \"write_article\",\n  \"args\": {\"subject\": \"AI\"}\n}\nLet me know if you need more.";
        let value = extract_json(text).unwrap();
        assert_eq!(value, json!({"name": "write_article", "args": {"subject": "AI"}}));
    }

    #[test]
    fn test_json_in_code_fence() {
        let text = "```json\n{\"name\": \"write_comic\", \"args\": {\"subject\": \"robots\"}}\n```";
        let value = extract_json(text).unwrap();
        assert_eq!(value["name"], "write_comic");
    }

    #[test]
    fn test_trailing_unrelated_braces_are_ignored() {
        // a greedy first-brace-to-last-brace match would swallow "{x}" and fail
        let text = r#"{"name": "write_tweet", "args": {"subject": "cats"}} and also {x}"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["name"], "write_tweet");
    }

    #[test]
    fn test_leading_non_json_braces_are_skipped() {
        let text = r#"Use the {name} field: {"name": "write_tweet", "args": {}}"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["name"], "write_tweet");
    }

    #[test]
    fn test_braces_inside_strings() {
        let text = r#"Result: {"name": "write_article", "args": {"subject": "the } character"}} done"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["args"]["subject"], "the } character");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = r#"ok {"name": "write_tweet", "args": {"subject": "say \"}\" loudly"}}"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["args"]["subject"], "say \"}\" loudly");
    }

    #[test]
    fn test_no_braces() {
        assert!(extract_json("I cannot help with that.").is_none());
    }

    #[test]
    fn test_unbalanced() {
        assert!(extract_json(r#"{"name": "write_tweet", "args": "#).is_none());
    }

    #[test]
    fn test_truncated_outer_is_not_json() {
        assert!(extract_json(r#"{"args": {"subject": "cats"}, "name": "write_tw"#).is_none());
    }

    #[test]
    fn test_nested_call_in_truncated_outer_is_ignored() {
        let text = r#"{"thought": {"name": "write_tweet", "args": {"subject": "cats"}}, "name": "write_article", "args": {"subj"#;
        assert!(extract_json(text).is_none());
    }

    #[test]
    fn test_nested_object_not_tried_alone() {
        // outer span is valid braces but invalid JSON; the inner object must not win
        let text = r#"{"name": write_article, "args": {"subject": "AI"}}"#;
        assert!(extract_json(text).is_none());
    }

    #[test]
    fn test_non_object_whole_text() {
        assert_eq!(extract_json(" 42 "), Some(json!(42)));
    }

    #[test]
    fn test_find_json_spans_order() {
        let spans: Vec<_> = find_json_spans(r#"a {"x": {"y": 1}} b {"z": 2} c {"open": 1"#).collect();
        assert_eq!(spans, vec![r#"{"x": {"y": 1}}"#, r#"{"z": 2}"#]);
    }

    #[test]
    fn test_multibyte_text() {
        let text = "Voilà → {\"name\": \"write_tweet\", \"args\": {\"subject\": \"café\"}} ✓";
        let value = extract_json(text).unwrap();
        assert_eq!(value["args"]["subject"], "café");
    }
}
