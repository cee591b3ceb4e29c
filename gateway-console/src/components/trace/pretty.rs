//! Payload formatting for hop headers and bodies.
//!
//! Payloads are untrusted backend text. Output of this module is always
//! HTML-escaped and may be injected as markup.

/// Indent structured text, keep anything else verbatim, then escape.
pub fn pretty_format(raw: &str) -> String {
    let formatted = serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| raw.to_string());
    escape_html(&formatted)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_is_indented() {
        assert_eq!(pretty_format(r#"{"a":1}"#), "{\n  &quot;a&quot;: 1\n}");
    }

    #[test]
    fn test_key_order_is_preserved() {
        let out = pretty_format(r#"{"z":1,"a":{"k":[1,2]}}"#);
        let z = out.find("z&quot;").unwrap();
        let a = out.find("a&quot;").unwrap();
        assert!(z < a, "keys must keep source order: {out}");
    }

    #[test]
    fn test_plain_text_is_kept() {
        assert_eq!(pretty_format("not json"), "not json");
    }

    #[test]
    fn test_markup_is_escaped_on_both_paths() {
        assert_eq!(
            pretty_format("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(
            pretty_format(r#"{"html":"<b>&</b>"}"#),
            "{\n  &quot;html&quot;: &quot;&lt;b&gt;&amp;&lt;/b&gt;&quot;\n}"
        );
    }

    #[test]
    fn test_truncated_json_is_kept_verbatim() {
        assert_eq!(pretty_format(r#"{"a":"#), "{&quot;a&quot;:");
    }
}
