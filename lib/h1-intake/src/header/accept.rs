/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

/// Split a comma separated list, ignoring commas inside quoted strings.
///
/// Empty elements are dropped and every element is trimmed.
pub fn split_quoted_list(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut in_quote = false;
    let mut escaped = false;

    for (i, b) in value.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_quote => escaped = true,
            b'"' => in_quote = !in_quote,
            b',' if !in_quote => {
                push_item(&mut items, &value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_item(&mut items, &value[start..]);
    items
}

/// Split an Accept-Language value on every comma.
pub fn split_accept_languages(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    for s in value.split(',') {
        push_item(&mut items, s);
    }
    items
}

fn push_item(items: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() {
        items.push(s.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple() {
        assert_eq!(
            split_quoted_list("text/html, application/xhtml+xml,*/*;q=0.8"),
            ["text/html", "application/xhtml+xml", "*/*;q=0.8"]
        );
        assert!(split_quoted_list("").is_empty());
        assert_eq!(split_quoted_list(" , a ,, "), ["a"]);
    }

    #[test]
    fn quoted() {
        assert_eq!(
            split_quoted_list(r#"text/html;foo="a,b", text/plain"#),
            [r#"text/html;foo="a,b""#, "text/plain"]
        );
        assert_eq!(
            split_quoted_list(r#"a;x="q\",r", b"#),
            [r#"a;x="q\",r""#, "b"]
        );
    }

    #[test]
    fn languages() {
        assert_eq!(
            split_accept_languages("en-us,en;q=0.5, fr"),
            ["en-us", "en;q=0.5", "fr"]
        );
    }
}
