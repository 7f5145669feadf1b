//! Locating the JSON object embedded in a free-text service reply.

/// Return the first top-level brace-delimited JSON object in `text`.
///
/// Scans from the first `{` tracking brace depth, with string and escape
/// awareness so braces inside string values don't unbalance the scan.
/// Returns `None` when no balanced object exists — the caller treats
/// that as a malformed response and falls back. No further leniency.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
