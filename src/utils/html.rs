use std::collections::HashSet;

/// Reduces an HTML fragment to its visible text using the ammonia library.
///
/// No tag is allowed through, `<script>` and `<style>` are dropped together
/// with their content, and runs of whitespace collapse to a single space.
/// Entities are decoded, so the result is plain text (`&amp;` becomes `&`).
pub fn strip_tags(input: &str) -> String {
    let escaped = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(input)
        .to_string();
    let text = html_escape::decode_html_entities(&escaped);

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
