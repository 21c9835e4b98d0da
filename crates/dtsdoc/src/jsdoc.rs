use crate::model::JsTag;

/// Structured representation of a parsed JSDoc comment.
#[derive(Debug, Default, Clone)]
pub struct ParsedJsDoc {
    /// Description text before any tags.
    pub description: Option<String>,
    /// Tags in source order, including `@internal`.
    pub tags: Vec<JsTag>,
    /// Whether the comment contained `@internal`.
    pub is_internal: bool,
}

impl ParsedJsDoc {
    /// Returns `true` if the comment does not contain any meaningful data.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.tags.is_empty()
    }
}

/// Parse a JSDoc block (without comment delimiters) into structured data.
///
/// Tag payloads keep their line breaks and indentation, so an `@example`
/// followed by a fenced code block comes back exactly as written. A line
/// starting with `@` inside a fence does not open a new tag.
pub fn parse_jsdoc(raw: &str) -> ParsedJsDoc {
    let mut description_lines: Vec<&str> = Vec::new();
    let mut tags = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;
    let mut in_fence = false;

    for line in raw.lines().map(strip_gutter) {
        let trimmed = line.trim();
        if !in_fence {
            if let Some(rest) = trimmed.strip_prefix('@') {
                if let Some((name, payload)) = current.take() {
                    tags.push(finish_tag(name, &payload));
                }
                let (name, payload) = split_tag_payload(rest);
                current = Some((name.to_string(), vec![payload]));
                continue;
            }
        }
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
        }
        match current.as_mut() {
            Some((_, payload)) => payload.push(line),
            None => description_lines.push(line),
        }
    }
    if let Some((name, payload)) = current.take() {
        tags.push(finish_tag(name, &payload));
    }

    let is_internal = tags.iter().any(|tag| tag.name == "internal");
    ParsedJsDoc {
        description: join_trimmed(&description_lines),
        tags,
        is_internal,
    }
}

/// Removes the leading `*` gutter; lines without one are kept as written.
fn strip_gutter(line: &str) -> &str {
    let start = line.trim_start();
    let stripped = match start.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    };
    stripped.trim_end()
}

fn split_tag_payload(input: &str) -> (&str, &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let tag = parts.next().unwrap_or("");
    let payload = parts.next().unwrap_or("").trim();
    (tag, payload)
}

fn finish_tag(name: String, payload: &[&str]) -> JsTag {
    let tag = JsTag::new(name);
    match join_trimmed(payload) {
        Some(text) => tag.with_text(text),
        None => tag,
    }
}

fn join_trimmed(lines: &[&str]) -> Option<String> {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
