// Shared prompt fragments and the template renderer.
// Each pipeline defines its own prompts.rs alongside it.

/// Placeholder rendered for an optional text field the caller left empty.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Placeholder rendered for an empty list.
pub const NONE: &str = "None";

/// Shared guardrail appended to every pipeline's instructions.
pub const NO_INVENTION_INSTRUCTION: &str = "\
Work only with what the user provided. \
Do not invent requirements, timelines, revisions, pricing, or payment terms. \
If something is unclear, say it is unclear instead of filling the gap.";

/// Returns the trimmed value, or `NOT_SPECIFIED` when absent or blank.
pub fn or_not_specified(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

/// Renders `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are inserted verbatim and never re-scanned, so user text
/// that happens to contain `{scope}` is not expanded. Braces that do not form a
/// known placeholder (e.g. JSON schema examples) are copied through unchanged.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
