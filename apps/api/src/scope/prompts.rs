// Prompt text for the generate pipeline.
// Section headers here must match the ones `extract::sections` splits on.

/// System instruction sent alongside the scope prompt.
pub const SCOPE_SYSTEM: &str = "You are an assistant helping freelancers convert messy \
    project descriptions into a clear, professional project agreement. \
    Keep language neutral and client-facing. No emojis, no casual tone. \
    Output plain text only, never markdown headings or code fences.";

/// Scope prompt template.
/// Replace: {guardrails}, {deliverables_header}, {exclusions_header},
///          {summary_header}, {text}, {price}
pub const SCOPE_PROMPT_TEMPLATE: &str = r#"Convert the project description below into a project agreement.

Your job:
- Extract what is included and what is not included.
- Remove ambiguity and casual language.
- {guardrails}

Output ONLY in this structure, with each list item on its own line starting with "- ":

{deliverables_header}
- ...

{exclusions_header}
- ...

{summary_header}
(1-2 short paragraphs, derived only from the two lists above)

Rules:
- Each deliverable is a single concrete, observable commitment.
- If an item is unclear, conditional or out of scope, put it under {exclusions_header}
- Do not add new information.

Input:
{text}

Price (for reference only): {price}
"#;
