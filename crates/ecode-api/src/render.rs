//! Markdown rendering of resolved error-code lists.

use ecode_core::{DocumentationOptions, ErrorCodeDescription};

/// Render `entries` as a heading line followed by one bullet per entry.
///
/// Property-bound entries render as `- "Property": Code`, object-level ones
/// as `- Code`; a description, when present, follows as ` - Description`.
pub fn render_error_codes(
    entries: &[ErrorCodeDescription],
    options: &DocumentationOptions,
) -> String {
    let mut out = options.heading.clone();
    for entry in entries {
        out.push_str(&format!("\n- {entry}"));
    }
    out
}
