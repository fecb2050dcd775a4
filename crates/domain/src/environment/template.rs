//! `{{name}}` references inside request templates
//!
//! Later test cases read captured values by embedding `{{key}}` in their
//! request path or body.

use std::ops::Range;

/// A `{{name}}` reference found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateReference {
    /// The key name (without `{{ }}`, trimmed).
    pub name: String,
    /// Byte range of the whole `{{...}}` in the template.
    pub span: Range<usize>,
}

/// Parses a template and returns every reference in order of appearance.
///
/// An unterminated `{{` ends parsing; everything after it is literal text.
///
/// ```
/// use keyprobe_domain::environment::parse_references;
///
/// let refs = parse_references("/key/{{identifier}}/v{{ key_version }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[1].name, "key_version");
/// ```
#[must_use]
pub fn parse_references(input: &str) -> Vec<TemplateReference> {
    let mut references = Vec::new();
    let mut offset = 0;

    while let Some(open) = input[offset..].find("{{") {
        let start = offset + open;
        let body_start = start + 2;
        let Some(close) = input[body_start..].find("}}") else {
            break;
        };
        let end = body_start + close + 2;

        let name = input[body_start..body_start + close].trim();
        if !name.is_empty() {
            references.push(TemplateReference {
                name: name.to_string(),
                span: start..end,
            });
        }
        offset = end;
    }

    references
}
