//! Rendering whole examples and their linked summaries.

use frex_data::{DocumentVersion, Example, SummaryKind, SummaryRecord};

use crate::{
    AnnotationIssue, RenderOptions, RoleColorMap, SpanMerger, color_map_for, render,
    render_tokens,
};

/// A rendered document and the annotations that could not be painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Markup in the requested format.
    pub markup: String,
    /// Skipped annotations.
    pub issues: Vec<AnnotationIssue>,
}

/// Colors for an example.
///
/// Covers the roles of both documents plus `extra_roles` (typically the frame's declared
/// roles and the linked summary's roles), so switching versions keeps every color in place.
pub fn example_color_map<I, S>(example: &Example, extra_roles: I) -> RoleColorMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut roles: Vec<String> = example.annotated_roles().into_iter().collect();
    roles.extend(extra_roles.into_iter().map(|r| r.as_ref().to_string()));
    color_map_for(roles)
}

/// Renders one version of an example with its trigger and role annotations.
pub fn render_example(
    example: &Example,
    version: DocumentVersion,
    colors: &RoleColorMap,
    options: &RenderOptions,
) -> RenderedDocument {
    let document = example.document(version);
    let merged = SpanMerger::for_text(&document.text)
        .merge(document.trigger.as_ref(), &document.annotations);
    RenderedDocument {
        markup: render(&document.text, &merged.segments, colors, options),
        issues: merged.issues,
    }
}

/// Renders a summary with its template role fillers.
pub fn render_summary(
    record: &SummaryRecord,
    kind: SummaryKind,
    colors: &RoleColorMap,
    options: &RenderOptions,
) -> String {
    render_tokens(
        &record.tokens(kind),
        &record.token_annotations(kind),
        colors,
        &record.role_definitions,
        options,
    )
}
