//! Annotation rendering and terminal styling for frex.
//!
//! The pipeline for one example is: collect roles and build a [`RoleColorMap`], resolve the
//! annotation spans with a [`SpanMerger`], then render the resulting segments as HTML or ANSI
//! markup. The same overlap rule applies to token-indexed summary annotations.

#![warn(missing_docs)]

mod example;
mod markup;
mod merge;
mod palette;
mod terminal;

pub use example::{RenderedDocument, example_color_map, render_example, render_summary};
pub use markup::{
    MarkupFormat, RenderOptions, highlight_roles_in_text, legend, render, render_tokens,
};
pub use merge::{AnnotationIssue, MergedSpans, Segment, Span, SpanMerger, TRIGGER_ROLE};
pub use palette::{FALLBACK, PALETTE, RoleColor, RoleColorMap, TRIGGER_SLOT, color_map_for};
pub use terminal::{
    Highlighter, background, colors, dim, error, header, rule, sanitize, subheader, success,
    warning,
};
