//! Conflict resolution for labeled spans.
//!
//! Turns a flat list of possibly overlapping spans over a sequence of `len` units (characters
//! or tokens) into an ordered, non-overlapping list of segments covering `[0, len)`. A span
//! that starts inside an earlier painted span is dropped entirely.

use std::{fmt, ops::Range};

use frex_data::{Annotation, Trigger};
use tracing::warn;

/// Role label used for the frame trigger.
pub const TRIGGER_ROLE: &str = "Trigger";

/// A labeled, inclusive range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// First unit.
    pub start: usize,
    /// Last unit, inclusive.
    pub end: usize,
    /// Role label.
    pub role: String,
    /// Definition shown in the tooltip.
    pub role_definition: Option<String>,
    /// Painted with the trigger color.
    pub is_trigger: bool,
}

/// One run of the painted sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Unlabeled units in `[start, end)`.
    Plain {
        /// First unit.
        start: usize,
        /// One past the last unit.
        end: usize,
    },
    /// A painted span.
    Highlight(Span),
}

impl Segment {
    /// The half-open range of units covered.
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Plain { start, end } => *start..*end,
            Self::Highlight(span) => span.start..span.end + 1,
        }
    }
}

/// Why an annotation, or part of one, was not painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationIssue {
    /// The annotation has no span data.
    MissingSpan {
        /// Role of the annotation.
        role: String,
    },
    /// The span data has an unrecognized shape.
    MalformedSpan {
        /// Role of the annotation.
        role: String,
    },
    /// A span ends before it starts.
    Reversed {
        /// Role of the span.
        role: String,
        /// Declared start.
        start: usize,
        /// Declared end.
        end: usize,
    },
    /// A span starts at or past the end of the sequence.
    OutOfBounds {
        /// Role of the span.
        role: String,
        /// Declared start.
        start: usize,
        /// Sequence length.
        len: usize,
    },
}

impl fmt::Display for AnnotationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSpan { role } => write!(f, "annotation '{role}' has no span"),
            Self::MalformedSpan { role } => write!(f, "annotation '{role}' has a malformed span"),
            Self::Reversed { role, start, end } => {
                write!(f, "span of '{role}' ends before it starts ({start} > {end})")
            }
            Self::OutOfBounds { role, start, len } => {
                write!(f, "span of '{role}' starts at {start}, past the text length {len}")
            }
        }
    }
}

/// Painted segments plus the issues found on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedSpans {
    /// Ordered segments covering `[0, len)`.
    pub segments: Vec<Segment>,
    /// Annotations, or parts of them, that were skipped.
    pub issues: Vec<AnnotationIssue>,
}

/// Resolves spans over a sequence of fixed length.
#[derive(Debug, Clone, Copy)]
pub struct SpanMerger {
    /// Sequence length.
    len: usize,
}

impl SpanMerger {
    /// Creates a merger for a sequence of `len` units.
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    /// Creates a merger for the characters of `text`.
    pub fn for_text(text: &str) -> Self {
        Self::new(text.chars().count())
    }

    /// Expands annotations into spans, injects the trigger ahead of them, and paints.
    pub fn merge(&self, trigger: Option<&Trigger>, annotations: &[Annotation]) -> MergedSpans {
        let mut spans = Vec::with_capacity(annotations.len() + 1);
        let mut issues = Vec::new();

        if let Some(trigger) = trigger {
            spans.push(trigger_span(trigger));
        }
        for annotation in annotations {
            expand_annotation(annotation, &mut spans, &mut issues);
        }

        let segments = self.paint_checked(spans, &mut issues);
        MergedSpans { segments, issues }
    }

    /// Paints spans in the given priority order. Out-of-range spans are clamped or skipped.
    pub fn paint(&self, spans: Vec<Span>) -> MergedSpans {
        let mut issues = Vec::new();
        let segments = self.paint_checked(spans, &mut issues);
        MergedSpans { segments, issues }
    }

    /// Bounds-checks spans, then resolves overlaps first-by-start-order.
    fn paint_checked(&self, spans: Vec<Span>, issues: &mut Vec<AnnotationIssue>) -> Vec<Segment> {
        let mut spans: Vec<Span> = spans
            .into_iter()
            .filter_map(|span| self.clamp(span, issues))
            .collect();
        // Stable: equal starts keep insertion order, so the trigger wins ties.
        spans.sort_by_key(|span| span.start);

        let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
        let mut last_end = 0;
        for span in spans {
            if span.start < last_end {
                continue;
            }
            if span.start > last_end {
                segments.push(Segment::Plain {
                    start: last_end,
                    end: span.start,
                });
            }
            last_end = span.end + 1;
            segments.push(Segment::Highlight(span));
        }
        if last_end < self.len {
            segments.push(Segment::Plain {
                start: last_end,
                end: self.len,
            });
        }
        segments
    }

    /// Clamps a span's end to the sequence, or rejects it.
    fn clamp(&self, mut span: Span, issues: &mut Vec<AnnotationIssue>) -> Option<Span> {
        if span.start > span.end {
            warn!(role = %span.role, start = span.start, end = span.end, "skipping reversed span");
            issues.push(AnnotationIssue::Reversed {
                role: span.role,
                start: span.start,
                end: span.end,
            });
            return None;
        }
        if span.start >= self.len {
            warn!(
                role = %span.role,
                start = span.start,
                len = self.len,
                "skipping span past end of text"
            );
            issues.push(AnnotationIssue::OutOfBounds {
                role: span.role,
                start: span.start,
                len: self.len,
            });
            return None;
        }
        span.end = span.end.min(self.len - 1);
        Some(span)
    }
}

/// The span painted for a frame trigger.
fn trigger_span(trigger: &Trigger) -> Span {
    Span {
        start: trigger.start_char,
        end: trigger.end_char,
        role: TRIGGER_ROLE.to_string(),
        role_definition: (!trigger.frame.is_empty()).then(|| trigger.frame.clone()),
        is_trigger: true,
    }
}

/// Appends one span per range of `annotation`, or records why it has none.
fn expand_annotation(
    annotation: &Annotation,
    spans: &mut Vec<Span>,
    issues: &mut Vec<AnnotationIssue>,
) {
    let role = annotation.role.clone();
    let Some(span) = &annotation.span else {
        warn!(role = %role, "skipping annotation without span");
        issues.push(AnnotationIssue::MissingSpan { role });
        return;
    };
    let Some(ranges) = span.ranges() else {
        warn!(role = %role, "skipping annotation with malformed span");
        issues.push(AnnotationIssue::MalformedSpan { role });
        return;
    };
    spans.extend(ranges.into_iter().map(|(start, end)| Span {
        start,
        end,
        role: role.clone(),
        role_definition: annotation.role_definition.clone(),
        is_trigger: false,
    }));
}
