//! Searchable fields and the groups that gate them.

use std::fmt;

use frex_config::FieldBoosts;
use serde::Serialize;

/// A searchable field of the index, in fixed query order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Frame name.
    FrameName,
    /// Frame gloss.
    FrameGloss,
    /// Frame definition.
    FrameDefinition,
    /// Report document text.
    ReportText,
    /// Source document text.
    SourceText,
    /// Annotated role names.
    Roles,
    /// Secondary summary text.
    Summary,
}

impl SearchField {
    /// Every field, in query order.
    pub const ALL: [Self; 7] = [
        Self::FrameName,
        Self::FrameGloss,
        Self::FrameDefinition,
        Self::ReportText,
        Self::SourceText,
        Self::Roles,
        Self::Summary,
    ];

    /// Field name in the index schema.
    pub fn name(self) -> &'static str {
        match self {
            Self::FrameName => "frame_name",
            Self::FrameGloss => "frame_gloss",
            Self::FrameDefinition => "frame_definition",
            Self::ReportText => "report_text",
            Self::SourceText => "source_text",
            Self::Roles => "roles",
            Self::Summary => "summary",
        }
    }

    /// The group that gates this field.
    pub fn group(self) -> FieldGroup {
        match self {
            Self::FrameName | Self::FrameGloss | Self::FrameDefinition => FieldGroup::Frames,
            Self::ReportText | Self::SourceText => FieldGroup::Text,
            Self::Roles => FieldGroup::Roles,
            Self::Summary => FieldGroup::Summaries,
        }
    }

    /// Configured boost for this field.
    pub fn boost(self, boosts: &FieldBoosts) -> f32 {
        match self {
            Self::FrameName => boosts.frame_name,
            Self::FrameGloss => boosts.frame_gloss,
            Self::FrameDefinition => boosts.frame_definition,
            Self::ReportText => boosts.report_text,
            Self::SourceText => boosts.source_text,
            Self::Roles => boosts.roles,
            Self::Summary => boosts.summary,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A toggleable group of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    /// Frame identity: name, gloss, definition.
    Frames,
    /// Body text: report and source.
    Text,
    /// Annotated roles.
    Roles,
    /// Secondary summaries.
    Summaries,
}

/// Group toggles for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldGroups {
    /// Search frame identity fields.
    pub frames: bool,
    /// Search body text fields.
    pub text: bool,
    /// Search the roles field.
    pub roles: bool,
    /// Search the summary field.
    pub summaries: bool,
}

impl FieldGroups {
    /// Every group enabled.
    pub fn all() -> Self {
        Self {
            frames: true,
            text: true,
            roles: true,
            summaries: true,
        }
    }

    /// Returns true if no toggle is set.
    pub fn is_empty(&self) -> bool {
        !(self.frames || self.text || self.roles || self.summaries)
    }

    /// Returns true if `group` is toggled on.
    pub fn contains(&self, group: FieldGroup) -> bool {
        match group {
            FieldGroup::Frames => self.frames,
            FieldGroup::Text => self.text,
            FieldGroup::Roles => self.roles,
            FieldGroup::Summaries => self.summaries,
        }
    }

    /// Fields to query, in fixed order. With no toggle set, every field is active.
    pub fn active_fields(&self) -> Vec<SearchField> {
        if self.is_empty() {
            return SearchField::ALL.to_vec();
        }
        SearchField::ALL
            .into_iter()
            .filter(|field| self.contains(field.group()))
            .collect()
    }
}
