//! Rendering painted segments as HTML or ANSI terminal markup.

use std::{borrow::Cow, collections::BTreeMap, iter};

use frex_config::ThemeName;
use frex_data::TokenAnnotation;
use html_escape::{encode_double_quoted_attribute, encode_quoted_attribute};

use crate::{
    RoleColor, RoleColorMap, Segment, Span, SpanMerger, TRIGGER_ROLE,
    terminal::{background, colors, sanitize},
};

/// Target markup language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkupFormat {
    /// HTML with inline styles, tooltips and subscript role labels.
    #[default]
    Html,
    /// 24-bit ANSI backgrounds with dimmed role labels.
    Terminal,
}

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Paint spans. When false the output is the escaped text alone.
    pub highlight: bool,
    /// Which half of each palette entry to use.
    pub theme: ThemeName,
    /// Output markup.
    pub format: MarkupFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight: true,
            theme: ThemeName::Light,
            format: MarkupFormat::Html,
        }
    }
}

/// Renders character-indexed segments over `text`.
pub fn render(
    text: &str,
    segments: &[Segment],
    colors: &RoleColorMap,
    options: &RenderOptions,
) -> String {
    if !options.highlight {
        return plain(text, options).into_owned();
    }

    let bounds = char_boundaries(text);
    let slice = |start: usize, end: usize| {
        let last = bounds.len() - 1;
        &text[bounds[start.min(last)]..bounds[end.min(last)]]
    };

    let mut out = String::with_capacity(text.len() * 2);
    for segment in segments {
        let range = segment.range();
        let piece = slice(range.start, range.end);
        match segment {
            Segment::Plain { .. } => out.push_str(&plain(piece, options)),
            Segment::Highlight(span) => out.push_str(&painted(piece, span, colors, true, options)),
        }
    }
    out
}

/// Renders a token sequence with token-indexed annotations. Tokens are joined by spaces.
///
/// Overlaps resolve as for character spans: the earliest-starting annotation wins and later
/// overlapping ones are dropped. Definitions come from `definitions` by role name.
pub fn render_tokens(
    tokens: &[String],
    annotations: &[TokenAnnotation],
    colors: &RoleColorMap,
    definitions: &BTreeMap<String, String>,
    options: &RenderOptions,
) -> String {
    if !options.highlight {
        return plain(&tokens.join(" "), options).into_owned();
    }

    let spans = annotations
        .iter()
        .map(|annotation| Span {
            start: annotation.start_token,
            end: annotation.end_token,
            role: annotation.role.clone(),
            role_definition: definitions.get(&annotation.role).cloned(),
            is_trigger: false,
        })
        .collect();
    let merged = SpanMerger::new(tokens.len()).paint(spans);

    merged
        .segments
        .iter()
        .map(|segment| {
            let range = segment.range();
            let piece = tokens[range].join(" ");
            match segment {
                Segment::Plain { .. } => plain(&piece, options).into_owned(),
                Segment::Highlight(span) => painted(&piece, span, colors, true, options),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A role name found in prose, as a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Mention<'a> {
    /// First byte.
    start: usize,
    /// One past the last byte.
    end: usize,
    /// Role mentioned.
    role: &'a str,
}

/// Highlights mentions of known role names in free text, such as a frame definition.
///
/// A mention is a whole-word, case-sensitive occurrence of a role name that begins with an
/// uppercase letter. Mentions are taken in order of position; at equal positions the longer
/// role wins, and mentions overlapping an earlier one are dropped.
pub fn highlight_roles_in_text(
    text: &str,
    role_definitions: &BTreeMap<String, String>,
    colors: &RoleColorMap,
    options: &RenderOptions,
) -> String {
    if !options.highlight {
        return plain(text, options).into_owned();
    }

    let mentions = find_mentions(text, role_definitions.keys().map(String::as_str));
    let mut out = String::with_capacity(text.len() * 2);
    let mut cursor = 0;
    for mention in mentions {
        out.push_str(&plain(&text[cursor..mention.start], options));
        let span = Span {
            start: mention.start,
            end: mention.end,
            role: mention.role.to_string(),
            role_definition: role_definitions.get(mention.role).cloned(),
            is_trigger: false,
        };
        out.push_str(&painted(
            &text[mention.start..mention.end],
            &span,
            colors,
            false,
            options,
        ));
        cursor = mention.end;
    }
    out.push_str(&plain(&text[cursor..], options));
    out
}

/// A line of role names painted in their own colors, trigger first.
pub fn legend(colors: &RoleColorMap, options: &RenderOptions) -> String {
    let trigger = Span {
        start: 0,
        end: 0,
        role: TRIGGER_ROLE.to_string(),
        role_definition: None,
        is_trigger: true,
    };
    let mut items = vec![painted(&trigger.role, &trigger, colors, false, options)];
    for (role, _) in colors.iter() {
        let span = Span {
            start: 0,
            end: 0,
            role: role.to_string(),
            role_definition: None,
            is_trigger: false,
        };
        items.push(painted(role, &span, colors, false, options));
    }
    items.join(" ")
}

/// Finds non-overlapping role mentions, sorted by position.
fn find_mentions<'a>(text: &str, roles: impl Iterator<Item = &'a str>) -> Vec<Mention<'a>> {
    let mut candidates = Vec::new();
    for role in roles {
        if !role.chars().next().is_some_and(char::is_uppercase) {
            continue;
        }
        for (start, _) in text.match_indices(role) {
            let end = start + role.len();
            let before = text[..start].chars().next_back();
            let after = text[end..].chars().next();
            if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
                candidates.push(Mention { start, end, role });
            }
        }
    }
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut mentions = Vec::with_capacity(candidates.len());
    let mut last_end = 0;
    for mention in candidates {
        if mention.start >= last_end {
            last_end = mention.end;
            mentions.push(mention);
        }
    }
    mentions
}

/// Characters that continue a word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte offset of every character start, plus the text length.
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(iter::once(text.len()))
        .collect()
}

/// Escapes unpainted text for the output format.
fn plain<'t>(text: &'t str, options: &RenderOptions) -> Cow<'t, str> {
    match options.format {
        MarkupFormat::Html => encode_quoted_attribute(text),
        MarkupFormat::Terminal => sanitize(text),
    }
}

/// Wraps `text` in the role's color, with a tooltip and, if `labeled`, the role name.
fn painted(
    text: &str,
    span: &Span,
    colors: &RoleColorMap,
    labeled: bool,
    options: &RenderOptions,
) -> String {
    let color: RoleColor = if span.is_trigger {
        colors.trigger()
    } else {
        colors.get(&span.role)
    };
    let background_color = color.for_theme(options.theme);

    match options.format {
        MarkupFormat::Html => {
            let class = if span.is_trigger {
                "frex-trigger"
            } else {
                "frex-role"
            };
            let tooltip = span.role_definition.as_deref().unwrap_or(&span.role);
            let label = if labeled {
                format!("<sub>{}</sub>", encode_quoted_attribute(&span.role))
            } else {
                String::new()
            };
            format!(
                r#"<span class="{class}" style="background-color: {background_color}" title="{}" data-role="{}">{}{label}</span>"#,
                encode_double_quoted_attribute(tooltip),
                encode_double_quoted_attribute(&span.role),
                encode_quoted_attribute(text),
            )
        }
        MarkupFormat::Terminal => {
            let label = if labeled {
                format!("{}[{}]{}", colors::DIM, sanitize(&span.role), colors::RESET)
            } else {
                String::new()
            };
            let text = sanitize(text);
            match background(background_color) {
                Some(bg) => format!("{bg}{text}{}{label}", colors::RESET),
                None => format!("{text}{label}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use frex_data::AnnotationSpan;

    use super::*;
    use crate::{color_map_for, palette::FALLBACK};

    fn html() -> RenderOptions {
        RenderOptions::default()
    }

    fn definitions(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn the_cat_sat_html() {
        let text = "The cat sat.";
        let annotation = frex_data::Annotation {
            role: "Agent".into(),
            span: Some(AnnotationSpan::Single([4, 6])),
            role_definition: Some("The one who sits".into()),
            ..Default::default()
        };
        let trigger = frex_data::Trigger {
            text: None,
            start_char: 8,
            end_char: 10,
            start_token: None,
            end_token: None,
            frame: "Sitting".into(),
        };
        let merged = SpanMerger::for_text(text).merge(Some(&trigger), &[annotation]);
        let colors = color_map_for(["Agent"]);
        let out = render(text, &merged.segments, &colors, &html());

        assert!(out.starts_with("The "));
        assert!(out.ends_with("</span>."));
        assert!(out.contains(&format!(
            r#"<span class="frex-role" style="background-color: {}" title="The one who sits" data-role="Agent">cat<sub>Agent</sub></span>"#,
            colors.get("Agent").light
        )));
        assert!(out.contains(&format!(
            r#"<span class="frex-trigger" style="background-color: {}" title="Sitting" data-role="{TRIGGER_ROLE}">sat"#,
            colors.trigger().light
        )));
    }

    #[test]
    fn plain_runs_are_escaped() {
        let text = "a<b & \"c\" 'd'";
        let merged = SpanMerger::for_text(text).paint(Vec::new());
        let out = render(text, &merged.segments, &RoleColorMap::default(), &html());
        assert!(out.starts_with("a&lt;b &amp; &quot;c&quot; "));
        assert!(!out.contains('\''));
        assert!(!out.contains('<'));
    }

    #[test]
    fn highlight_disabled_is_escaped_text() {
        let text = "x < y";
        let merged = SpanMerger::for_text(text).paint(vec![Span {
            start: 0,
            end: 0,
            role: "X".into(),
            role_definition: None,
            is_trigger: false,
        }]);
        let options = RenderOptions {
            highlight: false,
            ..html()
        };
        assert_eq!(
            render(text, &merged.segments, &color_map_for(["X"]), &options),
            "x &lt; y"
        );
    }

    #[test]
    fn multibyte_text_slices_by_character() {
        let text = "café olé";
        let merged = SpanMerger::for_text(text).paint(vec![Span {
            start: 5,
            end: 7,
            role: "Word".into(),
            role_definition: None,
            is_trigger: false,
        }]);
        let options = RenderOptions {
            format: MarkupFormat::Terminal,
            ..html()
        };
        let out = render(text, &merged.segments, &color_map_for(["Word"]), &options);
        assert!(out.starts_with("café "));
        assert!(out.contains("olé"));
    }

    #[test]
    fn unknown_role_uses_fallback_color() {
        let text = "abc";
        let merged = SpanMerger::for_text(text).paint(vec![Span {
            start: 0,
            end: 2,
            role: "Ghost".into(),
            role_definition: None,
            is_trigger: false,
        }]);
        let out = render(text, &merged.segments, &RoleColorMap::default(), &html());
        assert!(out.contains(FALLBACK.light));
        assert!(out.contains(r#"title="Ghost""#));
    }

    #[test]
    fn tokens_join_with_spaces_and_first_wins() {
        let tokens: Vec<String> = ["Crews", "fought", "the", "big", "fire"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        let annotations = vec![
            TokenAnnotation {
                role: "Agent".into(),
                start_token: 0,
                end_token: 0,
                tokens: vec![],
            },
            TokenAnnotation {
                role: "Fire".into(),
                start_token: 2,
                end_token: 4,
                tokens: vec![],
            },
            TokenAnnotation {
                role: "Size".into(),
                start_token: 3,
                end_token: 3,
                tokens: vec![],
            },
        ];
        let colors = color_map_for(["Agent", "Fire", "Size"]);
        let defs = definitions(&[("Fire", "The blaze")]);
        let out = render_tokens(&tokens, &annotations, &colors, &defs, &html());

        assert!(out.contains(">Crews<sub>Agent</sub></span> fought <span"));
        assert!(out.contains(r#"title="The blaze" data-role="Fire">the big fire<sub>Fire</sub>"#));
        assert!(!out.contains("Size"));
    }

    #[test]
    fn tokens_without_highlight() {
        let tokens = vec!["a".to_string(), "<b>".to_string()];
        let options = RenderOptions {
            highlight: false,
            ..html()
        };
        let out = render_tokens(
            &tokens,
            &[],
            &RoleColorMap::default(),
            &BTreeMap::new(),
            &options,
        );
        assert_eq!(out, "a &lt;b&gt;");
    }

    #[test]
    fn role_mentions_are_whole_word_and_capitalized() {
        let defs = definitions(&[
            ("Agent", "Who acts"),
            ("Place", "Where"),
            ("Time", "When"),
            ("patient", "lowercase roles never match"),
        ]);
        let colors = color_map_for(defs.keys());
        let text = "An Agent moves to a Place; Agents and place and patient do not count.";
        let out = highlight_roles_in_text(text, &defs, &colors, &html());

        assert_eq!(out.matches("<span").count(), 2);
        assert!(out.contains(r#"title="Who acts" data-role="Agent">Agent</span>"#));
        assert!(out.contains(r#"data-role="Place">Place</span>;"#));
        assert!(out.contains("Agents and place and patient"));
    }

    #[test]
    fn longer_role_wins_at_same_position() {
        let defs = definitions(&[("Body", "short"), ("Body_part", "long")]);
        let mentions = find_mentions("The Body_part hurts", defs.keys().map(String::as_str));
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].role, "Body_part");
    }

    #[test]
    fn mentions_ignore_word_fragments() {
        let mentions = find_mentions("Placement of Place", ["Place"].into_iter());
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].start, 13);
    }

    #[test]
    fn terminal_format_uses_ansi_backgrounds() {
        let options = RenderOptions {
            format: MarkupFormat::Terminal,
            ..html()
        };
        let text = "hot fire";
        let merged = SpanMerger::for_text(text).paint(vec![Span {
            start: 4,
            end: 7,
            role: "Fire".into(),
            role_definition: None,
            is_trigger: false,
        }]);
        let out = render(text, &merged.segments, &color_map_for(["Fire"]), &options);
        assert!(out.starts_with("hot \x1b[48;2;"));
        assert!(out.contains("fire\x1b[0m"));
        assert!(out.contains("[Fire]"));
    }

    #[test]
    fn terminal_format_neutralizes_escapes_in_text() {
        let options = RenderOptions {
            format: MarkupFormat::Terminal,
            ..html()
        };
        let text = "a\x1b]0;x\x07 fire\x1b[2J";
        let fire_start = text.find("fire").unwrap();
        let merged = SpanMerger::for_text(text).paint(vec![Span {
            start: fire_start,
            end: text.chars().count() - 1,
            role: "Fire".into(),
            role_definition: None,
            is_trigger: false,
        }]);
        let out = render(text, &merged.segments, &color_map_for(["Fire"]), &options);
        assert!(out.starts_with("a\u{fffd}]0;x\u{fffd} \x1b[48;2;"));
        assert!(out.contains("fire\u{fffd}[2J\x1b[0m"));
        assert!(!out.contains("\x1b[2J"));
        assert!(!out.contains('\x07'));
    }

    #[test]
    fn legend_lists_trigger_then_roles() {
        let colors = color_map_for(["B", "A"]);
        let options = RenderOptions {
            format: MarkupFormat::Terminal,
            ..html()
        };
        let out = legend(&colors, &options);
        let trigger_at = out.find(TRIGGER_ROLE).unwrap();
        let a_at = out.find('A').unwrap();
        let b_at = out.find('B').unwrap();
        assert!(trigger_at < a_at && a_at < b_at);
    }
}
