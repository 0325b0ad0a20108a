use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::block::{Block, LinkTarget, List, Span};
use crate::config::Config;
use crate::lesson::{Lesson, LessonSection, Source};

/// Label of the link to a lesson source
const OPEN_SOURCE_LABEL: &str = "פתח מקור";

/// Convert blocks to an HTML fragment
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    if blocks.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str("<div");
    push_class(&config.html.wrapper_class, &mut out);
    out.push_str(">\n");

    for block in blocks {
        emit_block(block, config, &mut out);
    }

    out.push_str("</div>\n");
    out
}

/// Convert a whole lesson page to HTML: the rendered body followed by the
/// lesson's plain-text sections, its sources and its status notice.
pub fn lesson_to_html(lesson: &Lesson, config: &Config) -> String {
    let sections = lesson.sections();
    if sections.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str("<article>\n");
    for section in &sections {
        emit_section(section, config, &mut out);
    }
    out.push_str("</article>\n");
    out
}

fn emit_section(section: &LessonSection<'_>, config: &Config, out: &mut String) {
    out.push_str("<section");
    push_class(&format!("lesson-{}", section.kind()), out);
    out.push_str(">\n");
    if !section.title().is_empty() {
        wrap("h2", section.title(), out);
        out.push('\n');
    }

    match section {
        LessonSection::Body(blocks) => out.push_str(&blocks_to_html(blocks, config)),
        LessonSection::Explanation(text) => {
            wrap("p", text, out);
            out.push('\n');
        }
        LessonSection::Steps(items) => text_list_to_html("ol", items, config, out),
        LessonSection::Objectives(items)
        | LessonSection::CommonMistakes(items)
        | LessonSection::PracticeTips(items)
        | LessonSection::SafetyWarnings(items) => text_list_to_html("ul", items, config, out),
        LessonSection::Sources(sources) => {
            for source in *sources {
                source_to_html(source, config, out);
            }
        }
        LessonSection::Notice(notice) => {
            wrap("p", notice.message(), out);
            out.push('\n');
        }
    }

    out.push_str("</section>\n");
}

fn text_list_to_html(tag: &str, items: &[String], config: &Config, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if let Some(class) = &config.html.list_class {
        push_class(class, out);
    }
    out.push_str(">\n");

    for item in items {
        wrap("li", item, out);
        out.push('\n');
    }

    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn source_to_html(source: &Source, config: &Config, out: &mut String) {
    out.push_str("<div class=\"source\">\n");
    wrap("strong", source.title(), out);
    out.push('\n');
    if let Some(publisher) = &source.publisher {
        wrap("div", publisher, out);
        out.push('\n');
    }
    if let Some(url) = &source.url {
        out.push_str("<a href=\"");
        out.push_str(&encode_double_quoted_attribute(url));
        out.push('"');
        push_attr("target", &config.links.external_target, out);
        push_attr("rel", &config.links.external_rel, out);
        if let Some(class) = &config.links.class {
            push_class(class, out);
        }
        out.push('>');
        out.push_str(&encode_text(OPEN_SOURCE_LABEL));
        out.push_str("</a>\n");
    }
    if let Some(notes) = &source.notes {
        wrap("p", notes, out);
        out.push('\n');
    }
    out.push_str("</div>\n");
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            // The parser only produces levels 1-3
            let tag = format!("h{}", (*level).clamp(1, 6));
            out.push('<');
            out.push_str(&tag);
            out.push('>');
            spans_to_html(content, config, out);
            out.push_str("</");
            out.push_str(&tag);
            out.push_str(">\n");
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, config, out);
            out.push_str("</p>\n");
        }
        Block::Blockquote { content } => {
            out.push_str("<blockquote>");
            spans_to_html(content, config, out);
            out.push_str("</blockquote>\n");
        }
        Block::List(list) => list_to_html(list, config, out),
    }
}

fn spans_to_html(spans: &[Span], config: &Config, out: &mut String) {
    for span in spans {
        span_to_html(span, config, out);
    }
}

fn span_to_html(span: &Span, config: &Config, out: &mut String) {
    match span {
        Span::Text { text } => out.push_str(&encode_text(text)),
        Span::Bold { text } => wrap("strong", text, out),
        Span::Italic { text } => wrap("em", text, out),
        Span::Code { text } => wrap("code", text, out),
        Span::Link { label, url, target } => {
            out.push_str("<a href=\"");
            out.push_str(&encode_double_quoted_attribute(url));
            out.push('"');
            if *target == LinkTarget::External {
                push_attr("target", &config.links.external_target, out);
                push_attr("rel", &config.links.external_rel, out);
            }
            if let Some(class) = &config.links.class {
                push_class(class, out);
            }
            out.push('>');
            out.push_str(&encode_text(label));
            out.push_str("</a>");
        }
    }
}

fn list_to_html(list: &List, config: &Config, out: &mut String) {
    out.push_str("<ul");
    if let Some(class) = &config.html.list_class {
        push_class(class, out);
    }
    out.push_str(">\n");

    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(&item.content, config, out);
        out.push_str("</li>\n");
    }

    out.push_str("</ul>\n");
}

fn wrap(tag: &str, text: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&encode_text(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_class(class: &str, out: &mut String) {
    push_attr("class", class, out);
}

fn push_attr(name: &str, value: &str, out: &mut String) {
    if value.is_empty() {
        return;
    }
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}
