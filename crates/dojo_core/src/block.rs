use serde::Serialize;

/// Where a link leads once rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// In-app route or fragment (`/lesson/x`, `#steps`)
    Internal,
    /// Anything else, opened in a new browsing context
    External,
}

impl LinkTarget {
    /// Classify a link URL by its prefix.
    pub fn classify(url: &str) -> Self {
        if url.starts_with('/') || url.starts_with('#') {
            LinkTarget::Internal
        } else {
            LinkTarget::External
        }
    }
}

/// Inline text spans with formatting.
///
/// Spans never nest: the text inside bold, italic, code and link labels is
/// kept literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Span {
    Text { text: String },
    Bold { text: String },
    Italic { text: String },
    Code { text: String },
    Link {
        label: String,
        url: String,
        target: LinkTarget,
    },
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Span::Text { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span::Bold { text: text.into() }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Span::Italic { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Span::Code { text: text.into() }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Span::Link {
            label: label.into(),
            target: LinkTarget::classify(&url),
            url,
        }
    }

    /// Visible text of the span, without markup.
    pub fn plain_text(&self) -> &str {
        match self {
            Span::Text { text }
            | Span::Bold { text }
            | Span::Italic { text }
            | Span::Code { text } => text,
            Span::Link { label, .. } => label,
        }
    }
}

/// A single bullet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub content: Vec<Span>,
}

/// A run of consecutive bullet lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub items: Vec<ListItem>,
}

/// Block-level elements, one per source line (list lines collapse into one `List`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, content: Vec<Span> },
    Paragraph { content: Vec<Span> },
    List(List),
    Blockquote { content: Vec<Span> },
}

impl Block {
    /// Visible text of the block. List items are joined with newlines.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { content, .. }
            | Block::Paragraph { content }
            | Block::Blockquote { content } => spans_text(content),
            Block::List(list) => list
                .items
                .iter()
                .map(|item| spans_text(&item.content))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(Span::plain_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("/lesson/x", LinkTarget::Internal)]
    #[case("#steps", LinkTarget::Internal)]
    #[case("https://ex.com", LinkTarget::External)]
    #[case("mailto:sensei@dojo.example", LinkTarget::External)]
    #[case("lesson/x", LinkTarget::External)]
    fn classify_link(#[case] url: &str, #[case] expected: LinkTarget) {
        assert_eq!(LinkTarget::classify(url), expected);
    }

    #[test]
    fn plain_text_drops_markup() {
        let block = Block::Paragraph {
            content: vec![
                Span::bold("Kihon"),
                Span::text(" is "),
                Span::link("basics", "/terms"),
            ],
        };
        assert_eq!(block.plain_text(), "Kihon is basics");
    }

    #[test]
    fn list_plain_text_is_one_line_per_item() {
        let block = Block::List(List {
            items: vec![
                ListItem {
                    content: vec![Span::text("rei")],
                },
                ListItem {
                    content: vec![Span::code("kiai")],
                },
            ],
        });
        assert_eq!(block.plain_text(), "rei\nkiai");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&Span::link("go", "https://ex.com")).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"link","label":"go","url":"https://ex.com","target":"external"}"#
        );
    }
}
