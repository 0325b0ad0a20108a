use crate::block::{Block, List, ListItem};
use crate::inline::parse_inline;

/// Parse markup text into a list of blocks
pub fn parse(markup: &str) -> Vec<Block> {
    let markup = markup.trim_matches(is_space);
    if markup.is_empty() {
        return Vec::new();
    }

    let state = markup
        .lines()
        .fold(ParseState::default(), |mut state, line| {
            process_line(line, &mut state);
            state
        });

    let blocks = state.finish();
    log::trace!("parsed {} blocks", blocks.len());
    blocks
}

#[derive(Default)]
struct ParseState {
    blocks: Vec<Block>,
    // Bullet texts waiting for the list to close; parsed on flush
    pending_items: Vec<String>,
}

impl ParseState {
    fn flush_list(&mut self) {
        if self.pending_items.is_empty() {
            return;
        }
        let items = self
            .pending_items
            .drain(..)
            .map(|text| ListItem {
                content: parse_inline(&text),
            })
            .collect();
        self.blocks.push(Block::List(List { items }));
    }

    fn push(&mut self, block: Block) {
        self.flush_list();
        self.blocks.push(block);
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_list();
        self.blocks
    }
}

fn process_line(raw: &str, state: &mut ParseState) {
    let line = raw.trim_end_matches(is_space);

    // Blank lines close lists
    if line.is_empty() {
        state.flush_list();
        return;
    }

    if let Some(quote) = blockquote_text(line) {
        state.push(Block::Blockquote {
            content: parse_inline(quote),
        });
        return;
    }

    if let Some((level, text)) = heading(line) {
        state.push(Block::Heading {
            level,
            content: parse_inline(text),
        });
        return;
    }

    if let Some(item) = list_item_text(line) {
        state.pending_items.push(item.to_string());
        return;
    }

    state.push(Block::Paragraph {
        content: parse_inline(line),
    });
}

/// `> quote`: one `>` and at most one following whitespace character are dropped
fn blockquote_text(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(is_space).strip_prefix('>')?;
    Some(strip_one_whitespace(rest))
}

/// `# Title` through `### Title`; deeper markers are not headings
fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=3).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(is_space) {
        return None;
    }
    // Level is at most 3 here
    Some((level as u8, rest.trim_start_matches(is_space)))
}

/// `- item` or `• item`, optionally indented
fn list_item_text(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(is_space);
    let rest = rest
        .strip_prefix('-')
        .or_else(|| rest.strip_prefix('•'))?;
    if !rest.starts_with(is_space) {
        return None;
    }
    Some(rest.trim_start_matches(is_space))
}

fn strip_one_whitespace(text: &str) -> &str {
    let mut chars = text.chars();
    match chars.next() {
        Some(ch) if is_space(ch) => chars.as_str(),
        _ => text,
    }
}

/// Whitespace as content authors' editors treat it: Unicode white space plus
/// the byte-order mark, but not NEL (U+0085)
fn is_space(ch: char) -> bool {
    ch == '\u{feff}' || (ch != '\u{85}' && ch.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Span;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            content: vec![Span::text(text)],
        }
    }

    fn list(items: &[&str]) -> Block {
        Block::List(List {
            items: items
                .iter()
                .map(|text| ListItem {
                    content: vec![Span::text(*text)],
                })
                .collect(),
        })
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\n\t\n")]
    fn blank_input_has_no_blocks(#[case] input: &str) {
        assert_eq!(parse(input), vec![]);
    }

    #[test]
    fn single_heading() {
        assert_eq!(
            parse("# Title"),
            vec![Block::Heading {
                level: 1,
                content: vec![Span::text("Title")],
            }]
        );
    }

    #[rstest]
    #[case("## Kata", 2)]
    #[case("###   Kumite", 3)]
    #[case("#\tKihon", 1)]
    fn heading_levels(#[case] input: &str, #[case] level: u8) {
        let blocks = parse(input);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Heading { level: got, content } => {
                assert_eq!(*got, level);
                assert_eq!(content.len(), 1);
                assert!(!content[0].plain_text().starts_with(char::is_whitespace));
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[rstest]
    #[case("#### Too deep")]
    #[case("#NoSpace")]
    #[case("##")]
    fn not_headings_fall_through(#[case] input: &str) {
        assert_eq!(parse(input), vec![paragraph(input)]);
    }

    #[test]
    fn list_items_collapse() {
        assert_eq!(parse("- a\n- b"), vec![list(&["a", "b"])]);
    }

    #[test]
    fn bullet_marker_and_indent() {
        assert_eq!(
            parse("• rei\n  - kiai\n-   oss"),
            vec![list(&["rei", "kiai", "oss"])]
        );
    }

    #[rstest]
    #[case("-dash")]
    #[case("---")]
    fn dash_without_space_is_paragraph(#[case] input: &str) {
        assert_eq!(parse(input), vec![paragraph(input)]);
    }

    #[test]
    fn blank_line_splits_lists() {
        assert_eq!(
            parse("- a\n\n- b"),
            vec![list(&["a"]), list(&["b"])]
        );
    }

    #[test]
    fn paragraph_closes_list() {
        assert_eq!(
            parse("- a\n- b\nafter"),
            vec![list(&["a", "b"]), paragraph("after")]
        );
    }

    #[test]
    fn heading_and_quote_close_list() {
        assert_eq!(
            parse("- a\n# H\n- b\n> q"),
            vec![
                list(&["a"]),
                Block::Heading {
                    level: 1,
                    content: vec![Span::text("H")],
                },
                list(&["b"]),
                Block::Blockquote {
                    content: vec![Span::text("q")],
                },
            ]
        );
    }

    #[test]
    fn blank_lines_never_merge_paragraphs() {
        assert_eq!(
            parse("one\n\ntwo\nthree"),
            vec![paragraph("one"), paragraph("two"), paragraph("three")]
        );
    }

    #[rstest]
    #[case("> Oss", "Oss")]
    #[case(">Oss", "Oss")]
    #[case(">  Oss", " Oss")]
    #[case("   > Oss", "Oss")]
    #[case(">> nested", "> nested")]
    fn blockquotes(#[case] input: &str, #[case] text: &str) {
        assert_eq!(
            parse(input),
            vec![Block::Blockquote {
                content: vec![Span::text(text)],
            }]
        );
    }

    #[test]
    fn empty_blockquote_has_no_spans() {
        assert_eq!(parse(">"), vec![Block::Blockquote { content: vec![] }]);
    }

    #[test]
    fn crlf_and_trailing_whitespace() {
        assert_eq!(
            parse("# Dojo  \r\nfirst line \t\r\n- item\r\n"),
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![Span::text("Dojo")],
                },
                paragraph("first line"),
                list(&["item"]),
            ]
        );
    }

    #[test]
    fn paragraph_keeps_indent_after_first_line() {
        assert_eq!(
            parse("first\n  indented"),
            vec![paragraph("first"), paragraph("  indented")]
        );
    }

    #[test]
    fn list_items_parse_inline() {
        assert_eq!(
            parse("- **Yoi** then [bow](/lesson/rei)"),
            vec![Block::List(List {
                items: vec![ListItem {
                    content: vec![
                        Span::bold("Yoi"),
                        Span::text(" then "),
                        Span::link("bow", "/lesson/rei"),
                    ],
                }],
            })]
        );
    }

    #[rstest]
    #[case("**")]
    #[case("[")]
    #[case("# [x](")]
    #[case("- `")]
    #[case("> *")]
    #[case("•")]
    fn malformed_input_never_panics(#[case] input: &str) {
        let blocks = parse(input);
        assert_eq!(blocks.len(), 1);
    }

    #[rstest]
    #[case("\u{feff}#\u{a0}x", 1, "x")]
    #[case("\u{feff}# Heian Shodan", 1, "Heian Shodan")]
    #[case("#\u{feff}Title", 1, "Title")]
    #[case("##\u{3000}Zenkutsu dachi", 2, "Zenkutsu dachi")]
    fn byte_order_mark_counts_as_space(#[case] input: &str, #[case] level: u8, #[case] text: &str) {
        assert_eq!(
            parse(input),
            vec![Block::Heading {
                level,
                content: vec![Span::text(text)],
            }]
        );
    }

    #[test]
    fn leading_byte_order_mark_keeps_following_list() {
        assert_eq!(
            parse("\u{feff}# Heian Shodan\n- Yoi\n\u{feff}- Rei"),
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![Span::text("Heian Shodan")],
                },
                list(&["Yoi", "Rei"]),
            ]
        );
    }

    #[test]
    fn byte_order_mark_between_quote_marker_and_text() {
        assert_eq!(
            parse(">\u{feff}Oss\u{feff}"),
            vec![Block::Blockquote {
                content: vec![Span::text("Oss")],
            }]
        );
    }

    #[rstest]
    #[case("#\u{85}x")]
    #[case("-\u{85}item")]
    fn next_line_is_not_space(#[case] input: &str) {
        assert_eq!(parse(input), vec![paragraph(input)]);
    }

    #[test]
    fn next_line_is_kept_at_input_edges() {
        assert_eq!(parse("\u{85}kata\u{85}"), vec![paragraph("\u{85}kata\u{85}")]);
    }

    #[derive(Debug, Clone)]
    enum Line {
        Blank(String),
        Item(String),
        Heading(String),
        Quote(String),
        Para(String),
    }

    impl Line {
        fn text(&self) -> &str {
            match self {
                Line::Blank(s) | Line::Item(s) | Line::Heading(s) | Line::Quote(s) | Line::Para(s) => s,
            }
        }
    }

    const WORD: &str = "[a-z*`\\[\\]()/#> ]{0,6}[a-z*`\\[\\]()/]";

    fn markup_line() -> impl Strategy<Value = Line> {
        prop_oneof![
            prop_oneof![Just(String::new()), Just(" \t".to_string()), Just("\u{feff}".to_string())]
                .prop_map(Line::Blank),
            ("[ \t\u{feff}]{0,2}[-•][ \t\u{feff}]{1,2}", WORD)
                .prop_map(|(marker, word)| Line::Item(format!("{marker}{word}"))),
            ("#{1,3}[ \t\u{a0}\u{feff}]{1,2}", WORD)
                .prop_map(|(marker, word)| Line::Heading(format!("{marker}{word}"))),
            ("[ \t]{0,2}>", "[a-z*`#> -]{0,8}")
                .prop_map(|(marker, word)| Line::Quote(format!("{marker}{word}"))),
            ("[a-z*`(/\\[]", "[a-z*`\\[\\]()/# -]{0,8}")
                .prop_map(|(first, word)| Line::Para(format!("{first}{word}"))),
        ]
    }

    /// Every non-blank line outside a list is a block; each run of list lines is one block
    fn expected_block_count(lines: &[Line]) -> usize {
        let mut count = 0;
        let mut in_list = false;
        for line in lines {
            match line {
                Line::Blank(_) => in_list = false,
                Line::Item(_) => {
                    if !in_list {
                        count += 1;
                    }
                    in_list = true;
                }
                _ => {
                    count += 1;
                    in_list = false;
                }
            }
        }
        count
    }

    proptest! {
        #[test]
        fn prop_any_text_parses(s in any::<String>()) {
            let blocks = parse(&s);
            prop_assert!(blocks.len() <= s.lines().count());
        }

        #[test]
        fn prop_block_count_follows_line_kinds(lines in prop::collection::vec(markup_line(), 0..24)) {
            let source = lines.iter().map(Line::text).collect::<Vec<_>>().join("\n");
            let blocks = parse(&source);
            prop_assert_eq!(blocks.len(), expected_block_count(&lines));

            let lists = blocks.iter().filter(|block| matches!(block, Block::List(_))).count();
            let items = lines.iter().filter(|line| matches!(line, Line::Item(_))).count();
            let parsed_items: usize = blocks
                .iter()
                .map(|block| match block {
                    Block::List(list) => list.items.len(),
                    _ => 0,
                })
                .sum();
            prop_assert_eq!(parsed_items, items);
            prop_assert!(lists <= items);
        }
    }
}
