use crate::block::Span;

/// Parse one line of text into spans.
///
/// At every position the patterns are tried in a fixed order (link, bold,
/// code, italic) and the first match consumes its text. When nothing
/// matches, a single character is taken as plain text. Unterminated markers
/// therefore come out as literal characters.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];

        if let Some((span, consumed)) = match_span(rest) {
            flush_text(&mut plain, &mut spans);
            spans.push(span);
            i += consumed;
            continue;
        }

        // Plain char
        if let Some(ch) = rest.chars().next() {
            plain.push(ch);
            i += ch.len_utf8();
        }
    }

    flush_text(&mut plain, &mut spans);
    spans
}

fn match_span(rest: &str) -> Option<(Span, usize)> {
    // Links: [label](url)
    if let Some((label, label_len)) = enclosed(rest, "[", "]")
        && let Some((url, url_len)) = enclosed(&rest[label_len..], "(", ")")
    {
        return Some((Span::link(label, url), label_len + url_len));
    }

    // Bold: **text**
    if let Some((inner, len)) = enclosed(rest, "**", "**") {
        return Some((Span::bold(inner), len));
    }

    // Code: `text`
    if let Some((inner, len)) = enclosed(rest, "`", "`") {
        return Some((Span::code(inner), len));
    }

    // Italic: *text*
    if let Some((inner, len)) = enclosed(rest, "*", "*") {
        return Some((Span::italic(inner), len));
    }

    None
}

/// Match `open`, a non-empty run of characters other than the first
/// character of `close`, then `close`. Returns the inner text and the number
/// of bytes consumed.
fn enclosed<'a>(rest: &'a str, open: &str, close: &str) -> Option<(&'a str, usize)> {
    let stop = close.chars().next()?;
    let body = rest.strip_prefix(open)?;
    let end = body.find(stop)?;
    if end == 0 || !body[end..].starts_with(close) {
        return None;
    }
    Some((&body[..end], open.len() + end + close.len()))
}

fn flush_text(plain: &mut String, spans: &mut Vec<Span>) {
    if !plain.is_empty() {
        spans.push(Span::text(std::mem::take(plain)));
    }
}
