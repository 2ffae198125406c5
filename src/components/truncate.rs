//! Fitting styled cell content into a column width
//!
//! Widths are display widths (`unicode-width`), so wide glyphs take two
//! cells. Span styles survive both truncation and wrapping.

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

pub fn line_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|s| s.content.width()).sum()
}

/// Cut `line` to `width` cells, ending with "..." when something was cut
pub fn truncate_line(line: &Line<'_>, width: usize) -> Line<'static> {
    if line_width(line) <= width {
        return to_owned_line(line);
    }
    if width <= ELLIPSIS.len() {
        return Line::from(".".repeat(width));
    }

    let budget = width - ELLIPSIS.len();
    let mut used = 0;
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut last_style = line.style;

    'outer: for span in &line.spans {
        let mut content = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                if !content.is_empty() {
                    spans.push(Span::styled(content, span.style));
                }
                last_style = span.style;
                break 'outer;
            }
            used += w;
            content.push(ch);
        }
        last_style = span.style;
        if !content.is_empty() {
            spans.push(Span::styled(content, span.style));
        }
    }
    spans.push(Span::styled(ELLIPSIS, last_style));

    Line::from(spans).style(line.style)
}

/// Hard-wrap `line` into lines of at most `width` cells
pub fn wrap_line(line: &Line<'_>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![Line::default()];
    }
    if line_width(line) <= width {
        return vec![to_owned_line(line)];
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in &line.spans {
        let mut content = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !content.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut content), span.style));
                }
                lines.push(Line::from(std::mem::take(&mut current)).style(line.style));
                used = 0;
            }
            used += w;
            content.push(ch);
        }
        if !content.is_empty() {
            current.push(Span::styled(content, span.style));
        }
    }
    if !current.is_empty() {
        lines.push(Line::from(current).style(line.style));
    }

    lines
}

fn to_owned_line(line: &Line<'_>) -> Line<'static> {
    let spans: Vec<Span<'static>> = line
        .spans
        .iter()
        .map(|s| Span::styled(s.content.to_string(), s.style))
        .collect();
    Line::from(spans).style(line.style)
}

/// Plain-text truncation for labels
pub fn truncate_str(text: &str, width: usize) -> String {
    let line = truncate_line(&Line::from(text), width);
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
