use crate::domain::models::Conversation;
use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Indent of message body lines under their speaker header.
pub const BODY_INDENT: u16 = 2;

/// A position inside the conversation text: message index plus byte offset
/// into that message's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextPoint {
    pub msg: usize,
    pub offset: usize,
}

/// Anchor/focus pair of an in-progress or finished selection. `anchor` is
/// where the gesture started; `focus` follows the pointer and may precede
/// the anchor in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpan {
    pub anchor: TextPoint,
    pub focus: TextPoint,
}

impl SelectionSpan {
    #[must_use]
    pub fn collapsed(point: TextPoint) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    /// (start, end) in document order, end exclusive.
    #[must_use]
    pub fn normalized(&self) -> (TextPoint, TextPoint) {
        if self.focus < self.anchor {
            (self.focus, self.anchor)
        } else {
            (self.anchor, self.focus)
        }
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// One visual row of the laid-out transcript. The layout is recomputed
/// whenever the conversation or the pane width changes; row index is
/// absolute (scrolling is an offset into this list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutLine {
    Title,
    Header(usize),
    Body {
        msg: usize,
        /// Byte range into the message body; empty for blank body lines.
        start: usize,
        end: usize,
    },
    Blank,
}

/// Lay the conversation out as wrapped rows for `width` columns.
#[must_use]
pub fn layout(conversation: &Conversation, width: u16) -> Vec<LayoutLine> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }
    if conversation.title.is_some() {
        lines.push(LayoutLine::Title);
        lines.push(LayoutLine::Blank);
    }
    let body_width = width.saturating_sub(BODY_INDENT).max(1);
    for (idx, message) in conversation.messages.iter().enumerate() {
        lines.push(LayoutLine::Header(idx));
        let mut para_start = 0;
        for para in message.body.split('\n') {
            for (s, e) in wrap_ranges(para, body_width as usize) {
                lines.push(LayoutLine::Body {
                    msg: idx,
                    start: para_start + s,
                    end: para_start + e,
                });
            }
            para_start += para.len() + 1;
        }
        lines.push(LayoutLine::Blank);
    }
    lines
}

/// Greedy word wrap of a single paragraph into byte ranges no wider than
/// `max_width` display columns. Words wider than the limit are hard-broken.
/// An empty paragraph yields one empty range so blank lines keep a row.
fn wrap_ranges(text: &str, max_width: usize) -> Vec<(usize, usize)> {
    if text.is_empty() {
        return vec![(0, 0)];
    }
    let mut out = Vec::new();
    let mut line_start = 0;
    let mut line_width = 0;
    let mut last_break = None;
    let mut prev_end = 0;

    for (pos, ch) in text.char_indices() {
        if pos < line_start {
            // Space swallowed by the previous wrap point.
            prev_end = pos + ch.len_utf8();
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if line_width + w > max_width && prev_end > line_start {
            // Break at the last space inside the line if there is one,
            // otherwise hard-break before this char. When the overflowing
            // char is itself a space, skipping can move the new line past
            // it; the line then restarts empty.
            let break_at = match last_break {
                Some(b) if b > line_start => b,
                _ => pos,
            };
            out.push((line_start, break_at));
            line_start = skip_spaces(text, break_at);
            line_width = if line_start <= pos {
                text[line_start..pos].width() + w
            } else {
                0
            };
            last_break = None;
            prev_end = pos + ch.len_utf8();
            continue;
        }
        if ch == ' ' {
            last_break = Some(pos);
        }
        line_width += w;
        prev_end = pos + ch.len_utf8();
    }
    if line_start < text.len() {
        out.push((line_start, text.len()));
    }
    if out.is_empty() {
        out.push((0, text.len()));
    }
    out
}

fn skip_spaces(text: &str, mut pos: usize) -> usize {
    while text[pos..].starts_with(' ') {
        pos += 1;
    }
    pos
}

/// Display slice of a body line.
#[must_use]
pub fn line_text<'a>(conversation: &'a Conversation, line: &LayoutLine) -> &'a str {
    match line {
        LayoutLine::Body { msg, start, end } => conversation
            .messages
            .get(*msg)
            .map_or("", |m| &m.body[*start..*end]),
        _ => "",
    }
}

/// Map a screen cell inside `viewport` to a text point. `exact` demands a
/// body row under the cell; otherwise the nearest body row above (or below,
/// for hits before the first body row) is used, which is what drags expect.
#[must_use]
pub fn hit_test(
    lines: &[LayoutLine],
    conversation: &Conversation,
    viewport: Rect,
    scroll: usize,
    x: u16,
    y: u16,
    exact: bool,
) -> Option<TextPoint> {
    if !viewport.contains(ratatui::layout::Position::new(x, y)) {
        return None;
    }
    let row = scroll + (y - viewport.y) as usize;
    let body_row = match &lines.get(row) {
        Some(LayoutLine::Body { .. }) => row,
        _ if exact => return None,
        _ => nearest_body_row(lines, row)?,
    };
    let LayoutLine::Body { msg, start, end } = lines[body_row] else {
        return None;
    };
    let body = &conversation.messages.get(msg)?.body;
    let col = (x - viewport.x).saturating_sub(BODY_INDENT) as usize;
    let mut width = 0;
    for (pos, ch) in body[start..end].char_indices() {
        if width >= col {
            return Some(TextPoint {
                msg,
                offset: start + pos,
            });
        }
        width += ch.width().unwrap_or(0);
    }
    Some(TextPoint { msg, offset: end })
}

fn nearest_body_row(lines: &[LayoutLine], row: usize) -> Option<usize> {
    let up = lines[..row.min(lines.len())]
        .iter()
        .rposition(|l| matches!(l, LayoutLine::Body { .. }));
    if up.is_some() {
        return up;
    }
    lines
        .iter()
        .position(|l| matches!(l, LayoutLine::Body { .. }))
}

/// Absolute (row, column) of a text point, column including the body indent.
/// A point on a wrap boundary prefers the row that contains it; offsets
/// swallowed by wrapping (the collapsed space) fall back to the tail of the
/// row they ended.
#[must_use]
pub fn point_cell(
    lines: &[LayoutLine],
    conversation: &Conversation,
    point: TextPoint,
) -> Option<(usize, u16)> {
    let mut tail = None;
    for (row, line) in lines.iter().enumerate() {
        let LayoutLine::Body { msg, start, end } = line else {
            continue;
        };
        if *msg != point.msg {
            continue;
        }
        let body = &conversation.messages.get(*msg)?.body;
        if point.offset >= *start && point.offset < *end {
            let col = body[*start..point.offset].width() as u16;
            return Some((row, BODY_INDENT + col));
        }
        if tail.is_none() && point.offset == *end {
            let col = body[*start..*end].width() as u16;
            tail = Some((row, BODY_INDENT + col));
        }
    }
    tail
}

/// Viewport-clipped bounding box of a selection, in screen coordinates.
/// Zero-sized when the selection is collapsed or entirely scrolled out.
#[must_use]
pub fn selection_rect(
    lines: &[LayoutLine],
    conversation: &Conversation,
    span: &SelectionSpan,
    viewport: Rect,
    scroll: usize,
) -> Rect {
    let (start, end) = span.normalized();
    if span.is_collapsed() {
        return Rect::ZERO;
    }
    let Some((start_row, start_col)) = point_cell(lines, conversation, start) else {
        return Rect::ZERO;
    };
    let Some((end_row, end_col)) = point_cell(lines, conversation, end) else {
        return Rect::ZERO;
    };

    let view_top = scroll;
    let view_bottom = scroll + viewport.height as usize;
    let first = start_row.max(view_top);
    let last = end_row.min(view_bottom.saturating_sub(1));
    if first > last {
        return Rect::ZERO;
    }

    let mut left = u16::MAX;
    let mut right = 0u16;
    for row in first..=last {
        let Some(LayoutLine::Body { msg, start: s, end: e }) = lines.get(row) else {
            continue;
        };
        let row_left = if row == start_row { start_col } else { BODY_INDENT };
        let row_right = if row == end_row {
            end_col
        } else {
            let body = &conversation.messages[*msg].body;
            BODY_INDENT + body[*s..*e].width() as u16
        };
        left = left.min(row_left);
        right = right.max(row_right);
    }
    if left >= right {
        return Rect::ZERO;
    }
    Rect::new(
        viewport.x + left,
        viewport.y + (first - scroll) as u16,
        (right - left).min(viewport.width.saturating_sub(left)),
        (last - first + 1) as u16,
    )
}

/// Text covered by a selection, joining cross-message stretches with blank
/// lines the way the transcript displays them.
#[must_use]
pub fn selection_text(conversation: &Conversation, span: &SelectionSpan) -> String {
    let (start, end) = span.normalized();
    if span.is_collapsed() {
        return String::new();
    }
    let messages = &conversation.messages;
    if start.msg == end.msg {
        return messages.get(start.msg).map_or_else(String::new, |m| {
            m.body[start.offset.min(m.body.len())..end.offset.min(m.body.len())].to_string()
        });
    }
    let mut parts = Vec::new();
    if let Some(m) = messages.get(start.msg) {
        parts.push(m.body[start.offset.min(m.body.len())..].to_string());
    }
    for m in messages.iter().take(end.msg).skip(start.msg + 1) {
        parts.push(m.body.clone());
    }
    if let Some(m) = messages.get(end.msg) {
        parts.push(m.body[..end.offset.min(m.body.len())].to_string());
    }
    parts.join("\n\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStep {
    CharLeft,
    CharRight,
    RowUp,
    RowDown,
}

/// Move a point one step for keyboard selection extension. Char steps stay
/// within the message; row steps land on the nearest body row above/below,
/// preserving the column.
#[must_use]
pub fn step_point(
    lines: &[LayoutLine],
    conversation: &Conversation,
    point: TextPoint,
    step: PointStep,
) -> TextPoint {
    let body = match conversation.messages.get(point.msg) {
        Some(m) => &m.body,
        None => return point,
    };
    match step {
        PointStep::CharLeft => {
            let offset = body[..point.offset].char_indices().next_back().map_or(0, |(i, _)| i);
            TextPoint { msg: point.msg, offset }
        }
        PointStep::CharRight => {
            let offset = body[point.offset..]
                .chars()
                .next()
                .map_or(point.offset, |c| point.offset + c.len_utf8());
            TextPoint { msg: point.msg, offset }
        }
        PointStep::RowUp | PointStep::RowDown => {
            let Some((row, col)) = point_cell(lines, conversation, point) else {
                return point;
            };
            let target = match step {
                PointStep::RowUp => lines[..row]
                    .iter()
                    .rposition(|l| matches!(l, LayoutLine::Body { .. })),
                _ => lines[row + 1..]
                    .iter()
                    .position(|l| matches!(l, LayoutLine::Body { .. }))
                    .map(|i| row + 1 + i),
            };
            let Some(target_row) = target else {
                return point;
            };
            let LayoutLine::Body { msg, start, end } = &lines[target_row] else {
                return point;
            };
            let body = &conversation.messages[*msg].body;
            let want = col.saturating_sub(BODY_INDENT) as usize;
            let mut width = 0;
            for (pos, ch) in body[*start..*end].char_indices() {
                if width >= want {
                    return TextPoint {
                        msg: *msg,
                        offset: start + pos,
                    };
                }
                width += ch.width().unwrap_or(0);
            }
            TextPoint {
                msg: *msg,
                offset: *end,
            }
        }
    }
}

/// Word boundaries around `point`, for double-click selection.
#[must_use]
pub fn word_at(conversation: &Conversation, point: TextPoint) -> Option<SelectionSpan> {
    let body = &conversation.messages.get(point.msg)?.body;
    if body.is_empty() {
        return None;
    }
    let offset = point.offset.min(body.len().saturating_sub(1));
    let is_word = |c: char| c.is_alphanumeric() || c == '_' || c == '-';
    let at = body[offset..].chars().next()?;
    if !is_word(at) {
        return None;
    }
    let start = body[..offset]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word(*c))
        .last()
        .map_or(offset, |(i, _)| i);
    let end = body[offset..]
        .char_indices()
        .take_while(|(_, c)| is_word(*c))
        .last()
        .map(|(i, c)| offset + i + c.len_utf8())
        .unwrap_or(offset);
    Some(SelectionSpan {
        anchor: TextPoint {
            msg: point.msg,
            offset: start,
        },
        focus: TextPoint {
            msg: point.msg,
            offset: end,
        },
    })
}
