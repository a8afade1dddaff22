use crate::app::state::TranscriptState;
use crate::domain::models::{Conversation, Speaker};
use crate::domain::transcript_layout::{LayoutLine, TextPoint, BODY_INDENT};
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Renders the laid-out transcript rows from the current scroll offset,
/// painting the live selection over the body text.
pub struct TranscriptView<'a> {
    pub transcript: &'a TranscriptState,
    pub theme: &'a Theme,
}

impl Widget for TranscriptView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let Some(conversation) = &self.transcript.conversation else {
            return;
        };

        let selection = self.transcript.selection.map(|s| s.normalized());
        let rows = self
            .transcript
            .layout
            .iter()
            .skip(self.transcript.scroll)
            .take(area.height as usize);

        let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
        for row in rows {
            lines.push(match row {
                LayoutLine::Title => Line::from(Span::styled(
                    conversation.title.clone().unwrap_or_default(),
                    self.theme.transcript_title,
                )),
                LayoutLine::Header(msg) => {
                    let speaker = conversation.messages[*msg].speaker;
                    let style = match speaker {
                        Speaker::User => self.theme.speaker_user,
                        Speaker::Assistant => self.theme.speaker_assistant,
                    };
                    Line::from(Span::styled(
                        format!("{} {speaker}", glyphs::SPEAKER),
                        style,
                    ))
                }
                LayoutLine::Body { msg, start, end } => {
                    body_line(conversation, *msg, *start, *end, selection, self.theme)
                }
                LayoutLine::Blank => Line::from(""),
            });
        }
        Paragraph::new(lines).render(area, buf);
    }
}

/// One wrapped body row, split into plain/selected/plain spans where the
/// selection cuts through it.
fn body_line<'a>(
    conversation: &'a Conversation,
    msg: usize,
    start: usize,
    end: usize,
    selection: Option<(TextPoint, TextPoint)>,
    theme: &Theme,
) -> Line<'a> {
    let body = &conversation.messages[msg].body;
    let indent = Span::raw(" ".repeat(BODY_INDENT as usize));

    let plain = |s: &'a str| Span::styled(s, theme.message_body);

    let Some((sel_start, sel_end)) = selection else {
        return Line::from(vec![indent, plain(&body[start..end])]);
    };

    // Clamp the selection to this row's byte range. Rows outside the
    // selected messages collapse to an empty highlight.
    let from = if msg < sel_start.msg {
        end
    } else if msg == sel_start.msg {
        sel_start.offset.clamp(start, end)
    } else {
        start
    };
    let to = if msg > sel_end.msg {
        start
    } else if msg == sel_end.msg {
        sel_end.offset.clamp(start, end)
    } else {
        end
    };

    if from >= to {
        return Line::from(vec![indent, plain(&body[start..end])]);
    }
    Line::from(vec![
        indent,
        plain(&body[start..from]),
        Span::styled(&body[from..to], theme.selection),
        plain(&body[to..end]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Message;
    use crate::domain::transcript_layout::SelectionSpan;
    use ratatui::{backend::TestBackend, Terminal};

    fn state(selection: Option<SelectionSpan>) -> TranscriptState {
        let mut t = TranscriptState::default();
        t.replace_conversation(
            Conversation {
                title: Some("Notes".to_string()),
                messages: vec![
                    Message {
                        speaker: Speaker::User,
                        body: "hello there".to_string(),
                    },
                    Message {
                        speaker: Speaker::Assistant,
                        body: "general reply".to_string(),
                    },
                ],
            },
            30,
        );
        t.selection = selection;
        t
    }

    fn render(transcript: &TranscriptState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(30, 12)).expect("terminal");
        terminal
            .draw(|f| {
                let view = TranscriptView {
                    transcript,
                    theme: &Theme::default(),
                };
                f.render_widget(view, f.area());
            })
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn rows_follow_the_layout_order() {
        let buf = render(&state(None));
        assert_eq!(row_text(&buf, 0), "Notes");
        assert_eq!(row_text(&buf, 2), "● You");
        assert_eq!(row_text(&buf, 3), "  hello there");
        assert_eq!(row_text(&buf, 5), "● Assistant");
        assert_eq!(row_text(&buf, 6), "  general reply");
    }

    #[test]
    fn selection_restyles_only_the_selected_cells() {
        let span = SelectionSpan {
            anchor: TextPoint { msg: 0, offset: 0 },
            focus: TextPoint { msg: 0, offset: 5 },
        };
        let buf = render(&state(Some(span)));
        let theme = Theme::default();
        // "hello" is selected; "there" is not.
        assert_eq!(buf[(2, 3)].style().bg, theme.selection.bg);
        assert_eq!(buf[(6, 3)].style().bg, theme.selection.bg);
        assert_ne!(buf[(8, 3)].style().bg, theme.selection.bg);
    }

    #[test]
    fn cross_message_selection_covers_full_middle_rows() {
        let span = SelectionSpan {
            anchor: TextPoint { msg: 0, offset: 6 },
            focus: TextPoint { msg: 1, offset: 7 },
        };
        let buf = render(&state(Some(span)));
        let theme = Theme::default();
        // Tail of the first message and head of the second both carry the
        // selection background.
        assert_eq!(buf[(8, 3)].style().bg, theme.selection.bg);
        assert_eq!(buf[(2, 6)].style().bg, theme.selection.bg);
        assert_ne!(buf[(2, 3)].style().bg, theme.selection.bg);
    }
}
