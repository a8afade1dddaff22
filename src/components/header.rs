use crate::app::state::HeaderState;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub state: &'a HeaderState,
    pub theme: &'a Theme,
    pub terminal_width: u16,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Segment background colors for separator transitions
        let logo_bg = self.theme.header_logo.bg.unwrap_or(Color::Reset);
        let session_bg = self.theme.header_session.bg.unwrap_or(Color::Reset);
        let stats_bg = self.theme.header_stats.bg.unwrap_or(Color::Reset);
        let base_bg = self.theme.header.bg.unwrap_or(Color::Reset);

        // Separator styles: fg = current segment bg, bg = next segment bg
        let sep_logo_session = Style::default().fg(logo_bg).bg(session_bg);
        let sep_session_stats = Style::default().fg(session_bg).bg(stats_bg);
        let sep_stats_base = Style::default().fg(stats_bg).bg(base_bg);

        let logo_span = Span::styled(
            format!(" {} RIPOSTE ", glyphs::SESSION),
            self.theme.header_logo,
        );

        let spans = vec![
            // Logo segment
            logo_span,
            Span::styled(glyphs::SEP_RIGHT, sep_logo_session),
            // Session file segment
            Span::styled(&self.state.session_text, self.theme.header_session),
            Span::styled(glyphs::SEP_RIGHT, sep_session_stats),
            // Stats segment
            Span::styled(&self.state.stats_text, self.theme.header_stats),
            Span::styled(glyphs::SEP_RIGHT, sep_stats_base),
            // Fill rest of line
            Span::styled(" ".repeat(self.terminal_width as usize), self.theme.header),
        ];

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
