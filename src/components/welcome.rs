use crate::app::state::AppState;
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Welcome<'a> {
    pub app_state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Welcome<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let logo_ascii = [
            r" ___ ___ ___  ___  ___ _____ ___ ",
            r"| _ \_ _| _ \/ _ \/ __|_   _| __|",
            r"|   /| ||  _/ (_) \__ \ | | | _| ",
            r"|_|_\___|_|  \___/|___/ |_| |___|",
        ];

        let mut lines: Vec<Line> = logo_ascii
            .iter()
            .map(|l| Line::from(Span::styled(*l, self.theme.header_logo)))
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" RIPOSTE ", self.theme.header_logo),
            Span::raw(" - follow up on any chat transcript"),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No transcript file was given.",
            self.theme.status_error,
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Start with "),
            Span::styled(" riposte <transcript.md> ", self.theme.header_item),
            Span::raw(" to open a session"),
        ]));
        lines.push(Line::from(
            "The file is watched; messages added to it appear live.",
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled("q", self.theme.footer_segment_key),
            Span::raw(" or "),
            Span::styled("Esc", self.theme.footer_segment_key),
            Span::raw(" to quit"),
        ]));

        if let Some(notice) = &self.app_state.last_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Error: {}", notice.message),
                self.theme.status_error,
            )));
        }

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);

        let logo_height = 15;
        let centered_area = Rect {
            x: area.x,
            y: (area.y + area.height / 2).saturating_sub(logo_height / 2),
            width: area.width,
            height: logo_height.min(area.height),
        };

        if centered_area.width > 0 && centered_area.height > 0 {
            paragraph.render(centered_area, buf);
        }
    }
}
