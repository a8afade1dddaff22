use crate::app::state::{AppMode, AppState, Panel, ThemeSelectionState};
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::overlays::{FollowUpPill, SlashDropdown};
use crate::components::transcript::TranscriptView;
use crate::components::welcome::Welcome;
use crate::theme::Theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Fixed screen bands. The transcript takes whatever the fixed bands leave.
pub struct AppLayout {
    pub header: Rect,
    pub transcript: Rect,
    pub composer: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Transcript text area inside the pane border.
    #[must_use]
    pub fn transcript_inner(&self) -> Rect {
        inner(self.transcript)
    }

    /// Composer text area inside the pane border.
    #[must_use]
    pub fn composer_inner(&self) -> Rect {
        inner(self.composer)
    }
}

fn inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Transcript
            Constraint::Length(5), // Composer
            Constraint::Length(1), // Footer
        ])
        .split(area);

    AppLayout {
        header: main[0],
        transcript: main[1],
        composer: main[2],
        footer: main[3],
    }
}

pub fn draw(f: &mut Frame, app_state: &mut AppState, theme: &Theme) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }

    if app_state.mode == AppMode::NoSession {
        let welcome = Welcome { app_state, theme };
        f.render_widget(welcome, f.area());
        return;
    }

    let layout = get_layout(f.area());

    // --- Header ---
    if layout.header.width > 0 && layout.header.height > 0 {
        let header = Header {
            state: &app_state.header_state,
            theme,
            terminal_width: f.area().width,
        };
        f.render_widget(header, layout.header);
    }

    // --- Transcript pane ---
    let (transcript_border, transcript_title_style) =
        if app_state.focused_panel == Panel::Transcript {
            (theme.border_focus, theme.header_active)
        } else {
            (theme.border, theme.header_item)
        };
    let transcript_block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled("TRANSCRIPT", transcript_title_style),
            Span::raw(" "),
        ]))
        .title_bottom(Line::from(vec![
            Span::raw(" "),
            Span::styled("j/k", theme.footer_segment_key),
            Span::raw(": scroll "),
            Span::styled("drag", theme.footer_segment_key),
            Span::raw(": select "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(transcript_border);

    if layout.transcript.width > 0 && layout.transcript.height > 0 {
        if app_state.transcript.conversation.is_some() {
            let view = TranscriptView {
                transcript: &app_state.transcript,
                theme,
            };
            f.render_widget(view, transcript_block.inner(layout.transcript));
        } else {
            let logo_ascii = [
                r" ___ ___ ___  ___  ___ _____ ___ ",
                r"| _ \_ _| _ \/ _ \/ __|_   _| __|",
                r"|   /| ||  _/ (_) \__ \ | | | _| ",
                r"|_|_\___|_|  \___/|___/ |_| |___|",
            ];

            let mut lines: Vec<Line> = logo_ascii
                .iter()
                .map(|l| Line::from(Span::styled(*l, theme.header_logo)))
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(app_state.spinner.clone(), theme.header_logo),
                Span::raw(" Loading transcript... "),
            ]));

            let loading = Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);

            let area = layout.transcript;
            let logo_height = 6;
            let centered_area = Rect {
                x: area.x,
                y: (area.y + area.height / 2).saturating_sub(logo_height / 2),
                width: area.width,
                height: logo_height.min(area.height),
            };
            if centered_area.width > 0 && centered_area.height > 0 {
                f.render_widget(loading, centered_area);
            }
        }
        f.render_widget(transcript_block, layout.transcript);
    }

    // --- Composer pane ---
    let (composer_border, composer_title_style) = if app_state.focused_panel == Panel::Composer {
        (theme.border_focus, theme.header_active)
    } else {
        (theme.border, theme.header_item)
    };
    let composer_block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled("COMPOSE", composer_title_style),
            Span::raw(" "),
        ]))
        .title_bottom(Line::from(vec![
            Span::raw(" "),
            Span::styled("Ctrl+Enter", theme.footer_segment_key),
            Span::raw(": send "),
            Span::styled("/", theme.footer_segment_key),
            Span::raw(": commands "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(composer_border);

    if layout.composer.width > 0 && layout.composer.height > 0 {
        let composer_inner = composer_block.inner(layout.composer);
        f.render_widget(composer_block, layout.composer);

        let text_area = &mut app_state.composer.text_area;
        text_area.set_block(Block::default());
        text_area.set_style(theme.list_item);
        text_area.set_cursor_line_style(Style::default());
        text_area.set_placeholder_text("Type a reply, or / for a command");
        text_area.set_placeholder_style(theme.dimmed);
        if app_state.focused_panel == Panel::Composer {
            text_area.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        } else {
            text_area.set_cursor_style(Style::default());
        }
        if composer_inner.width > 0 && composer_inner.height > 0 {
            f.render_widget(&app_state.composer.text_area, composer_inner);
        }
    }

    // --- Footer ---
    if layout.footer.width > 0 && layout.footer.height > 0 {
        let footer = Footer {
            state: app_state,
            theme,
        };
        f.render_widget(footer, layout.footer);
    }

    // --- Follow-up pill ---
    if let Some(overlay) = &app_state.follow_up.overlay {
        let area = overlay.rect.intersection(f.area());
        if area.width > 0 && area.height > 0 {
            f.render_widget(Clear, area);
            let pill = FollowUpPill {
                overlay,
                hovered: app_state.follow_up.hovered,
                theme,
            };
            f.render_widget(pill, area);
        }
    }

    // --- Slash dropdown ---
    if let Some(menu) = &app_state.slash_menu {
        let area = menu.rect.intersection(f.area());
        if area.width > 0 && area.height > 0 {
            f.render_widget(Clear, area);
            let dropdown = SlashDropdown {
                menu,
                commands: &app_state.commands,
                selection: app_state.transcript.live_selection_text(),
                theme,
            };
            f.render_widget(dropdown, area);
        }
    }

    // --- Modals ---
    if app_state.mode == AppMode::Help {
        draw_help(f, theme);
    }

    if let (AppMode::ThemeSelection, Some(selection)) =
        (app_state.mode, &app_state.theme_selection)
    {
        draw_theme_selection(f, selection, theme);
    }

    // --- Notice banner ---
    // Sits on the transcript's bottom border row, never blocking input.
    if let Some(notice) = &app_state.last_error {
        let banner_y = layout.composer.y.saturating_sub(1);
        let banner = Rect::new(layout.transcript.x, banner_y, layout.transcript.width, 1)
            .intersection(f.area());
        if banner.width > 0 && banner.height > 0 {
            let style = match notice.severity {
                crate::app::state::NoticeSeverity::Error => theme.status_error,
                crate::app::state::NoticeSeverity::Warning => theme.status_warn,
                crate::app::state::NoticeSeverity::Info => theme.status_info,
            };
            let mut spans = vec![Span::styled(format!("  {}  ", notice.message), style)];
            if let Some(hint) = notice.suggestions.first() {
                spans.push(Span::styled(format!(" {hint} "), theme.header_item));
            }
            spans.push(Span::styled(" Esc: dismiss ", theme.footer_segment_key));
            f.render_widget(Clear, banner);
            f.render_widget(Paragraph::new(Line::from(spans)), banner);
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_y) / 2),
            Constraint::Percentage(percent_y.min(100)),
            Constraint::Percentage(100u16.saturating_sub(percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
            Constraint::Percentage(percent_x.min(100)),
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn centered_rect_fixed_height(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(height) / 2),
            Constraint::Length(height.min(r.height)),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
            Constraint::Percentage(percent_x.min(100)),
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_theme_selection(f: &mut Frame, selection: &ThemeSelectionState, theme: &Theme) {
    let height = selection.themes.len() as u16 + 2;
    let area = centered_rect_fixed_height(40, height, f.area());
    if area.width == 0 || area.height == 0 {
        return;
    }
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = selection
        .themes
        .iter()
        .enumerate()
        .map(|(i, palette)| {
            if i == selection.selected_index {
                ListItem::new(format!("> {}", palette.label())).style(theme.list_selected)
            } else {
                ListItem::new(format!("  {}", palette.label())).style(theme.list_item)
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" THEME ", theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focus),
    );
    f.render_widget(list, area);
}

fn draw_help(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let help_area = centered_rect(70, 80, area);
    if help_area.width == 0 || help_area.height == 0 {
        return;
    }
    f.render_widget(Clear, help_area); // Clear the background

    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(" HELP - KEYBINDINGS ", theme.header_active),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_focus);

    use ratatui::widgets::{Cell, Row, Table};

    let key_style = theme.footer_segment_key;
    let desc_style = theme.list_item;
    let category_style = theme.header_item;

    let rows = vec![
        // Transcript
        Row::new(vec![
            Cell::from(Span::styled("Transcript", category_style)),
            Cell::from(""),
        ]),
        Row::new(vec![Cell::from(Span::styled(" j / ↓", key_style)), Cell::from(Span::styled("Scroll down", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" k / ↑", key_style)), Cell::from(Span::styled("Scroll up", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" PgUp / PgDn", key_style)), Cell::from(Span::styled("Scroll a page", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" Shift+arrows", key_style)), Cell::from(Span::styled("Extend selection", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" drag", key_style)), Cell::from(Span::styled("Select text", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" double-click", key_style)), Cell::from(Span::styled("Select word", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" Tab", key_style)), Cell::from(Span::styled("Focus composer", desc_style))]),
        Row::new(vec![Cell::from(""), Cell::from("")]),

        // Follow-up
        Row::new(vec![
            Cell::from(Span::styled("Follow-up", category_style)),
            Cell::from(""),
        ]),
        Row::new(vec![Cell::from(Span::styled(" click pill", key_style)), Cell::from(Span::styled("Quote selection into composer", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" Enter", key_style)), Cell::from(Span::styled("Quote selection (keyboard)", desc_style))]),
        Row::new(vec![Cell::from(""), Cell::from("")]),

        // Composer
        Row::new(vec![
            Cell::from(Span::styled("Composer", category_style)),
            Cell::from(""),
        ]),
        Row::new(vec![Cell::from(Span::styled(" /name", key_style)), Cell::from(Span::styled("Open command menu", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" ↑/↓", key_style)), Cell::from(Span::styled("Move command highlight", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" Enter / Tab", key_style)), Cell::from(Span::styled("Expand highlighted command", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" Ctrl+Enter", key_style)), Cell::from(Span::styled("Send message", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" Esc", key_style)), Cell::from(Span::styled("Back to transcript", desc_style))]),
        Row::new(vec![Cell::from(""), Cell::from("")]),

        // General
        Row::new(vec![
            Cell::from(Span::styled("General", category_style)),
            Cell::from(""),
        ]),
        Row::new(vec![Cell::from(Span::styled(" t", key_style)), Cell::from(Span::styled("Switch theme", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" ?", key_style)), Cell::from(Span::styled("Show this help", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" Esc", key_style)), Cell::from(Span::styled("Dismiss overlay / clear notice", desc_style))]),
        Row::new(vec![Cell::from(Span::styled(" q", key_style)), Cell::from(Span::styled("Quit", desc_style))]),
    ];

    let table = Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)])
        .block(block);

    f.render_widget(table, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_splits_frame_into_bands() {
        let l = get_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(l.header, Rect::new(0, 0, 80, 1));
        assert_eq!(l.transcript, Rect::new(0, 1, 80, 17));
        assert_eq!(l.composer, Rect::new(0, 18, 80, 5));
        assert_eq!(l.footer, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn inner_rects_sit_inside_the_borders() {
        let l = get_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(l.transcript_inner(), Rect::new(1, 2, 78, 15));
        assert_eq!(l.composer_inner(), Rect::new(1, 19, 78, 3));
    }

    #[test]
    fn tiny_frames_do_not_underflow() {
        let l = get_layout(Rect::new(0, 0, 3, 2));
        assert_eq!(l.transcript_inner().height, 0);
        assert!(l.composer_inner().width <= 3);
    }
}
