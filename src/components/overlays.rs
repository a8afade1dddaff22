use crate::app::state::{OverlayBox, SlashMenuState};
use crate::domain::commands::{preview_template, CommandTable};
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

/// The floating follow-up pill. One row, no border; hover only changes the
/// style so the box never moves under the pointer.
pub struct FollowUpPill<'a> {
    pub overlay: &'a OverlayBox,
    pub hovered: bool,
    pub theme: &'a Theme,
}

impl Widget for FollowUpPill<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.hovered {
            self.theme.pill_hover
        } else {
            self.theme.pill
        };
        Paragraph::new(Line::from(Span::styled(self.overlay.label.as_str(), style)))
            .style(style)
            .render(area, buf);
    }
}

/// First layout row visible in a dropdown window of `inner_height` rows
/// with `selected` highlighted. Shared with the pointer hit-testing so a
/// click lands on the row the user sees.
#[must_use]
pub fn first_visible_row(selected: usize, inner_height: u16) -> usize {
    selected.saturating_sub(inner_height.saturating_sub(1) as usize)
}

/// The slash-command dropdown: one row per matching entry, trigger plus a
/// live preview of its expansion against the current selection.
pub struct SlashDropdown<'a> {
    pub menu: &'a SlashMenuState,
    pub commands: &'a CommandTable,
    pub selection: Option<String>,
    pub theme: &'a Theme,
}

impl Widget for SlashDropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let theme = self.theme;
        let selection = self.selection.as_deref();

        let items: Vec<ListItem> = self
            .menu
            .matches
            .iter()
            .map(|&idx| {
                let Some(entry) = self.commands.entries().get(idx) else {
                    return ListItem::new("");
                };
                let preview = preview_template(&entry.template, selection);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("/{}", entry.trigger), theme.dropdown_trigger),
                    Span::raw("  "),
                    Span::styled(preview, theme.dropdown_preview),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme.border_focus),
            )
            .highlight_style(theme.list_selected)
            .highlight_symbol("> ");

        let inner_height = area.height.saturating_sub(2);
        let mut list_state = ListState::default()
            .with_offset(first_visible_row(self.menu.selected_index, inner_height))
            .with_selected(Some(self.menu.selected_index));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}
