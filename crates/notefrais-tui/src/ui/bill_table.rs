use crossterm::event::{Event, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Margin, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{
    Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table, TableState,
};
use notefrais_core::bill::Bill;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableColumn {
    pub(crate) title: &'static str,
    pub(crate) width: Constraint,
}

#[derive(Debug, Clone)]
pub(crate) struct BillTableRender<'a> {
    pub(crate) title: Line<'a>,
    pub(crate) empty_message: &'a str,
    pub(crate) columns: &'a [TableColumn],
    pub(crate) header_style: Style,
    pub(crate) highlight_style: Style,
}

/// Selection and filter state for the bills table. The filter matches the
/// name, category, date and French status label.
#[derive(Debug)]
pub(crate) struct BillTableState {
    rows: Vec<Bill>,
    filtered: Vec<usize>,
    selected: usize,
    query: Input,
}

impl BillTableState {
    pub(crate) fn new(rows: Vec<Bill>) -> Self {
        let mut state = Self {
            rows,
            filtered: Vec::new(),
            selected: 0,
            query: Input::default(),
        };
        state.refresh_filtered();
        state
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<Bill>) {
        self.rows = rows;
        self.refresh_filtered();
    }

    pub(crate) fn on_filter_key(&mut self, key: KeyEvent) {
        if self.query.handle_event(&Event::Key(key)).is_some() {
            self.refresh_filtered();
        }
    }

    pub(crate) fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(crate) fn move_down(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    pub(crate) fn selected_row(&self) -> Option<&Bill> {
        let index = *self.filtered.get(self.selected)?;
        self.rows.get(index)
    }

    #[cfg(test)]
    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub(crate) fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub(crate) fn render_filter(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        title: Line<'_>,
        show_cursor: bool,
    ) {
        let width = area.width.saturating_sub(2) as usize;
        let scroll = self.query.visual_scroll(width);
        let paragraph = Paragraph::new(self.query.value())
            .scroll((0, scroll as u16))
            .block(crate::theme::chrome(title));
        frame.render_widget(paragraph, area);

        if !show_cursor || width == 0 {
            return;
        }

        let visual = self.query.visual_cursor();
        let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
        frame.set_cursor_position((area.x + 1 + relative as u16, area.y + 1));
    }

    pub(crate) fn render_table<F>(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        render: BillTableRender<'_>,
        row_builder: F,
    ) where
        F: Fn(&Bill) -> Vec<String>,
    {
        if self.filtered.is_empty() {
            let empty = Paragraph::new(render.empty_message)
                .block(crate::theme::chrome(render.title.clone()));
            frame.render_widget(empty, area);
            return;
        }

        let header =
            Row::new(render.columns.iter().map(|column| column.title)).style(render.header_style);
        let rows = self
            .filtered
            .iter()
            .filter_map(|index| self.rows.get(*index))
            .map(|row| Row::new(row_builder(row)));
        let widths: Vec<Constraint> = render.columns.iter().map(|column| column.width).collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(crate::theme::chrome(render.title))
            .row_highlight_style(render.highlight_style)
            .highlight_symbol(">> ");

        let mut state = TableState::new();
        state.select(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);

        let viewport = area.height.saturating_sub(3) as usize;
        let mut scrollbar_state = ScrollbarState::new(self.filtered.len())
            .position(self.selected)
            .viewport_content_length(viewport);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }

    fn refresh_filtered(&mut self) {
        let query = self.query.value().trim().to_lowercase();
        self.filtered = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                if query.is_empty() {
                    return true;
                }

                row.name.to_lowercase().contains(&query)
                    || row.expense_type.to_lowercase().contains(&query)
                    || row.date.to_lowercase().contains(&query)
                    || row.status.label().to_lowercase().contains(&query)
            })
            .map(|(index, _)| index)
            .collect();

        if self.filtered.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len() - 1;
        }
    }
}
