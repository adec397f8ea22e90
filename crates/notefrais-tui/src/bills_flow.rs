use crossterm::event::{KeyCode, KeyEvent};
use notefrais_app::{App, BillsPage, ReceiptPreview};
use notefrais_core::bill::Bill;
use notefrais_core::view::{RenderPlan, ViewState};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Color;
use ratatui::text::Line;

use crate::UiExit;
use crate::keymap;
use crate::theme;
use crate::ui::bill_table::{BillTableRender, BillTableState, TableColumn};
use crate::ui::modal::{render_error_modal, render_notice_modal};
use crate::ui::text::{compact_hint, focus_line, key_hint_height, key_hint_paragraph};

pub(crate) trait BillsFlowOps {
    fn load_bills(&self) -> Option<ViewState>;
    fn receipt_preview(&self, bill: &Bill) -> Option<ReceiptPreview>;
    fn go_to_new_bill(&self);
}

impl BillsFlowOps for BillsPage<'_> {
    fn load_bills(&self) -> Option<ViewState> {
        self.load()
    }

    fn receipt_preview(&self, bill: &Bill) -> Option<ReceiptPreview> {
        self.open_receipt(bill)
    }

    fn go_to_new_bill(&self) {
        BillsPage::go_to_new_bill(self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowSignal {
    Continue,
    Exit(UiExit),
}

#[derive(Debug)]
struct BillsFlow {
    state: ViewState,
    table: BillTableState,
    preview: Option<ReceiptPreview>,
    filter_focused: bool,
}

pub(crate) struct BillsScreen<'a> {
    page: BillsPage<'a>,
    flow: BillsFlow,
}

impl<'a> BillsScreen<'a> {
    pub(crate) fn new(app: &'a App<'a>) -> Self {
        let page = app.bills_page();
        let flow = BillsFlow::new(&page);
        Self { page, flow }
    }

    pub(crate) fn render(&self, frame: &mut ratatui::Frame<'_>) {
        self.flow.render(frame);
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<UiExit> {
        match self.flow.on_key(key, &self.page) {
            FlowSignal::Continue => None,
            FlowSignal::Exit(exit) => Some(exit),
        }
    }
}

impl BillsFlow {
    fn new(ops: &dyn BillsFlowOps) -> Self {
        let mut flow = Self {
            state: ViewState::loading(),
            table: BillTableState::new(Vec::new()),
            preview: None,
            filter_focused: false,
        };
        flow.refresh(ops);
        flow
    }

    fn refresh(&mut self, ops: &dyn BillsFlowOps) {
        let Some(state) = ops.load_bills() else {
            return;
        };

        if let RenderPlan::List(bills) = state.plan() {
            self.table.set_rows(bills.to_vec());
        }
        self.state = state;
    }

    fn on_key(&mut self, key: KeyEvent, ops: &dyn BillsFlowOps) -> FlowSignal {
        if self.preview.is_some() {
            if keymap::is_confirm(key) || keymap::is_back(key) {
                self.preview = None;
            }
            return FlowSignal::Continue;
        }

        if self.filter_focused {
            if keymap::is_back(key) || keymap::is_confirm(key) {
                self.filter_focused = false;
                return FlowSignal::Continue;
            }
            self.table.on_filter_key(key);
            return FlowSignal::Continue;
        }

        if keymap::is_back(key) {
            return FlowSignal::Exit(UiExit::BackAtRoot);
        }

        if keymap::is_quit(key) {
            return FlowSignal::Exit(UiExit::Completed);
        }

        if key.code == KeyCode::Char('/') {
            self.filter_focused = true;
            return FlowSignal::Continue;
        }

        if keymap::is_refresh(key) {
            self.refresh(ops);
            return FlowSignal::Continue;
        }

        if keymap::is_new_bill(key) {
            ops.go_to_new_bill();
            return FlowSignal::Continue;
        }

        if keymap::is_up(key) {
            self.table.move_up();
            return FlowSignal::Continue;
        }

        if keymap::is_down(key) {
            self.table.move_down();
            return FlowSignal::Continue;
        }

        if keymap::is_confirm(key)
            && let Some(bill) = self.table.selected_row()
        {
            self.preview = ops.receipt_preview(bill);
        }

        FlowSignal::Continue
    }

    fn render(&self, frame: &mut ratatui::Frame<'_>) {
        let area = frame.area();
        let key_text = if self.filter_focused {
            compact_hint(
                area.width,
                "Type: filter    Backspace: delete    Enter/Esc: list focus",
                "Type filter    Backspace delete    Enter/Esc: list",
                "Type filter | Backspace | Enter/Esc list",
            )
        } else {
            compact_hint(
                area.width,
                "Enter: receipt    n: new bill    r: refresh    /: filter    j/k: move    Esc: back",
                "Enter: receipt    n: new    r: refresh    j/k: move    Esc: back",
                "Enter receipt | n new | r refresh | Esc back",
            )
        };
        let footer_height = key_hint_height(area.width, key_text);
        let [filter_area, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        self.table.render_filter(
            frame,
            filter_area,
            if self.filter_focused {
                focus_line("Filtre")
            } else {
                Line::from("Filtre (/ pour saisir)")
            },
            self.filter_focused,
        );

        let columns = [
            TableColumn {
                title: "Type",
                width: Constraint::Length(22),
            },
            TableColumn {
                title: "Nom",
                width: Constraint::Min(20),
            },
            TableColumn {
                title: "Date",
                width: Constraint::Length(12),
            },
            TableColumn {
                title: "Montant",
                width: Constraint::Length(10),
            },
            TableColumn {
                title: "Statut",
                width: Constraint::Length(12),
            },
            TableColumn {
                title: "Justificatif",
                width: Constraint::Min(14),
            },
        ];

        self.table.render_table(
            frame,
            body,
            BillTableRender {
                title: if self.filter_focused {
                    Line::from("Mes notes de frais")
                } else {
                    focus_line("Mes notes de frais")
                },
                empty_message: "Aucune note de frais.",
                columns: &columns,
                header_style: theme::table_header(Color::Cyan),
                highlight_style: theme::table_highlight(Color::Cyan),
            },
            |bill| {
                let receipt = if bill.has_receipt() {
                    bill.file_name.clone()
                } else {
                    "-".to_string()
                };
                vec![
                    bill.expense_type.clone(),
                    bill.name.clone(),
                    bill.date.clone(),
                    format!("{} €", bill.amount),
                    bill.status.label().to_string(),
                    receipt,
                ]
            },
        );

        let keys = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(keys, footer);

        match self.state.plan() {
            RenderPlan::Loading => {
                render_notice_modal(frame, "Chargement", "Chargement en cours...", 50, 30, "");
            }
            RenderPlan::Error(message) => {
                render_error_modal(frame, message, 70, 40, "r: réessayer    Esc: retour");
            }
            RenderPlan::List(_) => {}
        }

        if let Some(preview) = &self.preview {
            let body = format!("{}\n{}", preview.file_name, preview.file_url);
            render_notice_modal(frame, "Justificatif", &body, 70, 40, "Enter/Esc: fermer");
        }
    }
}
