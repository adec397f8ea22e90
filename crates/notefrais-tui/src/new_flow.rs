use crossterm::event::{Event, KeyEvent};
use notefrais_app::{App, NewBillPage, Submission};
use notefrais_core::bill::EXPENSE_TYPES;
use notefrais_core::form::{BillForm, Field, FormReport};
use notefrais_core::receipt::{ReceiptError, StagedReceipt};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;
use ratatui::text::{Line, Text};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::UiExit;
use crate::keymap;
use crate::theme;
use crate::ui::modal::render_error_modal;
use crate::ui::text::{
    compact_hint, error_line, focus_line, key_hint_height, key_hint_paragraph, label_value_line,
    wrapped_paragraph,
};

pub(crate) trait NewFlowOps {
    fn select_file(&mut self, file_name: &str, file_url: &str) -> Result<(), ReceiptError>;
    fn submit(&mut self, form: &BillForm) -> Option<Submission>;
    fn staged_receipt(&self) -> Option<StagedReceipt>;
    fn file_error(&self) -> Option<ReceiptError>;
}

impl NewFlowOps for NewBillPage<'_> {
    fn select_file(&mut self, file_name: &str, file_url: &str) -> Result<(), ReceiptError> {
        NewBillPage::select_file(self, file_name, file_url)
    }

    fn submit(&mut self, form: &BillForm) -> Option<Submission> {
        NewBillPage::submit(self, form)
    }

    fn staged_receipt(&self) -> Option<StagedReceipt> {
        NewBillPage::staged_receipt(self).cloned()
    }

    fn file_error(&self) -> Option<ReceiptError> {
        NewBillPage::file_error(self).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowSignal {
    Continue,
    Exit(UiExit),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    ExpenseType,
    Name,
    Amount,
    Date,
    Vat,
    Pct,
    Commentary,
    Receipt,
    Review,
    Failure(String),
}

impl Step {
    fn previous(&self) -> Option<Step> {
        match self {
            Step::ExpenseType => None,
            Step::Name => Some(Step::ExpenseType),
            Step::Amount => Some(Step::Name),
            Step::Date => Some(Step::Amount),
            Step::Vat => Some(Step::Date),
            Step::Pct => Some(Step::Vat),
            Step::Commentary => Some(Step::Pct),
            Step::Receipt => Some(Step::Commentary),
            Step::Review => Some(Step::Receipt),
            Step::Failure(_) => Some(Step::Review),
        }
    }
}

fn step_for_field(field: Field) -> Step {
    match field {
        Field::ExpenseType => Step::ExpenseType,
        Field::Name => Step::Name,
        Field::Amount => Step::Amount,
        Field::Date => Step::Date,
    }
}

/// The submission form, one step per field. Validation runs on submit only;
/// a rejected form jumps back to its first field in error.
#[derive(Debug)]
struct NewFlow {
    step: Step,
    selected_type: usize,
    name: Input,
    amount: Input,
    date: Input,
    vat: Input,
    pct: Input,
    commentary: Input,
    receipt_path: Input,
    report: Option<FormReport>,
}

pub(crate) struct NewScreen<'a> {
    page: NewBillPage<'a>,
    flow: NewFlow,
}

impl<'a> NewScreen<'a> {
    pub(crate) fn new(app: &'a App<'a>) -> Self {
        Self {
            page: app.new_bill_page(),
            flow: NewFlow::new(),
        }
    }

    pub(crate) fn render(&self, frame: &mut ratatui::Frame<'_>) {
        self.flow.render(frame, &self.page);
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<UiExit> {
        match self.flow.on_key(key, &mut self.page) {
            FlowSignal::Continue => None,
            FlowSignal::Exit(exit) => Some(exit),
        }
    }
}

impl NewFlow {
    fn new() -> Self {
        Self {
            step: Step::ExpenseType,
            selected_type: 0,
            name: Input::default(),
            amount: Input::default(),
            date: Input::default(),
            vat: Input::default(),
            pct: Input::default(),
            commentary: Input::default(),
            receipt_path: Input::default(),
            report: None,
        }
    }

    fn form(&self) -> BillForm {
        BillForm {
            expense_type: EXPENSE_TYPES[self.selected_type].to_string(),
            name: self.name.value().to_string(),
            amount: self.amount.value().to_string(),
            date: self.date.value().to_string(),
            vat: self.vat.value().to_string(),
            pct: self.pct.value().to_string(),
            commentary: self.commentary.value().to_string(),
        }
    }

    fn on_key(&mut self, key: KeyEvent, ops: &mut dyn NewFlowOps) -> FlowSignal {
        if let Step::Failure(_) = &self.step {
            if keymap::is_confirm(key) || keymap::is_back(key) {
                self.step = Step::Review;
            }
            return FlowSignal::Continue;
        }

        if keymap::is_back(key) {
            return match self.step.previous() {
                Some(step) => {
                    self.step = step;
                    FlowSignal::Continue
                }
                None => FlowSignal::Exit(UiExit::BackAtRoot),
            };
        }

        match self.step.clone() {
            Step::ExpenseType => {
                if keymap::is_up(key) {
                    self.selected_type = self.selected_type.saturating_sub(1);
                } else if keymap::is_down(key) {
                    if self.selected_type + 1 < EXPENSE_TYPES.len() {
                        self.selected_type += 1;
                    }
                } else if keymap::is_confirm(key) {
                    self.step = Step::Name;
                }
            }
            Step::Name => self.input_step(key, Step::Amount, |flow| &mut flow.name),
            Step::Amount => self.input_step(key, Step::Date, |flow| &mut flow.amount),
            Step::Date => self.input_step(key, Step::Vat, |flow| &mut flow.date),
            Step::Vat => self.input_step(key, Step::Pct, |flow| &mut flow.vat),
            Step::Pct => self.input_step(key, Step::Commentary, |flow| &mut flow.pct),
            Step::Commentary => self.input_step(key, Step::Receipt, |flow| &mut flow.commentary),
            Step::Receipt => self.on_receipt_key(key, ops),
            Step::Review => {
                if keymap::is_confirm(key) {
                    return self.submit(ops);
                }
            }
            Step::Failure(_) => {}
        }

        FlowSignal::Continue
    }

    fn input_step<F>(&mut self, key: KeyEvent, next: Step, input: F)
    where
        F: FnOnce(&mut Self) -> &mut Input,
    {
        if keymap::is_confirm(key) {
            self.step = next;
            return;
        }
        let _ = input(self).handle_event(&Event::Key(key));
    }

    fn on_receipt_key(&mut self, key: KeyEvent, ops: &mut dyn NewFlowOps) {
        if !keymap::is_confirm(key) {
            let _ = self.receipt_path.handle_event(&Event::Key(key));
            return;
        }

        let path = self.receipt_path.value().trim().to_string();
        if path.is_empty() {
            self.step = Step::Review;
            return;
        }

        let file_name = path.rsplit('/').next().unwrap_or(path.as_str());
        if ops.select_file(file_name, &format!("file://{path}")).is_ok() {
            self.step = Step::Review;
        }
    }

    fn submit(&mut self, ops: &mut dyn NewFlowOps) -> FlowSignal {
        match ops.submit(&self.form()) {
            None => FlowSignal::Continue,
            Some(Submission::Invalid(report)) => {
                self.step = report
                    .first_invalid_field()
                    .map(step_for_field)
                    .unwrap_or(Step::Review);
                self.report = Some(report);
                FlowSignal::Continue
            }
            Some(Submission::Created) => FlowSignal::Exit(UiExit::Completed),
            Some(Submission::Failed { message }) => {
                self.step = Step::Failure(message);
                FlowSignal::Continue
            }
        }
    }

    fn field_error_line(&self, field: Field) -> Option<Line<'static>> {
        let report = self.report.as_ref()?;
        let error = report.error_for(field)?;
        Some(error_line(error.to_string()))
    }

    fn render(&self, frame: &mut ratatui::Frame<'_>, ops: &dyn NewFlowOps) {
        let area = frame.area();
        let key_text = match &self.step {
            Step::ExpenseType => compact_hint(
                area.width,
                "Enter: continue    Up/Down or j/k: move    Esc: back",
                "Enter: continue    j/k: move    Esc: back",
                "Enter continue | j/k move | Esc back",
            ),
            Step::Review => compact_hint(
                area.width,
                "Enter: submit the bill    Esc: back",
                "Enter: submit    Esc: back",
                "Enter submit | Esc back",
            ),
            Step::Failure(_) => "Enter/Esc: back to summary",
            _ => compact_hint(
                area.width,
                "Type: edit    Enter: continue    Esc: back",
                "Type edit    Enter: continue    Esc: back",
                "Type edit | Enter continue | Esc back",
            ),
        };
        let footer_height = key_hint_height(area.width, key_text);
        let [header, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        let header_text = Text::from(vec![
            Line::from("Nouvelle note de frais"),
            focus_line("Envoyer une note de frais"),
        ]);
        frame.render_widget(
            wrapped_paragraph(header_text).block(theme::chrome("notefrais")),
            header,
        );

        match &self.step {
            Step::ExpenseType => self.render_type_step(frame, body),
            Step::Name => self.render_input_step(
                frame,
                body,
                "Nom de la dépense",
                &self.name,
                self.field_error_line(Field::Name),
            ),
            Step::Amount => self.render_input_step(
                frame,
                body,
                "Montant",
                &self.amount,
                self.field_error_line(Field::Amount),
            ),
            Step::Date => self.render_input_step(
                frame,
                body,
                "Date (AAAA-MM-JJ)",
                &self.date,
                self.field_error_line(Field::Date),
            ),
            Step::Vat => self.render_input_step(frame, body, "TVA", &self.vat, None),
            Step::Pct => self.render_input_step(frame, body, "Pourcentage", &self.pct, None),
            Step::Commentary => {
                self.render_input_step(frame, body, "Commentaire", &self.commentary, None)
            }
            Step::Receipt => self.render_receipt_step(frame, body, ops),
            Step::Review => self.render_review_step(frame, body, ops),
            Step::Failure(_) => {}
        }

        let keys = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(keys, footer);

        if let Step::Failure(message) = &self.step {
            render_error_modal(frame, message, 70, 40, "Enter/Esc: back to summary");
        }
    }

    fn render_type_step(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let [list_area, error_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(1)])
            .areas(area);

        let items: Vec<ListItem<'_>> = EXPENSE_TYPES
            .iter()
            .map(|label| ListItem::new(*label))
            .collect();
        let list = List::new(items)
            .block(theme::chrome(focus_line("Type de dépense")))
            .highlight_style(theme::table_highlight(Color::Cyan));

        let mut state = ListState::default();
        state.select(Some(self.selected_type));
        frame.render_stateful_widget(list, list_area, &mut state);

        if let Some(error) = self.field_error_line(Field::ExpenseType) {
            frame.render_widget(wrapped_paragraph(error), error_area);
        }
    }

    fn render_input_step(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        prompt: &str,
        input: &Input,
        error: Option<Line<'static>>,
    ) {
        let [input_area, error_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .areas(area);

        let width = input_area.width.saturating_sub(2) as usize;
        let scroll = input.visual_scroll(width);
        let paragraph = Paragraph::new(input.value())
            .scroll((0, scroll as u16))
            .block(theme::chrome(focus_line(prompt)));
        frame.render_widget(paragraph, input_area);

        if width > 0 {
            let visual = input.visual_cursor();
            let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
            frame.set_cursor_position((input_area.x + 1 + relative as u16, input_area.y + 1));
        }

        if let Some(error) = error {
            frame.render_widget(wrapped_paragraph(error), error_area);
        }
    }

    fn render_receipt_step(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        ops: &dyn NewFlowOps,
    ) {
        let [input_area, status_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(2)])
            .areas(area);

        let width = input_area.width.saturating_sub(2) as usize;
        let scroll = self.receipt_path.visual_scroll(width);
        let paragraph = Paragraph::new(self.receipt_path.value())
            .scroll((0, scroll as u16))
            .block(theme::chrome(focus_line(
                "Justificatif (chemin du fichier, vide pour passer)",
            )));
        frame.render_widget(paragraph, input_area);

        if width > 0 {
            let visual = self.receipt_path.visual_cursor();
            let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
            frame.set_cursor_position((input_area.x + 1 + relative as u16, input_area.y + 1));
        }

        let mut lines = Vec::new();
        if let Some(staged) = ops.staged_receipt() {
            lines.push(label_value_line("Fichier retenu", staged.file_name));
        }
        if let Some(error) = ops.file_error() {
            lines.push(error_line(error.to_string()));
        }
        frame.render_widget(wrapped_paragraph(Text::from(lines)), status_area);
    }

    fn render_review_step(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        ops: &dyn NewFlowOps,
    ) {
        let form = self.form();
        let receipt = ops
            .staged_receipt()
            .map(|staged| staged.file_name)
            .unwrap_or_else(|| "aucun".to_string());

        let lines = vec![
            label_value_line("Type de dépense", form.expense_type),
            label_value_line("Nom de la dépense", form.name),
            label_value_line("Montant", form.amount),
            label_value_line("Date", form.date),
            label_value_line("TVA", form.vat),
            label_value_line("Pourcentage", form.pct),
            label_value_line("Commentaire", form.commentary),
            label_value_line("Justificatif", receipt),
        ];
        frame.render_widget(
            wrapped_paragraph(Text::from(lines)).block(theme::chrome(focus_line("Récapitulatif"))),
            area,
        );
    }
}
