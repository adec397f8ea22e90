mod bills_flow;
mod keymap;
mod new_flow;
mod theme;
mod ui;

use std::io::{Stdout, stdout};

use anyhow::{Context, Result};
use bills_flow::BillsScreen;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use new_flow::NewScreen;
use notefrais_app::{App, Route, RouteBus};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Color;
use ratatui::text::{Line, Text};
use ratatui::widgets::{List, ListItem, ListState};

use crate::ui::text::{
    compact_hint, focus_line, key_hint_height, key_hint_paragraph, wrapped_paragraph,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiExit {
    Completed,
    BackAtRoot,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootMenuExit {
    Action(RootAction),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootAction {
    Bills,
    NewBill,
}

impl RootAction {
    fn title(self) -> &'static str {
        match self {
            Self::Bills => "Mes notes de frais",
            Self::NewBill => "Nouvelle note de frais",
        }
    }
}

const ROOT_ACTIONS: [RootAction; 2] = [RootAction::Bills, RootAction::NewBill];

pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub(crate) fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;

        let mut out = stdout();
        if let Err(error) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error).context("failed to enter alternate screen");
        }

        let backend = CrosstermBackend::new(stdout());
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let mut out = stdout();
                let _ = execute!(out, Show, LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(error).context("failed to create terminal backend")
            }
        }
    }

    pub(crate) fn draw<F>(&mut self, draw_fn: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame<'_>),
    {
        self.terminal
            .draw(draw_fn)
            .context("failed to render terminal")?;
        Ok(())
    }

    pub(crate) fn autoresize(&mut self) -> Result<()> {
        self.terminal
            .autoresize()
            .context("failed to autoresize terminal")?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub(crate) fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

#[derive(Debug)]
struct RootScreen {
    selected: usize,
}

impl RootScreen {
    fn new() -> Self {
        Self { selected: 0 }
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<RootMenuExit> {
        if keymap::is_back(key) || keymap::is_quit(key) {
            return Some(RootMenuExit::Exit);
        }

        if keymap::is_up(key) {
            self.selected = self.selected.saturating_sub(1);
            return None;
        }

        if keymap::is_down(key) {
            if self.selected + 1 < ROOT_ACTIONS.len() {
                self.selected += 1;
            }
            return None;
        }

        if keymap::is_confirm(key) {
            return Some(RootMenuExit::Action(ROOT_ACTIONS[self.selected]));
        }

        None
    }

    fn render(&self, frame: &mut ratatui::Frame<'_>, email: &str) {
        let area = frame.area();
        let key_text = compact_hint(
            area.width,
            "Enter: select    Up/Down or j/k: move    Esc/q: exit",
            "Enter: select    j/k: move    Esc/q: exit",
            "Enter: select | j/k: move | Esc/q: exit",
        );
        let footer_height = key_hint_height(area.width, key_text);
        let [header, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        let header_text = Text::from(vec![
            Line::from("notefrais"),
            Line::from(email.to_string()),
            focus_line("Que voulez-vous faire ?"),
        ]);
        let title = wrapped_paragraph(header_text).block(theme::chrome("Accueil"));
        frame.render_widget(title, header);

        let items: Vec<ListItem<'_>> = ROOT_ACTIONS
            .iter()
            .map(|action| ListItem::new(action.title()))
            .collect();
        let list = List::new(items)
            .block(theme::chrome(focus_line("Actions")))
            .highlight_style(theme::table_highlight(Color::Cyan));

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, body, &mut state);

        let hints = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(hints, footer);
    }
}

enum ActiveScreen<'a> {
    Root(RootScreen),
    Bills(Box<BillsScreen<'a>>),
    New(Box<NewScreen<'a>>),
}

enum Transition {
    Open(RootAction),
    Return(UiExit),
}

pub fn run_root<'a>(app: &'a App<'a>, bus: &RouteBus) -> Result<UiExit> {
    run_loop(app, bus, ActiveScreen::Root(RootScreen::new()))
}

pub fn run_new<'a>(app: &'a App<'a>, bus: &RouteBus) -> Result<UiExit> {
    let screen = NewScreen::new(app);
    run_loop(app, bus, ActiveScreen::New(Box::new(screen)))
}

fn run_loop<'a>(app: &'a App<'a>, bus: &RouteBus, mut active: ActiveScreen<'a>) -> Result<UiExit> {
    let mut session = TerminalSession::enter()?;

    loop {
        session.draw(|frame| match &active {
            ActiveScreen::Root(screen) => screen.render(frame, &app.user.email),
            ActiveScreen::Bills(screen) => screen.render(frame),
            ActiveScreen::New(screen) => screen.render(frame),
        })?;

        let event = event::read().context("failed to read terminal event")?;
        let key = match event {
            Event::Resize(_, _) => {
                session.autoresize()?;
                continue;
            }
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => key,
            _ => continue,
        };

        if is_ctrl_c(key) {
            return Ok(UiExit::Canceled);
        }

        let transition = match &mut active {
            ActiveScreen::Root(screen) => match screen.on_key(key) {
                Some(RootMenuExit::Action(action)) => Some(Transition::Open(action)),
                Some(RootMenuExit::Exit) => Some(Transition::Return(UiExit::Completed)),
                None => None,
            },
            ActiveScreen::Bills(screen) => screen.on_key(key).map(Transition::Return),
            ActiveScreen::New(screen) => screen.on_key(key).map(Transition::Return),
        };

        // Pages request navigation through the route bus; a pending route
        // wins over whatever the screen itself returned.
        if let Some(route) = bus.take() {
            active = match route {
                Route::Bills => ActiveScreen::Bills(Box::new(BillsScreen::new(app))),
                Route::NewBill => ActiveScreen::New(Box::new(NewScreen::new(app))),
            };
            continue;
        }

        match transition {
            Some(Transition::Open(RootAction::Bills)) => {
                active = ActiveScreen::Bills(Box::new(BillsScreen::new(app)));
            }
            Some(Transition::Open(RootAction::NewBill)) => {
                active = ActiveScreen::New(Box::new(NewScreen::new(app)));
            }
            Some(Transition::Return(UiExit::BackAtRoot)) => {
                active = ActiveScreen::Root(RootScreen::new());
            }
            Some(Transition::Return(exit)) => return Ok(exit),
            None => {}
        }
    }
}

pub(crate) fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    area: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let pct_x = percent_x.min(100);
    let pct_y = percent_y.min(100);

    let [_, vertical, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .areas(area);
    let [_, horizontal, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .areas(vertical);
    horizontal
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;

    use super::{RootAction, RootMenuExit, RootScreen, centered_rect, is_ctrl_c};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn centered_rect_returns_middle_segment() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(80, 60, area);

        assert_eq!(centered.width, 80);
        assert_eq!(centered.height, 30);
        assert_eq!(centered.x, 10);
        assert_eq!(centered.y, 10);
    }

    #[test]
    fn centered_rect_clamps_percentages_over_100() {
        let area = Rect::new(3, 4, 40, 20);
        let centered = centered_rect(120, 150, area);

        assert_eq!(centered, area);
    }

    #[test]
    fn root_screen_esc_and_q_exit() {
        let mut root = RootScreen::new();
        assert_eq!(root.on_key(key(KeyCode::Esc)), Some(RootMenuExit::Exit));
        assert_eq!(
            root.on_key(key(KeyCode::Char('q'))),
            Some(RootMenuExit::Exit)
        );
    }

    #[test]
    fn root_screen_selects_both_actions() {
        let mut root = RootScreen::new();
        assert_eq!(
            root.on_key(key(KeyCode::Enter)),
            Some(RootMenuExit::Action(RootAction::Bills))
        );

        let _ = root.on_key(key(KeyCode::Char('j')));
        assert_eq!(
            root.on_key(key(KeyCode::Enter)),
            Some(RootMenuExit::Action(RootAction::NewBill))
        );

        let _ = root.on_key(key(KeyCode::Char('j')));
        assert_eq!(root.selected, 1);
    }

    #[test]
    fn ctrl_c_is_detected_with_the_control_modifier() {
        let plain = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        let ctrl = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!is_ctrl_c(plain));
        assert!(is_ctrl_c(ctrl));
    }
}
