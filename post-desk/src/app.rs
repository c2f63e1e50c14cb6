use crossterm::event::KeyCode;
use desk_nexus::{Action, Component, Context, Event, Router, RouterView};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::pages::{FeedImporter, ScheduledPosts};

/// Navigation links: (key, label, location).
const NAV_LINKS: [(char, &str, &str); 2] = [
    ('1', FeedImporter::TITLE, "/feed-importer"),
    ('2', ScheduledPosts::TITLE, "/calendar"),
];

/// Application shell: nav bar, address bar, and the routed page below them.
pub struct Shell {
    view: RouterView,
    /// Hash being typed into the address bar, while it is open.
    address: Option<String>,
}

impl Shell {
    pub fn new(router: Router) -> Self {
        Self {
            view: RouterView::new(router),
            address: None,
        }
    }

    pub fn router(&self) -> &Router {
        self.view.router()
    }

    /// Index into `NAV_LINKS` of the link showing the active page.
    fn active_link(&self) -> Option<usize> {
        let active = self.view.active()?;
        NAV_LINKS.iter().position(|(_, _, location)| {
            self.router()
                .resolve(location)
                .is_some_and(|route| *route.component() == active)
        })
    }

    fn handle_address_key(&mut self, code: KeyCode, cx: &mut Context<Self>) {
        let Some(address) = self.address.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(c) => address.push(c),
            KeyCode::Backspace => {
                address.pop();
            }
            KeyCode::Enter => {
                if let Some(address) = self.address.take() {
                    self.view.navigate(&address, &mut cx.cast());
                }
            }
            KeyCode::Esc => self.address = None,
            _ => {}
        }
    }
}

impl Component for Shell {
    fn on_mount(&mut self, cx: &mut Context<Self>) {
        self.view.on_mount(&mut cx.cast());
        tracing::info!(location = self.router().current_location(), "shell mounted");
    }

    fn on_enter(&mut self, cx: &mut Context<Self>) {
        self.view.on_enter(&mut cx.cast());
    }

    fn on_exit(&mut self, cx: &mut Context<Self>) {
        self.view.on_exit(&mut cx.cast());
    }

    fn on_shutdown(&mut self, cx: &mut Context<Self>) {
        self.view.on_shutdown(&mut cx.cast());
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Nav
                Constraint::Length(1), // Address
                Constraint::Min(0),    // Page
                Constraint::Length(1), // Footer
            ])
            .split(cx.area);

        let active = self.active_link();
        let mut spans = Vec::new();
        for (i, (key, label, _)) in NAV_LINKS.iter().enumerate() {
            let style = if Some(i) == active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {key} {label} "), style));
        }
        let nav = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(" post-desk "));
        frame.render_widget(nav, chunks[0]);

        let address = match &self.address {
            Some(input) => Line::from(vec![
                Span::styled(" go to: ", Style::default().fg(Color::Yellow)),
                Span::raw(format!("{input}_")),
            ]),
            None => Line::from(vec![
                Span::styled(" ", Style::default()),
                Span::raw(self.router().href(self.router().current_location())),
            ]),
        };
        frame.render_widget(Paragraph::new(address), chunks[1]);

        self.view.render(frame, &mut cx.child(chunks[2]));

        let footer = Paragraph::new(" 1/2 Pages │ h Home │ ←/→ Back/Forward │ : Go to hash │ q Quit ")
            .style(Style::default().bg(Color::Cyan).fg(Color::Black));
        frame.render_widget(footer, chunks[3]);
    }

    fn handle_event(&mut self, event: Event, cx: &mut Context<Self>) -> Option<Action> {
        if self.address.is_some() {
            match event {
                Event::Key(key) => self.handle_address_key(key.code, cx),
                Event::Paste(text) => {
                    if let Some(address) = self.address.as_mut() {
                        address.push_str(text.trim());
                    }
                }
                _ => {}
            }
            return None;
        }

        if let Event::Key(key) = &event {
            let link = NAV_LINKS.iter().find(|(k, _, _)| key.code == KeyCode::Char(*k));
            if let Some((_, _, location)) = link {
                self.view.navigate(location, &mut cx.cast());
                return None;
            }
            match key.code {
                KeyCode::Char('h') | KeyCode::Home => {
                    self.view.navigate("/", &mut cx.cast());
                    return None;
                }
                KeyCode::Left => {
                    self.view.back(&mut cx.cast());
                    return None;
                }
                KeyCode::Right => {
                    self.view.forward(&mut cx.cast());
                    return None;
                }
                KeyCode::Char(':') => {
                    self.address = Some("#".to_string());
                    return None;
                }
                KeyCode::Char('q') => return Some(Action::Quit),
                _ => {}
            }
        }

        self.view.handle_event(event, &mut cx.cast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::build_router;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use desk_nexus::{AppContext, HashHistory};
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    fn shell() -> (Shell, Context<Shell>) {
        let router = build_router(HashHistory::from_url("index.html#/")).unwrap();
        let (app, _rx) = AppContext::detached();
        (Shell::new(router), Context::new(app, Rect::new(0, 0, 80, 12)))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(shell: &mut Shell, cx: &mut Context<Shell>, text: &str) {
        for c in text.chars() {
            shell.handle_event(key(KeyCode::Char(c)), cx);
        }
    }

    #[test]
    fn test_nav_keys_push_locations() {
        let (mut shell, mut cx) = shell();
        shell.handle_event(key(KeyCode::Char('2')), &mut cx);
        assert_eq!(shell.router().current_location(), "/calendar");
        assert_eq!(shell.active_link(), Some(1));

        shell.handle_event(key(KeyCode::Left), &mut cx);
        assert_eq!(shell.router().current_location(), "/");
        assert_eq!(shell.active_link(), Some(0));

        shell.handle_event(key(KeyCode::Right), &mut cx);
        assert_eq!(shell.router().current_location(), "/calendar");
    }

    #[test]
    fn test_address_bar_navigates() {
        let (mut shell, mut cx) = shell();
        shell.handle_event(key(KeyCode::Char(':')), &mut cx);
        type_str(&mut shell, &mut cx, "/calendar");
        shell.handle_event(key(KeyCode::Enter), &mut cx);
        assert_eq!(shell.router().current_location(), "/calendar");
        assert!(shell.address.is_none());
    }

    #[test]
    fn test_address_bar_escape_cancels() {
        let (mut shell, mut cx) = shell();
        shell.handle_event(key(KeyCode::Char(':')), &mut cx);
        type_str(&mut shell, &mut cx, "/calendar");
        shell.handle_event(key(KeyCode::Esc), &mut cx);
        assert_eq!(shell.router().current_location(), "/");
        assert!(shell.address.is_none());
    }

    #[test]
    fn test_typed_keys_do_not_leak_while_editing() {
        let (mut shell, mut cx) = shell();
        shell.handle_event(key(KeyCode::Char(':')), &mut cx);
        assert!(shell.handle_event(key(KeyCode::Char('q')), &mut cx).is_none());
        shell.handle_event(key(KeyCode::Char('2')), &mut cx);
        assert_eq!(shell.router().current_location(), "/");
        assert_eq!(shell.address.as_deref(), Some("#q2"));
    }

    #[test]
    fn test_unmatched_hash_has_no_active_link() {
        let (mut shell, mut cx) = shell();
        shell.handle_event(key(KeyCode::Char(':')), &mut cx);
        type_str(&mut shell, &mut cx, "/calender");
        shell.handle_event(key(KeyCode::Enter), &mut cx);
        assert_eq!(shell.active_link(), None);
    }

    #[test]
    fn test_quit() {
        let (mut shell, mut cx) = shell();
        assert_eq!(shell.handle_event(key(KeyCode::Char('q')), &mut cx), Some(Action::Quit));
    }

    #[test]
    fn test_address_line_shows_href() {
        let (mut shell, mut cx) = shell();
        shell.handle_event(key(KeyCode::Char('2')), &mut cx);

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|frame| shell.render(frame, &mut cx)).unwrap();
        let buffer = terminal.backend().buffer();
        let address_row: String = (0..80u16).map(|x| buffer[(x, 3)].symbol()).collect();
        assert_eq!(address_row.trim(), "index.html#/calendar");
    }
}
