//! The component that renders whatever the router currently resolves.

use std::collections::HashSet;

use super::traits::Router;
use crate::application::Context;
use crate::component::{Action, AnyComponent, Component, ComponentRef, Event};
use crate::history::{HashHistory, History, Navigation};
use crate::state::EntityId;

/// Hosts a [`Router`] and forwards rendering, events and lifecycle hooks to
/// the component matched by the current location.
///
/// A component listed under several paths is mounted once and keeps its
/// state while moving between those paths. An unmatched location renders
/// nothing.
pub struct RouterView<H: History = HashHistory> {
    router: Router<H>,
}

impl<H: History> RouterView<H> {
    pub fn new(router: Router<H>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    /// The component matched by the current location, if any.
    pub fn active(&self) -> Option<ComponentRef> {
        self.router.current_route().map(|route| route.component().clone())
    }

    /// Push `to` and run exit/enter hooks if the matched component changed.
    pub fn navigate(&mut self, to: &str, cx: &mut Context<Self>) -> Navigation {
        let from = self.active();
        let navigation = self.router.push(to);
        if navigation != Navigation::Duplicated {
            self.transition(from, cx);
        }
        navigation
    }

    /// Replace the current location, running hooks as [`navigate`](Self::navigate) does.
    pub fn replace(&mut self, to: &str, cx: &mut Context<Self>) -> Navigation {
        let from = self.active();
        let navigation = self.router.replace(to);
        if navigation != Navigation::Duplicated {
            self.transition(from, cx);
        }
        navigation
    }

    pub fn back(&mut self, cx: &mut Context<Self>) -> bool {
        let from = self.active();
        let moved = self.router.back();
        if moved {
            self.transition(from, cx);
        }
        moved
    }

    pub fn forward(&mut self, cx: &mut Context<Self>) -> bool {
        let from = self.active();
        let moved = self.router.forward();
        if moved {
            self.transition(from, cx);
        }
        moved
    }

    fn transition(&mut self, from: Option<ComponentRef>, cx: &mut Context<Self>) {
        let to = self.active();
        if from == to {
            return;
        }
        if let Some(from) = from {
            run_hook(&from, cx, |c, cx| c.on_exit_any(cx));
        }
        if let Some(to) = to {
            run_hook(&to, cx, |c, cx| c.on_enter_any(cx));
        }
        cx.notify();
    }

    /// Each distinct component in the table, in first-declared order.
    fn distinct_components(&self) -> Vec<ComponentRef> {
        let mut seen: HashSet<EntityId> = HashSet::new();
        self.router
            .routes()
            .iter()
            .map(|record| record.component())
            .filter(|component| seen.insert(component.entity_id()))
            .cloned()
            .collect()
    }
}

fn run_hook<V, F>(component: &ComponentRef, cx: &Context<V>, hook: F)
where
    V: ?Sized + Send + Sync,
    F: FnOnce(&mut (dyn AnyComponent + 'static), &mut Context<dyn AnyComponent>),
{
    if let Err(err) = component.update_with_cx(cx.app(), cx.area, hook) {
        tracing::error!(entity = %component.entity_id(), "lifecycle hook skipped: {err}");
    }
}

impl<H: History> Component for RouterView<H> {
    fn on_mount(&mut self, cx: &mut Context<Self>) {
        for component in self.distinct_components() {
            run_hook(&component, cx, |c, cx| c.on_mount_any(cx));
        }
        if self.active().is_none() {
            tracing::warn!(location = self.router.current_location(), "no route matches location");
        }
    }

    fn on_enter(&mut self, cx: &mut Context<Self>) {
        if let Some(active) = self.active() {
            run_hook(&active, cx, |c, cx| c.on_enter_any(cx));
        }
    }

    fn on_exit(&mut self, cx: &mut Context<Self>) {
        if let Some(active) = self.active() {
            run_hook(&active, cx, |c, cx| c.on_exit_any(cx));
        }
    }

    fn on_shutdown(&mut self, cx: &mut Context<Self>) {
        for component in self.distinct_components() {
            run_hook(&component, cx, |c, cx| c.on_shutdown_any(cx));
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let Some(active) = self.active() else {
            return;
        };
        run_hook(&active, cx, |c, cx| c.render_any(frame, cx));
    }

    fn handle_event(&mut self, event: Event, cx: &mut Context<Self>) -> Option<Action> {
        let active = self.active()?;
        let action = match active.update_with_cx(cx.app(), cx.area, |c, cx| c.handle_event_any(event, cx)) {
            Ok(action) => action?,
            Err(err) => {
                tracing::error!(entity = %active.entity_id(), "event dropped: {err}");
                return None;
            }
        };

        match action {
            Action::Navigate(to) => {
                self.navigate(&to, cx);
                None
            }
            Action::Back => {
                self.back(cx);
                None
            }
            Action::Forward => {
                self.forward(cx);
                None
            }
            Action::Quit => Some(Action::Quit),
            Action::Noop => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppContext;
    use crate::component::component_ref;
    use crate::router::{create_router, RouterOptions};
    use crate::routes;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::widgets::Paragraph;
    use ratatui::Terminal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Hooks {
        mounted: AtomicUsize,
        entered: AtomicUsize,
        exited: AtomicUsize,
        shut_down: AtomicUsize,
    }

    struct Tracked {
        label: &'static str,
        hooks: Arc<Hooks>,
    }

    impl Component for Tracked {
        fn on_mount(&mut self, _cx: &mut Context<Self>) {
            self.hooks.mounted.fetch_add(1, Ordering::SeqCst);
        }

        fn on_enter(&mut self, _cx: &mut Context<Self>) {
            self.hooks.entered.fetch_add(1, Ordering::SeqCst);
        }

        fn on_exit(&mut self, _cx: &mut Context<Self>) {
            self.hooks.exited.fetch_add(1, Ordering::SeqCst);
        }

        fn on_shutdown(&mut self, _cx: &mut Context<Self>) {
            self.hooks.shut_down.fetch_add(1, Ordering::SeqCst);
        }

        fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
            frame.render_widget(Paragraph::new(self.label), cx.area);
        }

        fn handle_event(&mut self, event: Event, _cx: &mut Context<Self>) -> Option<Action> {
            match event {
                Event::Custom(to) => Some(Action::Navigate(to)),
                _ => None,
            }
        }
    }

    struct Fixture {
        view: RouterView,
        cx: Context<RouterView>,
        home: Arc<Hooks>,
        other: Arc<Hooks>,
    }

    fn fixture() -> Fixture {
        let home = Arc::new(Hooks::default());
        let other = Arc::new(Hooks::default());
        let home_page = component_ref(Tracked { label: "home", hooks: home.clone() });
        let other_page = component_ref(Tracked { label: "other", hooks: other.clone() });
        let router = create_router(RouterOptions {
            history: HashHistory::default(),
            routes: routes! {
                "/" => home_page.clone(),
                "/home" => home_page,
                "/other" => other_page,
            },
        })
        .unwrap();
        let (app, _rx) = AppContext::detached();
        Fixture {
            view: RouterView::new(router),
            cx: Context::new(app, Rect::new(0, 0, 20, 1)),
            home,
            other,
        }
    }

    fn draw(view: &mut RouterView, cx: &mut Context<RouterView>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        terminal.draw(|frame| view.render(frame, cx)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_aliased_component_mounts_once() {
        let Fixture { mut view, mut cx, home, other } = fixture();
        view.on_mount(&mut cx);
        assert_eq!(home.mounted.load(Ordering::SeqCst), 1);
        assert_eq!(other.mounted.load(Ordering::SeqCst), 1);

        view.on_shutdown(&mut cx);
        assert_eq!(home.shut_down.load(Ordering::SeqCst), 1);
        assert_eq!(other.shut_down.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_alias_navigation_keeps_component_entered() {
        let Fixture { mut view, mut cx, home, .. } = fixture();
        view.on_enter(&mut cx);
        assert_eq!(view.navigate("#/home", &mut cx), Navigation::Pushed);
        assert_eq!(home.entered.load(Ordering::SeqCst), 1);
        assert_eq!(home.exited.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_navigation_runs_exit_and_enter() {
        let Fixture { mut view, mut cx, home, other } = fixture();
        view.navigate("#/other", &mut cx);
        assert_eq!(home.exited.load(Ordering::SeqCst), 1);
        assert_eq!(other.entered.load(Ordering::SeqCst), 1);

        assert!(view.back(&mut cx));
        assert_eq!(other.exited.load(Ordering::SeqCst), 1);
        assert_eq!(home.entered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_navigation_runs_no_hooks() {
        let Fixture { mut view, mut cx, home, .. } = fixture();
        assert_eq!(view.navigate("/", &mut cx), Navigation::Duplicated);
        assert_eq!(home.exited.load(Ordering::SeqCst), 0);
        assert_eq!(home.entered.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_render_follows_location() {
        let Fixture { mut view, mut cx, .. } = fixture();
        let root = draw(&mut view, &mut cx);
        view.navigate("#/home", &mut cx);
        let alias = draw(&mut view, &mut cx);
        view.navigate("#/other", &mut cx);
        let other = draw(&mut view, &mut cx);

        assert_eq!(root, "home");
        assert_eq!(root, alias);
        assert_eq!(other, "other");
    }

    #[test]
    fn test_unmatched_location_renders_blank() {
        let Fixture { mut view, mut cx, home, .. } = fixture();
        view.navigate("#/nowhere", &mut cx);
        assert!(view.active().is_none());
        assert_eq!(home.exited.load(Ordering::SeqCst), 1);
        assert_eq!(draw(&mut view, &mut cx), "");
    }

    #[test]
    fn test_navigate_action_from_component() {
        let Fixture { mut view, mut cx, other, .. } = fixture();
        let action = view.handle_event(Event::Custom("#/other".into()), &mut cx);
        assert!(action.is_none());
        assert_eq!(view.router().current_location(), "/other");
        assert_eq!(other.entered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_equivalent_location_is_duplicate() {
        let Fixture { mut view, mut cx, other, .. } = fixture();
        view.navigate("#/other", &mut cx);
        assert_eq!(view.navigate("#/Other/", &mut cx), Navigation::Duplicated);
        assert_eq!(view.router().history().len(), 2);
        assert_eq!(other.entered.load(Ordering::SeqCst), 1);
        assert_eq!(other.exited.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_replace_with_alias_runs_no_hooks() {
        let Fixture { mut view, mut cx, home, .. } = fixture();
        assert_eq!(view.replace("#/home", &mut cx), Navigation::Replaced);
        assert_eq!(view.router().current_location(), "/home");
        assert!(!view.router().can_go_back());
        assert_eq!(home.entered.load(Ordering::SeqCst), 0);
        assert_eq!(home.exited.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_replace_with_other_page_runs_exit_and_enter() {
        let Fixture { mut view, mut cx, home, other } = fixture();
        assert_eq!(view.replace("#/other", &mut cx), Navigation::Replaced);
        assert_eq!(view.router().history().len(), 1);
        assert!(!view.router().can_go_back());
        assert_eq!(home.exited.load(Ordering::SeqCst), 1);
        assert_eq!(other.entered.load(Ordering::SeqCst), 1);
        assert_eq!(draw(&mut view, &mut cx), "other");
    }

    #[test]
    fn test_replace_with_current_location_runs_no_hooks() {
        let Fixture { mut view, mut cx, home, .. } = fixture();
        assert_eq!(view.replace("#/", &mut cx), Navigation::Duplicated);
        assert_eq!(home.entered.load(Ordering::SeqCst), 0);
        assert_eq!(home.exited.load(Ordering::SeqCst), 0);
    }
}
