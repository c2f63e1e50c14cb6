use crate::application::Context;
use crate::state::Entity;
use std::any::Any;
use std::sync::{Arc, RwLock};

/// Event type for component interactions.
#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    Paste(String),
    Custom(String),
}

/// Action that a component can return after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Push a location, given as a path (`/calendar`) or an href (`#/calendar`).
    Navigate(String),
    Back,
    Forward,
    Quit,
    Noop,
}

/// The core Component trait for implementers.
pub trait Component: Send + Sync + 'static {
    /// Called once when the component is first attached to the application.
    fn on_mount(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    /// Called each time the component becomes the active view.
    fn on_enter(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    /// Called when the component is removed from the active view (e.g. navigation).
    fn on_exit(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    /// Called when the application is about to shut down.
    fn on_shutdown(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    /// Render the component into `cx.area`.
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>);

    /// Handle an event, returning an optional action.
    fn handle_event(&mut self, event: Event, cx: &mut Context<Self>) -> Option<Action> {
        let _ = event;
        let _ = cx;
        None
    }
}

/// A dyn-compatible version of the Component trait.
pub trait AnyComponent: Any + Send + Sync + 'static {
    fn on_mount_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn on_enter_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn on_exit_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn on_shutdown_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn render_any(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<dyn AnyComponent>);
    fn handle_event_any(&mut self, event: Event, cx: &mut Context<dyn AnyComponent>) -> Option<Action>;
}

impl<T: Component> AnyComponent for T {
    fn on_mount_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        let mut cx = cx.cast::<Self>();
        self.on_mount(&mut cx);
    }

    fn on_enter_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        let mut cx = cx.cast::<Self>();
        self.on_enter(&mut cx);
    }

    fn on_exit_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        let mut cx = cx.cast::<Self>();
        self.on_exit(&mut cx);
    }

    fn on_shutdown_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        let mut cx = cx.cast::<Self>();
        self.on_shutdown(&mut cx);
    }

    fn render_any(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<dyn AnyComponent>) {
        let mut cx = cx.cast::<Self>();
        self.render(frame, &mut cx);
    }

    fn handle_event_any(&mut self, event: Event, cx: &mut Context<dyn AnyComponent>) -> Option<Action> {
        let mut cx = cx.cast::<Self>();
        self.handle_event(event, &mut cx)
    }
}

/// Shared handle to a type-erased component.
///
/// Route records hold clones of these; two records pointing at the same page
/// compare equal and report the same `EntityId`.
pub type ComponentRef = Entity<dyn AnyComponent>;

/// Wrap a component into a `ComponentRef`.
pub fn component_ref<C: Component>(component: C) -> ComponentRef {
    let inner: Arc<RwLock<dyn AnyComponent>> = Arc::new(RwLock::new(component));
    Entity::from_arc(inner)
}
