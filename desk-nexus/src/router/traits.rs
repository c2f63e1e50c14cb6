//! Routing between page components.
//!
//! Provides `Router`, built by [`create_router`] from a route list and a
//! history strategy, and the `routes!` macro for writing route lists.

use super::table::{RouteRecord, RouteTable};
use crate::component::ComponentRef;
use crate::history::{parse_location, HashHistory, History, Navigation};

/// Inputs to [`create_router`].
pub struct RouterOptions<H: History = HashHistory> {
    pub history: H,
    pub routes: Vec<RouteRecord>,
}

/// Build a router from a history strategy and an ordered route list.
///
/// # Example
/// ```ignore
/// let router = create_router(RouterOptions {
///     history: HashHistory::default(),
///     routes: routes! {
///         "/" => home.clone(),
///         "/settings" => settings,
///     },
/// })?;
/// ```
pub fn create_router<H: History>(options: RouterOptions<H>) -> crate::Result<Router<H>> {
    let table = RouteTable::new(options.routes)?;
    tracing::debug!(
        routes = table.len(),
        location = options.history.location(),
        "router created"
    );
    Ok(Router {
        table,
        history: options.history,
    })
}

/// A location matched against the route table.
#[derive(Debug, Clone)]
pub struct ResolvedRoute<'a> {
    /// Normalized location, query included.
    pub location: String,
    /// Position of the matched record in the table.
    pub index: usize,
    pub record: &'a RouteRecord,
}

impl ResolvedRoute<'_> {
    pub fn component(&self) -> &ComponentRef {
        self.record.component()
    }

    /// The declared path of the matched record.
    pub fn path(&self) -> &str {
        self.record.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.location.split_once('?').map(|(_, query)| query)
    }
}

/// A router that owns a route table and the navigation history.
///
/// # Example
/// ```ignore
/// let mut router = create_router(options)?;
/// router.push("#/settings");
/// assert_eq!(router.current_route().unwrap().path(), "/settings");
/// router.back();
/// ```
pub struct Router<H: History = HashHistory> {
    table: RouteTable,
    history: H,
}

impl<H: History> Router<H> {
    /// The ordered route records.
    pub fn routes(&self) -> &[RouteRecord] {
        self.table.records()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// The current location, e.g. `/calendar`.
    pub fn current_location(&self) -> &str {
        self.history.location()
    }

    /// Match an arbitrary path or href against the table.
    pub fn resolve(&self, to: &str) -> Option<ResolvedRoute<'_>> {
        let location = parse_location(to);
        self.table.find(&location).map(|(index, record)| ResolvedRoute {
            location,
            index,
            record,
        })
    }

    /// Match the current location. `None` means nothing is routed there.
    pub fn current_route(&self) -> Option<ResolvedRoute<'_>> {
        self.resolve(self.history.location())
    }

    /// Navigate to a new location. Unmatched locations are still recorded.
    pub fn push(&mut self, to: &str) -> Navigation {
        let navigation = self.history.push(to);
        self.trace_navigation(navigation);
        navigation
    }

    /// Replace the current location.
    pub fn replace(&mut self, to: &str) -> Navigation {
        let navigation = self.history.replace(to);
        self.trace_navigation(navigation);
        navigation
    }

    /// Go back to the previous location. Returns true if successful.
    pub fn back(&mut self) -> bool {
        self.history.back()
    }

    /// Go forward again after a `back`. Returns true if successful.
    pub fn forward(&mut self) -> bool {
        self.history.forward()
    }

    /// Check if there's history to go back to.
    pub fn can_go_back(&self) -> bool {
        self.history.position() > 0
    }

    /// The href a link to `to` should carry, e.g. `#/calendar`.
    pub fn href(&self, to: &str) -> String {
        self.history.create_href(to)
    }

    fn trace_navigation(&self, navigation: Navigation) {
        let location = self.history.location();
        match self.current_route() {
            Some(route) => tracing::debug!(?navigation, location, route = route.path(), "navigated"),
            None => tracing::warn!(?navigation, location, "no route matches location"),
        }
    }
}

/// Write an ordered route list.
///
/// # Example
/// ```ignore
/// use desk_nexus::routes;
///
/// let records = routes! {
///     "/" => home.clone(),
///     "/home" => home,
///     "/settings" => settings,
/// };
/// assert_eq!(records.len(), 3);
/// ```
#[macro_export]
macro_rules! routes {
    ($($path:expr => $component:expr),* $(,)?) => {
        vec![$($crate::router::RouteRecord::new($path, $component)),*]
    };
}
