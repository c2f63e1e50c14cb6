//! History strategies.
//!
//! A history owns the stack of visited locations. [`HashHistory`] keeps the
//! route in the URL fragment (`index.html#/calendar`), so an app served from
//! a static origin never needs server-side route configuration.

/// Outcome of a push or replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Pushed,
    Replaced,
    /// The target is already the current location; history is unchanged.
    Duplicated,
}

/// Most entries a [`HashHistory`] keeps; the oldest are dropped first.
pub const HISTORY_LIMIT: usize = 50;

/// Navigation history used by a [`Router`](crate::router::Router).
pub trait History: Send + Sync + 'static {
    /// The current location, always starting with `/`.
    fn location(&self) -> &str;

    /// Index of the current entry; zero means there is nothing to go back to.
    fn position(&self) -> usize;

    /// Append a location, discarding any forward entries.
    fn push(&mut self, location: &str) -> Navigation;

    /// Overwrite the current entry.
    fn replace(&mut self, location: &str) -> Navigation;

    /// Move `delta` entries through the stack. Returns false if out of range.
    fn go(&mut self, delta: isize) -> bool;

    /// Build the href a link to `location` should carry.
    fn create_href(&self, location: &str) -> String;

    fn back(&mut self) -> bool {
        self.go(-1)
    }

    fn forward(&mut self) -> bool {
        self.go(1)
    }
}

/// Hash-fragment history.
///
/// # Example
/// ```
/// use desk_nexus::history::{HashHistory, History};
///
/// let mut history = HashHistory::from_url("index.html#/calendar");
/// assert_eq!(history.location(), "/calendar");
/// assert_eq!(history.create_href("/feed-importer"), "index.html#/feed-importer");
/// history.push("#/feed-importer");
/// assert!(history.back());
/// assert_eq!(history.location(), "/calendar");
/// ```
#[derive(Debug, Clone)]
pub struct HashHistory {
    base: String,
    entries: Vec<String>,
    index: usize,
}

impl Default for HashHistory {
    fn default() -> Self {
        Self::new("", "/")
    }
}

impl HashHistory {
    /// Create a history whose hrefs start with `base` and whose first entry
    /// is `initial` (a path or an href).
    pub fn new(base: impl Into<String>, initial: &str) -> Self {
        let mut base = base.into();
        if let Some(stripped) = base.strip_suffix('#') {
            base = stripped.to_string();
        }
        Self {
            base,
            entries: vec![parse_location(initial)],
            index: 0,
        }
    }

    /// Create a history from a full page URL. Everything before `#` becomes
    /// the base; a URL without a fragment starts at `/`.
    pub fn from_url(url: &str) -> Self {
        match url.split_once('#') {
            Some((base, hash)) => Self::new(base, hash),
            None => Self::new(url, "/"),
        }
    }

    /// The part of the href in front of `#`.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Number of entries in the stack, including forward entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl History for HashHistory {
    fn location(&self) -> &str {
        &self.entries[self.index]
    }

    fn position(&self) -> usize {
        self.index
    }

    fn push(&mut self, location: &str) -> Navigation {
        let location = parse_location(location);
        if same_location(&location, self.location()) {
            return Navigation::Duplicated;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        if self.entries.len() > HISTORY_LIMIT {
            let excess = self.entries.len() - HISTORY_LIMIT;
            self.entries.drain(..excess);
        }
        self.index = self.entries.len() - 1;
        Navigation::Pushed
    }

    fn replace(&mut self, location: &str) -> Navigation {
        let location = parse_location(location);
        if same_location(&location, self.location()) {
            return Navigation::Duplicated;
        }
        self.entries[self.index] = location;
        Navigation::Replaced
    }

    fn go(&mut self, delta: isize) -> bool {
        match self.index.checked_add_signed(delta) {
            Some(target) if target < self.entries.len() && delta != 0 => {
                self.index = target;
                true
            }
            _ => false,
        }
    }

    fn create_href(&self, location: &str) -> String {
        format!("{}#{}", self.base, parse_location(location))
    }
}

/// Normalize user input into a location.
///
/// Accepts an href (`index.html#/calendar`), a bare fragment (`#/calendar`)
/// or a path (`/calendar`, `calendar`). The result always starts with `/`;
/// empty input is the root.
pub fn parse_location(input: &str) -> String {
    let input = input.trim();
    let path = match input.split_once('#') {
        Some((_, hash)) => hash,
        None => input,
    };
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Comparable form of a location's path: query dropped, case folded,
/// trailing slashes ignored. Route matching uses the same form.
pub fn path_key(location: &str) -> String {
    let path = location.split_once('?').map_or(location, |(path, _)| path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// Two locations are the same when their path keys and queries agree.
fn same_location(a: &str, b: &str) -> bool {
    let query = |location: &str| location.split_once('?').map(|(_, query)| query.to_string());
    path_key(a) == path_key(b) && query(a) == query(b)
}
