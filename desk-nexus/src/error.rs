use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to lock entity: poisoned"))]
    LockPoisoned,

    #[snafu(display("Terminal error: {source}"))]
    Terminal { source: std::io::Error },

    #[snafu(display("Failed to start runtime: {source}"))]
    Runtime { source: std::io::Error },

    #[snafu(display("Route path '{path}' must start with '/'"))]
    InvalidRoutePath { path: String },

    #[snafu(display("Route path '{path}' is declared more than once"))]
    DuplicateRoute { path: String },
}

pub type Result<T> = std::result::Result<T, Error>;
