//! Router module.
//!
//! Route tables, the `Router` built from them by [`create_router`], the
//! `routes!` macro, and `RouterView` for rendering the matched component.

pub mod table;
pub mod traits;
pub mod view;

pub use table::{RouteRecord, RouteTable};
pub use traits::{create_router, ResolvedRoute, Router, RouterOptions};
pub use view::RouterView;
