//! Route table for the post-desk front end.
//!
//! `/` is an alias of `/feed-importer`; both records point at the same page.

use desk_nexus::{create_router, routes, HashHistory, RouteRecord, Router, RouterOptions};

use crate::pages::{FEED_IMPORTER, SCHEDULED_POSTS};

pub fn route_table() -> Vec<RouteRecord> {
    routes! {
        "/" => FEED_IMPORTER.clone(),
        "/feed-importer" => FEED_IMPORTER.clone(),
        "/calendar" => SCHEDULED_POSTS.clone(),
    }
}

/// Build the application router on top of `history`.
pub fn build_router(history: HashHistory) -> desk_nexus::Result<Router> {
    create_router(RouterOptions {
        history,
        routes: route_table(),
    })
}
