//! Page components reachable through the router.
//!
//! Each page exists once per process; route records hold clones of the
//! handles below, never the pages themselves.

pub mod feed_importer;
pub mod scheduled_posts;

use std::sync::LazyLock;

use desk_nexus::{component_ref, ComponentRef};

pub use feed_importer::FeedImporter;
pub use scheduled_posts::ScheduledPosts;

pub static FEED_IMPORTER: LazyLock<ComponentRef> = LazyLock::new(|| component_ref(FeedImporter));

pub static SCHEDULED_POSTS: LazyLock<ComponentRef> = LazyLock::new(|| component_ref(ScheduledPosts));
