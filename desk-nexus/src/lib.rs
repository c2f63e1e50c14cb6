pub mod application;
pub mod component;
pub mod error;
pub mod history;
pub mod router;
pub mod state;

pub use error::{Error, Result};

// Re-export common types for convenience
pub use application::{AppContext, Application, Context};
pub use component::{component_ref, Action, AnyComponent, Component, ComponentRef, Event};
pub use history::{parse_location, HashHistory, History, Navigation};
pub use router::{create_router, ResolvedRoute, RouteRecord, RouteTable, Router, RouterOptions, RouterView};
pub use state::{Entity, EntityId};
