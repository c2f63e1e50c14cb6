//! Component module.
//!
//! Defines the `Component` trait and the shared `ComponentRef` handle that
//! route tables point at.

pub mod traits;

pub use traits::{component_ref, Action, AnyComponent, Component, ComponentRef, Event};
