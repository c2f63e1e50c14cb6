//! Shared handles with stable identity.
//!
//! `Entity<T>` is how the framework hands out references to long-lived values
//! such as page components: cloning an entity clones the handle, never the
//! value, and every clone reports the same [`EntityId`].

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use ratatui::layout::Rect;

use crate::application::{AppContext, Context};

/// Global counter for generating unique entity IDs.
static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for an entity across the application lifetime.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(NonZeroU64);

impl EntityId {
    fn next() -> Self {
        let id = NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed);
        // Starts at 1 and only increments.
        Self(NonZeroU64::new(id).unwrap_or(NonZeroU64::MIN))
    }

    /// Get the raw u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Debug for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity handle, inspired by GPUI.
pub struct Entity<T: ?Sized + Send + Sync> {
    id: EntityId,
    pub(crate) inner: Arc<RwLock<T>>,
}

impl<T: Send + Sync> Entity<T> {
    /// Create a new entity with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            id: EntityId::next(),
            inner: Arc::new(RwLock::new(value)),
        }
    }
}

impl<T: ?Sized + Send + Sync> Entity<T> {
    /// Create an entity from an existing `Arc<RwLock<T>>`.
    ///
    /// This is how `Entity<dyn AnyComponent>` is built from a coerced Arc.
    pub fn from_arc(inner: Arc<RwLock<T>>) -> Self {
        Self {
            id: EntityId::next(),
            inner,
        }
    }

    /// Get the unique ID of this entity.
    pub fn entity_id(&self) -> EntityId {
        self.id
    }

    /// Update the inner value using a closure.
    pub fn update<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.inner.write().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(f(&mut *guard))
    }

    /// Update the inner value with a `Context` bound to this entity's type.
    ///
    /// # Example
    /// ```ignore
    /// page.update_with_cx(cx.app(), cx.area, |c, cx| c.render_any(frame, cx))?;
    /// ```
    pub fn update_with_cx<F, R>(&self, app: &AppContext, area: Rect, f: F) -> crate::Result<R>
    where
        T: 'static,
        F: FnOnce(&mut T, &mut Context<T>) -> R,
    {
        let mut cx = Context::new(app.clone(), area);
        let mut guard = self.inner.write().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(f(&mut *guard, &mut cx))
    }

    /// Read the inner value using a closure.
    pub fn read<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.read().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(f(&*guard))
    }
}

impl<T: ?Sized + Send + Sync> Clone for Entity<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized + Send + Sync> PartialEq for Entity<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: ?Sized + Send + Sync> Eq for Entity<T> {}

impl<T: ?Sized + Send + Sync> std::fmt::Debug for Entity<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Entity").field(&self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_identity_and_value() {
        let a = Entity::new(1);
        let b = a.clone();
        b.update(|v| *v += 1).unwrap();
        assert_eq!(a.read(|v| *v).unwrap(), 2);
        assert_eq!(a.entity_id(), b.entity_id());
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_entities_have_distinct_ids() {
        let a = Entity::new(());
        let b = Entity::new(());
        assert_ne!(a.entity_id(), b.entity_id());
        assert_ne!(a, b);
    }
}
