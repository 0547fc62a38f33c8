use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Error, Result};

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// An owned resource that must be released explicitly, exactly once.
///
/// The handle is movable but not clonable. After `release` the resource is gone and every further
/// access, including a second `release`, fails with [`Error::AlreadyReleased`]. Dropping a handle
/// that was never released frees the resource as well, but only as a safety net.
pub(crate) struct Handle<T> {
    id: u64,
    kind: &'static str,
    resource: Option<T>,
}

impl<T> Handle<T> {
    pub fn new(kind: &'static str, resource: T) -> Self {
        let id = NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(kind, id, "handle acquired");
        Self {
            id,
            kind,
            resource: Some(resource),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_released(&self) -> bool {
        self.resource.is_none()
    }

    pub fn get(&self) -> Result<&T> {
        self.resource.as_ref().ok_or(Error::AlreadyReleased(self.kind))
    }

    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.resource.as_mut().ok_or(Error::AlreadyReleased(self.kind))
    }

    /// Takes the resource out of the handle so the caller can tear it down.
    pub fn release(&mut self) -> Result<T> {
        match self.resource.take() {
            Some(resource) => {
                tracing::trace!(kind = self.kind, id = self.id, "handle released");
                Ok(resource)
            }
            None => {
                tracing::warn!(kind = self.kind, id = self.id, "double release detected");
                Err(Error::AlreadyReleased(self.kind))
            }
        }
    }
}

impl<T> Drop for Handle<T> {
    fn drop(&mut self) {
        if self.resource.take().is_some() {
            tracing::trace!(kind = self.kind, id = self.id, "handle released on drop");
        }
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("released", &self.is_released())
            .finish()
    }
}
