// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Managed-resource registry contract.
//!
//! A *managed resource* is a GPU-backed asset whose logical identity survives
//! context loss but whose GPU-side handle does not. The framework keeps one
//! registry per resource category; this crate only calls the two batch
//! operations at defined lifecycle points:
//!
//! - [`invalidate_all`](ManagedRegistry::invalidate_all) on every surface
//!   creation: handles are stale, resources re-upload lazily on next use;
//! - [`clear_all`](ManagedRegistry::clear_all) on the destroy transition:
//!   the context is gone for good and registrations are dropped.
//!
//! The registries themselves (meshes, textures, shader programs,
//! framebuffers) live elsewhere in the framework and are external
//! collaborators here.

use core::fmt;

use crate::trace::{RegistryStatusEvent, Tracer};

/// The managed-resource categories tracked by the framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    /// Vertex/index buffer meshes.
    Mesh,
    /// Textures.
    Texture,
    /// Shader programs.
    Shader,
    /// Framebuffer objects.
    Framebuffer,
}

impl RegistryKind {
    /// All categories, in invalidation/clear order.
    pub const ALL: [Self; 4] = [Self::Mesh, Self::Texture, Self::Shader, Self::Framebuffer];

    /// Returns a short label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mesh => "meshes",
            Self::Texture => "textures",
            Self::Shader => "shaders",
            Self::Framebuffer => "framebuffers",
        }
    }
}

/// A per-category registry of managed resources.
pub trait ManagedRegistry {
    /// Marks every GPU-side handle stale, requesting lazy recreation on next
    /// use. Logical identity is preserved.
    fn invalidate_all(&mut self);

    /// Drops all registrations because the context is gone.
    fn clear_all(&mut self);

    /// Returns a one-line description of the registry's managed state, for
    /// diagnostics.
    fn status(&self) -> String;
}

/// The four managed-resource registries, invalidated and cleared as a unit.
pub struct RegistrySet {
    entries: [(RegistryKind, Box<dyn ManagedRegistry + Send>); 4],
}

impl RegistrySet {
    /// Creates a set from one registry per category.
    #[must_use]
    pub fn new(
        mesh: Box<dyn ManagedRegistry + Send>,
        texture: Box<dyn ManagedRegistry + Send>,
        shader: Box<dyn ManagedRegistry + Send>,
        framebuffer: Box<dyn ManagedRegistry + Send>,
    ) -> Self {
        Self {
            entries: [
                (RegistryKind::Mesh, mesh),
                (RegistryKind::Texture, texture),
                (RegistryKind::Shader, shader),
                (RegistryKind::Framebuffer, framebuffer),
            ],
        }
    }

    /// Creates a set of no-op registries, for applications that track no
    /// managed resources.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(
            Box::new(NoopRegistry),
            Box::new(NoopRegistry),
            Box::new(NoopRegistry),
            Box::new(NoopRegistry),
        )
    }

    /// Invalidates every registry, in category order.
    pub fn invalidate_all(&mut self) {
        for (_, registry) in &mut self.entries {
            registry.invalidate_all();
        }
    }

    /// Clears every registry, in category order, emitting each registry's
    /// status through the tracer.
    pub fn clear_all(&mut self, tracer: &mut Tracer) {
        for (kind, registry) in &mut self.entries {
            registry.clear_all();
            tracer.registry_status(&RegistryStatusEvent {
                kind: *kind,
                status: registry.status(),
            });
        }
    }
}

impl fmt::Debug for RegistrySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySet").finish_non_exhaustive()
    }
}

struct NoopRegistry;

impl ManagedRegistry for NoopRegistry {
    fn invalidate_all(&mut self) {}

    fn clear_all(&mut self) {}

    fn status(&self) -> String {
        String::from("untracked")
    }
}
