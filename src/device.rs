use generational_arena::{Arena, Index};

use crate::{
    surface::{Surface, SurfaceOptions},
    Error, Result,
};

/// Identifies a [`Surface`] owned by a [`Device`].
///
/// Ids are never reused: once a surface is destroyed its id stays invalid
/// even if a new surface takes its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(Index);

/// Owns surfaces and tracks which one drawing operations target.
///
/// A device plays the role of a GPU binding: exactly zero or one of its
/// surfaces is current at a time, and every drawing operation paints into
/// the current surface.
#[derive(Debug, Default)]
pub struct Device {
    surfaces: Arena<Surface>,
    current: Option<SurfaceId>,
}

impl Device {
    /// Returns a device without any surfaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface. The current surface is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSurfaceSize`] if the surface cannot be
    /// allocated.
    pub fn create_surface(&mut self, options: SurfaceOptions) -> Result<SurfaceId> {
        let surface = Surface::new(options)?;
        let id = SurfaceId(self.surfaces.insert(surface));
        tracing::debug!(?id, width = options.size.width, height = options.size.height, "created surface");
        Ok(id)
    }

    /// Destroys a surface and returns it. If it was current, no surface is
    /// current afterwards.
    pub fn destroy_surface(&mut self, id: SurfaceId) -> Result<Surface> {
        let surface = self.surfaces.remove(id.0).ok_or(Error::UnknownSurface)?;
        if self.current == Some(id) {
            self.current = None;
        }
        tracing::debug!(?id, "destroyed surface");
        Ok(surface)
    }

    /// Makes `id` the target of drawing operations.
    pub fn make_current(&mut self, id: SurfaceId) -> Result<()> {
        if !self.surfaces.contains(id.0) {
            return Err(Error::UnknownSurface);
        }
        if self.current != Some(id) {
            tracing::trace!(?id, "making surface current");
            self.current = Some(id);
        }
        Ok(())
    }

    /// Leaves no surface current.
    pub fn release_current(&mut self) {
        self.current = None;
    }

    /// Returns the current surface's id.
    #[must_use]
    pub const fn current(&self) -> Option<SurfaceId> {
        self.current
    }

    /// Makes `previous` current again, as returned by an earlier call to
    /// [`Device::current`]. If it has been destroyed since, no surface is
    /// current afterwards.
    pub(crate) fn rebind(&mut self, previous: Option<SurfaceId>) {
        self.current = previous.filter(|id| self.surfaces.contains(id.0));
    }

    /// Returns the surface identified by `id`.
    pub fn surface(&self, id: SurfaceId) -> Result<&Surface> {
        self.surfaces.get(id.0).ok_or(Error::UnknownSurface)
    }

    /// Returns the surface identified by `id`.
    pub fn surface_mut(&mut self, id: SurfaceId) -> Result<&mut Surface> {
        self.surfaces.get_mut(id.0).ok_or(Error::UnknownSurface)
    }

    /// Returns the current surface.
    pub fn current_surface(&self) -> Result<&Surface> {
        let id = self.current.ok_or(Error::NoCurrentSurface)?;
        self.surface(id)
    }

    /// Returns the current surface.
    pub fn current_surface_mut(&mut self) -> Result<&mut Surface> {
        let id = self.current.ok_or(Error::NoCurrentSurface)?;
        self.surface_mut(id)
    }
}
