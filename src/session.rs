//! Host-window session.
//!
//! Owns at most one multiplexer. The process lifecycle code creates it when
//! the app becomes active without a window and destroys it when the window
//! closes.

use tracing::debug;

use crate::managers::tab_multiplexer::{TabMultiplexer, TabMultiplexerTrait};
use crate::surface::{ControlSurface, SurfaceFactory};
use crate::types::errors::ShellError;

pub struct HostSession<F: SurfaceFactory, C: ControlSurface> {
    current: Option<TabMultiplexer<F, C>>,
}

impl<F: SurfaceFactory, C: ControlSurface> HostSession<F, C> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Build a multiplexer with `build` unless one is already open.
    pub fn create<B>(&mut self, build: B) -> Result<&mut TabMultiplexer<F, C>, ShellError>
    where
        B: FnOnce() -> Result<TabMultiplexer<F, C>, ShellError>,
    {
        if self.current.is_none() {
            debug!("opening host window session");
            self.current = Some(build()?);
        }
        self.current.as_mut().ok_or(ShellError::Closed)
    }

    pub fn current(&self) -> Option<&TabMultiplexer<F, C>> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut TabMultiplexer<F, C>> {
        self.current.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Shut the multiplexer down and forget it. Returns false if none was open.
    pub fn destroy(&mut self) -> bool {
        match self.current.take() {
            Some(mut mux) => {
                mux.shutdown();
                debug!("host window session closed");
                true
            }
            None => false,
        }
    }
}

impl<F: SurfaceFactory, C: ControlSurface> Default for HostSession<F, C> {
    fn default() -> Self {
        Self::new()
    }
}
