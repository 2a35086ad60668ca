//! Interactive rectangle selection
//!
//! Grabs the pointer, lets the user drag out a rectangle while an inverted
//! outline follows the pointer, then reads the root geometry and turns the
//! final drag into a [`Region`].

use std::ops::{Deref, DerefMut};

use crate::domain::{DragState, PointerEvent, Rect, Region, RootGeometry};
use crate::error::SelectionError;

/// Display capabilities needed to run a selection
pub trait PointerDisplay {
    /// Take exclusive ownership of motion and button events, showing a
    /// cross-hair cursor. Nothing is held when this fails.
    fn grab_pointer(&mut self) -> Result<(), SelectionError>;

    /// Create the inverting graphics context used for outlines
    fn prepare_outline(&mut self) -> Result<(), SelectionError>;

    /// Block until the next input event arrives
    fn next_event(&mut self) -> Result<PointerEvent, SelectionError>;

    /// Invert the outline of `rect`; drawing the same rectangle twice restores the screen
    fn draw_outline(&mut self, rect: Rect) -> Result<(), SelectionError>;

    fn flush(&mut self) -> Result<(), SelectionError>;

    /// Ungrab the pointer and free the cursor and graphics context
    fn release_pointer(&mut self) -> Result<(), SelectionError>;

    /// Round-trip to the display, discarding queued asynchronous errors
    fn sync(&mut self) -> Result<(), SelectionError>;

    fn root_geometry(&mut self) -> Result<RootGeometry, SelectionError>;
}

/// Active pointer grab; released when dropped
struct PointerGrab<'a, D: PointerDisplay + ?Sized> {
    display: &'a mut D,
}

impl<'a, D: PointerDisplay + ?Sized> PointerGrab<'a, D> {
    fn acquire(display: &'a mut D) -> Result<Self, SelectionError> {
        display.grab_pointer()?;
        log::debug!("Pointer grabbed");
        Ok(Self { display })
    }
}

impl<D: PointerDisplay + ?Sized> Deref for PointerGrab<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.display
    }
}

impl<D: PointerDisplay + ?Sized> DerefMut for PointerGrab<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.display
    }
}

impl<D: PointerDisplay + ?Sized> Drop for PointerGrab<'_, D> {
    fn drop(&mut self) {
        if let Err(err) = self.display.release_pointer() {
            log::warn!("Failed to release pointer grab: {}", err);
        } else {
            log::debug!("Pointer released");
        }
    }
}

/// Let the user drag out a rectangle and return it as a region of the root window
pub fn select<D: PointerDisplay + ?Sized>(display: &mut D) -> Result<Region, SelectionError> {
    let selection = {
        let mut grab = PointerGrab::acquire(display)?;
        grab.prepare_outline()?;
        let selection = track_drag(&mut *grab)?;
        grab.flush()?;
        selection
    };

    display.sync()?;

    let root = display.root_geometry()?;
    log::debug!("Root geometry: {:?}", root);
    if root.x != 0 || root.y != 0 {
        log::debug!("Root window is not at the origin ({}, {})", root.x, root.y);
    }

    let region = Region::new(selection, &root);
    log::debug!("Selected region: {:?}", region);
    Ok(region)
}

/// Run the event loop until a button is released, keeping the outline in sync.
///
/// The outline still on screen is erased on every exit, including errors.
fn track_drag<D: PointerDisplay + ?Sized>(display: &mut D) -> Result<Rect, SelectionError> {
    let mut state = DragState::new();
    let tracked = run_events(display, &mut state);
    let (outline, selection) = state.finish();

    match (tracked, outline) {
        (Ok(()), Some(last)) => display.draw_outline(last)?,
        (Ok(()), None) => {}
        (Err(err), outline) => {
            if let Some(last) = outline {
                if let Err(erase_err) = display.draw_outline(last).and_then(|()| display.flush()) {
                    log::warn!("Failed to erase selection outline: {}", erase_err);
                }
            }
            return Err(err);
        }
    }
    Ok(selection)
}

fn run_events<D: PointerDisplay + ?Sized>(
    display: &mut D,
    state: &mut DragState,
) -> Result<(), SelectionError> {
    loop {
        match display.next_event()? {
            PointerEvent::ButtonPress(point) => {
                if let Some(stale) = state.press(point) {
                    display.draw_outline(stale)?;
                    display.flush()?;
                }
                log::trace!("Drag started at {:?}", point);
            }
            PointerEvent::Motion(point) => {
                if let Some(step) = state.motion(point) {
                    if let Some(previous) = step.erase {
                        display.draw_outline(previous)?;
                    }
                    display.draw_outline(step.draw)?;
                    display.flush()?;
                }
            }
            PointerEvent::ButtonRelease => return Ok(()),
            PointerEvent::Other => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod fake;
