//! Scripted [`PointerDisplay`] for tests

use std::collections::VecDeque;

use x11rb::errors::ConnectionError;

use super::PointerDisplay;
use crate::domain::{Point, PointerEvent, Rect, RootGeometry};
use crate::error::SelectionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Grab,
    PrepareOutline,
    Draw(Rect),
    Flush,
    Release,
    Sync,
    Geometry,
}

/// Replays events and records every request
pub(crate) struct FakeDisplay {
    pub events: VecDeque<PointerEvent>,
    pub calls: Vec<Call>,
    pub grab_busy: bool,
    /// Connection drops once the script runs dry instead of releasing the button
    pub disconnect_when_empty: bool,
    pub geometry: Option<RootGeometry>,
}

impl FakeDisplay {
    pub fn new(events: impl IntoIterator<Item = PointerEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            calls: Vec::new(),
            grab_busy: false,
            disconnect_when_empty: false,
            geometry: Some(RootGeometry {
                root: 0x2a,
                width: 1920,
                height: 1080,
                border: 0,
                depth: 24,
                ..Default::default()
            }),
        }
    }

    pub fn draws(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }

    /// Every outline must have been inverted an even number of times
    pub fn assert_no_residue(&self) {
        let draws = self.draws();
        for rect in &draws {
            let times = draws.iter().filter(|other| *other == rect).count();
            assert_eq!(times % 2, 0, "outline {:?} left on screen", rect);
        }
    }
}

impl PointerDisplay for FakeDisplay {
    fn grab_pointer(&mut self) -> Result<(), SelectionError> {
        self.calls.push(Call::Grab);
        if self.grab_busy {
            return Err(SelectionError::GrabFailed("already grabbed".to_string()));
        }
        Ok(())
    }

    fn prepare_outline(&mut self) -> Result<(), SelectionError> {
        self.calls.push(Call::PrepareOutline);
        Ok(())
    }

    fn next_event(&mut self) -> Result<PointerEvent, SelectionError> {
        match self.events.pop_front() {
            Some(event) => Ok(event),
            None if self.disconnect_when_empty => {
                Err(SelectionError::Connection(ConnectionError::UnknownError))
            }
            // A script that runs dry behaves like a release
            None => Ok(PointerEvent::ButtonRelease),
        }
    }

    fn draw_outline(&mut self, rect: Rect) -> Result<(), SelectionError> {
        self.calls.push(Call::Draw(rect));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SelectionError> {
        self.calls.push(Call::Flush);
        Ok(())
    }

    fn release_pointer(&mut self) -> Result<(), SelectionError> {
        self.calls.push(Call::Release);
        Ok(())
    }

    fn sync(&mut self) -> Result<(), SelectionError> {
        self.calls.push(Call::Sync);
        Ok(())
    }

    fn root_geometry(&mut self) -> Result<RootGeometry, SelectionError> {
        self.calls.push(Call::Geometry);
        self.geometry
            .ok_or_else(|| SelectionError::GeometryQueryFailed("bad window".to_string()))
    }
}

pub(crate) fn press(x: i32, y: i32) -> PointerEvent {
    PointerEvent::ButtonPress(Point::new(x, y))
}

pub(crate) fn motion(x: i32, y: i32) -> PointerEvent {
    PointerEvent::Motion(Point::new(x, y))
}
