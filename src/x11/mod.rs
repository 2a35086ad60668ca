//! X11 implementation of [`PointerDisplay`] on top of `x11rb`

use x11rb::{
    CURRENT_TIME, NONE,
    connection::Connection,
    protocol::{
        Event,
        xproto::{
            ConnectionExt as _, CreateGCAux, Cursor, EventMask, Font, Gcontext, GrabMode, GrabStatus,
            Rectangle, SubwindowMode, Window, GX,
        },
    },
    rust_connection::RustConnection,
};

use crate::domain::{Point, PointerEvent, Rect, RootGeometry};
use crate::error::{ConnectError, SelectionError};
use crate::selector::PointerDisplay;

/// Glyph of the `tcross` shape in the core cursor font
const XC_TCROSS: u16 = 130;

/// Open a connection to the display named `name`, or to `$DISPLAY`
pub fn connect(name: Option<&str>) -> Result<X11Display, ConnectError> {
    match x11rb::connect(name) {
        Ok((conn, screen_num)) => {
            let root = conn.setup().roots[screen_num].root;
            log::debug!("Connected to display, screen {} root {:#x}", screen_num, root);
            Ok(X11Display {
                conn,
                root,
                cursor: None,
                gc: None,
                grabbed: false,
            })
        }
        Err(source) => Err(ConnectError {
            name: display_name(name),
            source,
        }),
    }
}

fn display_name(name: Option<&str>) -> String {
    name.map(str::to_string)
        .or_else(|| std::env::var("DISPLAY").ok())
        .unwrap_or_else(|| "(unset)".to_string())
}

/// A connection to an X server and the root window of its default screen.
///
/// The connection is closed when this is dropped.
pub struct X11Display {
    conn: RustConnection,
    root: Window,
    cursor: Option<Cursor>,
    gc: Option<Gcontext>,
    grabbed: bool,
}

impl X11Display {
    pub fn root(&self) -> Window {
        self.root
    }

    /// Create the cross-hair cursor from the core cursor font
    fn create_cursor(&self) -> Result<Cursor, SelectionError> {
        let font = self.conn.generate_id()?;
        self.conn.open_font(font, b"cursor")?;
        let cursor = self.create_glyph_cursor(font);
        finally(cursor, "close cursor font", || {
            self.conn.close_font(font).map(drop)
        })
    }

    fn create_glyph_cursor(&self, font: Font) -> Result<Cursor, SelectionError> {
        let cursor = self.conn.generate_id()?;
        self.conn.create_glyph_cursor(
            cursor,
            font,
            font,
            XC_TCROSS,
            XC_TCROSS + 1,
            0,
            0,
            0,
            0xffff,
            0xffff,
            0xffff,
        )?;
        Ok(cursor)
    }
}

impl PointerDisplay for X11Display {
    fn grab_pointer(&mut self) -> Result<(), SelectionError> {
        let cursor = self.create_cursor()?;
        let status = self
            .conn
            .grab_pointer(
                true,
                self.root,
                EventMask::POINTER_MOTION | EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
                NONE,
                cursor,
                CURRENT_TIME,
            )
            .map_err(SelectionError::from)
            .and_then(|cookie| Ok(cookie.reply()?.status));

        let reason = match status {
            Ok(GrabStatus::SUCCESS) => {
                self.cursor = Some(cursor);
                self.grabbed = true;
                return Ok(());
            }
            Ok(status) => grab_status_reason(status),
            Err(err) => err.to_string(),
        };
        finally(Err(SelectionError::GrabFailed(reason)), "free cursor", || {
            self.conn.free_cursor(cursor).map(drop)
        })
    }

    fn prepare_outline(&mut self) -> Result<(), SelectionError> {
        let gc = self.conn.generate_id()?;
        let values = CreateGCAux::new()
            .function(GX::INVERT)
            .subwindow_mode(SubwindowMode::INCLUDE_INFERIORS)
            .line_width(1);
        self.conn.create_gc(gc, self.root, &values)?;
        self.gc = Some(gc);
        Ok(())
    }

    fn next_event(&mut self) -> Result<PointerEvent, SelectionError> {
        let event = match self.conn.wait_for_event()? {
            Event::ButtonPress(ev) => {
                PointerEvent::ButtonPress(Point::new(ev.root_x.into(), ev.root_y.into()))
            }
            Event::MotionNotify(ev) => {
                PointerEvent::Motion(Point::new(ev.root_x.into(), ev.root_y.into()))
            }
            Event::ButtonRelease(_) => PointerEvent::ButtonRelease,
            Event::Error(err) => {
                log::debug!("Ignoring X11 error during selection: {:?}", err);
                PointerEvent::Other
            }
            _ => PointerEvent::Other,
        };
        Ok(event)
    }

    fn draw_outline(&mut self, rect: Rect) -> Result<(), SelectionError> {
        if let Some(gc) = self.gc {
            self.conn
                .poly_rectangle(self.root, gc, &[to_x11_rectangle(rect)])?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SelectionError> {
        self.conn.flush()?;
        Ok(())
    }

    fn release_pointer(&mut self) -> Result<(), SelectionError> {
        if std::mem::take(&mut self.grabbed) {
            self.conn.ungrab_pointer(CURRENT_TIME)?;
        }
        if let Some(cursor) = self.cursor.take() {
            self.conn.free_cursor(cursor)?;
        }
        if let Some(gc) = self.gc.take() {
            self.conn.free_gc(gc)?;
        }
        self.conn.flush()?;
        Ok(())
    }

    fn sync(&mut self) -> Result<(), SelectionError> {
        self.conn.get_input_focus()?.reply()?;
        // Drop anything still queued, including errors from unchecked drawing requests
        while let Some(event) = self.conn.poll_for_event()? {
            if let Event::Error(err) = event {
                log::debug!("Discarding queued X11 error: {:?}", err);
            }
        }
        Ok(())
    }

    fn root_geometry(&mut self) -> Result<RootGeometry, SelectionError> {
        let reply = self
            .conn
            .get_geometry(self.root)
            .map_err(|err| SelectionError::GeometryQueryFailed(err.to_string()))?
            .reply()
            .map_err(|err| SelectionError::GeometryQueryFailed(err.to_string()))?;
        Ok(RootGeometry {
            root: reply.root,
            x: reply.x.into(),
            y: reply.y.into(),
            width: reply.width.into(),
            height: reply.height.into(),
            border: reply.border_width.into(),
            depth: reply.depth.into(),
        })
    }
}

/// Run `cleanup` and hand back `result` unchanged; a cleanup failure is only logged
fn finally<T, E: std::fmt::Display>(
    result: T,
    what: &str,
    cleanup: impl FnOnce() -> Result<(), E>,
) -> T {
    if let Err(err) = cleanup() {
        log::warn!("Failed to {}: {}", what, err);
    }
    result
}

fn grab_status_reason(status: GrabStatus) -> String {
    match status {
        GrabStatus::ALREADY_GRABBED => "pointer is grabbed by another client".to_string(),
        GrabStatus::INVALID_TIME => "invalid grab time".to_string(),
        GrabStatus::NOT_VIEWABLE => "root window is not viewable".to_string(),
        GrabStatus::FROZEN => "pointer is frozen by another grab".to_string(),
        other => format!("unexpected grab status {:?}", other),
    }
}

/// Clamp a selection rectangle into the 16-bit wire representation
fn to_x11_rectangle(rect: Rect) -> Rectangle {
    Rectangle {
        x: clamp_i16(rect.x),
        y: clamp_i16(rect.y),
        width: u16::try_from(rect.width).unwrap_or(u16::MAX),
        height: u16::try_from(rect.height).unwrap_or(u16::MAX),
    }
}

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i16::MIN.into(), i16::MAX.into()) as i16
}
