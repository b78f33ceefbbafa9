// Window geometry: a fixed control band across the top, the active tab below it.

use crate::types::geometry::{Bounds, Size};

/// Bounds of the control surface: full width, `control_height` tall.
pub fn control_bounds(window: Size, control_height: u32) -> Bounds {
    Bounds {
        x: 0,
        y: 0,
        width: window.width,
        height: control_height,
    }
}

/// Bounds of the active content surface: everything under the control band.
/// A window shorter than the band leaves the content surface zero-height.
pub fn content_bounds(window: Size, control_height: u32) -> Bounds {
    let control = control_bounds(window, control_height);
    Bounds {
        x: 0,
        y: control.y + control.height as i32,
        width: window.width,
        height: window.height.saturating_sub(control.height),
    }
}
