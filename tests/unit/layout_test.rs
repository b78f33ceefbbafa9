use tabshell::managers::layout::{content_bounds, control_bounds};
use tabshell::types::geometry::{Bounds, Size};

#[test]
fn test_control_band_spans_full_width() {
    let bounds = control_bounds(Size::new(1024, 800), 130);
    assert_eq!(
        bounds,
        Bounds {
            x: 0,
            y: 0,
            width: 1024,
            height: 130
        }
    );
}

#[test]
fn test_content_fills_area_below_band() {
    let bounds = content_bounds(Size::new(1024, 800), 130);
    assert_eq!(
        bounds,
        Bounds {
            x: 0,
            y: 130,
            width: 1024,
            height: 670
        }
    );
}

#[test]
fn test_window_shorter_than_band_gives_zero_height() {
    let bounds = content_bounds(Size::new(300, 100), 130);
    assert_eq!(bounds.y, 130);
    assert_eq!(bounds.height, 0);
}
