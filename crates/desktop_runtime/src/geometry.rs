//! Pure viewport math for placing new windows and sizing maximized ones.

use desktop_app_contract::ApplicationId;

use crate::{
    apps,
    config::{LayoutConfig, ViewportScale},
    model::{Geometry, Point, Size, Viewport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutClass {
    Phone,
    Tablet,
    Desktop,
}

fn layout_class(viewport_width: i32, layout: &LayoutConfig) -> LayoutClass {
    if viewport_width < layout.phone_breakpoint {
        LayoutClass::Phone
    } else if viewport_width < layout.tablet_breakpoint {
        LayoutClass::Tablet
    } else {
        LayoutClass::Desktop
    }
}

/// Viewport height left over once the taskbar is reserved.
pub fn usable_height(viewport: Viewport, layout: &LayoutConfig) -> i32 {
    viewport.height.saturating_sub(layout.taskbar_height).max(1)
}

/// Geometry a maximized window occupies: the whole viewport above the taskbar.
pub fn maximized_geometry(viewport: Viewport, layout: &LayoutConfig) -> Geometry {
    Geometry {
        position: Point::default(),
        size: Size {
            width: viewport.width.max(1),
            height: usable_height(viewport, layout),
        },
    }
}

/// Computes the initial geometry for a new `app_id` window.
///
/// `open_count` is the number of windows already in the registry and drives the cascade offset.
pub fn compute_initial_geometry(
    viewport: Viewport,
    app_id: &ApplicationId,
    open_count: usize,
    layout: &LayoutConfig,
) -> Geometry {
    let default_size = apps::app_definition(app_id).map(|definition| definition.default_size);
    initial_geometry(viewport, default_size, open_count, layout)
}

fn initial_geometry(
    viewport: Viewport,
    default_size: Option<Size>,
    open_count: usize,
    layout: &LayoutConfig,
) -> Geometry {
    let viewport_width = viewport.width.max(1);
    let viewport_height = usable_height(viewport, layout);

    let size = match layout_class(viewport_width, layout) {
        LayoutClass::Phone => scaled(viewport_width, viewport_height, layout.phone_scale),
        LayoutClass::Tablet => scaled(viewport_width, viewport_height, layout.tablet_scale),
        LayoutClass::Desktop => {
            let preferred = default_size.unwrap_or(layout.fallback_size);
            Size {
                width: preferred.width.min(viewport_width),
                height: preferred.height.min(viewport_height),
            }
        }
    };

    let cascade_slot = i32::try_from(open_count % layout.cascade_cycle.max(1)).unwrap_or(i32::MAX);
    let cascade = cascade_slot.saturating_mul(layout.cascade_step);
    let x = ((viewport_width - size.width) / 2).saturating_add(cascade);
    let y = layout.top_offset.saturating_add(cascade);

    Geometry {
        position: Point {
            x: within_margin(x, viewport_width, size.width, layout.edge_margin),
            y: within_margin(y, viewport_height, size.height, layout.edge_margin),
        },
        size,
    }
}

/// Keeps `origin` at least `margin` away from both ends of `extent` when `length` fits; a window
/// too large for that is pinned at `margin`.
fn within_margin(origin: i32, extent: i32, length: i32, margin: i32) -> i32 {
    let far_limit = extent.saturating_sub(length).saturating_sub(margin);
    origin.min(far_limit).max(margin)
}

fn scaled(width: i32, height: i32, scale: ViewportScale) -> Size {
    Size {
        width: (f64::from(width) * scale.width).round() as i32,
        height: (f64::from(height) * scale.height).round() as i32,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DESKTOP: Viewport = Viewport {
        width: 1920,
        height: 1080,
    };

    fn writer_size() -> Option<Size> {
        Some(Size {
            width: 800,
            height: 600,
        })
    }

    #[test]
    fn desktop_uses_registered_default_size_centered() {
        let layout = LayoutConfig::default();
        let geometry = initial_geometry(DESKTOP, writer_size(), 0, &layout);

        assert_eq!(
            geometry,
            Geometry {
                position: Point { x: 560, y: 50 },
                size: Size {
                    width: 800,
                    height: 600,
                },
            }
        );
    }

    #[test]
    fn desktop_size_is_capped_by_viewport() {
        let layout = LayoutConfig::default();
        let viewport = Viewport {
            width: 1000,
            height: 500,
        };
        let geometry = initial_geometry(
            viewport,
            Some(Size {
                width: 1200,
                height: 900,
            }),
            0,
            &layout,
        );

        assert_eq!(
            geometry.size,
            Size {
                width: 1000,
                height: 452,
            }
        );
        assert_eq!(geometry.position.x, 10);
    }

    #[test]
    fn unregistered_app_falls_back_to_default_size() {
        let layout = LayoutConfig::default();
        let geometry = compute_initial_geometry(
            DESKTOP,
            &ApplicationId::trusted("does-not-exist"),
            0,
            &layout,
        );
        assert_eq!(geometry.size, layout.fallback_size);
    }

    #[test]
    fn phone_layout_scales_usable_viewport() {
        let layout = LayoutConfig::default();
        let viewport = Viewport {
            width: 400,
            height: 848,
        };
        let geometry = initial_geometry(viewport, writer_size(), 0, &layout);

        assert_eq!(
            geometry.size,
            Size {
                width: 380,
                height: 736,
            }
        );
        assert_eq!(geometry.position, Point { x: 10, y: 50 });
    }

    #[test]
    fn tablet_layout_ignores_registered_size() {
        let layout = LayoutConfig::default();
        let viewport = Viewport {
            width: 800,
            height: 1048,
        };
        let geometry = initial_geometry(viewport, writer_size(), 0, &layout);

        assert_eq!(
            geometry.size,
            Size {
                width: 560,
                height: 650,
            }
        );
        assert_eq!(geometry.position.x, 120);
    }

    #[test]
    fn cascade_staggers_and_wraps_every_five_windows() {
        let layout = LayoutConfig::default();
        let first = initial_geometry(DESKTOP, writer_size(), 0, &layout);
        let second = initial_geometry(DESKTOP, writer_size(), 1, &layout);
        let fifth = initial_geometry(DESKTOP, writer_size(), 4, &layout);
        let sixth = initial_geometry(DESKTOP, writer_size(), 5, &layout);

        assert_eq!(second.position.x - first.position.x, 20);
        assert_eq!(second.position.y - first.position.y, 20);
        assert_eq!(fifth.position.x - first.position.x, 80);
        assert_eq!(sixth.position, first.position);
    }

    #[test]
    fn cascade_never_pushes_a_phone_window_past_the_edge_margin() {
        let layout = LayoutConfig::default();
        let viewport = Viewport {
            width: 400,
            height: 848,
        };

        for open_count in 0..layout.cascade_cycle {
            let geometry = initial_geometry(viewport, writer_size(), open_count, &layout);
            let right = geometry.position.x + geometry.size.width;
            let bottom = geometry.position.y + geometry.size.height;
            assert!(geometry.position.x >= 10, "x={} at {open_count}", geometry.position.x);
            assert!(right <= 390, "right edge {right} at {open_count}");
            assert!(bottom <= 790, "bottom edge {bottom} at {open_count}");
        }
    }

    #[test]
    fn oversized_window_is_pinned_at_the_margin() {
        assert_eq!(within_margin(300, 400, 600, 10), 10);
        assert_eq!(within_margin(-50, 1920, 800, 10), 10);
        assert_eq!(within_margin(640, 1920, 800, 10), 640);
        assert_eq!(within_margin(1500, 1920, 800, 10), 1110);
    }

    #[test]
    fn huge_cascade_settings_still_yield_a_geometry() {
        let layout = LayoutConfig {
            cascade_step: i32::MAX,
            cascade_cycle: usize::MAX,
            top_offset: i32::MAX,
            ..LayoutConfig::default()
        };
        let geometry = initial_geometry(DESKTOP, None, 3, &layout);

        assert_eq!(geometry.size, layout.fallback_size);
        assert_eq!(geometry.position, Point { x: 1310, y: 622 });
    }

    #[test]
    fn maximized_geometry_reserves_taskbar() {
        let layout = LayoutConfig::default();
        assert_eq!(
            maximized_geometry(DESKTOP, &layout),
            Geometry {
                position: Point { x: 0, y: 0 },
                size: Size {
                    width: 1920,
                    height: 1032,
                },
            }
        );
    }
}
