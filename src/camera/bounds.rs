use crate::camera::options::{BoundsCamera, FitBoundsOptions};
use crate::core::diagnostics::warn_once;
use crate::core::geo::{LatLngBounds, Point};
use crate::traits::ViewTransform;

/// Center and zoom that fit `bounds` inside the viewport of `transform`,
/// north up. Pure: the transform is only read.
///
/// Padding is split into a symmetric part that shrinks the usable viewport
/// and an asymmetric part that shifts the center through the returned
/// `offset`. Returns `None` (and warns) when the padding is malformed or
/// leaves no room for the bounds.
pub fn camera_for_bounds<T>(
    transform: &T,
    bounds: &LatLngBounds,
    options: &FitBoundsOptions,
) -> Option<BoundsCamera>
where
    T: ViewTransform + ?Sized,
{
    let Some(padding) = options.padding.insets() else {
        warn_once(
            "padding must be a number or an object with all of 'top', 'bottom', 'left' and 'right'",
        );
        return None;
    };

    let padding_offset = Point::new(
        (padding.left - padding.right) / 2.0,
        (padding.top - padding.bottom) / 2.0,
    );
    let lateral_padding = padding.right.min(padding.left);
    let vertical_padding = padding.top.min(padding.bottom);
    let offset = options.offset.add(&padding_offset);

    let nw = transform.project(&bounds.north_west());
    let se = transform.project(&bounds.south_east());
    let size = se.subtract(&nw);
    let scale_x =
        (transform.width() - lateral_padding * 2.0 - offset.x.abs() * 2.0) / size.x;
    let scale_y =
        (transform.height() - vertical_padding * 2.0 - offset.y.abs() * 2.0) / size.y;

    if scale_x < 0.0 || scale_y < 0.0 {
        warn_once("map cannot fit within the viewport with the given bounds, padding and/or offset");
        return None;
    }

    let max_zoom = options.max_zoom.unwrap_or_else(|| transform.max_zoom());
    let zoom = transform
        .scale_zoom(transform.scale() * scale_x.min(scale_y))
        .min(max_zoom);

    Some(BoundsCamera {
        center: transform.unproject(&nw.add(&se).divide(2.0)),
        zoom,
        bearing: 0.0,
        offset,
    })
}
