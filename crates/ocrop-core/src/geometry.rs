use ocrop_types::{ImageMetrics, PixelRect, Selection, SelectionUnit};

/// Convert a selection on the displayed image into natural-image pixels.
///
/// Returns `None` when there is no usable selection or the image has not
/// been laid out yet. The result is not clamped to the image bounds.
pub fn resolve(selection: Option<&Selection>, metrics: &ImageMetrics) -> Option<PixelRect> {
    let selection = selection.filter(|s| s.is_usable())?;

    if !metrics.is_laid_out() {
        tracing::debug!(?metrics, "image has no displayed size, cannot resolve crop");
        return None;
    }

    let scale_x = metrics.scale_x();
    let scale_y = metrics.scale_y();

    let rect = match selection.unit {
        SelectionUnit::Percent => {
            let displayed_width = metrics.displayed_width as f64;
            let displayed_height = metrics.displayed_height as f64;
            PixelRect {
                x: (selection.x / 100.0) * displayed_width * scale_x,
                y: (selection.y / 100.0) * displayed_height * scale_y,
                width: (selection.width / 100.0) * displayed_width * scale_x,
                height: (selection.height / 100.0) * displayed_height * scale_y,
            }
        }
        SelectionUnit::Pixel => PixelRect {
            x: selection.x * scale_x,
            y: selection.y * scale_y,
            width: selection.width * scale_x,
            height: selection.height * scale_y,
        },
    };

    tracing::debug!(?selection, ?rect, "resolved crop");
    Some(rect)
}
