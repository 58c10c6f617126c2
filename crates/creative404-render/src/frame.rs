//! Still-frame renderer.
//!
//! The layout is parameterized by a `progress` value in `[0, 1)` so it could
//! drive an animation, but only one frame is produced, at the midpoint.

use std::f32::consts::TAU;

use creative404_types::InspectionResult;
use tiny_skia::{
    FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, Point, Rect, SpreadMode,
    Transform,
};

use crate::color::{parse_hex, parse_hex_with_alpha};
use crate::error::RenderError;
use crate::text::{TextStyle, draw_centered};
use crate::theme::Theme;

/// Largest accepted width or height in pixels.
pub const MAX_DIMENSION: u32 = 2048;

/// Progress value used for the single still frame.
const STILL_FRAME_PROGRESS: f32 = 0.5;

/// Accent circles are drawn at 20% opacity.
const ACCENT_ALPHA: u8 = 51;

const CAPTION_MAX_CHARS: usize = 50;
const CAPTION_KEEP_CHARS: usize = 47;

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub theme: &'a Theme,
    pub width: u32,
    pub height: u32,
    pub progress: f32,
    pub caption: Option<String>,
}

impl<'a> Frame<'a> {
    /// A still frame for `theme`, captioned from `inspection` when it connected.
    pub fn still(theme: &'a Theme, width: u32, height: u32, inspection: &InspectionResult) -> Self {
        Self {
            theme,
            width,
            height,
            progress: STILL_FRAME_PROGRESS,
            caption: caption_for(inspection),
        }
    }

    /// Draw the frame into a new pixmap.
    pub fn draw(&self) -> Result<Pixmap, RenderError> {
        let mut pixmap = self.new_pixmap()?;
        let (w, h) = (self.width as f32, self.height as f32);
        let (cx, cy) = (w / 2.0, h / 2.0);

        self.draw_background(&mut pixmap, w, h)?;
        self.draw_accent_circles(&mut pixmap, cx, cy)?;

        let text_color = parse_hex(self.theme.text_color)?;
        let bounce = (self.progress * TAU).sin() * 10.0;
        draw_centered(
            &mut pixmap,
            "404",
            cx,
            cy - 50.0 + bounce,
            &TextStyle {
                size: 48.0,
                bold: true,
                color: text_color,
            },
        );
        draw_centered(
            &mut pixmap,
            "Page Not Found",
            cx,
            cy + 10.0,
            &TextStyle {
                size: 24.0,
                bold: false,
                color: text_color,
            },
        );

        if let Some(caption) = &self.caption {
            draw_centered(
                &mut pixmap,
                caption,
                cx,
                cy + 60.0,
                &TextStyle {
                    size: 16.0,
                    bold: false,
                    color: parse_hex(self.theme.accent_color)?,
                },
            );
        }

        Ok(pixmap)
    }

    fn new_pixmap(&self) -> Result<Pixmap, RenderError> {
        let invalid = || RenderError::InvalidDimensions {
            width: self.width,
            height: self.height,
            max: MAX_DIMENSION,
        };
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(invalid());
        }
        Pixmap::new(self.width, self.height).ok_or_else(invalid)
    }

    fn draw_background(&self, pixmap: &mut Pixmap, w: f32, h: f32) -> Result<(), RenderError> {
        let [from, to] = self.theme.background_colors;
        let shader = LinearGradient::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(w, h),
            vec![
                GradientStop::new(0.0, parse_hex(from)?),
                GradientStop::new(1.0, parse_hex(to)?),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        )
        .ok_or(RenderError::Gradient)?;

        let mut paint = Paint::default();
        paint.shader = shader;

        let rect = Rect::from_xywh(0.0, 0.0, w, h).ok_or(RenderError::Gradient)?;
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        Ok(())
    }

    fn draw_accent_circles(&self, pixmap: &mut Pixmap, cx: f32, cy: f32) -> Result<(), RenderError> {
        let mut paint = Paint::default();
        paint.set_color(parse_hex_with_alpha(self.theme.accent_color, ACCENT_ALPHA)?);
        paint.anti_alias = true;

        for i in 0..3 {
            let angle = (self.progress + i as f32 / 3.0) * TAU;
            let x = cx + angle.cos() * 100.0;
            let y = cy + angle.sin() * 80.0;
            let radius = 20.0 + (angle * 2.0).sin() * 10.0;
            if let Some(circle) = PathBuilder::from_circle(x, y, radius) {
                pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        Ok(())
    }
}

/// The "Powered by" caption, present only for a successful inspection with a name.
///
/// Captions longer than 50 characters keep the first 47 and end in `...`.
pub fn caption_for(inspection: &InspectionResult) -> Option<String> {
    if !inspection.has_server_name() {
        return None;
    }
    let caption = format!("Powered by {}", inspection.server_name);
    if caption.chars().count() > CAPTION_MAX_CHARS {
        let kept: String = caption.chars().take(CAPTION_KEEP_CHARS).collect();
        Some(format!("{kept}..."))
    } else {
        Some(caption)
    }
}

/// Render the still frame and encode it as PNG.
pub fn render_png(
    theme: &Theme,
    width: u32,
    height: u32,
    inspection: &InspectionResult,
) -> Result<Vec<u8>, RenderError> {
    let pixmap = Frame::still(theme, width, height, inspection).draw()?;
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

/// [`render_png`] on the blocking thread pool, keeping the async workers free.
pub async fn render_png_blocking(
    theme: &'static Theme,
    width: u32,
    height: u32,
    inspection: InspectionResult,
) -> Result<Vec<u8>, RenderError> {
    let result = tokio::task::spawn_blocking(move || render_png(theme, width, height, &inspection))
        .await
        .map_err(|e| RenderError::Worker(e.to_string()))?;

    match &result {
        Ok(bytes) => tracing::debug!(theme = theme.id, width, height, bytes = bytes.len(), "Rendered frame"),
        Err(e) => tracing::error!(theme = theme.id, width, height, "Render failed: {e}"),
    }
    result
}
