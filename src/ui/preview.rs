//! Image preview panel: decoding, scaling and half-block rendering.
//!
//! Images are decoded once per path, scaled to [`DISPLAY_IMAGE_HEIGHT`]
//! pixels with Lanczos3 resampling, and cached. Rendering fits the scaled
//! image into the panel using `▀` half-blocks (two pixels per cell).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::FilterType;
use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::Color,
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use super::theme::Theme;
use crate::presenter::{
    DisplayImage, DisplayPayload, ImageResolutionFailure, DISPLAY_IMAGE_HEIGHT, NO_IMAGE_TEXT,
    SELECT_PROMPT,
};

/// Decode `path` and scale it to the fixed display height, keeping the
/// aspect ratio.
pub fn load_scaled(path: &Path) -> Result<RgbaImage, ImageResolutionFailure> {
    let decoded = image::open(path).map_err(|e| ImageResolutionFailure::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let (w, h) = (decoded.width(), decoded.height());
    if w == 0 || h == 0 {
        return Err(ImageResolutionFailure::Decode {
            path: path.to_path_buf(),
            reason: "image has no pixels".to_string(),
        });
    }

    let scaled_w = ((u64::from(w) * u64::from(DISPLAY_IMAGE_HEIGHT)) as f64 / f64::from(h))
        .round()
        .max(1.0) as u32;
    Ok(image::imageops::resize(
        &decoded.to_rgba8(),
        scaled_w,
        DISPLAY_IMAGE_HEIGHT,
        FilterType::Lanczos3,
    ))
}

/// Scaled images keyed by path. Failed decodes are remembered as `None` so a
/// broken file is only attempted once.
#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<PathBuf, Option<Arc<RgbaImage>>>,
    fitted: Option<FittedImage>,
}

/// The last image fitted to the panel, valid for one path and cell size
#[derive(Debug)]
struct FittedImage {
    path: PathBuf,
    cells: (u16, u16),
    image: Arc<RgbaImage>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the image for `payload` (if any) is decoded.
    pub fn prepare(&mut self, payload: &DisplayPayload) {
        if let DisplayImage::Path(path) = &payload.image {
            self.load(path);
        }
    }

    /// Decoded image for `path`, loading it on first use
    pub fn load(&mut self, path: &Path) -> Option<Arc<RgbaImage>> {
        if let Some(cached) = self.images.get(path) {
            return cached.clone();
        }

        let loaded = match load_scaled(path) {
            Ok(img) => {
                tracing::debug!(path = %path.display(), width = img.width(), "image decoded");
                Some(Arc::new(img))
            }
            Err(e) => {
                tracing::warn!(error = %e, "falling back to placeholder");
                None
            }
        };
        self.images.insert(path.to_path_buf(), loaded.clone());
        loaded
    }

    /// Previously decoded image for `path`, without loading
    pub fn get(&self, path: &Path) -> Option<Arc<RgbaImage>> {
        self.images.get(path).cloned().flatten()
    }

    /// The image for `path` fitted to `area`, resized only when the path or
    /// the panel size changes.
    pub fn fitted(&mut self, path: &Path, area: Rect) -> Option<Arc<RgbaImage>> {
        let cells = (area.width, area.height);
        if let Some(fitted) = &self.fitted {
            if fitted.path.as_path() == path && fitted.cells == cells {
                return Some(Arc::clone(&fitted.image));
            }
        }

        let image = Arc::new(fit_to_cells(&*self.get(path)?, area)?);
        self.fitted = Some(FittedImage {
            path: path.to_path_buf(),
            cells,
            image: Arc::clone(&image),
        });
        Some(image)
    }
}

/// The fixed-height image panel of the detail pane
pub struct ImagePanel<'a> {
    payload: Option<&'a DisplayPayload>,
    cache: &'a mut ImageCache,
    theme: &'a Theme,
}

impl<'a> ImagePanel<'a> {
    pub fn new(
        payload: Option<&'a DisplayPayload>,
        cache: &'a mut ImageCache,
        theme: &'a Theme,
    ) -> Self {
        ImagePanel {
            payload,
            cache,
            theme,
        }
    }
}

impl Widget for ImagePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_style(self.theme.border_style())
            .title(" Image ")
            .title_style(self.theme.title_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let image = match self.payload {
            None => Err(SELECT_PROMPT),
            Some(payload) => match &payload.image {
                DisplayImage::Path(path) => self.cache.fitted(path, inner).ok_or(NO_IMAGE_TEXT),
                DisplayImage::NoImage => Err(NO_IMAGE_TEXT),
            },
        };

        match image {
            Ok(img) => render_halfblocks(&img, inner, buf),
            Err(text) => render_centered_text(text, self.theme, inner, buf),
        }
    }
}

fn render_centered_text(text: &str, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    Paragraph::new(Line::styled(text.to_string(), theme.placeholder_style()))
        .alignment(Alignment::Center)
        .render(row, buf);
}

/// Shrink `img` to fit `area` at two pixels per cell row, keeping the
/// aspect ratio. Never upscales.
fn fit_to_cells(img: &RgbaImage, area: Rect) -> Option<RgbaImage> {
    if area.width == 0 || area.height == 0 || img.width() == 0 || img.height() == 0 {
        return None;
    }

    let max_px_w = f64::from(area.width);
    let max_px_h = f64::from(area.height) * 2.0;
    let src_w = f64::from(img.width());
    let src_h = f64::from(img.height());

    let scale = (max_px_w / src_w).min(max_px_h / src_h).min(1.0);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;
    Some(image::imageops::resize(img, fit_w, fit_h, FilterType::Triangle))
}

/// Draw an already fitted image with `▀` half-blocks, centred in `area`.
/// The top pixel of each cell is the foreground, the bottom one the
/// background.
fn render_halfblocks(rgba: &RgbaImage, area: Rect, buf: &mut Buffer) {
    let (iw, ih) = (rgba.width(), rgba.height());
    let col_offset = area.width.saturating_sub(iw as u16) / 2;
    let cell_rows = ih.div_ceil(2) as u16;
    let row_offset = area.height.saturating_sub(cell_rows) / 2;

    for row in 0..area.height.min(cell_rows) {
        let yt = u32::from(row) * 2;
        let yb = yt + 1;
        for col in 0..iw.min(u32::from(area.width)) {
            let t = rgba.get_pixel(col, yt);
            let fg = Color::Rgb(t[0], t[1], t[2]);
            let bg = if yb < ih {
                let b = rgba.get_pixel(col, yb);
                Color::Rgb(b[0], b[1], b[2])
            } else {
                Color::Reset
            };
            let pos = Position::new(
                area.x + col_offset + col as u16,
                area.y + row_offset + row,
            );
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}
