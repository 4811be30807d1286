use ar_core::charset::Palette;
use ar_core::color::CellColor;
use ar_core::config::ConversionConfig;
use ar_core::error::CoreError;
use ar_core::frame::{Cell, FrameBuffer, Grid};

use crate::color_map;
use crate::luminance;

/// Result of one conversion: the grid and its plain-text rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    /// Characters only, rows joined by `'\n'`.
    pub text: String,
    /// Colored cells.
    pub grid: Grid,
}

/// Géométrie d'échantillonnage dérivée des dimensions source et de la config.
///
/// # Example
/// ```
/// use ar_ascii::converter::SamplingPlan;
/// use ar_core::config::ConversionConfig;
///
/// let config = ConversionConfig {
///     resolution: 0.1,
///     aspect_x: 1.0,
///     aspect_y: 1.0,
///     ..Default::default()
/// };
/// let plan = SamplingPlan::new(100, 100, &config).unwrap();
/// assert_eq!((plan.target_columns, plan.target_rows), (10, 10));
/// assert_eq!((plan.stride_x, plan.stride_y), (10, 20));
/// assert_eq!((plan.columns, plan.rows), (10, 5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingPlan {
    /// `floor(width * resolution * aspect_x)`.
    pub target_columns: u32,
    /// `floor(height * resolution * aspect_y)`.
    pub target_rows: u32,
    /// Correction for glyphs being taller than wide: `(0.5 / aspect_y) * aspect_x`.
    pub font_aspect: f64,
    /// Horizontal distance between sampled pixels.
    pub stride_x: u32,
    /// Vertical distance between sampled pixels.
    pub stride_y: u32,
    /// Columns of the produced grid.
    pub columns: usize,
    /// Rows of the produced grid.
    pub rows: usize,
}

impl SamplingPlan {
    /// Compute strides and grid size for a `width`×`height` source.
    ///
    /// # Errors
    /// [`CoreError::Config`] for out-of-domain settings,
    /// [`CoreError::DegenerateConfiguration`] when the target grid floors to
    /// zero columns or rows.
    pub fn new(width: u32, height: u32, config: &ConversionConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let target_w = (f64::from(width) * config.resolution * config.aspect_x).floor();
        let target_h = (f64::from(height) * config.resolution * config.aspect_y).floor();
        if target_w < 1.0 || target_h < 1.0 {
            return Err(CoreError::DegenerateConfiguration {
                columns: target_w.max(0.0) as u32,
                rows: target_h.max(0.0) as u32,
            });
        }

        let font_aspect = (0.5 / config.aspect_y) * config.aspect_x;
        let stride_x = (f64::from(width) / target_w).ceil().max(1.0) as u32;
        let stride_y = (f64::from(height) / target_h / font_aspect)
            .ceil()
            .max(1.0) as u32;

        Ok(Self {
            target_columns: target_w as u32,
            target_rows: target_h as u32,
            font_aspect,
            stride_x,
            stride_y,
            columns: width.div_ceil(stride_x) as usize,
            rows: height.div_ceil(stride_y) as usize,
        })
    }
}

/// Convertit un buffer de pixels en grille de caractères colorés.
///
/// Samples the top-left pixel of every `stride_x`×`stride_y` block (no
/// averaging), maps its brightness onto the palette and derives the cell
/// color. Pixels the buffer does not actually hold become blank cells.
///
/// # Errors
/// [`CoreError::PixelRead`] if the buffer cannot be read as RGBA, plus any
/// error of [`SamplingPlan::new`].
///
/// # Example
/// ```
/// use ar_ascii::converter::convert;
/// use ar_core::config::ConversionConfig;
/// use ar_core::frame::FrameBuffer;
///
/// let frame = FrameBuffer::new(64, 64);
/// let conversion = convert(&frame, &ConversionConfig::default()).unwrap();
/// assert!(conversion.text.chars().all(|c| c == ' ' || c == '\n'));
/// ```
pub fn convert(frame: &FrameBuffer, config: &ConversionConfig) -> Result<Conversion, CoreError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CoreError::PixelRead(format!(
            "surface has no pixels ({}×{})",
            frame.width, frame.height
        )));
    }
    frame.check_readable()?;

    let plan = SamplingPlan::new(frame.width, frame.height, config)?;
    log::debug!(
        "Dimensions ASCII : {}×{} (stride {}×{})",
        plan.columns,
        plan.rows,
        plan.stride_x,
        plan.stride_y
    );

    let palette = Palette::builtin(config.palette)?;
    let mut cells = Vec::with_capacity(plan.columns * plan.rows);
    for y in (0..frame.height).step_by(plan.stride_y as usize) {
        for x in (0..frame.width).step_by(plan.stride_x as usize) {
            cells.push(sample_cell(frame.pixel(x, y), &palette, config));
        }
    }

    let grid = Grid::from_cells(plan.columns, plan.rows, cells)?;
    let text = grid.to_text();
    log::info!("Conversion ASCII terminée : {} lignes", grid.height());
    Ok(Conversion { text, grid })
}

#[inline]
fn sample_cell(
    pixel: Option<(u8, u8, u8, u8)>,
    palette: &Palette,
    config: &ConversionConfig,
) -> Cell {
    let (ch, index, (r, g, b)) = match pixel {
        Some((r, g, b, _)) => {
            let brightness = luminance::brightness(r, g, b, config.grayscale, config.invert);
            let index = palette.index_for(brightness);
            (palette.char_at(index), index, (r, g, b))
        }
        None => (palette.blank(), 0, (0, 0, 0)),
    };

    let color = if config.grayscale {
        CellColor::White
    } else {
        color_map::derive_color(r, g, b, index, palette.max_index())
    };
    Cell { ch, color }
}
