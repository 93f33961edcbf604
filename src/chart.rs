//! PNG bar charts encoded for inline embedding
//!
//! Charts are drawn on an in-memory bitmap with plotters and encoded to
//! base64 PNG. No text is rendered, which keeps the renderer free of
//! system font requirements on headless hosts.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::prelude::*;
use thiserror::Error;

/// Chart width in pixels
pub const WIDTH: u32 = 1000;

/// Chart height in pixels
pub const HEIGHT: u32 = 600;

const MARGIN_LEFT: i32 = 80;
const MARGIN_RIGHT: i32 = 40;
const MARGIN_TOP: i32 = 60;
const MARGIN_BOTTOM: i32 = 60;
const GRID_STEP: f64 = 5.0;

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),

    #[error("Failed to encode PNG: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// One bar of a bar chart
#[derive(Debug, Clone)]
pub struct Bar {
    pub value: f64,
    pub color: RGBColor,
}

/// The decorative chart attached to every test result: fixed group counts,
/// independent of the test that ran.
pub fn sample_bars() -> Vec<Bar> {
    // groups A, B and C, left to right
    vec![
        Bar {
            value: 25.0,
            color: RGBColor(0xFF, 0x6B, 0x6B),
        },
        Bar {
            value: 30.0,
            color: RGBColor(0x4E, 0xCD, 0xC4),
        },
        Bar {
            value: 45.0,
            color: RGBColor(0x45, 0xB7, 0xD1),
        },
    ]
}

/// Render [`sample_bars`] as a base64 PNG
pub fn render_sample_chart() -> Result<String> {
    render_bar_chart(&sample_bars())
}

/// Render a bar chart and return it base64 encoded (standard alphabet)
pub fn render_bar_chart(bars: &[Bar]) -> Result<String> {
    let png = render_png(bars)?;
    Ok(STANDARD.encode(png))
}

/// Render a bar chart to PNG bytes
pub fn render_png(bars: &[Bar]) -> Result<Vec<u8>> {
    if bars.is_empty() {
        return Err(ChartError::InvalidData("no bars to draw".into()));
    }
    if bars.iter().any(|b| !b.value.is_finite() || b.value < 0.0) {
        return Err(ChartError::InvalidData(
            "bar values must be finite and non-negative".into(),
        ));
    }

    let mut pixels = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    draw_bars(&mut pixels, bars)?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(&pixels, WIDTH, HEIGHT, ColorType::Rgb8)?;
    tracing::debug!(bars = bars.len(), bytes = png.len(), "rendered bar chart");
    Ok(png)
}

fn draw_bars(pixels: &mut [u8], bars: &[Bar]) -> Result<()> {
    let root = BitMapBackend::with_buffer(pixels, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let plot_left = MARGIN_LEFT;
    let plot_right = WIDTH as i32 - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = HEIGHT as i32 - MARGIN_BOTTOM;
    let plot_height = f64::from(plot_bottom - plot_top);

    let max_value = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let y_max = ((max_value / GRID_STEP).ceil() * GRID_STEP).max(GRID_STEP);
    let to_y = |v: f64| plot_bottom - (v / y_max * plot_height).round() as i32;

    // horizontal grid, drawn under the bars
    let mut level = GRID_STEP;
    while level <= y_max {
        let y = to_y(level);
        root.draw(&PathElement::new(
            vec![(plot_left, y), (plot_right, y)],
            BLACK.mix(0.3),
        ))
        .map_err(drawing)?;
        level += GRID_STEP;
    }

    let slot = (plot_right - plot_left) / bars.len() as i32;
    let bar_width = slot * 6 / 10;
    for (i, bar) in bars.iter().enumerate() {
        let x0 = plot_left + slot * i as i32 + (slot - bar_width) / 2;
        root.draw(&Rectangle::new(
            [(x0, to_y(bar.value)), (x0 + bar_width, plot_bottom)],
            bar.color.filled(),
        ))
        .map_err(drawing)?;
    }

    // axes
    root.draw(&PathElement::new(
        vec![(plot_left, plot_top), (plot_left, plot_bottom), (plot_right, plot_bottom)],
        BLACK.stroke_width(2),
    ))
    .map_err(drawing)?;

    root.present().map_err(drawing)?;
    Ok(())
}

fn drawing<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}
