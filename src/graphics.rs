use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use clap::ValueEnum;
use image::{DynamicImage, ImageFormat};
use ratatui::{
  buffer::Buffer,
  layout::Rect,
  style::{Color, Style},
  widgets::Widget,
};
use std::io::{Cursor, Write};

// --- Mode selection ---

/// Thumbnail rendering backend, selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThumbMode {
  /// Probe the terminal and pick the best supported protocol.
  Auto,
  Kitty,
  Halfblock,
  Ascii,
}

/// The protocol actually used for drawing, after `Auto` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
  Kitty,
  Halfblock,
  Ascii,
}

impl RenderMode {
  pub fn label(self) -> &'static str {
    match self {
      RenderMode::Kitty => "Kitty",
      RenderMode::Halfblock => "Half-block",
      RenderMode::Ascii => "ASCII",
    }
  }
}

impl ThumbMode {
  /// Resolve `Auto` by probing the environment.
  ///
  /// Probe order: Kitty graphics (`TERM=xterm-kitty`, or `TERM_PROGRAM` is
  /// kitty/WezTerm/ghostty), then true-color half-block (`COLORTERM`),
  /// then ASCII as the universal fallback.
  pub fn resolve(self) -> RenderMode {
    match self {
      ThumbMode::Kitty => RenderMode::Kitty,
      ThumbMode::Halfblock => RenderMode::Halfblock,
      ThumbMode::Ascii => RenderMode::Ascii,
      ThumbMode::Auto => {
        let term = std::env::var("TERM").unwrap_or_default();
        let term_program = std::env::var("TERM_PROGRAM").unwrap_or_default().to_lowercase();
        if term == "xterm-kitty" || matches!(term_program.as_str(), "kitty" | "wezterm" | "ghostty") {
          return RenderMode::Kitty;
        }
        let colorterm = std::env::var("COLORTERM").unwrap_or_default().to_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" {
          return RenderMode::Halfblock;
        }
        RenderMode::Ascii
      }
    }
  }
}

// --- Cell-based rendering (half-block / ASCII) ---

/// Draws a pre-resized thumbnail into the frame buffer. Kitty mode draws
/// nothing here — the image is sent out-of-band after the frame.
pub struct ThumbnailWidget<'a> {
  pub image: &'a DynamicImage,
  pub mode: RenderMode,
}

const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

impl Widget for ThumbnailWidget<'_> {
  fn render(self, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
      return;
    }
    match self.mode {
      RenderMode::Halfblock => render_halfblock(self.image, area, buf),
      RenderMode::Ascii => render_ascii(self.image, area, buf),
      RenderMode::Kitty => {}
    }
  }
}

/// Clamp a pixel offset into the u16 range a `Rect` coordinate needs.
fn cell_coord(base: u16, offset: u32) -> u16 {
  base.saturating_add(offset.min(u32::from(u16::MAX)) as u16)
}

/// Two vertical pixels per cell via the upper-half-block glyph: the top
/// pixel becomes the foreground, the bottom the background.
fn render_halfblock(image: &DynamicImage, area: Rect, buf: &mut Buffer) {
  let rgb = image.to_rgb8();
  let img_w = rgb.width().min(u32::from(area.width));
  let cell_rows = rgb.height().div_ceil(2).min(u32::from(area.height));
  let offset_x = (u32::from(area.width) - img_w) / 2;
  let offset_y = (u32::from(area.height) - cell_rows) / 2;

  for row in 0..cell_rows {
    for x in 0..img_w {
      let top = rgb.get_pixel(x, row * 2);
      let fg = Color::Rgb(top[0], top[1], top[2]);
      let bg = if row * 2 + 1 < rgb.height() {
        let bottom = rgb.get_pixel(x, row * 2 + 1);
        Color::Rgb(bottom[0], bottom[1], bottom[2])
      } else {
        Color::Reset
      };
      buf.set_string(
        cell_coord(area.x, offset_x + x),
        cell_coord(area.y, offset_y + row),
        "▀",
        Style::default().fg(fg).bg(bg),
      );
    }
  }
}

/// Grayscale character ramp for terminals with no color support at all.
fn render_ascii(image: &DynamicImage, area: Rect, buf: &mut Buffer) {
  let luma = image.to_luma8();
  let img_w = luma.width().min(u32::from(area.width));
  let img_h = luma.height().min(u32::from(area.height));
  let offset_x = (u32::from(area.width) - img_w) / 2;
  let offset_y = (u32::from(area.height) - img_h) / 2;

  for y in 0..img_h {
    for x in 0..img_w {
      let level = luma.get_pixel(x, y)[0] as usize;
      let idx = level * (ASCII_RAMP.len() - 1) / 255;
      let glyph = ASCII_RAMP[idx] as char;
      buf.set_string(
        cell_coord(area.x, offset_x + x),
        cell_coord(area.y, offset_y + y),
        glyph.to_string().as_str(),
        Style::default(),
      );
    }
  }
}

// --- Kitty graphics protocol ---
//
// Images are transmitted out-of-band as OSC APC sequences:
//
//   Transmit:  \x1B_G a=T,f=100,t=d,i=1,p=1,c=<cols>,r=<rows>,q=2,m=1;<base64 chunk>\x1B\\
//   Continue:  \x1B_G m=1;<base64 chunk>\x1B\\
//   Last:      \x1B_G m=0;<base64 chunk>\x1B\\
//   Delete all: \x1B_G a=d,d=a,q=2\x1B\\
//
// Fixed image ID `i=1` / placement ID `p=1` make re-transmission an atomic
// replacement: the terminal swaps the image without a visible gap. The
// payload is PNG, base64'd, split into chunks of at most 4096 bytes; `c`
// and `r` tell the terminal how many cells to scale the image over.

const KITTY_CHUNK_SIZE: usize = 4096;

/// Delete every Kitty image currently displayed (screen switches and exit).
pub fn kitty_delete_all() -> Result<()> {
  let mut stdout = std::io::stdout();
  write!(stdout, "\x1B_Ga=d,d=a,q=2\x1B\\").context("Failed to write kitty delete")?;
  stdout.flush().context("Failed to flush kitty delete")?;
  Ok(())
}

/// Transmit an image scaled over `area` using the Kitty graphics protocol.
pub fn kitty_render_image(image: &DynamicImage, area: Rect) -> Result<()> {
  if area.is_empty() {
    return Ok(());
  }

  // Send the full-resolution PNG: the c/r parameters let the terminal do
  // the scaling at its native pixel density, avoiding a lossy pre-resize.
  let mut png = Vec::new();
  image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).context("Failed to encode thumbnail as PNG")?;
  let payload = BASE64.encode(&png);
  // Safety: the base64 alphabet is pure ASCII, so every byte boundary is a
  // char boundary and the conversion cannot fail.
  let chunks: Vec<&str> = payload
    .as_bytes()
    .chunks(KITTY_CHUNK_SIZE)
    .map(|chunk| std::str::from_utf8(chunk).expect("base64 output is ASCII"))
    .collect();

  let mut stdout = std::io::stdout();
  write!(stdout, "\x1B[{};{}H", area.y.saturating_add(1), area.x.saturating_add(1))
    .context("Failed to position cursor for kitty image")?;

  let last = chunks.len().saturating_sub(1);
  for (i, chunk) in chunks.iter().enumerate() {
    let more = u8::from(i < last);
    if i == 0 {
      write!(stdout, "\x1B_Ga=T,f=100,t=d,i=1,p=1,c={},r={},q=2,m={};{}\x1B\\", area.width, area.height, more, chunk)
        .context("Failed to write kitty header chunk")?;
    } else {
      write!(stdout, "\x1B_Gm={};{}\x1B\\", more, chunk).context("Failed to write kitty continuation chunk")?;
    }
  }

  stdout.flush().context("Failed to flush kitty image")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn explicit_modes_resolve_to_themselves() {
    assert_eq!(ThumbMode::Kitty.resolve(), RenderMode::Kitty);
    assert_eq!(ThumbMode::Halfblock.resolve(), RenderMode::Halfblock);
    assert_eq!(ThumbMode::Ascii.resolve(), RenderMode::Ascii);
  }

  #[test]
  fn ascii_ramp_spans_full_luma_range() {
    // Darkest and brightest pixels map to the ramp's endpoints.
    assert_eq!(0 * (ASCII_RAMP.len() - 1) / 255, 0);
    assert_eq!(255 * (ASCII_RAMP.len() - 1) / 255, ASCII_RAMP.len() - 1);
  }

  #[test]
  fn halfblock_renders_within_area() {
    let image = DynamicImage::new_rgb8(8, 8);
    let area = Rect::new(0, 0, 4, 4);
    let mut buf = Buffer::empty(area);
    ThumbnailWidget { image: &image, mode: RenderMode::Halfblock }.render(area, &mut buf);
    assert_eq!(buf[(0, 0)].symbol(), "▀");
  }
}
