use ratatui::style::Color;

/// A named UI palette. Every screen draws exclusively through the active
/// theme so Ctrl+T can restyle the whole app in one keypress.
pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub muted: Color,
  pub accent: Color,
  pub border: Color,
  pub status: Color,
  pub error: Color,
  pub success: Color,
  pub warn: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub key_fg: Color,
  pub key_bg: Color,
}

pub const THEMES: [Theme; 3] = [
  Theme {
    name: "midnight",
    bg: Color::Rgb(15, 23, 42),
    fg: Color::Rgb(226, 232, 240),
    muted: Color::Rgb(148, 163, 184),
    accent: Color::Rgb(239, 68, 68),
    border: Color::Rgb(51, 65, 85),
    status: Color::Rgb(56, 189, 248),
    error: Color::Rgb(252, 165, 165),
    success: Color::Rgb(16, 185, 129),
    warn: Color::Rgb(245, 158, 11),
    highlight_fg: Color::Rgb(15, 23, 42),
    highlight_bg: Color::Rgb(239, 68, 68),
    stripe_bg: Color::Rgb(30, 41, 59),
    key_fg: Color::Rgb(15, 23, 42),
    key_bg: Color::Rgb(148, 163, 184),
  },
  Theme {
    name: "paper",
    bg: Color::Rgb(250, 250, 245),
    fg: Color::Rgb(41, 37, 36),
    muted: Color::Rgb(120, 113, 108),
    accent: Color::Rgb(190, 18, 60),
    border: Color::Rgb(214, 211, 209),
    status: Color::Rgb(2, 132, 199),
    error: Color::Rgb(185, 28, 28),
    success: Color::Rgb(21, 128, 61),
    warn: Color::Rgb(180, 83, 9),
    highlight_fg: Color::Rgb(250, 250, 245),
    highlight_bg: Color::Rgb(190, 18, 60),
    stripe_bg: Color::Rgb(241, 240, 235),
    key_fg: Color::Rgb(250, 250, 245),
    key_bg: Color::Rgb(120, 113, 108),
  },
  // Plain ANSI colors for terminals without truecolor support.
  Theme {
    name: "terminal",
    bg: Color::Reset,
    fg: Color::Reset,
    muted: Color::DarkGray,
    accent: Color::Red,
    border: Color::DarkGray,
    status: Color::Cyan,
    error: Color::LightRed,
    success: Color::Green,
    warn: Color::Yellow,
    highlight_fg: Color::Black,
    highlight_bg: Color::Red,
    stripe_bg: Color::Reset,
    key_fg: Color::Black,
    key_bg: Color::Gray,
  },
];
