use image::imageops::FilterType;
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{Block, BorderType, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, Screen, SearchField};
use crate::constants::constants;
use crate::graphics::{RenderMode, ThumbnailWidget};
use crate::theme::Theme;

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` characters, appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  if s.chars().count() <= max_width {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", truncated)
  }
}

/// Word-wrap `s` into at most `max_lines` lines of `width` chars, with an
/// ellipsis on the last line when content is cut. Words longer than a
/// line are hard-split.
fn clamp_lines(s: &str, width: usize, max_lines: usize) -> Vec<String> {
  if width == 0 || max_lines == 0 {
    return Vec::new();
  }
  let mut lines: Vec<String> = Vec::new();
  let mut current = String::new();
  let mut overflow = false;

  for word in s.split_whitespace() {
    let mut word = word.to_string();
    loop {
      let needed = if current.is_empty() { word.chars().count() } else { current.chars().count() + 1 + word.chars().count() };
      if needed <= width {
        if !current.is_empty() {
          current.push(' ');
        }
        current.push_str(&word);
        break;
      }
      if current.is_empty() {
        // Hard-split a word that can't fit on its own line.
        current = word.chars().take(width).collect();
        word = word.chars().skip(width).collect();
      }
      if lines.len() + 1 == max_lines {
        overflow = true;
        break;
      }
      lines.push(std::mem::take(&mut current));
      if word.is_empty() {
        break;
      }
    }
    if overflow {
      break;
    }
  }
  if !current.is_empty() || lines.is_empty() {
    lines.push(current);
  }
  if overflow {
    if let Some(last) = lines.last_mut() {
      *last = truncate_str(&format!("{}…", last), width);
    }
  }
  lines
}

/// One-line bar for the bounded result count: filled track, knob, track.
fn slider_spans(value: u8, width: usize, theme: &'static Theme) -> Vec<Span<'static>> {
  let c = constants();
  let (min, max) = (usize::from(c.max_results_min), usize::from(c.max_results_max));
  let span = max.saturating_sub(min).max(1);
  let knob = (usize::from(value).saturating_sub(min)) * width.saturating_sub(1) / span;
  vec![
    Span::styled("━".repeat(knob), Style::default().fg(theme.accent)),
    Span::styled("◆", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    Span::styled("─".repeat(width.saturating_sub(1) - knob.min(width.saturating_sub(1))), Style::default().fg(theme.muted)),
  ]
}

fn banner<'a>(msg: &'a str, fg: ratatui::style::Color, border: ratatui::style::Color) -> Paragraph<'a> {
  Paragraph::new(msg)
    .style(Style::default().fg(fg))
    .wrap(Wrap { trim: true })
    .block(Block::bordered().border_type(BorderType::Rounded).border_style(Style::default().fg(border)))
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();
  app.gfx.thumb_area = None;

  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, main_area, status_area, footer_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
      .areas(frame.area());

  render_header(frame, theme, header_area);
  match app.screen {
    Screen::Home => render_home(frame, app, main_area),
    Screen::Search => render_search(frame, app, main_area),
  }
  render_status(frame, app, status_area);
  render_footer(frame, app, footer_area);
}

fn render_header(frame: &mut Frame, theme: &'static Theme, area: Rect) {
  let left = Line::from(Span::styled(" ▶ vq ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)));
  frame.render_widget(left, area);

  let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
  let right = Line::from(Span::styled(&version, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(version.len() as u16), width: version.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

// --- Home screen ---

fn render_home(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();

  // Banners stack above the content; they are independent conditionals,
  // not an exclusive switch.
  let mut constraints = Vec::new();
  if app.playlist.error.is_some() {
    constraints.push(Constraint::Length(3));
  }
  if app.playlist.notice.is_some() {
    constraints.push(Constraint::Length(3));
  }
  constraints.push(Constraint::Min(3));
  let chunks = Layout::vertical(constraints).split(area);

  let mut next = 0;
  if let Some(ref msg) = app.playlist.error {
    frame.render_widget(banner(&format!("⚠  {}", msg), theme.error, theme.error), chunks[next]);
    next += 1;
  }
  if let Some(ref msg) = app.playlist.notice {
    frame.render_widget(banner(&format!("ℹ  {}", msg), theme.status, theme.border), chunks[next]);
    next += 1;
  }
  let content = chunks[next];

  if app.playlist.videos.is_empty() {
    if app.playlist.loading {
      let text = Paragraph::new("Loading your playlist…")
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center)
        .block(Block::bordered().border_type(BorderType::Rounded).border_style(Style::default().fg(theme.border)));
      frame.render_widget(text, content);
    } else if app.playlist.error.is_none() && app.playlist.notice.is_none() {
      render_empty_state(frame, theme, content);
    } else {
      frame.render_widget(
        Block::bordered().border_type(BorderType::Rounded).border_style(Style::default().fg(theme.border)),
        content,
      );
    }
    return;
  }

  let [list_area, preview_area] =
    Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)]).areas(content);
  render_card_list(frame, app, list_area);
  render_preview(frame, app, preview_area);
}

fn render_empty_state(frame: &mut Frame, theme: &'static Theme, area: Rect) {
  let text = vec![
    Line::from(""),
    Line::from(Span::styled("Your playlist is empty", Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))),
    Line::from(""),
    Line::from(Span::styled("Press s to search for videos to add.", Style::default().fg(theme.muted))),
  ];
  let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
    Block::bordered().border_type(BorderType::Rounded).border_style(Style::default().fg(theme.border)),
  );
  frame.render_widget(paragraph, area);
}

fn render_card_list(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();

  // Inner width: borders (2) + highlight symbol (2); the badge takes 4
  // more on the first line.
  let inner_w = area.width.saturating_sub(4) as usize;
  let title_w = inner_w.saturating_sub(5);

  let items: Vec<ListItem> = app
    .playlist
    .videos
    .iter()
    .enumerate()
    .map(|(i, video)| {
      let is_selected = Some(i) == app.playlist.list_state.selected();
      let fg = if is_selected { theme.highlight_fg } else { theme.fg };
      let bg = if is_selected {
        theme.highlight_bg
      } else if i % 2 == 1 {
        theme.stripe_bg
      } else {
        theme.bg
      };

      // Ranked badge, 1-indexed in server order.
      let badge = Span::styled(
        format!(" {:>2} ", i + 1),
        Style::default().fg(theme.highlight_fg).bg(theme.accent).add_modifier(Modifier::BOLD),
      );

      let title_lines = clamp_lines(&video.title, title_w.max(1), 2);
      let mut lines = Vec::with_capacity(3);
      let mut title_iter = title_lines.into_iter();
      lines.push(Line::from(vec![
        badge,
        Span::raw(" "),
        Span::styled(title_iter.next().unwrap_or_default(), Style::default().fg(fg).add_modifier(Modifier::BOLD)),
      ]));
      if let Some(second) = title_iter.next() {
        lines.push(Line::from(vec![Span::raw("     "), Span::styled(second, Style::default().fg(fg))]));
      }
      lines.push(Line::from(vec![
        Span::raw("     "),
        Span::styled("Watch on YouTube ↗", Style::default().fg(theme.muted)),
      ]));

      ListItem::new(lines).bg(bg)
    })
    .collect();

  let title = format!(" Playlist — {} videos ", app.playlist.videos.len());
  let list = List::new(items)
    .block(
      Block::bordered()
        .title(title)
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border)),
    )
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));

  frame.render_stateful_widget(list, area, &mut app.playlist.list_state);
}

fn render_preview(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let block = Block::bordered()
    .title(" Preview ")
    .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(theme.border))
    .padding(Padding::horizontal(1));
  let inner = block.inner(area);
  frame.render_widget(block, area);

  let Some(video) = app.selected_video().cloned() else { return };

  let [mut thumb_area, info_area] =
    Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(inner);

  // Keep the image near 16:9; half-block cells are two pixels tall.
  let ideal_h = (f32::from(thumb_area.width) * 9.0 / 32.0).round() as u16;
  if ideal_h > 0 && ideal_h < thumb_area.height {
    thumb_area.height = ideal_h;
  }

  if app.render_mode == RenderMode::Kitty && app.selected_thumb().is_some() {
    // The image travels out-of-band after the frame; just reserve the area.
    app.gfx.thumb_area = Some(thumb_area);
  } else if let Some((id, image)) = app.selected_thumb() {
    let mode = app.render_mode;
    let id = id.to_string();
    let needs_resize = match app.gfx.resized {
      Some((ref cached_id, w, h, _)) => *cached_id != id || w != thumb_area.width || h != thumb_area.height,
      None => true,
    };
    if needs_resize {
      let target_w = u32::from(thumb_area.width.max(1));
      let target_h = match mode {
        RenderMode::Ascii => u32::from(thumb_area.height.max(1)),
        _ => (target_w as f32 * 9.0 / 32.0).max(1.0) as u32,
      };
      let resized = image.resize_to_fill(target_w, target_h, FilterType::Lanczos3);
      app.gfx.resized = Some((id, thumb_area.width, thumb_area.height, resized));
    }
    if let Some((_, _, _, ref resized)) = app.gfx.resized {
      frame.render_widget(ThumbnailWidget { image: resized, mode }, thumb_area);
    }
  } else {
    let placeholder = Paragraph::new("no thumbnail yet")
      .style(Style::default().fg(theme.muted))
      .alignment(Alignment::Center);
    frame.render_widget(placeholder, thumb_area);
  }

  let inner_w = info_area.width as usize;
  let mut lines = vec![Line::from("")];
  for title_line in clamp_lines(&video.title, inner_w.max(1), 2) {
    lines.push(Line::from(Span::styled(title_line, Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))));
  }
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    truncate_str(&video.url, inner_w.max(1)),
    Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED),
  )));
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled("Enter opens the video in your browser", Style::default().fg(theme.muted))));
  frame.render_widget(Paragraph::new(lines), info_area);
}

// --- Search screen ---

fn render_search(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();

  let mut constraints = Vec::new();
  if app.search.error.is_some() {
    constraints.push(Constraint::Length(3));
  }
  constraints.push(Constraint::Length(9));
  constraints.push(Constraint::Min(0));
  let chunks = Layout::vertical(constraints).split(area);

  let mut next = 0;
  if let Some(ref msg) = app.search.error {
    frame.render_widget(banner(&format!("⚠  {}", msg), theme.error, theme.error), chunks[next]);
    next += 1;
  }
  render_search_form(frame, app, chunks[next]);
  render_search_summary(frame, app, chunks[next + 1]);
}

fn render_search_form(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let form_block = Block::bordered()
    .title(" Search and add videos ")
    .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(theme.border))
    .padding(Padding::horizontal(1));
  let inner = form_block.inner(area);
  frame.render_widget(form_block, area);

  let [keywords_area, count_area, hint_area] =
    Layout::vertical([Constraint::Length(3), Constraint::Length(3), Constraint::Length(1)]).areas(inner);

  render_keywords_input(frame, app, keywords_area);
  render_count_control(frame, app, count_area);

  let hint = if app.search.can_submit() {
    Span::styled("Enter ⏎  search and add", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
  } else {
    // Submission is disabled until there is something to search for.
    Span::styled("Type keywords to enable search", Style::default().fg(theme.muted))
  };
  frame.render_widget(Line::from(hint), hint_area);
}

fn render_keywords_input(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = app.search.field == SearchField::Keywords;
  let border_color = if focused { theme.accent } else { theme.border };
  let input_block = Block::bordered()
    .title(" Keywords ")
    .title_style(Style::default().fg(border_color))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(border_color))
    .padding(Padding::horizontal(1));

  let inner_w = area.width.saturating_sub(4) as usize;
  let cursor_col = display_width(&app.search.keywords, app.search.cursor);

  if cursor_col < app.search.scroll {
    app.search.scroll = cursor_col;
  } else if cursor_col >= app.search.scroll + inner_w {
    app.search.scroll = cursor_col.saturating_sub(inner_w) + 1;
  }

  let visible: String = app
    .search
    .keywords
    .chars()
    .scan(0usize, |col, c| {
      let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
      let start = *col;
      *col += w;
      Some((start, *col, c))
    })
    .skip_while(|(_, end, _)| *end <= app.search.scroll)
    .take_while(|(start, _, _)| *start < app.search.scroll + inner_w)
    .map(|(_, _, c)| c)
    .collect();

  let paragraph = Paragraph::new(visible).style(Style::default().fg(theme.fg)).block(input_block);
  frame.render_widget(paragraph, area);

  if focused {
    let cursor_x = area.x + 2 + (cursor_col - app.search.scroll) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
  }
}

fn render_count_control(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let focused = app.search.field == SearchField::MaxResults;
  let border_color = if focused { theme.accent } else { theme.border };
  let block = Block::bordered()
    .title(" Max results ")
    .title_style(Style::default().fg(border_color))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(border_color))
    .padding(Padding::horizontal(1));
  let inner = block.inner(area);
  frame.render_widget(block, area);

  // Slider and numeric readout are two views of the same value.
  let number = format!(" {:>2} / {} ", app.search.max_results, constants().max_results_max);
  let slider_w = (inner.width as usize).saturating_sub(number.chars().count() + 2);
  let mut spans = slider_spans(app.search.max_results, slider_w.max(2), theme);
  spans.push(Span::raw("  "));
  spans.push(if focused {
    Span::styled(number, Style::default().fg(theme.key_fg).bg(theme.accent).add_modifier(Modifier::BOLD))
  } else {
    Span::styled(number, Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))
  });
  frame.render_widget(Line::from(spans), inner);
}

fn render_search_summary(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let Some(summary) = app.search.summary.clone() else { return };
  if area.height == 0 {
    return;
  }

  let block = Block::bordered()
    .title(" Search results ")
    .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(theme.border))
    .padding(Padding::horizontal(1));
  let inner = block.inner(area);
  frame.render_widget(block, area);

  let [counter_area, list_area] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

  let counters = Line::from(vec![
    Span::styled("Added ", Style::default().fg(theme.muted)),
    Span::styled(summary.added.to_string(), Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
    Span::raw("    "),
    Span::styled("Skipped ", Style::default().fg(theme.muted)),
    Span::styled(summary.skipped.to_string(), Style::default().fg(theme.warn).add_modifier(Modifier::BOLD)),
    Span::raw("    "),
    Span::styled("Errors ", Style::default().fg(theme.muted)),
    Span::styled(summary.errors.to_string(), Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
  ]);
  frame.render_widget(Paragraph::new(counters), counter_area);

  if summary.videos.is_empty() {
    return;
  }

  let inner_w = list_area.width.saturating_sub(2) as usize;
  let items: Vec<ListItem> = summary
    .videos
    .iter()
    .map(|video| {
      let lines = vec![
        Line::from(vec![
          Span::styled("✔ ", Style::default().fg(theme.success)),
          Span::styled(truncate_str(&video.title, inner_w.saturating_sub(2)), Style::default().fg(theme.fg)),
        ]),
        Line::from(Span::styled(format!("  {}", truncate_str(&video.channel, inner_w)), Style::default().fg(theme.muted))),
      ];
      ListItem::new(lines)
    })
    .collect();

  let title = format!(" Added videos ({}) ", summary.videos.len());
  let list = List::new(items)
    .block(Block::default().title(title).title_style(Style::default().fg(theme.muted)))
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().add_modifier(Modifier::BOLD));
  frame.render_stateful_widget(list, list_area, &mut app.search.added_state);
}

// --- Status and footer ---

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = match app.screen {
    Screen::Home if app.playlist.loading => (" ⏳ Loading playlist…".to_string(), Style::default().fg(theme.status)),
    Screen::Search if app.search.loading => {
      (" ⏳ Searching and adding…".to_string(), Style::default().fg(theme.status))
    }
    _ => (" Ready".to_string(), Style::default().fg(theme.muted)),
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let keys: Vec<(&str, &str)> = match app.screen {
    Screen::Home => {
      let mut k = vec![("r", "Refresh"), ("s", "Search")];
      if !app.playlist.videos.is_empty() {
        k.push(("j/k", "Navigate"));
        k.push(("Enter", "Open"));
      }
      k.push(("^t", "Theme"));
      k.push(("q", "Quit"));
      k
    }
    Screen::Search => {
      let mut k = vec![("Tab", "Field")];
      match app.search.field {
        SearchField::Keywords => {
          if app.search.can_submit() {
            k.push(("Enter", "Search"));
          }
        }
        SearchField::MaxResults => {
          k.push(("←/→", "±1"));
          k.push(("↑/↓", "±5"));
          k.push(("0-9", "Type"));
        }
        SearchField::Added => {
          k.push(("j/k", "Scroll"));
        }
      }
      k.push(("^t", "Theme"));
      k.push(("Esc", "Back"));
      k
    }
  };

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw("  "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(theme_label.len() as u16), width: theme_label.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::{AddedVideo, ApiClient, SearchSummary, Video};
  use ratatui::{Terminal, backend::TestBackend};

  fn test_app() -> App {
    App::new(ApiClient::new("http://localhost:8000"), RenderMode::Ascii)
  }

  fn video(id: &str, title: &str) -> Video {
    Video {
      id: id.to_string(),
      title: title.to_string(),
      url: format!("https://youtube.com/watch?v={}", id),
      thumbnail: String::new(),
    }
  }

  fn draw(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
    terminal.draw(|frame| ui(frame, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
      for x in 0..buffer.area.width {
        out.push_str(buffer[(x, y)].symbol());
      }
      out.push('\n');
    }
    out
  }

  // --- text helpers ---

  #[test]
  fn truncate_leaves_short_strings_alone() {
    assert_eq!(truncate_str("short", 10), "short");
    assert_eq!(truncate_str("exactly_10", 10), "exactly_10");
  }

  #[test]
  fn truncate_appends_ellipsis() {
    assert_eq!(truncate_str("a very long title", 8), "a very …");
  }

  #[test]
  fn clamp_lines_single_short_line() {
    assert_eq!(clamp_lines("hello world", 20, 2), vec!["hello world"]);
  }

  #[test]
  fn clamp_lines_wraps_to_two() {
    let lines = clamp_lines("one two three four", 9, 2);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "one two");
  }

  #[test]
  fn clamp_lines_cuts_with_ellipsis() {
    let lines = clamp_lines("alpha beta gamma delta epsilon zeta", 10, 2);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with('…'));
  }

  #[test]
  fn clamp_lines_hard_splits_long_words() {
    let lines = clamp_lines("abcdefghijklmnop", 5, 2);
    assert_eq!(lines[0], "abcde");
    assert_eq!(lines.len(), 2);
  }

  #[test]
  fn slider_knob_stays_in_track() {
    let theme = &crate::theme::THEMES[0];
    for v in 1..=50u8 {
      let spans = slider_spans(v, 20, theme);
      let total: usize = spans.iter().map(|s| s.content.chars().count()).sum();
      assert_eq!(total, 20, "value {}", v);
    }
  }

  // --- render properties ---

  #[test]
  fn playlist_renders_one_card_per_video_with_ranked_badges() {
    let mut app = test_app();
    app.playlist.videos = vec![video("a", "First Song"), video("b", "Second Song"), video("c", "Third Song")];
    app.playlist.list_state.select(Some(0));
    let screen = draw(&mut app);
    assert!(screen.contains("  1 "));
    assert!(screen.contains("  2 "));
    assert!(screen.contains("  3 "));
    assert!(screen.contains("First Song"));
    assert!(screen.contains("Second Song"));
    assert!(screen.contains("Third Song"));
    assert!(screen.contains("Playlist — 3 videos"));
    assert!(screen.contains("Watch on YouTube"));
  }

  #[test]
  fn empty_fetch_shows_notice_without_cards() {
    let mut app = test_app();
    app.playlist.notice = Some(crate::app::PLAYLIST_EMPTY_NOTICE.to_string());
    let screen = draw(&mut app);
    assert!(screen.contains("Your playlist is empty."));
    assert!(!screen.contains("Watch on YouTube"));
    assert!(!screen.contains("⚠"));
  }

  #[test]
  fn error_banner_coexists_with_previous_cards() {
    let mut app = test_app();
    app.playlist.videos = vec![video("a", "Still Here")];
    app.playlist.list_state.select(Some(0));
    app.playlist.error = Some(crate::api::PLAYLIST_FETCH_FAILED.to_string());
    let screen = draw(&mut app);
    assert!(screen.contains(crate::api::PLAYLIST_FETCH_FAILED));
    assert!(screen.contains("Still Here"));
  }

  #[test]
  fn loading_placeholder_only_when_list_empty() {
    let mut app = test_app();
    app.playlist.loading = true;
    let screen = draw(&mut app);
    assert!(screen.contains("Loading your playlist…"));

    app.playlist.videos = vec![video("a", "Loaded")];
    app.playlist.list_state.select(Some(0));
    let screen = draw(&mut app);
    assert!(!screen.contains("Loading your playlist…"));
    assert!(screen.contains("Loaded"));
  }

  #[test]
  fn blank_keywords_show_disabled_submit_hint() {
    let mut app = test_app();
    app.go_to_search();
    let screen = draw(&mut app);
    assert!(screen.contains("Type keywords to enable search"));

    app.search.keywords = "rap".to_string();
    let screen = draw(&mut app);
    assert!(screen.contains("search and add"));
  }

  #[test]
  fn summary_counters_show_defaulted_errors() {
    let mut app = test_app();
    app.go_to_search();
    app.search.summary = Some(SearchSummary {
      added: 2,
      skipped: 1,
      errors: 0,
      videos: vec![AddedVideo { title: "Tsy Ho Bado".to_string(), channel: "Cyphaka".to_string() }],
    });
    app.search.added_state.select(Some(0));
    let screen = draw(&mut app);
    assert!(screen.contains("Added 2"));
    assert!(screen.contains("Skipped 1"));
    assert!(screen.contains("Errors 0"));
    assert!(screen.contains("Tsy Ho Bado"));
    assert!(screen.contains("Cyphaka"));
  }

  #[test]
  fn max_results_value_appears_in_readout() {
    let mut app = test_app();
    app.go_to_search();
    app.search.set_max_results(23);
    let screen = draw(&mut app);
    assert!(screen.contains("23 / 50"));
  }
}
