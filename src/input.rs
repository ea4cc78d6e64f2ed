use anyhow::Result;
use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};

use crate::app::{App, Screen, SearchField};

// --- Helpers ---

/// Convert a char index to a byte offset within the string.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
  s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

// --- Event Handling ---

pub fn handle_key_event(app: &mut App, key: event::KeyEvent) -> Result<()> {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return Ok(());
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
    app.next_theme();
    return Ok(());
  }

  match app.screen {
    Screen::Home => handle_home_key(app, key),
    Screen::Search => handle_search_key(app, key),
  }
  Ok(())
}

fn handle_home_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Char('r') => {
      app.trigger_refresh();
    }
    KeyCode::Char('s') | KeyCode::Char('/') => {
      app.go_to_search();
    }
    KeyCode::Down | KeyCode::Char('j') => {
      app.select_next();
    }
    KeyCode::Up | KeyCode::Char('k') => {
      app.select_prev();
    }
    KeyCode::Enter => {
      app.open_selected();
    }
    KeyCode::Char('q') | KeyCode::Esc => {
      app.should_quit = true;
    }
    _ => {}
  }
}

fn handle_search_key(app: &mut App, key: event::KeyEvent) {
  // Esc is the back button: always allowed, never guarded.
  if key.code == KeyCode::Esc {
    app.go_home();
    return;
  }
  if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
    app.search.next_field();
    return;
  }

  match app.search.field {
    SearchField::Keywords => handle_keywords_key(app, key),
    SearchField::MaxResults => handle_count_key(app, key),
    SearchField::Added => handle_added_key(app, key),
  }
}

fn handle_keywords_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Enter => {
      app.trigger_search_add();
    }
    KeyCode::Char(c) => {
      let byte_idx = char_to_byte_index(&app.search.keywords, app.search.cursor);
      app.search.keywords.insert(byte_idx, c);
      app.search.cursor += 1;
    }
    KeyCode::Backspace => {
      if app.search.cursor > 0 {
        app.search.cursor -= 1;
        let byte_idx = char_to_byte_index(&app.search.keywords, app.search.cursor);
        app.search.keywords.remove(byte_idx);
      }
    }
    KeyCode::Delete => {
      if app.search.cursor < app.search.keywords.chars().count() {
        let byte_idx = char_to_byte_index(&app.search.keywords, app.search.cursor);
        app.search.keywords.remove(byte_idx);
      }
    }
    KeyCode::Left => {
      app.search.cursor = app.search.cursor.saturating_sub(1);
    }
    KeyCode::Right => {
      if app.search.cursor < app.search.keywords.chars().count() {
        app.search.cursor += 1;
      }
    }
    KeyCode::Home => {
      app.search.cursor = 0;
    }
    KeyCode::End => {
      app.search.cursor = app.search.keywords.chars().count();
    }
    _ => {}
  }
}

fn handle_count_key(app: &mut App, key: event::KeyEvent) {
  let coarse = i16::from(crate::constants::constants().max_results_coarse_step);
  match key.code {
    KeyCode::Enter => {
      app.trigger_search_add();
    }
    KeyCode::Left => {
      app.search.nudge_max_results(-1);
    }
    KeyCode::Right => {
      app.search.nudge_max_results(1);
    }
    KeyCode::Up => {
      app.search.nudge_max_results(coarse);
    }
    KeyCode::Down => {
      app.search.nudge_max_results(-coarse);
    }
    KeyCode::Char(c) if c.is_ascii_digit() => {
      // Digit keys act as the paired number field.
      app.search.push_max_results_digit(c as u8 - b'0');
    }
    KeyCode::Backspace => {
      app.search.pop_max_results_digit();
    }
    _ => {}
  }
}

fn handle_added_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Down | KeyCode::Char('j') => {
      app.select_next_added();
    }
    KeyCode::Up | KeyCode::Char('k') => {
      app.select_prev_added();
    }
    _ => {}
  }
}
