use crate::vision::Slider;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::io;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Escape,
    FlapOrTap,
    Tune(TuneCommand),
    Resize(u16, u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TuneCommand {
    Select(Slider),
    Adjust(i16),
    ToggleHud,
}

pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(InputEvent::FlapOrTap)
        }
        Event::Resize(c, r) => Some(InputEvent::Resize(*c, *r)),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let tune = |cmd| Some(InputEvent::Tune(cmd));
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q') => Some(InputEvent::Quit),
        KeyCode::Esc => Some(InputEvent::Escape),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(InputEvent::FlapOrTap),
        KeyCode::Char(d @ '1'..='6') => {
            tune(TuneCommand::Select(Slider::ALL[(d as u8 - b'1') as usize]))
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => tune(TuneCommand::Adjust(1)),
        KeyCode::Char('-') | KeyCode::Left => tune(TuneCommand::Adjust(-1)),
        KeyCode::Char(']') => tune(TuneCommand::Adjust(10)),
        KeyCode::Char('[') => tune(TuneCommand::Adjust(-10)),
        KeyCode::Char('t') => tune(TuneCommand::ToggleHud),
        _ => None,
    }
}

/// Drain everything queued since the last tick without blocking.
pub fn poll() -> io::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    while event::poll(Duration::ZERO)? {
        if let Some(e) = translate(&event::read()?) {
            events.push(e);
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn game_keys() {
        assert_eq!(translate(&key(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(translate(&key(KeyCode::Esc)), Some(InputEvent::Escape));
        assert_eq!(translate(&key(KeyCode::Char(' '))), Some(InputEvent::FlapOrTap));
        assert_eq!(translate(&key(KeyCode::Up)), Some(InputEvent::FlapOrTap));
        assert_eq!(
            translate(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
            Some(InputEvent::Quit)
        );
        assert_eq!(translate(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate(&Event::Key(release)), None);
    }

    #[test]
    fn tuner_keys() {
        assert_eq!(
            translate(&key(KeyCode::Char('1'))),
            Some(InputEvent::Tune(TuneCommand::Select(Slider::HueMin)))
        );
        assert_eq!(
            translate(&key(KeyCode::Char('6'))),
            Some(InputEvent::Tune(TuneCommand::Select(Slider::ValMax)))
        );
        assert_eq!(
            translate(&key(KeyCode::Char('['))),
            Some(InputEvent::Tune(TuneCommand::Adjust(-10)))
        );
    }

    #[test]
    fn left_click_taps() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(&click), Some(InputEvent::FlapOrTap));
        assert_eq!(translate(&Event::Resize(100, 30)), Some(InputEvent::Resize(100, 30)));
    }
}
