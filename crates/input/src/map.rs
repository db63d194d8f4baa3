//! Key mapping from terminal events to game actions.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::GameAction;

/// Map a key press to every action it triggers.
///
/// Space drives jump, start and restart at once; the engine only consults the
/// edge that matters in the current phase. Repeats and releases map to
/// nothing so that holding a key never fires a second edge.
pub fn actions_for_key(key: KeyEvent) -> ArrayVec<GameAction, 4> {
    let mut actions = ArrayVec::new();
    if key.kind != KeyEventKind::Press {
        return actions;
    }

    match key.code {
        KeyCode::Char(' ') => {
            actions.push(GameAction::Jump);
            actions.push(GameAction::Start);
            actions.push(GameAction::Restart);
        }
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => actions.push(GameAction::Jump),
        KeyCode::Enter => {
            actions.push(GameAction::Start);
            actions.push(GameAction::Restart);
        }
        KeyCode::F(1) | KeyCode::Char('`') => actions.push(GameAction::ToggleDebug),
        _ => {}
    }
    actions
}

/// Check if key should close the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
