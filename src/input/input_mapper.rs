//! Input mapping from raw key presses to semantic actions

/// Session-level actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// End the session (Q key)
    Quit,
    /// Freeze or resume the simulation (P key)
    TogglePause,
    /// Clear the balls and score and recentre the platform (R key)
    Reset,
}

/// Maps raw key presses to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map a pressed key to an action
    ///
    /// Matching is case-insensitive. Unbound keys return `None`.
    pub fn map_key(key: char) -> Option<GameAction> {
        match key.to_ascii_lowercase() {
            'q' => Some(GameAction::Quit),
            'p' => Some(GameAction::TogglePause),
            'r' => Some(GameAction::Reset),
            _ => None,
        }
    }
}
