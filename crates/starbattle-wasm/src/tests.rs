//! Tests for WASM Star Battle game state

#[cfg(test)]
mod tests {
    use crate::game::{GameState, ScreenState};
    use starbattle_core::Position;

    #[test]
    fn test_game_state_new() {
        let state = GameState::new();
        assert_eq!(state.screen(), ScreenState::AltarSelect);
        assert_eq!(state.levels().len(), 6);
        assert_eq!(state.moves(), 0);
        assert!(state.size().is_none());
        assert!(!state.is_solved());
    }

    #[test]
    fn test_altar_activation() {
        let mut state = GameState::new();
        state.activate(0);
        assert_eq!(state.screen(), ScreenState::Playing);
        assert_eq!(state.size(), Some(5));
        assert_eq!(state.level().unwrap().name, "Altar of Dawn");
    }

    #[test]
    fn test_activation_out_of_range_is_ignored() {
        let mut state = GameState::new();
        state.activate(99);
        assert_eq!(state.screen(), ScreenState::AltarSelect);
        assert!(state.size().is_none());
    }

    #[test]
    fn test_cursor_navigation() {
        let mut state = GameState::new();
        state.activate(0);
        assert_eq!(state.cursor(), Position::new(0, 0));

        state.handle_key("ArrowDown", false, false);
        state.handle_key("ArrowRight", false, false);
        assert_eq!(state.cursor(), Position::new(1, 1));

        state.handle_key("ArrowUp", false, false);
        state.handle_key("ArrowLeft", false, false);
        assert_eq!(state.cursor(), Position::new(0, 0));

        // Clamped at the edge
        state.handle_key("ArrowUp", false, false);
        assert_eq!(state.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_click_place_and_remove() {
        let mut state = GameState::new();
        state.activate(0);

        state.click_cell(0, 1, false);
        assert_eq!(state.moves(), 1);

        // Clicking the same cell removes the queen
        state.click_cell(0, 1, false);
        assert_eq!(state.moves(), 2);
        assert_eq!(state.engine().solution_state().len(), 0);
    }

    #[test]
    fn test_right_click_marks() {
        let mut state = GameState::new();
        state.activate(0);

        state.click_cell(2, 2, true);
        let grid = state.engine().grid().unwrap();
        assert!(grid.cell(Position::new(2, 2)).unwrap().is_marked());
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn test_rejection_shows_message() {
        let mut state = GameState::new();
        state.activate(0);

        state.click_cell(2, 2, false);
        state.click_cell(3, 3, false); // diagonal neighbor
        assert!(state.message().unwrap().contains("adjacency"));
        assert_eq!(state.engine().solution_state().len(), 1);
    }

    #[test]
    fn test_solving_reaches_solved_screen() {
        let mut state = GameState::new();
        state.activate(0);
        for (row, col) in [(0, 1), (1, 3), (2, 0), (3, 2), (4, 4)] {
            state.click_cell(row, col, false);
        }
        assert_eq!(state.screen(), ScreenState::Solved);
        assert!(state.is_altar_solved("Altar of Dawn"));
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut state = GameState::new();
        state.activate(1);
        state.click_cell(0, 0, false);
        state.click_cell(2, 1, true);

        let saved = state.to_serializable();
        let restored = GameState::from_serializable(saved);

        assert_eq!(restored.screen(), ScreenState::Playing);
        assert_eq!(restored.level().unwrap().name, "Altar of Tides");
        assert_eq!(restored.engine().solution_state().len(), 1);
        let grid = restored.engine().grid().unwrap();
        assert!(grid.cell(Position::new(2, 1)).unwrap().is_marked());
    }
}
