//! Input domain: tests for intent accumulation and diagonal suppression.

use bevy::prelude::Vec2;

use super::{Axis, InputAccumulator, TieBreak};

// -----------------------------------------------------------------------------
// Frame and persistent channels
// -----------------------------------------------------------------------------

#[test]
fn test_repeated_move_is_clamped() {
    let mut input = InputAccumulator::new(true, TieBreak::Sticky);
    input.move_right(false);
    input.move_right(false);
    input.move_right(false);
    assert_eq!(input.combined(), Vec2::new(1.0, 0.0));
}

#[test]
fn test_opposite_directions_cancel() {
    let mut input = InputAccumulator::new(true, TieBreak::Sticky);
    input.move_left(false);
    input.move_right(false);
    assert_eq!(input.combined(), Vec2::ZERO);
}

#[test]
fn test_frame_input_resets() {
    let mut input = InputAccumulator::new(true, TieBreak::Sticky);
    input.move_up(false);
    assert_eq!(input.combined(), Vec2::Y);
    input.reset_frame();
    assert_eq!(input.combined(), Vec2::ZERO);
}

#[test]
fn test_persistent_input_survives_reset() {
    let mut input = InputAccumulator::new(true, TieBreak::Sticky);
    input.move_down(true);
    input.reset_frame();
    input.reset_frame();
    assert_eq!(input.combined(), Vec2::NEG_Y);

    input.clear_persistent_input();
    assert_eq!(input.combined(), Vec2::ZERO);
}

#[test]
fn test_combined_input_is_clamped_per_axis() {
    let mut input = InputAccumulator::new(true, TieBreak::Sticky);
    input.move_right(true);
    input.move_right(false);
    input.move_up(false);
    let combined = input.combined();
    assert_eq!(combined, Vec2::new(1.0, 1.0));
    assert!(combined.x.abs() <= 1.0 && combined.y.abs() <= 1.0);
}

// -----------------------------------------------------------------------------
// Diagonal suppression
// -----------------------------------------------------------------------------

#[test]
fn test_diagonal_allowed_keeps_both_axes() {
    let mut input = InputAccumulator::new(true, TieBreak::Sticky);
    input.move_up(false);
    input.move_right(false);
    assert_eq!(input.combined(), Vec2::new(1.0, 1.0));
}

#[test]
fn test_sticky_tie_break_prefers_vertical_by_default() {
    let mut input = InputAccumulator::new(false, TieBreak::Sticky);
    input.move_up(false);
    input.move_right(false);
    assert_eq!(input.combined(), Vec2::Y);

    input.note_key_down(Axis::Horizontal);
    assert_eq!(input.combined(), Vec2::Y);
}

#[test]
fn test_sticky_tie_break_honours_explicit_preference() {
    let mut input = InputAccumulator::new(false, TieBreak::Sticky);
    input.prefer_horizontal = true;
    input.move_up(false);
    input.move_right(false);
    assert_eq!(input.combined(), Vec2::X);
}

#[test]
fn test_last_pressed_tie_break_follows_key_edges() {
    let mut input = InputAccumulator::new(false, TieBreak::LastPressed);
    input.move_up(false);
    input.move_left(false);

    input.note_key_down(Axis::Horizontal);
    assert_eq!(input.combined(), Vec2::NEG_X);

    input.note_key_down(Axis::Vertical);
    assert_eq!(input.combined(), Vec2::Y);
}
