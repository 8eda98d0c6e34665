//=========================================================================
// Actions & Input Contexts
//=========================================================================
//
// Actions: opaque identifiers produced by the mapper.
// Contexts: select which binding set is live (start screen vs playback).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for values bindings resolve to.
pub trait Action: 'static + Copy + Eq + Hash + Debug {}

//=== Control =============================================================

/// The three user controls the player understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Leave the start screen and begin at the first scene.
    Start,

    /// Cross-fade to the next scene.
    Advance,

    /// Jump to the final scene, fully revealed.
    Skip,
}

impl Action for Control {}

//=== InputContext ========================================================

/// Which binding set is live.
///
/// The frame driver derives it from the playback phase every tick, so the
/// same key can start playback on the start screen and advance it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    /// Idle: only `Start` is reachable.
    #[default]
    StartScreen,

    /// Any phase after start.
    Playback,
}

//=========================================================================
// Unit Tests
//=========================================================================
