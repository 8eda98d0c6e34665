//=========================================================================
// Story Content
//=========================================================================
//
// The bundled journey: seven illustrated, narrated scenes played in order.
//
//   birth → elementary → disney → middle → highschool → car → today
//     ↑                                                          │
//     └──────────────── (celebration, start screen) ─────────────┘
//
// `figure` draws the recurring characters; `scenes` holds one `Scene`
// impl per beat.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod figure;
pub mod scenes;

//=== Internal Dependencies ===============================================

use crate::core::scene::{RegistryError, SceneRegistry};
use scenes::{Birth, Elementary, HighSchool, MiddleSchool, NightDrive, ThemePark, Today};

//=== Public API ==========================================================

/// Builds the registry for the bundled story.
///
/// # Errors
///
/// Returns [`RegistryError`] only if the scene list is empty, which the
/// bundled story never is.
pub fn journey() -> Result<SceneRegistry, RegistryError> {
    SceneRegistry::builder()
        .scene(Birth)
        .scene(Elementary)
        .scene(ThemePark)
        .scene(MiddleSchool)
        .scene(HighSchool)
        .scene(NightDrive)
        .scene(Today)
        .build()
}

//=========================================================================
// Unit Tests
//=========================================================================
