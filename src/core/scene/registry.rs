//=========================================================================
// Scene Registry
//=========================================================================
//
// Ordered, fixed-size list of scenes.
//
// Scenes are registered once through the builder and referenced by index
// afterwards. All index arithmetic wraps with modulo, so a lookup can
// never fall outside the list.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneId};

//=== RegistryError =======================================================

/// Registry construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No scenes were registered; playback needs at least one.
    Empty,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Scene registry has no scenes"),
        }
    }
}

impl std::error::Error for RegistryError {}

//=== SceneRegistryBuilder ================================================

/// Collects scenes in presentation order.
#[derive(Default)]
pub struct SceneRegistryBuilder {
    scenes: Vec<Box<dyn Scene>>,
}

impl SceneRegistryBuilder {
    pub fn new() -> Self {
        Self { scenes: Vec::new() }
    }

    /// Appends a scene after the ones already registered.
    pub fn scene<T>(mut self, scene: T) -> Self
    where
        T: Scene + 'static,
    {
        self.scenes.push(Box::new(scene));
        self
    }

    /// Freezes the list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Empty`] if no scene was registered.
    pub fn build(self) -> Result<SceneRegistry, RegistryError> {
        if self.scenes.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for scene in &self.scenes {
            if !seen.insert(scene.id()) {
                warn!(target: "playback", "Scene {:?} is registered more than once", scene.id());
            }
        }

        debug!(target: "playback", "Scene registry built with {} scenes", self.scenes.len());
        Ok(SceneRegistry { scenes: self.scenes })
    }
}

//=== SceneRegistry =======================================================

/// Immutable, non-empty, ordered scene list.
pub struct SceneRegistry {
    scenes: Vec<Box<dyn Scene>>,
}

impl SceneRegistry {
    pub fn builder() -> SceneRegistryBuilder {
        SceneRegistryBuilder::new()
    }

    /// Number of scenes (always at least one).
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scene at `index`, wrapping past the end.
    pub fn get(&self, index: usize) -> &dyn Scene {
        self.scenes[index % self.scenes.len()].as_ref()
    }

    /// Index that follows `index`, wrapping to the first scene.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.scenes.len()
    }

    /// Index of the final scene.
    pub fn last_index(&self) -> usize {
        self.scenes.len() - 1
    }

    /// Identity of the scene at `index`.
    pub fn id(&self, index: usize) -> SceneId {
        self.get(index).id()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Scene> {
        self.scenes.iter().map(|s| s.as_ref())
    }
}

impl fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.scenes.iter().map(|s| s.id())).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
