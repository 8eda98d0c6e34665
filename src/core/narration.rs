//=========================================================================
// Narration
//=========================================================================
//
// Text published whenever a scene becomes active (start, commit, skip).
//
// Architecture:
//   Playback ──publish()──> NarrationSink
//                              ├─ Sender<Narration>  (platform display)
//                              └─ LogNarration       (headless runs)
//
// Line breaks are the only structure the text carries; they are split
// into `lines` here so sinks never parse markup.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::scene::{Scene, SceneId};

//=== Narration ===========================================================

/// One scene's narration, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    /// Scene the text belongs to.
    pub scene: SceneId,

    /// Narration split on line breaks.
    pub lines: Vec<String>,

    /// Decorative text appended after the narration, if the scene has one.
    pub flourish: Option<String>,
}

impl Narration {
    /// Builds the narration for `scene`.
    pub fn for_scene(scene: &dyn Scene) -> Self {
        Self {
            scene: scene.id(),
            lines: scene.narration().split('\n').map(str::to_owned).collect(),
            flourish: scene.flourish().map(str::to_owned),
        }
    }

    /// First line, used as a short caption (window title).
    pub fn headline(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }
}

//=== NarrationSink =======================================================

/// Receives narration on every scene entry.
pub trait NarrationSink {
    fn publish(&mut self, narration: Narration);
}

impl NarrationSink for Sender<Narration> {
    fn publish(&mut self, narration: Narration) {
        let scene = narration.scene;
        if self.send(narration).is_err() {
            warn!(
                target: "playback",
                "Narration channel disconnected, dropping text for {:?}",
                scene
            );
        }
    }
}

/// Sink that writes narration to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNarration;

impl NarrationSink for LogNarration {
    fn publish(&mut self, narration: Narration) {
        for line in &narration.lines {
            info!(target: "narration", "[{}] {}", narration.scene, line);
        }
        if let Some(flourish) = &narration.flourish {
            info!(target: "narration", "[{}] {}", narration.scene, flourish);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::Canvas;
    use crossbeam_channel::unbounded;

    struct Plain {
        flourish: Option<&'static str>,
    }

    impl Scene for Plain {
        fn id(&self) -> SceneId {
            SceneId::new("plain")
        }

        fn narration(&self) -> &str {
            "first line\nsecond line"
        }

        fn flourish(&self) -> Option<&str> {
            self.flourish
        }

        fn render(&self, _canvas: &mut Canvas, _animation_time: f32, _progress: f32) {}
    }

    #[test]
    fn splits_lines() {
        let narration = Narration::for_scene(&Plain { flourish: None });

        assert_eq!(narration.scene, SceneId::new("plain"));
        assert_eq!(narration.lines, vec!["first line", "second line"]);
        assert_eq!(narration.headline(), "first line");
        assert!(narration.flourish.is_none());
    }

    #[test]
    fn carries_flourish() {
        let narration = Narration::for_scene(&Plain { flourish: Some("HAHAHAHA") });
        assert_eq!(narration.flourish.as_deref(), Some("HAHAHAHA"));
    }

    #[test]
    fn channel_sink_delivers() {
        let (mut tx, rx) = unbounded();
        tx.publish(Narration::for_scene(&Plain { flourish: None }));

        let received = rx.try_recv().expect("narration should be delivered");
        assert_eq!(received.lines.len(), 2);
    }

    #[test]
    fn channel_sink_survives_disconnect() {
        let (mut tx, rx) = unbounded();
        drop(rx);

        // Should not panic, just log warning
        tx.publish(Narration::for_scene(&Plain { flourish: None }));
    }

    #[test]
    fn log_sink_accepts_narration() {
        let mut sink = LogNarration;
        sink.publish(Narration::for_scene(&Plain { flourish: Some("!") }));
    }
}
