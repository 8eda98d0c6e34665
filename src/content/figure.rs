//=========================================================================
// Figures
//=========================================================================
//
// Stateless character renderer shared by the story scenes.
//
// Every figure is drawn chibi-style: a square head as tall as the body,
// thick black outlines, oversized eyes. `(x, y)` is the point between the
// figure's feet; everything is drawn upward from there.
//
//        ┌──hair──┐
//        │  head  │  14 px
//        ├─body───┤  14 px
//   y ──── legs ────
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;

//=== Internal Dependencies ===============================================

use crate::core::canvas::{Canvas, Color};

//=== Palette =============================================================

const OUTLINE: Color = Color::BLACK;
const SKIN: Color = Color::hex(0x9D6B4A);
const HAIR: Color = Color::hex(0x1A1A1A);
const MOM_HAIR: Color = Color::hex(0x2A1A1A);
const EYE_WHITE: Color = Color::WHITE;
const PUPIL: Color = Color::BLACK;
const SMILE: Color = Color::hex(0x8B4545);
const MOM_SMILE: Color = Color::hex(0x8B5544);
const MOM_LIP: Color = Color::hex(0xC88060);
const MOM_DRESS: Color = Color::hex(0xE8A080);

//=== Stage ===============================================================

/// How old the narrator looks. Selects hairstyle and shirt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Full high-top, green shirt.
    Elementary,
    /// Taller textured high-top, purple shirt.
    Preteen,
    /// Short dreads.
    Teen,
    /// Longer dreads.
    Grown,
}

impl Stage {
    fn shirt(self) -> Color {
        match self {
            Stage::Elementary => Color::hex(0x7FB77E),
            Stage::Preteen => Color::hex(0x9B7FFF),
            Stage::Teen | Stage::Grown => Color::hex(0x556B2F),
        }
    }
}

//=== Pose ================================================================

/// What the figure is doing. Drives the face and the limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Walk,
    Idle,
    Stand,
    Sit,
    Sleep,
    Dance,
}

//=== Figure ==============================================================

/// A character to draw.
///
/// ```rust
/// # use pixel_journey::core::canvas::{Canvas, Color};
/// # use pixel_journey::content::figure::{Figure, Pose, Stage};
/// let mut canvas = Canvas::logical();
/// Figure::Narrator { stage: Stage::Teen, pose: Pose::Walk }.draw(&mut canvas, 80.0, 100.0, 0.25);
/// Figure::Friend { shirt: Color::hex(0x9EC5FF) }.draw(&mut canvas, 40.0, 100.0, 0.0);
/// assert!(!canvas.is_clear());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Figure {
    Narrator { stage: Stage, pose: Pose },
    Mom { pose: Pose },
    Friend { shirt: Color },
}

impl Figure {
    /// Draws the figure standing on `(x, y)`.
    ///
    /// `step` is the gait phase in `[0, 1)`; it swings the legs and eyes of
    /// the narrator and lifts mom's arms while she dances.
    pub fn draw(&self, canvas: &mut Canvas, x: f32, y: f32, step: f32) {
        let (x, y) = (x.round() as i32, y.round() as i32);
        match *self {
            Figure::Narrator { stage, pose } => draw_narrator(canvas, x, y, stage, pose, step),
            Figure::Mom { pose } => draw_mom(canvas, x, y, pose, step),
            Figure::Friend { shirt } => draw_friend(canvas, x, y, shirt),
        }
    }
}

//=== Narrator ============================================================

fn draw_narrator(canvas: &mut Canvas, x: i32, y: i32, stage: Stage, pose: Pose, step: f32) {
    let (head_x, head_y) = (x - 7, y - 28);
    let (body_x, body_y) = (x - 6, y - 14);
    let swing = (step * TAU).sin();

    match stage {
        Stage::Elementary => canvas.outline_rect(head_x - 3, head_y - 7, 20, 9, HAIR, OUTLINE, 1),
        Stage::Preteen => canvas.outline_rect(head_x - 3, head_y - 8, 20, 10, HAIR, OUTLINE, 1),
        Stage::Teen => {
            canvas.fill_rect(head_x - 2, head_y - 7, 3, 1, OUTLINE);
            canvas.fill_rect(head_x + 3, head_y - 7, 3, 1, OUTLINE);
            canvas.fill_rect(head_x, head_y - 7, 4, 1, OUTLINE);
        }
        Stage::Grown => {
            canvas.fill_rect(head_x - 3, head_y - 8, 3, 2, OUTLINE);
            canvas.fill_rect(head_x + 3, head_y - 8, 3, 2, OUTLINE);
            canvas.fill_rect(head_x, head_y - 9, 4, 2, OUTLINE);
        }
    }

    canvas.outline_rect(head_x, head_y, 14, 14, SKIN, OUTLINE, 2);

    let look = if pose == Pose::Sleep { 0 } else { swing.round() as i32 };
    draw_eyes(canvas, head_x, head_y, pose, look);

    match pose {
        Pose::Sleep => canvas.fill_rect(x - 2, head_y + 12, 4, 1, OUTLINE),
        Pose::Idle | Pose::Sit => canvas.fill_rect(x - 2, head_y + 12, 4, 1, SMILE),
        _ => {
            canvas.fill_rect(x - 2, head_y + 11, 4, 1, OUTLINE);
            canvas.fill_rect(x - 1, head_y + 13, 2, 1, SMILE);
        }
    }

    canvas.outline_rect(body_x, body_y, 12, 14, stage.shirt(), OUTLINE, 2);

    let arm_lift = if pose == Pose::Dance { (swing * 2.0).round() as i32 } else { 0 };
    draw_arms(canvas, body_x, body_y + 4 - arm_lift, 12, 4);

    if pose == Pose::Sit {
        // Seated figures tuck their legs under the desk line.
        return;
    }
    let stride = if pose == Pose::Walk { (swing * 2.0).round() as i32 } else { 0 };
    draw_leg(canvas, body_x + 2, body_y + 14);
    draw_leg(canvas, body_x + 8, body_y + 14 + stride);
}

//=== Mom =================================================================

fn draw_mom(canvas: &mut Canvas, x: i32, y: i32, pose: Pose, step: f32) {
    let (head_x, head_y) = (x - 7, y - 28);
    let (body_x, body_y) = (x - 6, y - 14);

    // Curls
    canvas.fill_rect(head_x - 5, head_y - 6, 16, 8, OUTLINE);
    canvas.fill_rect(head_x - 4, head_y - 5, 14, 7, MOM_HAIR);
    canvas.fill_rect(head_x - 3, head_y - 7, 2, 2, MOM_HAIR);
    canvas.fill_rect(head_x + 3, head_y - 7, 2, 2, MOM_HAIR);
    canvas.fill_rect(head_x, head_y - 8, 2, 2, MOM_HAIR);

    canvas.outline_rect(head_x, head_y, 14, 14, SKIN, OUTLINE, 2);
    draw_eyes(canvas, head_x, head_y, pose, 0);

    canvas.fill_rect(x - 2, head_y + 12, 4, 1, MOM_SMILE);
    canvas.fill_rect(x - 1, head_y + 13, 2, 1, MOM_LIP);

    canvas.outline_rect(body_x, body_y, 12, 14, MOM_DRESS, OUTLINE, 2);

    let arm_lift = match pose {
        Pose::Dance => ((step * TAU).sin() * 2.0).round() as i32,
        _ => 0,
    };
    draw_arms(canvas, body_x, body_y + 4 - arm_lift, 12, 6);
}

//=== Friend ==============================================================

fn draw_friend(canvas: &mut Canvas, x: i32, y: i32, shirt: Color) {
    let (head_x, head_y) = (x - 6, y - 26);
    let (body_x, body_y) = (x - 5, y - 13);

    canvas.outline_rect(head_x - 2, head_y - 5, 17, 6, HAIR, OUTLINE, 1);
    canvas.outline_rect(head_x, head_y, 13, 13, SKIN, OUTLINE, 2);

    canvas.outline_rect(head_x + 1, head_y + 4, 4, 4, EYE_WHITE, OUTLINE, 1);
    canvas.fill_rect(head_x + 2, head_y + 5, 2, 2, PUPIL);
    canvas.outline_rect(head_x + 8, head_y + 4, 4, 4, EYE_WHITE, OUTLINE, 1);
    canvas.fill_rect(head_x + 9, head_y + 5, 2, 2, PUPIL);

    canvas.fill_rect(x - 2, head_y + 10, 4, 1, MOM_SMILE);

    canvas.outline_rect(body_x, body_y, 11, 13, shirt, OUTLINE, 2);
    draw_arms(canvas, body_x, body_y + 3, 11, 5);
}

//=== Shared Parts ========================================================

/// Two 4×5 eyes; closed lids while sleeping. `look` shifts the pupils
/// by at most one pixel.
fn draw_eyes(canvas: &mut Canvas, head_x: i32, head_y: i32, pose: Pose, look: i32) {
    let eye_y = head_y + 5;
    for eye_x in [head_x + 2, head_x + 8] {
        if pose == Pose::Sleep {
            canvas.fill_rect(eye_x, eye_y + 2, 4, 1, OUTLINE);
        } else {
            canvas.outline_rect(eye_x, eye_y, 4, 5, EYE_WHITE, OUTLINE, 1);
            canvas.fill_rect(eye_x + 1 + look.clamp(-1, 1), eye_y + 2, 2, 2, PUPIL);
        }
    }
}

/// Outlined stubby arms hanging from both sides of the body.
fn draw_arms(canvas: &mut Canvas, body_x: i32, top: i32, body_w: i32, len: i32) {
    canvas.fill_rect(body_x - 2, top, 2, len, OUTLINE);
    canvas.fill_rect(body_x - 1, top, 1, len, SKIN);
    canvas.fill_rect(body_x + body_w, top, 2, len, OUTLINE);
    canvas.fill_rect(body_x + body_w + 1, top, 1, len, SKIN);
}

fn draw_leg(canvas: &mut Canvas, x: i32, top: i32) {
    canvas.fill_rect(x, top, 2, 4, OUTLINE);
    canvas.fill_rect(x + 1, top, 1, 4, SKIN);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn drawn(figure: Figure, step: f32) -> Canvas {
        let mut canvas = Canvas::logical();
        figure.draw(&mut canvas, 80.0, 100.0, step);
        canvas
    }

    #[test]
    fn narrator_stands_on_anchor() {
        let canvas = drawn(Figure::Narrator { stage: Stage::Grown, pose: Pose::Stand }, 0.0);

        // Legs reach the anchor row; nothing is drawn below the feet.
        assert_ne!(canvas.pixel(76, 103), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(80, 110), Some(Color::TRANSPARENT));
        // Head sits above the body.
        assert_eq!(canvas.pixel(80, 74), Some(SKIN));
    }

    #[test]
    fn stages_change_the_shirt() {
        let kid = drawn(Figure::Narrator { stage: Stage::Elementary, pose: Pose::Stand }, 0.0);
        let teen = drawn(Figure::Narrator { stage: Stage::Teen, pose: Pose::Stand }, 0.0);

        assert_eq!(kid.pixel(80, 92), Some(Stage::Elementary.shirt()));
        assert_eq!(teen.pixel(80, 92), Some(Stage::Teen.shirt()));
    }

    #[test]
    fn walking_moves_the_legs() {
        let figure = Figure::Narrator { stage: Stage::Preteen, pose: Pose::Walk };
        assert_ne!(drawn(figure, 0.0), drawn(figure, 0.25));
    }

    #[test]
    fn sleeping_closes_the_eyes() {
        let awake = drawn(Figure::Mom { pose: Pose::Stand }, 0.0);
        let asleep = drawn(Figure::Mom { pose: Pose::Sleep }, 0.0);

        assert_eq!(awake.pixel(76, 78), Some(EYE_WHITE));
        assert_ne!(asleep.pixel(76, 78), Some(EYE_WHITE));
    }

    #[test]
    fn friend_wears_given_shirt() {
        let shirt = Color::hex(0xFFD6A5);
        let canvas = drawn(Figure::Friend { shirt }, 0.0);
        assert_eq!(canvas.pixel(80, 93), Some(shirt));
    }

    #[test]
    fn off_canvas_figures_are_clipped() {
        let mut canvas = Canvas::logical();
        Figure::Mom { pose: Pose::Dance }.draw(&mut canvas, -100.0, -100.0, 0.5);
        assert!(canvas.is_clear());
    }
}
