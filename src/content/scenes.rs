//=========================================================================
// Story Scenes
//=========================================================================
//
// The seven beats of the journey, from the first birthday to today.
//
// Layout conventions for every scene:
// - Painted back to front: sky or wall, props, figures, foreground
// - `progress` moves the story along (walks, camera slides, poses)
// - `animation_time` only drives loops (bobbing, blinking, swaying);
//   every loop completes a whole number of cycles per second so the
//   wrap at 1.0 is seamless
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;

//=== Internal Dependencies ===============================================

use crate::content::figure::{Figure, Pose, Stage};
use crate::core::canvas::{Canvas, Color, LOGICAL_WIDTH};
use crate::core::effect::draw_heart;
use crate::core::scene::{Scene, SceneId};

//=== Constants ===========================================================

const W: i32 = LOGICAL_WIDTH as i32;

//=== Helpers =============================================================

/// Sine loop with `cycles` full periods per animation second.
fn wave(t: f32, cycles: f32) -> f32 {
    (t * TAU * cycles).sin()
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

//--- Pixel Lettering ------------------------------------------------------

/// 3×5 glyphs, one row per byte, high bit on the left. Lowercase letters
/// share the capitals.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        _ => return None,
    };
    Some(rows)
}

/// Draws `text` in the 3×5 face with one pixel of spacing. Characters
/// without a glyph advance as blanks.
fn letter(canvas: &mut Canvas, text: &str, x: i32, y: i32, color: Color) {
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let gx = x + i as i32 * 4;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..3 {
                if bits & (0b100 >> col) != 0 {
                    canvas.put(gx + col, y + row as i32, color);
                }
            }
        }
    }
}

fn letter_width(text: &str) -> i32 {
    (text.chars().count() as i32 * 4 - 1).max(0)
}

/// Greedy word wrap at `columns` characters. A single word longer than
/// a line gets a line of its own.
fn wrap(text: &str, columns: usize) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut end = 0;

    let breaks = text.match_indices(' ').map(|(i, _)| i).chain(std::iter::once(text.len()));
    for offset in breaks {
        if text[start..offset].chars().count() > columns && end > start {
            lines.push(&text[start..end]);
            start = end + 1;
        }
        end = offset;
    }
    lines.push(&text[start..end]);
    lines
}

/// Characters of a `len`-character caption revealed at `progress`.
///
/// Types at 144 characters per scene, holds the full caption for a
/// moment, then starts over from the first character.
fn revealed(len: usize, progress: f32) -> usize {
    let cycle = (len + 10) as f32;
    let index = ((progress.max(0.0) * 144.0) % cycle).floor() as usize;
    index.saturating_sub(2).min(len)
}

//=========================================================================
// 1. Birth
//=========================================================================

/// A toddler with a lollipop on the living-room rug, a heart balloon
/// swaying overhead.
pub struct Birth;

impl Birth {
    const CAPTION: &'static str = "I don't even remember this so we can skip forward lol. \
                                   Thanks for taking care of me though mom. I love you!";
    const CAPTION_COLUMNS: usize = 37;
    const CAPTION_INK: Color = Color::hex(0xF2D6B3);

    fn room(canvas: &mut Canvas) {
        canvas.vertical_gradient(0, 109, Color::hex(0xF8E4C4), Color::hex(0xE8D0A0));
        canvas.fill_rect(0, 108, W, 2, Color::hex(0x5C4033));

        // Family photo
        canvas.fill_rect(8, 12, 28, 30, Color::hex(0x3E2723));
        canvas.fill_rect(11, 15, 22, 24, Color::hex(0xE8D5C4));
        canvas.fill_circle(18.0, 22.0, 3.0, Color::hex(0x8D5524));
        canvas.fill_rect(15, 26, 6, 8, Color::hex(0x8D5524));
        canvas.fill_circle(26.0, 24.0, 3.0, Color::hex(0x6B3F2A));
        canvas.fill_rect(23, 28, 6, 8, Color::hex(0x6B3F2A));

        // Window with a cloud
        canvas.fill_rect(118, 18, 40, 24, Color::WHITE);
        canvas.fill_rect(120, 20, 36, 20, Color::hex(0x87CEEB));
        canvas.fill_rect(130, 26, 2, 1, Color::WHITE);
        canvas.fill_rect(125, 27, 7, 1, Color::WHITE);
        canvas.fill_rect(123, 28, 9, 1, Color::WHITE);

        canvas.vertical_gradient(109, 35, Color::hex(0x8B5A2B), Color::hex(0x5C3D1F));

        // Toy box
        canvas.fill_rect(45, 80, 24, 18, Color::hex(0x8B7355));
        canvas.fill_rect(45, 79, 24, 2, Color::hex(0x6B5344));
        canvas.fill_rect(58, 72, 5, 8, Color::hex(0xE63946));

        // Rug
        canvas.fill_ellipse(70.0, 92.0, 21.0, 9.0, Color::hex(0xA68560));
        canvas.fill_ellipse(70.0, 92.0, 20.0, 8.0, Color::hex(0xD4A574));
    }

    fn toddler(canvas: &mut Canvas, x: i32, y: i32) {
        let hair = Color::hex(0x1A1A1A);
        canvas.fill_rect(x - 6, y - 20, 12, 4, hair);
        canvas.fill_rect(x - 7, y - 17, 1, 3, hair);
        canvas.fill_rect(x + 6, y - 17, 1, 3, hair);

        canvas.fill_rect(x - 5, y - 12, 10, 10, Color::hex(0x8D5524));

        canvas.fill_rect(x - 3, y - 7, 2, 2, Color::hex(0x3E2723));
        canvas.fill_rect(x + 1, y - 7, 2, 2, Color::hex(0x3E2723));
        canvas.put(x - 2, y - 7, Color::WHITE);
        canvas.put(x + 2, y - 7, Color::WHITE);
        canvas.put(x, y - 5, Color::hex(0x6B3F2A));

        let mouth = Color::hex(0x5C2E1F);
        canvas.fill_rect(x - 1, y - 3, 3, 1, mouth);
        canvas.fill_rect(x - 2, y - 2, 5, 1, mouth);
        canvas.fill_rect(x - 1, y - 1, 3, 1, mouth);

        canvas.fill_rect(x - 5, y + 2, 10, 10, Color::hex(0x6B9BD1));
        canvas.fill_rect(x - 4, y + 12, 8, 4, Color::hex(0xFFE5B4));
        canvas.fill_rect(x - 3, y + 16, 2, 2, Color::hex(0xE8E8E8));
        canvas.fill_rect(x + 1, y + 16, 2, 2, Color::hex(0xE8E8E8));

        // Lollipop
        canvas.line(x + 5, y + 5, x + 8, y - 2, Color::hex(0x8B6F47));
        canvas.fill_circle(x as f32 + 8.5, y as f32 - 3.5, 2.5, Color::hex(0xFF1744));
    }

    /// Bottom text box typing out the caption.
    fn caption(canvas: &mut Canvas, progress: f32) {
        canvas.outline_rect(4, 120, 152, 20, Color::hex(0x6B4423), Self::CAPTION_INK, 2);

        let mut remaining = revealed(Self::CAPTION.chars().count(), progress);
        for (row, line) in wrap(Self::CAPTION, Self::CAPTION_COLUMNS).into_iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let cut = line.char_indices().nth(remaining).map_or(line.len(), |(i, _)| i);
            letter(canvas, &line[..cut], 6, 121 + row as i32 * 6, Self::CAPTION_INK);
            remaining = remaining.saturating_sub(line.chars().count() + 1);
        }
    }

    /// Quadratic string from the balloon knot down to the wrist.
    fn string(canvas: &mut Canvas, from: (f32, f32), control: (f32, f32), to: (f32, f32)) {
        const SEGMENTS: usize = 12;
        let color = Color::hex(0xA65B4A);

        let point = |s: f32| {
            let u = 1.0 - s;
            (
                u * u * from.0 + 2.0 * u * s * control.0 + s * s * to.0,
                u * u * from.1 + 2.0 * u * s * control.1 + s * s * to.1,
            )
        };

        let mut prev = point(0.0);
        for i in 1..=SEGMENTS {
            let next = point(i as f32 / SEGMENTS as f32);
            canvas.line(
                prev.0.round() as i32,
                prev.1.round() as i32,
                next.0.round() as i32,
                next.1.round() as i32,
                color,
            );
            prev = next;
        }
    }
}

impl Scene for Birth {
    fn id(&self) -> SceneId {
        SceneId::new("birth")
    }

    fn narration(&self) -> &str {
        "I don't even remember this so we can skip forward lol.\n\
         Thanks for taking care of me though mom. I love you!"
    }

    fn render(&self, canvas: &mut Canvas, animation_time: f32, progress: f32) {
        let t = animation_time;
        Self::room(canvas);

        let (tx, ty) = (70, 80 + (wave(t, 1.0) * 1.5).round() as i32);
        Self::toddler(canvas, tx, ty);

        let balloon_x = 70.0 + wave(t, 1.0) * 3.0;
        let balloon_scale = 0.4 * (1.0 + wave(t, 2.0) * 0.12);
        Self::string(
            canvas,
            (balloon_x, 48.0),
            (balloon_x - 2.0, 65.0),
            ((tx + 4) as f32, (ty - 2) as f32),
        );
        draw_heart(canvas, balloon_x, 40.0, balloon_scale, Color::hex(0xE74C3C));

        Self::caption(canvas, progress);
    }
}

//=========================================================================
// 2. Elementary
//=========================================================================

/// Walking past the school; once the walk crosses 60% of the screen the
/// school slides out and the football field, with mom cheering in the
/// bleachers, slides in.
pub struct Elementary;

impl Elementary {
    const SIDEWALK_Y: i32 = 112;
    const BACKPACK: Color = Color::hex(0x5C2E8A);
    const SKY: Color = Color::hex(0xAEE7FF);

    /// Walker position and background slide for `progress`.
    fn walk(progress: f32) -> (i32, f32) {
        let walk = (progress * 1.25).min(1.0);
        let x = lerp(10.0, 131.0, walk).round() as i32;
        let slide = ((x as f32 - 96.0) / 44.8).clamp(0.0, 1.0);
        (x, slide)
    }

    fn school(canvas: &mut Canvas, ox: i32) {
        canvas.fill_rect(ox, 0, W, 144, Self::SKY);
        canvas.fill_rect(ox + 18, 18, 6, 2, Color::WHITE);
        canvas.fill_rect(ox + 22, 16, 4, 2, Color::WHITE);
        canvas.fill_rect(ox + 44, 12, 8, 2, Color::WHITE);
        canvas.fill_rect(ox + 48, 10, 6, 2, Color::WHITE);

        let (top, height) = (43, 63);
        canvas.fill_rect(ox + 8, top, W - 16, height, Color::hex(0xD88A6A));
        canvas.fill_rect(ox + 8, top - 8, W - 16, 8, Color::hex(0x9A5A3A));

        for row in 0..2 {
            for col in 0..6 {
                let x = ox + 18 + col * 18;
                let y = top + 18 + row * 14;
                canvas.fill_rect(x, y, 10, 6, Color::hex(0x9AD2FF));
            }
        }

        let door_x = ox + 71;
        canvas.fill_rect(door_x, top + height - 22, 18, 22, Color::hex(0x6B3F2A));

        canvas.fill_rect(door_x - 12, top + 4, 42, 8, Color::WHITE);
        letter(canvas, "Elementary", door_x - 11, top + 6, Color::hex(0x333333));
    }

    fn field(canvas: &mut Canvas, ox: i32) {
        canvas.fill_rect(ox, 0, W, 144, Self::SKY);
        canvas.fill_rect(ox + W - 18, 8, 8, 8, Color::hex(0xFFD24D));
        canvas.fill_rect(ox, 58, W, 86, Color::hex(0x3C9A40));

        for i in 0..6 {
            canvas.fill_rect(ox + 6, 69 + i * 10, W - 12, 1, Color::WHITE);
        }

        for step in 0..5 {
            canvas.fill_rect(ox + 40 - step * 4, 32 + step * 6, W - 80 + step * 8, 4, Color::hex(0x9E9E9E));
        }
    }

    /// Mom in the bleachers, arms pumping. Fades in with the field.
    fn cheering_mom(canvas: &mut Canvas, t: f32, alpha: f32) {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (x, y) = (112, 55);

        let hair = Color::hex(0x1A1A1A).with_alpha(a);
        for cx in [-3, -1, 1, 3] {
            for cy in [-8, -6, -4] {
                canvas.fill_rect(x + cx, y + cy, 2, 2, hair);
            }
        }

        let skin = Color::hex(0x7A4F36).with_alpha(a);
        canvas.fill_rect(x - 2, y - 4, 6, 6, skin);
        let face = Color::BLACK.with_alpha(a);
        canvas.put(x - 1, y - 2, face);
        canvas.put(x + 2, y - 2, face);
        canvas.fill_rect(x, y + 1, 2, 1, face);

        canvas.fill_rect(x - 3, y + 4, 8, 6, Color::hex(0xFFB07C).with_alpha(a));

        let cheer = wave(t, 3.0) * 0.6;
        let lift = lerp(-2.0, -8.0, (cheer + 0.6) / 1.2).round() as i32;
        canvas.fill_rect(x - 6, y + 2 + lift, 3, 3, skin);
        canvas.fill_rect(x + 8, y + 2 + lift, 3, 3, skin);
    }
}

impl Scene for Elementary {
    fn id(&self) -> SceneId {
        SceneId::new("elementary")
    }

    fn narration(&self) -> &str {
        "\"You came to every event and embarrassingly cheered, my mom.\n\
         Everyone could tell who's mom you were and who's son I was.\""
    }

    fn render(&self, canvas: &mut Canvas, animation_time: f32, progress: f32) {
        let t = animation_time;
        let (walker_x, slide) = Self::walk(progress);

        let school_x = -(slide * W as f32).round() as i32;
        Self::school(canvas, school_x);
        Self::field(canvas, school_x + W);

        let ground = Self::SIDEWALK_Y;
        canvas.fill_rect(0, ground, W, 17, Color::hex(0xCFCFCF));
        for gx in (6..W).step_by(16) {
            canvas.fill_rect(gx, ground - 6, 6, 6, Color::hex(0x6FB14E));
        }

        if slide > 0.05 {
            Self::cheering_mom(canvas, t, slide * 1.4);
        }

        let narrator = Stage::Elementary;
        if slide > 0.55 {
            let bounce = (wave(t, 2.0) * 1.5).round() as i32;
            let y = ground - 28 + bounce;
            canvas.fill_rect(42, y - 2, 8, 10, Self::BACKPACK);
            Figure::Narrator { stage: narrator, pose: Pose::Idle }.draw(canvas, 48.0, y as f32, t);
        } else {
            let y = ground - 28;
            canvas.fill_rect(walker_x - 6, y - 2, 8, 10, Self::BACKPACK);
            Figure::Narrator { stage: narrator, pose: Pose::Walk }
                .draw(canvas, walker_x as f32, y as f32, (t * 2.0).fract());
        }

        canvas.fill_rect(2, ground + 1, 10, 3, Color::hex(0x4F8E34));
    }
}

//=========================================================================
// 3. Theme Park
//=========================================================================

/// Racing down the park path past the queue ropes, castle behind.
pub struct ThemePark;

impl ThemePark {
    const PATH_Y: i32 = 104;
    const CASTLE: [(f32, f32); 7] = [
        (20.0, 93.6),
        (40.0, 43.2),
        (52.0, 72.0),
        (70.0, 40.3),
        (86.0, 80.6),
        (100.0, 46.1),
        (120.0, 86.4),
    ];
    const SPARKLES: [(i32, i32); 3] = [(34, 26), (68, 22), (100, 28)];
}

impl Scene for ThemePark {
    fn id(&self) -> SceneId {
        SceneId::new("disney")
    }

    fn narration(&self) -> &str {
        "\"We stayed tearing up those lines.\n\
         I’ll never forget running through lines to get on rides two minutes before the park closed.\""
    }

    fn render(&self, canvas: &mut Canvas, animation_time: f32, progress: f32) {
        let t = animation_time;

        canvas.fill(Color::hex(0x9ED6FF));
        canvas.fill_polygon(&Self::CASTLE, Color::hex(0xB28CE6));

        for (i, &(x, y)) in Self::SPARKLES.iter().enumerate() {
            if (t * 3.0 + i as f32 / 3.0).fract() < 0.7 {
                canvas.fill_rect(x, y, 2, 2, Color::hex(0xFFD24D));
            }
        }

        canvas.fill_rect(0, Self::PATH_Y, W, 17, Color::hex(0xEBD6B0));
        for x in (6..W).step_by(18) {
            canvas.fill_rect(x, Self::PATH_Y - 3, 6, 4, Color::hex(0x2E7D32));
        }

        // Queue crowd and rope
        for i in 0..6 {
            canvas.fill_rect(10 + i * 20, 95, 4, 6, Color::hex(0x6B6B6B));
        }
        canvas.fill_rect(10, 97, 104, 1, Color::hex(0xC0392B));

        let x = lerp(8.0, 118.0, (progress * 1.6).min(1.0));
        Figure::Narrator { stage: Stage::Preteen, pose: Pose::Walk }.draw(
            canvas,
            x,
            (Self::PATH_Y + 4) as f32,
            (t * 2.0).fract(),
        );
    }
}

//=========================================================================
// 4. Middle School
//=========================================================================

/// Evening bedroom: cross the rug, then settle in at the PC.
pub struct MiddleSchool;

impl MiddleSchool {
    /// Progress past which the narrator is seated.
    const SIT_AT: f32 = 0.7;
}

impl Scene for MiddleSchool {
    fn id(&self) -> SceneId {
        SceneId::new("middle")
    }

    fn narration(&self) -> &str {
        "\"This was my antisocial teenager phase.\n\
         I was glued to the PC you got me for Christmas.\n\
         I know you probably had fun dressing me for middle school events though.\""
    }

    fn render(&self, canvas: &mut Canvas, animation_time: f32, progress: f32) {
        let t = animation_time;

        canvas.fill(Color::hex(0x1F2430));
        canvas.fill_rect(12, 16, 36, 20, Color::hex(0x6B8E23));
        canvas.fill_rect(W - 42, 14, 30, 18, Color::hex(0x0B2947));
        canvas.fill_rect(W - 40, 16, 26, 14, Color::hex(0x253858));

        canvas.fill_rect(0, 108, W, 36, Color::hex(0x3B2B23));
        canvas.fill_rect(40, 116, 80, 16, Color::hex(0x8B5A2B));

        // Desk and monitor glow
        canvas.fill_rect(18, 98, 44, 10, Color::hex(0x6B6B6B));
        canvas.fill_rect(26, 74, 28, 18, Color::BLACK);
        let glow = Color::hex(0x1E90FF).lerp(Color::hex(0x4FB0FF), (wave(t, 4.0) + 1.0) / 2.0);
        canvas.fill_rect(30, 78, 20, 12, glow);

        let teen = Stage::Teen;
        if progress < Self::SIT_AT {
            let x = lerp(18.0, 86.0, progress);
            Figure::Narrator { stage: teen, pose: Pose::Walk }.draw(canvas, x, 100.0, t);
        } else {
            Figure::Narrator { stage: teen, pose: Pose::Sit }.draw(canvas, 48.0, 98.0, t);
        }
    }
}

//=========================================================================
// 5. High School
//=========================================================================

/// Hanging out with friends by the lockers; the group cracks up halfway
/// through.
pub struct HighSchool;

impl HighSchool {
    const FRIENDS: [(f32, f32, Color); 3] = [
        (40.0, 78.0, Color::hex(0x9EC5FF)),
        (96.0, 75.0, Color::hex(0xFFD6A5)),
        (120.0, 78.0, Color::hex(0xC2FFD6)),
    ];
    const LAUGH: &'static str = "HAHAHA";
}

impl Scene for HighSchool {
    fn id(&self) -> SceneId {
        SceneId::new("highschool")
    }

    fn narration(&self) -> &str {
        "\"Started hanging with friends and had you taking me everywhere.\n\
         I always used you to get me out of dumb stuff lol.\n\
         Blamed it on you being a nurse and instantly knowing.\""
    }

    fn flourish(&self) -> Option<&str> {
        Some("HAHAHAHA")
    }

    fn render(&self, canvas: &mut Canvas, animation_time: f32, progress: f32) {
        let t = animation_time;

        canvas.fill(Color::hex(0xEAF6FF));
        canvas.fill_rect(0, 89, W, 26, Color::hex(0xC6B79A));
        for tx in (12..W).step_by(40) {
            canvas.fill_rect(tx + 3, 70, 2, 19, Color::hex(0x6B3F2A));
            canvas.fill_circle(tx as f32 + 4.0, 66.0, 7.0, Color::hex(0x4F8E34));
        }

        for (i, &(x, y, shirt)) in Self::FRIENDS.iter().enumerate() {
            let bounce = wave(t + i as f32 / 3.0, 1.0).round();
            Figure::Friend { shirt }.draw(canvas, x, y - bounce, t);
        }
        Figure::Narrator { stage: Stage::Grown, pose: Pose::Stand }.draw(canvas, 68.0, 75.0, t);

        if progress > 0.3 && progress < 0.6 {
            let hop = (wave(t, 3.0).abs() * 2.0).round() as i32;
            let x = 80 - letter_width(Self::LAUGH) / 2;
            letter(canvas, Self::LAUGH, x, 36 - hop, Color::hex(0xFF6B6B));
        }
    }
}

//=========================================================================
// 6. Night Drive
//=========================================================================

/// Asleep in the parked car under the stars.
pub struct NightDrive;

impl NightDrive {
    const STARS: [(i32, i32); 12] = [
        (8, 6),
        (21, 31),
        (34, 14),
        (47, 44),
        (58, 5),
        (71, 26),
        (84, 50),
        (95, 11),
        (108, 36),
        (119, 21),
        (130, 48),
        (151, 33),
    ];
}

impl Scene for NightDrive {
    fn id(&self) -> SceneId {
        SceneId::new("car")
    }

    fn narration(&self) -> &str {
        "\"Do I even need to explain this?\n\
         We held it down, playa.\n\
         Sometimes I miss the days of doing nothing and being one with nature.\""
    }

    fn render(&self, canvas: &mut Canvas, animation_time: f32, _progress: f32) {
        let t = animation_time;

        canvas.fill(Color::hex(0x1A1A3A));
        canvas.vertical_gradient(0, 72, Color::hex(0x0A0F2C), Color::hex(0x1A1A3A));
        canvas.fill_circle(140.8, 21.6, 8.0, Color::hex(0xFFFACD));

        let star = Color::hex(0xFFE9B5);
        for (i, &(x, y)) in Self::STARS.iter().enumerate() {
            let dim = (t * 2.0 + i as f32 * 0.37).fract() > 0.8;
            canvas.put(x, y, if dim { star.with_alpha(0x60) } else { star });
        }

        canvas.fill_rect(0, 115, W, 29, Color::hex(0x333333));

        // Car interior
        canvas.fill_rect(6, 72, W - 12, 46, Color::hex(0x1A1A1A));
        canvas.fill_rect(12, 81, W - 24, 6, Color::hex(0x3A3A3A));
        canvas.fill_rect(W - 20, 75, 16, 12, Color::hex(0x0B2947));

        let mom_y = 98.0 + wave(t, 1.0) * 2.0;
        let me_y = 101.0 + wave(t + 0.25, 1.0) * 2.0;
        Figure::Mom { pose: Pose::Sleep }.draw(canvas, 56.0, mom_y, t);
        Figure::Narrator { stage: Stage::Grown, pose: Pose::Sleep }.draw(canvas, 112.0, me_y, t);

        let drift = (wave(t, 1.0) * 3.0).round() as i32;
        letter(canvas, "Z", 120, 60 - drift, Color::hex(0xB0C4DE));
    }
}

//=========================================================================
// 7. Today
//=========================================================================

/// Christmas in the living room, dancing with mom by the tree.
pub struct Today;

impl Today {
    const LIGHTS: [(i32, i32); 4] = [(34, 44), (40, 52), (28, 58), (38, 62)];
    const LIGHT_COLORS: [Color; 3] = [Color::hex(0xFFD54F), Color::hex(0xFF6B6B), Color::hex(0x9DE0AD)];

    fn tree(canvas: &mut Canvas, t: f32) {
        let needles = Color::hex(0x2F855A);
        canvas.fill_rect(32, 37, 12, 18, needles);
        canvas.fill_rect(26, 49, 20, 8, needles);
        canvas.fill_rect(22, 60, 24, 6, needles);
        canvas.fill_rect(36, 66, 4, 4, Color::hex(0x6B3F2A));
        canvas.fill_rect(37, 33, 2, 3, Color::hex(0xFFD54F));

        let beat = (t * 3.0) as usize;
        for (i, &(x, y)) in Self::LIGHTS.iter().enumerate() {
            let color = Self::LIGHT_COLORS[(beat + i) % Self::LIGHT_COLORS.len()];
            canvas.fill_rect(x, y, 2, 2, color);
        }

        // Presents
        canvas.fill_rect(18, 64, 8, 6, Color::hex(0xC0392B));
        canvas.fill_rect(21, 64, 2, 6, Color::hex(0xFFD54F));
        canvas.fill_rect(44, 65, 7, 5, Color::hex(0x2E86C1));
        canvas.fill_rect(44, 67, 7, 1, Color::WHITE);
    }
}

impl Scene for Today {
    fn id(&self) -> SceneId {
        SceneId::new("today")
    }

    fn narration(&self) -> &str {
        "\"I love you mom and Merry Christmas.\n\
         Don't feel bad about anything I went through — it's not your fault.\n\
         Having a mom like you is the greatest gift I could ask for.\n\
         (And your cooking is amazing.)\n\
         I love you mom.\""
    }

    fn render(&self, canvas: &mut Canvas, animation_time: f32, progress: f32) {
        let t = animation_time;

        canvas.fill(Color::hex(0xE8D5C4));
        canvas.fill_rect(0, 101, W, 43, Color::hex(0xD4C4B0));
        Self::tree(canvas, t);
        canvas.fill_rect(28, 94, 104, 14, Color::hex(0xB8996F));

        let sway = wave(t, 1.0) * 3.0;
        Figure::Narrator { stage: Stage::Grown, pose: Pose::Dance }.draw(canvas, 64.0 + sway, 94.0, t);
        Figure::Mom { pose: Pose::Dance }.draw(canvas, 109.0 - sway, 94.0, (t + 0.5).fract());

        if progress > 0.5 {
            let rise = (progress - 0.5) * 20.0;
            let pulse = 0.3 + wave(t, 2.0).abs() * 0.05;
            draw_heart(canvas, 86.5, 48.0 - rise, pulse, Color::hex(0xFF6B6B));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(scene: &dyn Scene, t: f32, progress: f32) -> Canvas {
        let mut canvas = Canvas::logical();
        scene.render(&mut canvas, t, progress);
        canvas
    }

    //=== Lettering =======================================================

    #[test]
    fn letters_follow_glyph_bits() {
        let mut canvas = Canvas::new(8, 5);
        letter(&mut canvas, "HA", 0, 0, Color::WHITE);

        // H: both posts, open top middle
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(2, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(1, 0), Some(Color::TRANSPARENT));
        // A starts one column after the gap
        assert_eq!(canvas.pixel(5, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn unknown_characters_are_blank() {
        let mut canvas = Canvas::new(8, 5);
        letter(&mut canvas, "?", 0, 0, Color::WHITE);
        assert!(canvas.is_clear());
        assert_eq!(letter_width("HAHAHA"), 23);
        assert_eq!(letter_width(""), 0);
    }

    #[test]
    fn lowercase_shares_capital_glyphs() {
        assert_eq!(glyph('e'), glyph('E'));
        assert!(glyph('\'').is_some());
        assert!(glyph('!').is_some());
    }

    #[test]
    fn wrap_breaks_on_spaces() {
        assert_eq!(
            wrap(Birth::CAPTION, Birth::CAPTION_COLUMNS),
            vec![
                "I don't even remember this so we can",
                "skip forward lol. Thanks for taking",
                "care of me though mom. I love you!",
            ]
        );
        assert_eq!(wrap("one enormousword", 4), vec!["one", "enormousword"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    //=== Birth ===========================================================

    #[test]
    fn caption_reveal_grows_with_progress() {
        let len = Birth::CAPTION.chars().count();
        assert_eq!(revealed(len, 0.0), 0);

        let steps: Vec<_> = [0.1, 0.3, 0.5, 0.75].iter().map(|&p| revealed(len, p)).collect();
        assert!(steps.windows(2).all(|w| w[0] < w[1]), "not growing: {:?}", steps);
        assert!(steps[0] > 0);

        assert_eq!(revealed(len, 0.8), len);
    }

    #[test]
    fn caption_restarts_after_holding() {
        let len = Birth::CAPTION.chars().count();
        assert!(revealed(len, 1.0) < len);
    }

    #[test]
    fn birth_caption_types_out() {
        let ink = Birth::CAPTION_INK;
        let inked = |canvas: &Canvas| {
            (4..156)
                .flat_map(|x| (120..140).map(move |y| (x, y)))
                .filter(|&(x, y)| canvas.pixel(x, y) == Some(ink))
                .count()
        };

        let blank = inked(&rendered(&Birth, 0.0, 0.0));
        let early = inked(&rendered(&Birth, 0.0, 0.2));
        let late = inked(&rendered(&Birth, 0.0, 0.75));

        assert_eq!(blank, 0);
        assert!(early > 0);
        assert!(late > early, "{} !> {}", late, early);
    }

    //=== Elementary ======================================================

    #[test]
    fn elementary_sign_is_lettered() {
        let school = rendered(&Elementary, 0.0, 0.0);
        let ink = Some(Color::hex(0x333333));

        // Top bar and left post of the first E.
        assert_eq!(school.pixel(61, 49), ink);
        assert_eq!(school.pixel(60, 50), ink);
        assert_eq!(school.pixel(61, 50), Some(Color::WHITE));
    }

    #[test]
    fn elementary_slide_starts_past_sixty_percent() {
        assert_eq!(Elementary::walk(0.0), (10, 0.0));

        let (_, before) = Elementary::walk(0.5);
        assert_eq!(before, 0.0);

        let (x, after) = Elementary::walk(1.0);
        assert_eq!(x, 131);
        assert!(after > 0.7 && after <= 1.0, "slide at end: {}", after);
    }

    #[test]
    fn elementary_background_changes_with_slide() {
        let school = rendered(&Elementary, 0.0, 0.0);
        let field = rendered(&Elementary, 0.0, 1.0);

        // Middle of the roof row: brick before, bleachers after.
        assert_eq!(school.pixel(100, 40), Some(Color::hex(0x9A5A3A)));
        assert_eq!(field.pixel(100, 40), Some(Color::hex(0x9E9E9E)));
    }

    //=== Animation =======================================================

    #[test]
    fn animation_loops_seamlessly() {
        let scenes: [&dyn Scene; 3] = [&Birth, &NightDrive, &Today];
        for scene in scenes {
            let start = rendered(scene, 0.0, 0.2);
            let almost = rendered(scene, 0.999_9, 0.2);
            let differing = start
                .as_bytes()
                .chunks_exact(4)
                .zip(almost.as_bytes().chunks_exact(4))
                .filter(|(a, b)| a != b)
                .count();
            assert!(differing < 40, "{} jumps at wrap: {} pixels", scene.id(), differing);
        }
    }

    #[test]
    fn birth_balloon_sways() {
        assert_ne!(rendered(&Birth, 0.0, 0.0), rendered(&Birth, 0.25, 0.0));
    }

    //=== Progress-driven beats ===========================================

    #[test]
    fn theme_park_walker_moves_right() {
        let start = rendered(&ThemePark, 0.0, 0.0);
        let end = rendered(&ThemePark, 0.0, 1.0);

        // Forehead, just below the hairline.
        let skin = Some(Color::hex(0x9D6B4A));
        assert_eq!(start.pixel(8, 82), skin);
        assert_ne!(end.pixel(8, 82), skin);
        assert_eq!(end.pixel(118, 82), skin);
    }

    #[test]
    fn middle_school_narrator_sits_late() {
        let walking = rendered(&MiddleSchool, 0.0, 0.69);
        let seated = rendered(&MiddleSchool, 0.0, 0.71);
        assert_ne!(walking, seated);
    }

    #[test]
    fn high_school_laugh_shows_mid_scene() {
        let laugh = Color::hex(0xFF6B6B);
        let has_laugh = |canvas: &Canvas| {
            (0..W).any(|x| (28..42).any(|y| canvas.pixel(x, y) == Some(laugh)))
        };

        assert!(!has_laugh(&rendered(&HighSchool, 0.0, 0.1)));
        assert!(has_laugh(&rendered(&HighSchool, 0.0, 0.45)));
        assert!(!has_laugh(&rendered(&HighSchool, 0.0, 0.9)));
    }

    #[test]
    fn today_heart_appears_late() {
        let early = rendered(&Today, 0.0, 0.2);
        let late = rendered(&Today, 0.0, 0.9);
        assert_eq!(late.pixel(86, 40), Some(Color::hex(0xFF6B6B)));
        assert_ne!(early.pixel(86, 40), Some(Color::hex(0xFF6B6B)));
    }
}
