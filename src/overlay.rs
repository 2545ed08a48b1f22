//! Decorations drawn around the floating image: background glow, the edge
//! vignette, the text backdrop, the logo, the loading cover and the "Join"
//! call-to-action.

use raylib::prelude::*;

use crate::constants::*;
use crate::motion::Viewport;

const BUTTON_LABEL: &str = "Join";
const BUTTON_FONT_SIZE: i32 = 20;
const BUTTON_PAD_X: f32 = 40.0;
const BUTTON_PAD_Y: f32 = 20.0;
const SPINNER_RADIUS: f32 = 16.0;
const VIGNETTE_BANDS: usize = 32;

pub const BACKGROUND: Color = Color { r: 10, g: 10, b: 10, a: 255 };

/// Layers drawn over the image layer, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Backdrop,
    Captions,
    Button,
    // Opaque cover with the spinner, hiding everything below it while loading
    Loading,
    Logo,
}

pub fn layer_order(ready: bool) -> &'static [Layer] {
    if ready {
        &[Layer::Backdrop, Layer::Captions, Layer::Button, Layer::Logo]
    } else {
        &[Layer::Loading, Layer::Logo]
    }
}

/// Opacity of the image at `ratio` of the vignette radius: fully kept inside
/// 40%, fading linearly to nothing at 90%.
pub fn vignette_alpha(ratio: f32) -> f32 {
    ((VIGNETTE_OUTER - ratio) / (VIGNETTE_OUTER - VIGNETTE_INNER)).clamp(0.0, 1.0)
}

/// Vignette radius: distance from the centre to the farthest corner.
pub fn vignette_radius(viewport: Viewport) -> f32 {
    (viewport.width / 2.0).hypot(viewport.height / 2.0)
}

/// Concentric rings `(inner, outer, cover)` painting the background colour
/// over the image edges; `cover` is the background opacity of each ring.
pub fn vignette_rings(viewport: Viewport) -> Vec<(f32, f32, f32)> {
    let radius = vignette_radius(viewport);
    let inner = radius * VIGNETTE_INNER;
    let outer = radius * VIGNETTE_OUTER;
    let step = (outer - inner) / VIGNETTE_BANDS as f32;

    let mut rings: Vec<(f32, f32, f32)> = (0..VIGNETTE_BANDS)
        .map(|band| {
            let from = inner + step * band as f32;
            let mid = (from + step / 2.0) / radius;
            (from, from + step, 1.0 - vignette_alpha(mid))
        })
        .collect();
    // Everything past 90% up to the corners is fully covered
    rings.push((outer, radius + 1.0, 1.0));
    rings
}

pub fn draw_vignette(d: &mut impl RaylibDraw, viewport: Viewport) {
    let center = Vector2::new(viewport.width / 2.0, viewport.height / 2.0);
    for (inner, outer, cover) in vignette_rings(viewport) {
        let color = Color { a: (cover * 255.0) as u8, ..BACKGROUND };
        d.draw_ring(center, inner, outer, 0.0, 360.0, 96, color);
    }
}

/// Opaque cover shown until the image is ready, with a spinner in the middle.
pub fn draw_loading(d: &mut impl RaylibDraw, viewport: Viewport, now_ms: f64) {
    d.draw_rectangle(0, 0, viewport.width.ceil() as i32, viewport.height.ceil() as i32, BACKGROUND);
    draw_spinner(d, viewport, now_ms);
}

fn ramp(elapsed_ms: f64, duration_ms: f64) -> f32 {
    (elapsed_ms / duration_ms).clamp(0.0, 1.0) as f32
}

fn white(alpha: f32) -> Color {
    Color::new(255, 255, 255, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

fn black(alpha: f32) -> Color {
    Color::new(0, 0, 0, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Opacity of the left-hand text backdrop, `mounted_ms` after mount.
pub fn backdrop_opacity(mounted_ms: f64) -> f32 {
    ramp(mounted_ms, BACKDROP_FADE_MS)
}

/// Sweep position of the button shimmer, 0 at the left edge and 1 at the right.
pub fn shimmer_phase(now_ms: f64) -> f32 {
    (now_ms.rem_euclid(SHIMMER_PERIOD_MS) / SHIMMER_PERIOD_MS) as f32
}

pub fn spinner_angle(now_ms: f64) -> f32 {
    (now_ms.rem_euclid(SPINNER_PERIOD_MS) / SPINNER_PERIOD_MS * 360.0) as f32
}

/// Where the logo sits: fixed height, width following the texture's aspect ratio.
pub fn logo_rect(texture_width: f32, texture_height: f32) -> Rectangle {
    let width = if texture_height > 0.0 {
        LOGO_HEIGHT * texture_width / texture_height
    } else {
        0.0
    };
    Rectangle::new(LOGO_MARGIN, LOGO_MARGIN, width, LOGO_HEIGHT)
}

pub fn draw_glow(d: &mut impl RaylibDraw, viewport: Viewport) {
    let radius = viewport.width * 0.3;
    d.draw_circle_gradient(
        (viewport.width / 2.0) as i32,
        (viewport.height / 2.0) as i32,
        radius,
        white(0.05),
        white(0.0),
    );
}

/// Dark gradient behind the captions: black 90% to 40% to clear over the left half.
pub fn draw_backdrop(d: &mut impl RaylibDraw, viewport: Viewport, mounted_ms: f64) {
    let fade = backdrop_opacity(mounted_ms);
    if fade <= 0.0 {
        return;
    }
    let span = if viewport.width >= 1024.0 {
        viewport.width / 2.0
    } else if viewport.width >= 768.0 {
        viewport.width * 0.75
    } else {
        viewport.width
    };
    let half = (span / 2.0) as i32;
    let height = viewport.height as i32;
    d.draw_rectangle_gradient_h(0, 0, half, height, black(0.9 * fade), black(0.4 * fade));
    d.draw_rectangle_gradient_h(half, 0, span as i32 - half, height, black(0.4 * fade), black(0.0));
}

pub fn draw_logo(d: &mut impl RaylibDraw, logo: &Texture2D) {
    let tex_width = logo.width() as f32;
    let tex_height = logo.height() as f32;
    let dest = logo_rect(tex_width, tex_height);

    // Soft halo behind the silhouette
    d.draw_rectangle_rounded(
        Rectangle::new(dest.x - 4.0, dest.y - 4.0, dest.width + 8.0, dest.height + 8.0),
        0.5,
        8,
        white(0.06),
    );
    d.draw_texture_pro(
        logo,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        dest,
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );
}

fn draw_spinner(d: &mut impl RaylibDraw, viewport: Viewport, now_ms: f64) {
    let center = Vector2::new(viewport.width / 2.0, viewport.height / 2.0);
    let start = spinner_angle(now_ms);
    d.draw_ring(center, SPINNER_RADIUS - 2.0, SPINNER_RADIUS, 0.0, 360.0, 48, white(0.2));
    d.draw_ring(center, SPINNER_RADIUS - 2.0, SPINNER_RADIUS, start, start + 90.0, 16, Color::WHITE);
}

/// Persistent pill button opening the club's page.
#[derive(Debug, Default, Clone, Copy)]
pub struct JoinButton {
    pub hovered: bool,
    pub pressed: bool,
    // The current press started inside the button
    armed: bool,
}

/// Left mouse button state sampled once per frame.
#[derive(Debug, Clone, Copy)]
pub struct Pointer {
    pub position: Vector2,
    pub down: bool,
    pub pressed: bool,
    pub released: bool,
}

/// Button geometry and visibility for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonLayout {
    pub rect: Rectangle,
    pub opacity: f32,
}

impl JoinButton {
    /// Opacity and upward offset of the button `mounted_ms` after mount.
    pub fn entrance(mounted_ms: f64) -> (f32, f32) {
        let t = ramp(mounted_ms - BUTTON_DELAY_MS, BUTTON_ENTER_MS);
        let level = ease::cubic_out(t, 0.0, 1.0, 1.0);
        (level, BUTTON_RISE * (1.0 - level))
    }

    /// Centred horizontally with its bottom edge at three quarters of the viewport height.
    pub fn layout(viewport: Viewport, label_width: f32, mounted_ms: f64) -> ButtonLayout {
        let (opacity, rise) = Self::entrance(mounted_ms);
        let width = label_width + BUTTON_PAD_X * 2.0;
        let height = BUTTON_FONT_SIZE as f32 * 1.4 + BUTTON_PAD_Y * 2.0;
        let x = (viewport.width - width) / 2.0;
        let y = viewport.height * 0.75 - height + rise;
        ButtonLayout { rect: Rectangle::new(x, y, width, height), opacity }
    }

    pub fn contains(layout: &ButtonLayout, point: Vector2) -> bool {
        layout.opacity > 0.0
            && point.x >= layout.rect.x
            && point.x <= layout.rect.x + layout.rect.width
            && point.y >= layout.rect.y
            && point.y <= layout.rect.y + layout.rect.height
    }

    /// Updates hover and press state; returns `true` on a click, that is a
    /// release over the button following a press that also started on it.
    /// Nothing is hit-testable before the image is ready.
    pub fn track(&mut self, layout: &ButtonLayout, ready: bool, pointer: Pointer) -> bool {
        if !ready {
            self.release();
            return false;
        }
        let hovered = Self::contains(layout, pointer.position);
        if pointer.pressed {
            self.armed = hovered;
        }
        let clicked = pointer.released && self.armed && hovered;
        if pointer.released || !pointer.down {
            self.armed = false;
        }
        self.hovered = hovered;
        self.pressed = hovered && self.armed && pointer.down;
        clicked
    }

    pub fn release(&mut self) {
        *self = JoinButton::default();
    }

    pub fn cursor(&self) -> MouseCursor {
        if self.hovered {
            MouseCursor::MOUSE_CURSOR_POINTING_HAND
        } else {
            MouseCursor::MOUSE_CURSOR_DEFAULT
        }
    }

    pub fn label_width() -> f32 {
        measure_text(BUTTON_LABEL, BUTTON_FONT_SIZE) as f32
    }

    pub fn draw(&self, d: &mut impl RaylibDraw, layout: &ButtonLayout, now_ms: f64) {
        if layout.opacity <= 0.0 {
            return;
        }
        let mut rect = layout.rect;
        if self.pressed {
            let shrink_w = rect.width * 0.05;
            let shrink_h = rect.height * 0.05;
            rect = Rectangle::new(
                rect.x + shrink_w / 2.0,
                rect.y + shrink_h / 2.0,
                rect.width - shrink_w,
                rect.height - shrink_h,
            );
        }
        let alpha = layout.opacity;

        let glow = if self.hovered { 0.4 } else { 0.2 };
        let spread = if self.hovered { 15.0 } else { 10.0 };
        d.draw_rectangle_rounded(
            Rectangle::new(rect.x - spread, rect.y - spread, rect.width + spread * 2.0, rect.height + spread * 2.0),
            1.0,
            24,
            white(glow * 0.5 * alpha),
        );
        d.draw_rectangle_rounded(rect, 1.0, 24, white(alpha));

        // Shimmer band, clipped to the button
        let band = rect.width;
        let band_x = rect.x - band + shimmer_phase(now_ms) * (rect.width + band);
        let left = band_x.max(rect.x);
        let right = (band_x + band).min(rect.x + rect.width);
        if right > left {
            let mid = ((left + right) / 2.0) as i32;
            let shade = Color::new(229, 231, 235, (0.5 * alpha * 255.0) as u8);
            let clear = Color::new(229, 231, 235, 0);
            let top = (rect.y + rect.height * 0.15) as i32;
            let inner_h = (rect.height * 0.7) as i32;
            d.draw_rectangle_gradient_h(left as i32, top, mid - left as i32, inner_h, clear, shade);
            d.draw_rectangle_gradient_h(mid, top, right as i32 - mid, inner_h, shade, clear);
        }

        let text_color = if self.hovered { black(0.8 * alpha) } else { black(alpha) };
        let text_x = rect.x + (rect.width - Self::label_width()) / 2.0;
        let text_y = rect.y + (rect.height - BUTTON_FONT_SIZE as f32) / 2.0;
        d.draw_text(BUTTON_LABEL, text_x as i32, text_y as i32, BUTTON_FONT_SIZE, text_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_fades_in_over_two_seconds() {
        assert_eq!(backdrop_opacity(0.0), 0.0);
        assert_eq!(backdrop_opacity(1_000.0), 0.5);
        assert_eq!(backdrop_opacity(5_000.0), 1.0);
    }

    #[test]
    fn button_waits_then_rises_into_place() {
        assert_eq!(JoinButton::entrance(0.0), (0.0, 20.0));
        assert_eq!(JoinButton::entrance(500.0), (0.0, 20.0));
        let (opacity, rise) = JoinButton::entrance(1_500.0);
        assert_eq!(opacity, 1.0);
        assert_eq!(rise, 0.0);
    }

    #[test]
    fn button_sits_centred_above_the_lower_quarter() {
        let viewport = Viewport::new(1000.0, 800.0);
        let layout = JoinButton::layout(viewport, 40.0, 10_000.0);
        assert_eq!(layout.rect.width, 120.0);
        assert_eq!(layout.rect.x, 440.0);
        assert!((layout.rect.y + layout.rect.height - 600.0).abs() < 1e-3);
    }

    #[test]
    fn hit_test_follows_the_layout() {
        let viewport = Viewport::new(1000.0, 800.0);
        let layout = JoinButton::layout(viewport, 40.0, 10_000.0);
        let center = Vector2::new(
            layout.rect.x + layout.rect.width / 2.0,
            layout.rect.y + layout.rect.height / 2.0,
        );
        assert!(JoinButton::contains(&layout, center));
        assert!(!JoinButton::contains(&layout, Vector2::new(10.0, 10.0)));
    }

    #[test]
    fn invisible_button_cannot_be_clicked() {
        let viewport = Viewport::new(1000.0, 800.0);
        let layout = JoinButton::layout(viewport, 40.0, 0.0);
        let center = Vector2::new(
            layout.rect.x + layout.rect.width / 2.0,
            layout.rect.y + layout.rect.height / 2.0,
        );
        assert!(!JoinButton::contains(&layout, center));
    }

    #[test]
    fn shimmer_and_spinner_loop() {
        assert_eq!(shimmer_phase(0.0), 0.0);
        assert_eq!(shimmer_phase(1_500.0), 0.5);
        assert_eq!(shimmer_phase(4_500.0), 0.5);
        assert_eq!(spinner_angle(250.0), 90.0);
        assert_eq!(spinner_angle(1_250.0), 90.0);
    }

    fn centre_of(layout: &ButtonLayout) -> Vector2 {
        Vector2::new(
            layout.rect.x + layout.rect.width / 2.0,
            layout.rect.y + layout.rect.height / 2.0,
        )
    }

    fn pointer(position: Vector2, down: bool, pressed: bool, released: bool) -> Pointer {
        Pointer { position, down, pressed, released }
    }

    #[test]
    fn button_is_inert_until_ready() {
        let layout = JoinButton::layout(Viewport::new(1000.0, 800.0), 40.0, 10_000.0);
        let at = centre_of(&layout);
        let mut button = JoinButton::default();

        assert!(!button.track(&layout, false, pointer(at, true, true, false)));
        assert!(!button.track(&layout, false, pointer(at, false, false, true)));
        assert!(!button.hovered);
        assert!(!button.pressed);
        assert!(matches!(button.cursor(), MouseCursor::MOUSE_CURSOR_DEFAULT));
    }

    #[test]
    fn click_needs_press_and_release_on_the_button() {
        let layout = JoinButton::layout(Viewport::new(1000.0, 800.0), 40.0, 10_000.0);
        let at = centre_of(&layout);
        let mut button = JoinButton::default();

        assert!(!button.track(&layout, true, pointer(at, true, true, false)));
        assert!(button.pressed);
        assert!(button.track(&layout, true, pointer(at, false, false, true)));
        assert!(!button.pressed);
    }

    #[test]
    fn release_after_pressing_elsewhere_is_not_a_click() {
        let layout = JoinButton::layout(Viewport::new(1000.0, 800.0), 40.0, 10_000.0);
        let outside = Vector2::new(10.0, 10.0);
        let mut button = JoinButton::default();

        assert!(!button.track(&layout, true, pointer(outside, true, true, false)));
        // Dragged onto the button, then released
        assert!(!button.track(&layout, true, pointer(centre_of(&layout), true, false, false)));
        assert!(!button.pressed);
        assert!(!button.track(&layout, true, pointer(centre_of(&layout), false, false, true)));
    }

    #[test]
    fn press_dragged_off_the_button_does_not_click() {
        let layout = JoinButton::layout(Viewport::new(1000.0, 800.0), 40.0, 10_000.0);
        let mut button = JoinButton::default();

        button.track(&layout, true, pointer(centre_of(&layout), true, true, false));
        assert!(!button.track(&layout, true, pointer(Vector2::new(10.0, 10.0), false, false, true)));
    }

    #[test]
    fn releasing_the_button_resets_the_cursor() {
        let layout = JoinButton::layout(Viewport::new(1000.0, 800.0), 40.0, 10_000.0);
        let mut button = JoinButton::default();
        button.track(&layout, true, pointer(centre_of(&layout), false, false, false));
        assert!(matches!(button.cursor(), MouseCursor::MOUSE_CURSOR_POINTING_HAND));

        button.release();
        assert!(!button.hovered);
        assert!(matches!(button.cursor(), MouseCursor::MOUSE_CURSOR_DEFAULT));
    }

    #[test]
    fn loading_cover_hides_everything_but_the_logo() {
        assert_eq!(layer_order(false), &[Layer::Loading, Layer::Logo]);
        assert_eq!(
            layer_order(true),
            &[Layer::Backdrop, Layer::Captions, Layer::Button, Layer::Logo]
        );
    }

    #[test]
    fn vignette_keeps_the_centre_and_fades_the_edges() {
        assert_eq!(vignette_alpha(0.0), 1.0);
        assert_eq!(vignette_alpha(0.4), 1.0);
        assert!((vignette_alpha(0.65) - 0.5).abs() < 1e-5);
        assert_eq!(vignette_alpha(0.9), 0.0);
        assert_eq!(vignette_alpha(1.2), 0.0);

        let mut last = vignette_alpha(0.0);
        for step in 1..=100 {
            let alpha = vignette_alpha(step as f32 / 100.0);
            assert!(alpha <= last);
            last = alpha;
        }
    }

    #[test]
    fn vignette_rings_cover_from_forty_percent_to_the_corners() {
        let viewport = Viewport::new(800.0, 600.0);
        let radius = vignette_radius(viewport);
        assert!((radius - 500.0).abs() < 1e-3);

        let rings = vignette_rings(viewport);
        let (first_inner, _, first_cover) = rings[0];
        let (_, last_outer, last_cover) = *rings.last().unwrap();
        assert!((first_inner - 200.0).abs() < 1e-3);
        assert!(first_cover < 0.05);
        assert!(last_outer > radius);
        assert_eq!(last_cover, 1.0);

        // Rings are contiguous and get more opaque outwards
        for pair in rings.windows(2) {
            assert!((pair[0].1 - pair[1].0).abs() < 1e-2);
            assert!(pair[1].2 >= pair[0].2);
        }
    }

    #[test]
    fn logo_keeps_its_aspect_ratio() {
        let rect = logo_rect(200.0, 100.0);
        assert_eq!((rect.x, rect.y), (32.0, 32.0));
        assert_eq!((rect.width, rect.height), (96.0, 48.0));
    }
}
