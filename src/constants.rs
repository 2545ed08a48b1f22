pub const WINDOW_WIDTH: i32 = 1280;            // Initial window width (logical pixels)
pub const WINDOW_HEIGHT: i32 = 720;            // Initial window height (logical pixels)
pub const FPS: u32 = 60;                       // Target frames per second

// --- Caption timeline, relative to readiness (milliseconds) ---
pub const STRENGTH_AT_MS: f64 = 500.0;
pub const PRECISION_AT_MS: f64 = 5_500.0;
pub const JOIN_AT_MS: f64 = 10_500.0;

// --- Image motion ---
pub const ENTRANCE_DURATION_MS: f32 = 2_500.0; // Fly-in duration
pub const COVER_REDUCTION: f32 = 0.85;         // Cover-fit scale reduced by 15%
pub const OFFSCREEN_MARGIN: f32 = 100.0;       // Fly-in starts this far right of the viewport
pub const FLOAT_SPEED: f64 = 0.002;            // Radians per millisecond
pub const FLOAT_AMPLITUDE: f32 = 15.0;         // Pixels
pub const VIGNETTE_INNER: f32 = 0.4;           // Image fully visible inside this share of the corner distance
pub const VIGNETTE_OUTER: f32 = 0.9;           // Image fully faded from this share outwards

// --- Caption transitions ---
pub const CAPTION_ENTER_MS: f64 = 1_000.0;
pub const CAPTION_EXIT_MS: f64 = 800.0;
pub const CAPTION_SLIDE: f32 = 20.0;           // Horizontal travel while entering/exiting

// --- Overlay ---
pub const BACKDROP_FADE_MS: f64 = 2_000.0;
pub const BUTTON_DELAY_MS: f64 = 500.0;
pub const BUTTON_ENTER_MS: f64 = 1_000.0;
pub const BUTTON_RISE: f32 = 20.0;
pub const SHIMMER_PERIOD_MS: f64 = 3_000.0;
pub const SPINNER_PERIOD_MS: f64 = 1_000.0;
pub const LOGO_MARGIN: f32 = 32.0;
pub const LOGO_HEIGHT: f32 = 48.0;

pub const DEFAULT_IMAGE: &str = "assets/ImgWithBgStroke.png";
pub const DEFAULT_LOGO: &str = "assets/FitLogo.png";
pub const DEFAULT_LINK: &str = "https://www.instagram.com/fitness_club1608/";
