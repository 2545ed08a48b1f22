use std::path::PathBuf;

use raylib::prelude::*;
use tracing::{debug, error, info};

use crate::captions::CaptionTrack;
use crate::config::Config;
use crate::loader::{ImageLoader, LoadOptions, LoadPoll};
use crate::motion::{self, Viewport};
use crate::overlay::{self, BACKGROUND, ButtonLayout, JoinButton, Layer, Pointer};
use crate::surface::Surface;
use crate::timeline::{FrameLoop, Timeline};

/// The landing page: floating image, timed captions, logo and the "Join" button.
pub struct Landing {
    image_path: PathBuf,
    logo_path: PathBuf,
    link: String,
    // Whether the button may open the link (off while recording)
    interactive: bool,

    image_loader: Option<ImageLoader>,
    logo_loader: Option<ImageLoader>,
    image: Option<Texture2D>,
    logo: Option<Texture2D>,

    timeline: Timeline,
    captions: CaptionTrack,
    surface: Surface,
    button: JoinButton,
}

/// Everything drawn on top of (or instead of) the floating image.
struct Layers<'a> {
    viewport: Viewport,
    now_ms: f64,
    mounted_ms: f64,
    ready: bool,
    logo: Option<&'a Texture2D>,
    captions: &'a CaptionTrack,
    button: &'a JoinButton,
    button_layout: ButtonLayout,
}

impl Layers<'_> {
    fn draw(&self, d: &mut impl RaylibDraw) {
        for layer in overlay::layer_order(self.ready) {
            match layer {
                Layer::Backdrop => overlay::draw_backdrop(d, self.viewport, self.mounted_ms),
                Layer::Captions => self.captions.draw(d, self.viewport, self.now_ms),
                Layer::Button => self.button.draw(d, &self.button_layout, self.now_ms),
                Layer::Loading => overlay::draw_loading(d, self.viewport, self.now_ms),
                Layer::Logo => {
                    if let Some(logo) = self.logo {
                        overlay::draw_logo(d, logo);
                    }
                }
            }
        }
    }
}

impl Landing {
    pub fn new(config: &Config, interactive: bool) -> Self {
        Self {
            image_path: config.image.clone(),
            logo_path: config.logo.clone(),
            link: config.link.clone(),
            interactive,
            image_loader: None,
            logo_loader: None,
            image: None,
            logo: None,
            timeline: Timeline::new(0.0),
            captions: CaptionTrack::new(),
            surface: Surface::new(),
            button: JoinButton::default(),
        }
    }

    fn poll_assets(&mut self, now_ms: f64, rl: &mut RaylibHandle, thread: &RaylibThread) {
        if let Some(loader) = self.image_loader.as_mut() {
            match loader.poll(rl, thread) {
                LoadPoll::Pending => {}
                LoadPoll::Ready(texture) => {
                    self.image = Some(texture);
                    self.image_loader = None;
                    self.timeline.mark_ready(now_ms);
                }
                // Never ready: captions and the render loop stay idle
                LoadPoll::Failed => self.image_loader = None,
            }
        }
        if let Some(loader) = self.logo_loader.as_mut() {
            match loader.poll(rl, thread) {
                LoadPoll::Pending => {}
                LoadPoll::Ready(texture) => {
                    self.logo = Some(texture);
                    self.logo_loader = None;
                }
                LoadPoll::Failed => self.logo_loader = None,
            }
        }
    }

    fn handle_pointer(&mut self, rl: &mut RaylibHandle, layout: &ButtonLayout) {
        let pointer = Pointer {
            position: rl.get_mouse_position(),
            down: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
            pressed: rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
            released: rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT),
        };
        let clicked = self.button.track(layout, self.timeline.is_ready(), pointer);

        if !self.interactive {
            return;
        }
        rl.set_mouse_cursor(self.button.cursor());
        if clicked {
            match open::that(&self.link) {
                Ok(()) => info!(link = %self.link, "opened link"),
                Err(e) => error!("failed to open {}: {}", self.link, e),
            }
        }
    }

    /// Step 1 of the render loop: keep the surface at viewport size times pixel density.
    fn prepare_surface(&mut self, now_ms: f64, rl: &mut RaylibHandle, thread: &RaylibThread, viewport: Viewport, dpr: f32) {
        if !self.timeline.is_ready() || self.timeline.frame_loop() == FrameLoop::Stopped {
            return;
        }
        match self.surface.fit(rl, thread, viewport, dpr) {
            Ok(()) => {
                self.timeline.start_frame_loop(now_ms);
            }
            Err(e) => {
                // No drawing surface: the render loop silently stays off
                debug!("render loop disabled: {}", e);
                self.timeline.stop_frame_loop();
                self.surface.release();
            }
        }
    }
}

impl crate::engine::Scene for Landing {
    fn mount(&mut self, now_ms: f64) {
        info!(image = ?self.image_path, logo = ?self.logo_path, "mounting landing");
        self.timeline = Timeline::new(now_ms);
        self.captions = CaptionTrack::new();
        self.image_loader = Some(ImageLoader::spawn(&self.image_path, LoadOptions::default()));
        self.logo_loader = Some(ImageLoader::spawn(&self.logo_path, LoadOptions { silhouette: true }));
    }

    fn render_frame(&mut self, now_ms: f64, rl: &mut RaylibHandle, thread: &RaylibThread) {
        if self.timeline.is_torn_down() {
            return;
        }
        self.poll_assets(now_ms, rl, thread);

        self.timeline.tick(now_ms);
        self.captions.sync(self.timeline.step(), now_ms);

        let viewport = Viewport::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let dpr = rl.get_window_scale_dpi().x;
        let mounted_ms = self.timeline.mounted_ms(now_ms);
        let button_layout = JoinButton::layout(viewport, JoinButton::label_width(), mounted_ms);

        self.handle_pointer(rl, &button_layout);
        self.prepare_surface(now_ms, rl, thread, viewport, dpr);

        let Landing { image, logo, timeline, captions, surface, button, .. } = self;
        let layers = Layers {
            viewport,
            now_ms,
            mounted_ms,
            ready: timeline.is_ready(),
            logo: logo.as_ref(),
            captions,
            button,
            button_layout,
        };

        let elapsed = timeline.frame_loop().elapsed_ms(now_ms);
        match (elapsed, image.as_ref(), surface.texture_mut()) {
            (Some(elapsed_ms), Some(image), Some(framebuffer)) => {
                let camera = Camera2D {
                    offset: Vector2::zero(),
                    target: Vector2::zero(),
                    rotation: 0.0,
                    zoom: dpr,
                };
                rl.draw_texture_mode(thread, &mut *framebuffer, |mut tmd| {
                    let mut d = tmd.begin_mode2D(camera);
                    d.clear_background(BACKGROUND);
                    overlay::draw_glow(&mut d, viewport);

                    let tex_width = image.width() as f32;
                    let tex_height = image.height() as f32;
                    let dest = motion::place_image(viewport, tex_width, tex_height, elapsed_ms, now_ms);
                    d.draw_texture_pro(
                        image,
                        Rectangle::new(0.0, 0.0, tex_width, tex_height),
                        dest,
                        Vector2::zero(),
                        0.0,
                        Color::WHITE,
                    );

                    // Fade the image edges into the background
                    overlay::draw_vignette(&mut d, viewport);

                    layers.draw(&mut d);
                });

                // Render textures are stored upside down
                let mut d = rl.begin_drawing(thread);
                d.clear_background(BACKGROUND);
                d.draw_texture_pro(
                    &*framebuffer,
                    Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
                    Rectangle::new(0.0, 0.0, viewport.width, viewport.height),
                    Vector2::zero(),
                    0.0,
                    Color::WHITE,
                );
            }
            _ => {
                let mut d = rl.begin_drawing(thread);
                d.clear_background(BACKGROUND);
                overlay::draw_glow(&mut d, viewport);
                layers.draw(&mut d);
            }
        }
    }

    fn frame_image(&self) -> Option<Image> {
        if !self.timeline.frame_loop().is_running() {
            return None;
        }
        self.surface.texture().and_then(|framebuffer| framebuffer.load_image().ok())
    }

    fn unmount(&mut self, rl: &mut RaylibHandle) {
        self.timeline.teardown();
        self.button.release();
        if self.interactive {
            rl.set_mouse_cursor(self.button.cursor());
        }
        self.surface.release();
        self.image = None;
        self.logo = None;
        // In-flight fetches are not cancelled; their results are dropped with the loaders
        self.image_loader = None;
        self.logo_loader = None;
        info!("landing unmounted");
    }
}
