// SPDX-License-Identifier: MPL-2.0
//! Full-screen image viewer.
//!
//! [`Lightbox`] owns the image list and per-image view state: zoom,
//! rotation, pan and fullscreen. Buttons, keys and touch gestures all reduce
//! to [`Message`]s; anything that reaches outside the viewer (fullscreen
//! requests, downloads, sharing, closing) comes back as an [`Effect`] for the
//! shell to perform.
//!
//! Changing the current image always resets zoom, rotation and pan.

pub mod keyboard;
pub mod session;

pub use keyboard::{command_for, Command, Key};
pub use session::{InputSources, LightboxSession};

use crate::config::LightboxConfig;
use crate::domain::gallery::LightboxImage;
use crate::gesture::{Gesture, SwipeDirection, SwipeThresholds, TouchEvent, TouchGestureRecognizer};
use crate::ui::geometry::{Point, Vector};
use crate::ui::state::{DragState, RotationAngle, ZoomState};

/// Messages for the lightbox.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Next,
    Previous,
    /// Jump to an index, e.g. from a thumbnail strip.
    GoTo(usize),
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Rotate,
    ToggleFullscreen,
    /// The shell reports the real fullscreen state.
    FullscreenChanged(bool),
    Download,
    Share,
    Close,
    Key(Key),
    Touch(TouchEvent),
    /// Mouse button pressed over the image.
    PointerPressed(Point),
    PointerMoved(Point),
    PointerReleased,
    /// The current image finished loading.
    ImageLoaded,
}

/// Effects produced by lightbox changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The current image changed; the shell should show and load it.
    Navigated { index: usize },
    EnterFullscreen,
    ExitFullscreen,
    Download { url: String, filename: String },
    /// Hand the image to the platform share sheet.
    Share { title: String, url: String },
    /// Sharing is unsupported; copy the url instead.
    CopyToClipboard { url: String },
    Close,
}

/// Transform the shell applies to the current image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTransform {
    pub scale: f32,
    pub rotation: RotationAngle,
    pub translate: Vector,
}

/// Lightbox state for one opened gallery.
#[derive(Debug, Clone)]
pub struct Lightbox {
    images: Vec<LightboxImage>,
    current_index: usize,
    zoom: ZoomState,
    rotation: RotationAngle,
    pan: Vector,
    drag: DragState,
    is_fullscreen: bool,
    image_loaded: bool,
    share_supported: bool,
    gestures: TouchGestureRecognizer,
}

impl Lightbox {
    /// Opens at `start_index`, clamped into range. Returns `None` for an
    /// empty image list.
    #[must_use]
    pub fn open(
        images: Vec<LightboxImage>,
        start_index: usize,
        config: &LightboxConfig,
        share_supported: bool,
    ) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        let current_index = start_index.min(images.len() - 1);
        Some(Self {
            images,
            current_index,
            zoom: ZoomState::with_step(config.zoom_step),
            rotation: RotationAngle::ZERO,
            pan: Vector::ZERO,
            drag: DragState::default(),
            is_fullscreen: false,
            image_loaded: false,
            share_supported,
            gestures: TouchGestureRecognizer::new(SwipeThresholds::from(config)),
        })
    }

    #[must_use]
    pub fn images(&self) -> &[LightboxImage] {
        &self.images
    }

    /// Zero-based index of the shown image.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The image being shown.
    #[must_use]
    pub fn current(&self) -> &LightboxImage {
        // `images` is non-empty and `current_index` is kept in range.
        &self.images[self.current_index]
    }

    #[must_use]
    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    #[must_use]
    pub fn rotation(&self) -> RotationAngle {
        self.rotation
    }

    /// Pan offset, zero unless magnified.
    #[must_use]
    pub fn pan(&self) -> Vector {
        self.pan
    }

    /// Local fullscreen flag. May drift from the platform.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Whether the current image has finished loading.
    #[must_use]
    pub fn image_loaded(&self) -> bool {
        self.image_loaded
    }

    /// One-based position, e.g. `"3 / 12"`.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.images.len())
    }

    /// Zoom, rotation and pan to apply when drawing the current image.
    #[must_use]
    pub fn transform(&self) -> ImageTransform {
        ImageTransform {
            scale: self.zoom.factor.value(),
            rotation: self.rotation,
            translate: self.pan,
        }
    }

    /// Urls of the previous and next images worth prefetching, without the
    /// current one or duplicates.
    #[must_use]
    pub fn preload_urls(&self) -> Vec<&str> {
        let len = self.images.len();
        if len < 2 {
            return Vec::new();
        }
        let next = (self.current_index + 1) % len;
        let previous = (self.current_index + len - 1) % len;
        let mut urls = vec![self.images[next].url.as_str()];
        if previous != next {
            urls.push(self.images[previous].url.as_str());
        }
        urls
    }

    /// Aligns the local flag with the shell's actual fullscreen state.
    ///
    /// Nothing calls this automatically; a shell that observes fullscreen
    /// changes made outside the lightbox (e.g. the Escape key in a browser)
    /// must forward them itself.
    pub fn sync_fullscreen(&mut self, is_fullscreen: bool) {
        self.is_fullscreen = is_fullscreen;
    }

    /// Handle a lightbox message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Next => self.step(1),
            Message::Previous => self.step(-1),
            Message::GoTo(index) => {
                if index >= self.images.len() || index == self.current_index {
                    return Effect::None;
                }
                self.show(index)
            }
            Message::ZoomIn => {
                self.zoom.zoom_in();
                self.settle_pan();
                Effect::None
            }
            Message::ZoomOut => {
                self.zoom.zoom_out();
                self.settle_pan();
                Effect::None
            }
            Message::ResetZoom => {
                self.zoom.reset();
                self.settle_pan();
                Effect::None
            }
            Message::Rotate => {
                self.rotation = self.rotation.rotate_clockwise();
                Effect::None
            }
            Message::ToggleFullscreen => {
                self.is_fullscreen = !self.is_fullscreen;
                if self.is_fullscreen {
                    Effect::EnterFullscreen
                } else {
                    Effect::ExitFullscreen
                }
            }
            Message::FullscreenChanged(is_fullscreen) => {
                self.sync_fullscreen(is_fullscreen);
                Effect::None
            }
            Message::Download => {
                let image = self.current();
                Effect::Download {
                    url: image.url.clone(),
                    filename: download_filename(image),
                }
            }
            Message::Share => {
                let image = self.current();
                if self.share_supported {
                    Effect::Share {
                        title: image.title.clone(),
                        url: image.url.clone(),
                    }
                } else {
                    Effect::CopyToClipboard {
                        url: image.url.clone(),
                    }
                }
            }
            Message::Close => Effect::Close,
            Message::Key(key) => match command_for(&key) {
                Some(command) => self.handle(command.into()),
                None => Effect::None,
            },
            Message::Touch(event) => self.handle_touch(&event),
            Message::PointerPressed(position) => {
                if self.zoom.factor.is_magnified() {
                    self.drag.start(position, self.pan);
                }
                Effect::None
            }
            Message::PointerMoved(position) => {
                if let Some(offset) = self.drag.calculate_offset(position) {
                    self.pan = offset;
                }
                Effect::None
            }
            Message::PointerReleased => {
                self.drag.stop();
                Effect::None
            }
            Message::ImageLoaded => {
                self.image_loaded = true;
                Effect::None
            }
        }
    }

    fn handle_touch(&mut self, event: &TouchEvent) -> Effect {
        if matches!(event, TouchEvent::End { .. } | TouchEvent::Cancel) {
            self.drag.stop();
        }

        match self.gestures.handle(event) {
            Some(Gesture::Swipe { direction, .. }) => {
                // While magnified a horizontal movement pans instead.
                if self.zoom.factor.is_magnified() {
                    return Effect::None;
                }
                match direction {
                    SwipeDirection::Left => self.step(1),
                    SwipeDirection::Right => self.step(-1),
                    SwipeDirection::Up | SwipeDirection::Down => Effect::None,
                }
            }
            Some(Gesture::PinchStart { .. }) => {
                self.drag.stop();
                self.zoom.begin_pinch();
                Effect::None
            }
            Some(Gesture::Pinch { scale, .. }) => {
                self.zoom.apply_pinch(scale);
                Effect::None
            }
            Some(Gesture::PinchEnd { .. }) => {
                self.zoom.end_pinch();
                self.settle_pan();
                Effect::None
            }
            Some(Gesture::Drag { origin, position }) => {
                if self.zoom.factor.is_magnified() {
                    if !self.drag.is_dragging {
                        self.drag.start(origin, self.pan);
                    }
                    if let Some(offset) = self.drag.calculate_offset(position) {
                        self.pan = offset;
                    }
                }
                Effect::None
            }
            None => Effect::None,
        }
    }

    fn step(&mut self, delta: isize) -> Effect {
        let len = self.images.len();
        if len < 2 {
            return Effect::None;
        }
        let target = if delta >= 0 {
            (self.current_index + 1) % len
        } else {
            (self.current_index + len - 1) % len
        };
        self.show(target)
    }

    fn show(&mut self, index: usize) -> Effect {
        self.current_index = index;
        self.zoom.reset();
        self.rotation = RotationAngle::ZERO;
        self.pan = Vector::ZERO;
        self.drag.stop();
        self.image_loaded = false;
        log::trace!("[Lightbox] showing {}", self.position_label());
        Effect::Navigated { index }
    }

    /// Panning only makes sense on a magnified image.
    fn settle_pan(&mut self) {
        if !self.zoom.factor.is_magnified() {
            self.pan = Vector::ZERO;
            self.drag.stop();
        }
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        match command {
            Command::Close => Message::Close,
            Command::Previous => Message::Previous,
            Command::Next => Message::Next,
            Command::ZoomIn => Message::ZoomIn,
            Command::ZoomOut => Message::ZoomOut,
            Command::ResetZoom => Message::ResetZoom,
            Command::Rotate => Message::Rotate,
            Command::ToggleFullscreen => Message::ToggleFullscreen,
        }
    }
}

/// File name offered for a download: the url's last path segment, or the
/// image title plus id when the url has none.
#[must_use]
pub fn download_filename(image: &LightboxImage) -> String {
    let path = image
        .url
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() && segment.contains('.') => segment.to_string(),
        _ => {
            let stem: String = image
                .title
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { '-' })
                .collect();
            let stem = stem.trim_matches('-');
            if stem.is_empty() {
                format!("image-{}.jpg", image.id)
            } else {
                format!("{stem}-{}.jpg", image.id)
            }
        }
    }
}
