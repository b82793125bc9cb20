// SPDX-License-Identifier: MPL-2.0
//! Visibility-triggered image loading with format negotiation.
//!
//! An image stays a placeholder until its element crosses the intersection
//! threshold. It then resolves an optimized source through an
//! [`ImageOptimizer`] and asks the shell to load it. This module never
//! decodes image data.

use crate::config::DEFAULT_LAZY_IMAGE_THRESHOLD;

/// Requested output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Webp,
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Value used in the `fm` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Webp => "webp",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }
}

/// Size and encoding hints sent to the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageRequest {
    pub quality: Option<u8>,
    pub format: Option<ImageFormat>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageRequest {
    /// Whether no hint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quality.is_none()
            && self.format.is_none()
            && self.width.is_none()
            && self.height.is_none()
    }
}

/// Resolves the URL of an optimized variant of `src`.
///
/// Implemented by the site's image-optimization service.
pub trait ImageOptimizer: Send + Sync {
    fn optimized_source(&self, src: &str, request: &ImageRequest) -> String;
}

/// Uses the original source unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughOptimizer;

impl ImageOptimizer for PassthroughOptimizer {
    fn optimized_source(&self, src: &str, _request: &ImageRequest) -> String {
        src.to_string()
    }
}

/// Encodes the request as `w`, `h`, `q` and `fm` query parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParamOptimizer;

impl ImageOptimizer for QueryParamOptimizer {
    fn optimized_source(&self, src: &str, request: &ImageRequest) -> String {
        if request.is_empty() {
            return src.to_string();
        }

        let mut params = Vec::with_capacity(4);
        if let Some(width) = request.width {
            params.push(format!("w={width}"));
        }
        if let Some(height) = request.height {
            params.push(format!("h={height}"));
        }
        if let Some(quality) = request.quality {
            params.push(format!("q={}", quality.min(100)));
        }
        if let Some(format) = request.format {
            params.push(format!("fm={}", format.as_str()));
        }

        let separator = if src.contains('?') { '&' } else { '?' };
        format!("{src}{separator}{}", params.join("&"))
    }
}

/// Loading lifecycle of one lazy image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    /// Not yet near the viewport.
    #[default]
    Placeholder,
    Loading {
        src: String,
    },
    Loaded {
        src: String,
    },
    Failed,
}

/// Messages for a lazy image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// The element's intersection ratio changed.
    Intersected(f32),
    /// The shell finished loading the source.
    Loaded,
    /// The shell failed to load the source.
    Failed,
}

/// Effects produced by lazy image changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Begin loading this URL.
    StartLoading(String),
    /// Invoke the caller's error callback.
    ReportError { src: String },
}

/// What the shell should draw for the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyImageView<'a> {
    Placeholder,
    /// Image element present but hidden until the load completes.
    Pending { src: &'a str },
    /// Image visible; `fade_in` asks for the opacity transition.
    Visible { src: &'a str, fade_in: bool },
    ErrorPlaceholder,
}

/// One lazily loaded image.
#[derive(Debug, Clone)]
pub struct LazyImage {
    src: String,
    request: ImageRequest,
    threshold: f32,
    state: State,
}

impl LazyImage {
    /// A placeholder for `src` with the default visibility threshold.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            request: ImageRequest::default(),
            threshold: DEFAULT_LAZY_IMAGE_THRESHOLD,
            state: State::Placeholder,
        }
    }

    /// Size and encoding hints for the optimizer.
    #[must_use]
    pub fn with_request(mut self, request: ImageRequest) -> Self {
        self.request = request;
        self
    }

    /// Intersection ratio that starts loading, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Handle a lazy image message.
    pub fn handle(&mut self, msg: Message, optimizer: &dyn ImageOptimizer) -> Effect {
        match msg {
            Message::Intersected(ratio) => {
                if self.state != State::Placeholder || ratio < self.threshold {
                    return Effect::None;
                }
                let src = optimizer.optimized_source(&self.src, &self.request);
                self.state = State::Loading { src: src.clone() };
                Effect::StartLoading(src)
            }
            Message::Loaded => match std::mem::take(&mut self.state) {
                State::Loading { src } => {
                    self.state = State::Loaded { src };
                    Effect::None
                }
                other => {
                    self.state = other;
                    Effect::None
                }
            },
            Message::Failed => match std::mem::take(&mut self.state) {
                State::Loading { src } => {
                    self.state = State::Failed;
                    Effect::ReportError { src }
                }
                other => {
                    self.state = other;
                    Effect::None
                }
            },
        }
    }

    /// What to draw for the current state.
    #[must_use]
    pub fn view(&self) -> LazyImageView<'_> {
        match &self.state {
            State::Placeholder => LazyImageView::Placeholder,
            State::Loading { src } => LazyImageView::Pending { src: src.as_str() },
            State::Loaded { src } => LazyImageView::Visible {
                src: src.as_str(),
                fade_in: true,
            },
            State::Failed => LazyImageView::ErrorPlaceholder,
        }
    }
}
