//! Images with a blurred low-resolution placeholder.
//!
//! # Data Flow
//! ```text
//! src (absolute, or relative to images.base_url)
//!     → ImageLoader::get_image (HTTP fetch)
//!     → placeholder_from_bytes (decode, downscale, PNG, base64)
//!     → DynamicImage::render (img with blur background + intrinsic size)
//! ```
//!
//! # Design Decisions
//! - Placeholder failures never fail the page; the image renders without one
//! - Placeholder width is configurable, height follows the aspect ratio

use std::io::Cursor;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::FilterType;
use image::ImageFormat;
use thiserror::Error;
use url::Url;

use crate::config::ImageConfig;
use crate::observability::metrics;
use crate::ui::class::tw;
use crate::ui::element::Element;

/// Errors while producing an image placeholder.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("invalid image source {src:?}: {reason}")]
    InvalidSource { src: String, reason: String },

    #[error("image fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Placeholder data and intrinsic size of a fetched image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePlaceholder {
    /// `data:image/png;base64,…` URL of the downscaled image.
    pub base64: String,
    pub src: String,
    pub width: u32,
    pub height: u32,
}

/// Dimensions that fit `width`×`height` inside a `size`×`size` box,
/// keeping the aspect ratio. The longer side becomes `size`.
fn fit_inside(width: u32, height: u32, size: u32) -> (u32, u32) {
    let size = size.max(1);
    let (width, height) = (width.max(1) as f64, height.max(1) as f64);
    let scale = size as f64 / width.max(height);
    let side = |v: f64| ((v * scale).round().max(1.0) as u32).min(size);
    (side(width), side(height))
}

/// Decode `bytes` and build a PNG placeholder no larger than `size`×`size`.
pub fn placeholder_from_bytes(
    src: &str,
    bytes: &[u8],
    size: u32,
) -> Result<ImagePlaceholder, ImageError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = (img.width(), img.height());

    let (thumb_width, thumb_height) = fit_inside(width, height, size);
    let thumb = img.resize_exact(thumb_width, thumb_height, FilterType::Triangle);

    let mut buf = Cursor::new(Vec::new());
    thumb.write_to(&mut buf, ImageFormat::Png)?;

    Ok(ImagePlaceholder {
        base64: format!("data:image/png;base64,{}", STANDARD.encode(buf.into_inner())),
        src: src.to_string(),
        width,
        height,
    })
}

/// Fetches images and derives their placeholders.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    client: reqwest::Client,
    base_url: Option<Url>,
    placeholder_size: u32,
}

impl ImageLoader {
    pub fn new(config: &ImageConfig) -> Result<Self, ImageError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;
        let base_url = match &config.base_url {
            Some(raw) => Some(Url::parse(raw).map_err(|e| ImageError::InvalidSource {
                src: raw.clone(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            client,
            base_url,
            placeholder_size: config.placeholder_size,
        })
    }

    fn resolve(&self, src: &str) -> Result<Url, ImageError> {
        let invalid = |reason: String| ImageError::InvalidSource {
            src: src.to_string(),
            reason,
        };
        match Url::parse(src) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base.join(src).map_err(|e| invalid(e.to_string())),
                None => Err(invalid("relative source without images.base_url".into())),
            },
            Err(e) => Err(invalid(e.to_string())),
        }
    }

    /// Fetch `src` and compute its placeholder.
    pub async fn get_image(&self, src: &str) -> Result<ImagePlaceholder, ImageError> {
        let url = self.resolve(src)?;
        tracing::debug!(url = %url, "Fetching image for placeholder");

        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        placeholder_from_bytes(src, &bytes, self.placeholder_size)
    }
}

/// An image rendered with a blur-up placeholder.
#[derive(Debug, Clone)]
pub struct DynamicImage {
    src: String,
    alt: String,
    class: Option<String>,
    sizes: String,
    priority: bool,
    attributes: Vec<(String, String)>,
}

impl DynamicImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            class: None,
            sizes: crate::config::schema::DEFAULT_IMAGE_SIZES.to_string(),
            priority: false,
            attributes: Vec::new(),
        }
    }

    /// Classes for the wrapping `div`.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = sizes.into();
        self
    }

    /// Load eagerly with high fetch priority.
    pub fn priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Extra attributes for the `img`, applied last.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn render(&self, placeholder: Option<&ImagePlaceholder>) -> Element {
        let mut img = Element::tag("img")
            .attr("alt", self.alt.as_str())
            .attr("src", self.src.as_str())
            .attr("sizes", self.sizes.as_str());

        if let Some(p) = placeholder {
            img.set_attr("width", p.width.to_string());
            img.set_attr("height", p.height.to_string());
            img.set_attr("data-placeholder", "blur");
            img.set_attr(
                "style",
                format!(
                    "background-size:cover;background-position:center;background-image:url(\"{}\")",
                    p.base64
                ),
            );
        }

        if self.priority {
            img.set_attr("fetchpriority", "high");
        } else {
            img.set_attr("loading", "lazy");
        }
        for (name, value) in &self.attributes {
            img.set_attr(name.as_str(), value.as_str());
        }

        Element::tag("div")
            .with_classes(tw(["relative", self.class.as_deref().unwrap_or_default()]))
            .child(img)
    }

    /// Fetch the placeholder, then render. Failures render without one.
    pub async fn load_and_render(&self, loader: &ImageLoader) -> Element {
        match loader.get_image(&self.src).await {
            Ok(placeholder) => {
                metrics::record_image_placeholder("ok");
                self.render(Some(&placeholder))
            }
            Err(e) => {
                metrics::record_image_placeholder("error");
                tracing::warn!(src = %self.src, error = %e, "Image placeholder unavailable");
                self.render(None)
            }
        }
    }
}
