use bori_image::{Image, ImageError, ImageSize};

use crate::{
    composite::blend_masked,
    draw::{draw_stroke, Point},
    filter::box_blur,
    resize,
};

/// Errors raised by [`MaskedBlurCompositor`].
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CompositorError {
    /// No image has been set on the compositor yet.
    #[error("No image has been set on the compositor")]
    NotInitialized,

    /// An image operation failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Options of a masked blur session.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlurSessionConfig {
    /// Factor applied to the source size to get the working size.
    pub scale: f32,
    /// Box blur radius used for the blurred layer, in working pixels.
    pub blur_radius: usize,
    /// Stroke width of the mask brush, in working pixels.
    pub stroke_width: f32,
}

impl Default for BlurSessionConfig {
    fn default() -> Self {
        Self {
            scale: 0.25,
            blur_radius: 18,
            stroke_width: 80.0,
        }
    }
}

impl BlurSessionConfig {
    /// Set the downscale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the blur radius.
    pub fn with_blur_radius(mut self, blur_radius: usize) -> Self {
        self.blur_radius = blur_radius;
        self
    }

    /// Set the brush width.
    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }
}

/// Size of the working image for a source of `size` downscaled by `scale`.
///
/// Each side is truncated. A non-empty source never yields a side of zero; such sides
/// are raised to one pixel. Scales above 1 are lowered to 1, so the working image is never
/// larger than the source.
pub fn working_size(size: ImageSize, scale: f32) -> ImageSize {
    if size.width == 0 || size.height == 0 {
        return size;
    }

    let scale = if scale > 1.0 {
        log::warn!("scale {scale} would upscale the source, using 1");
        1.0
    } else {
        scale
    };

    let scaled = |side: usize| {
        let out = (side as f32 * scale) as usize;
        if out == 0 {
            log::warn!("scale {scale} collapses a side of {side} pixels, using 1 pixel");
            1
        } else {
            out
        }
    };

    ImageSize {
        width: scaled(size.width),
        height: scaled(size.height),
    }
}

/// A loaded image being selectively blurred.
///
/// Holds a downscaled copy of the source (`sharp`), a box blurred copy of it (`blurred`)
/// and the user painted coverage `mask`. The two layers are fixed for the lifetime of
/// the session and the mask only ever grows.
#[derive(Clone, Debug)]
pub struct BlurSession {
    config: BlurSessionConfig,
    source_size: ImageSize,
    sharp: Image<u8, 4>,
    blurred: Image<u8, 4>,
    mask: Image<u8, 1>,
    last_point: Option<Point>,
}

impl BlurSession {
    /// Start a session from a full resolution source image.
    ///
    /// # Arguments
    ///
    /// * `source` - The image to edit. It is not kept.
    /// * `config` - The session options.
    ///
    /// # Example
    ///
    /// ```
    /// use bori_image::{Image, ImageSize};
    /// use bori_imgproc::blur::{BlurSession, BlurSessionConfig};
    ///
    /// let source = Image::<u8, 4>::from_size_pixel(
    ///     ImageSize { width: 400, height: 200 },
    ///     [90, 60, 30, 255],
    /// )
    /// .unwrap();
    ///
    /// let session = BlurSession::new(&source, &BlurSessionConfig::default()).unwrap();
    /// assert_eq!(session.size(), ImageSize { width: 100, height: 50 });
    ///
    /// let out = session.render().unwrap();
    /// assert_eq!(&out, session.sharp());
    /// ```
    pub fn new(source: &Image<u8, 4>, config: &BlurSessionConfig) -> Result<Self, ImageError> {
        let size = working_size(source.size(), config.scale);

        let mut sharp = Image::<u8, 4>::from_size_val(size, 0)?;
        resize::resize_bilinear(source, &mut sharp)?;

        let blurred = box_blur(&sharp, config.blur_radius)?;
        let mask = Image::<u8, 1>::from_size_val(size, 0)?;

        log::debug!(
            "blur session started: source {}, working {}, radius {}",
            source.size(),
            size,
            config.blur_radius
        );

        Ok(Self {
            config: *config,
            source_size: source.size(),
            sharp,
            blurred,
            mask,
            last_point: None,
        })
    }

    /// The session options.
    pub fn config(&self) -> &BlurSessionConfig {
        &self.config
    }

    /// Size of the source image the session was started from.
    pub fn source_size(&self) -> ImageSize {
        self.source_size
    }

    /// Size of the working images.
    pub fn size(&self) -> ImageSize {
        self.sharp.size()
    }

    /// The downscaled source.
    pub fn sharp(&self) -> &Image<u8, 4> {
        &self.sharp
    }

    /// The blurred layer.
    pub fn blurred(&self) -> &Image<u8, 4> {
        &self.blurred
    }

    /// The painted coverage.
    pub fn mask(&self) -> &Image<u8, 1> {
        &self.mask
    }

    /// Map a point in source pixels to working pixels.
    pub fn to_working(&self, point: Point) -> Point {
        if self.source_size.width == 0 || self.source_size.height == 0 {
            return point;
        }
        let size = self.size();
        Point::new(
            point.x * size.width as f32 / self.source_size.width as f32,
            point.y * size.height as f32 / self.source_size.height as f32,
        )
    }

    /// Paint a polyline, in working pixels, into the mask.
    pub fn paint_stroke(&mut self, points: &[Point]) {
        log::trace!("painting stroke of {} points", points.len());
        draw_stroke(&mut self.mask, points, self.config.stroke_width);
    }

    /// Start an interactive stroke at `point`, painting a dot under it.
    pub fn begin_stroke(&mut self, point: Point) {
        self.paint_stroke(&[point]);
        self.last_point = Some(point);
    }

    /// Continue the current stroke to `point`, painting the new segment.
    ///
    /// Returns `false` and paints nothing if no stroke was started.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        let Some(last) = self.last_point else {
            return false;
        };
        self.paint_stroke(&[last, point]);
        self.last_point = Some(point);
        true
    }

    /// Finish the current stroke.
    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    /// Whether an interactive stroke is in progress.
    pub fn is_stroking(&self) -> bool {
        self.last_point.is_some()
    }

    /// Composite the blurred layer over the sharp layer through the mask.
    pub fn render(&self) -> Result<Image<u8, 4>, ImageError> {
        blend_masked(&self.sharp, &self.blurred, &self.mask)
    }

    /// Produce the final edited image.
    ///
    /// The result is a standalone buffer; the session is left untouched and can keep
    /// being painted.
    pub fn export_result(&self) -> Result<Image<u8, 4>, ImageError> {
        self.render()
    }
}

/// Interactive selective blur editor.
///
/// Starts uninitialized; [`MaskedBlurCompositor::set_image`] moves it to the ready state by
/// starting a [`BlurSession`]. Painting before that is ignored.
#[derive(Clone, Debug, Default)]
pub struct MaskedBlurCompositor {
    config: BlurSessionConfig,
    session: Option<BlurSession>,
}

impl MaskedBlurCompositor {
    /// Create an uninitialized compositor.
    pub fn new(config: BlurSessionConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// The options used for new sessions.
    pub fn config(&self) -> &BlurSessionConfig {
        &self.config
    }

    /// Whether an image has been set.
    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<&BlurSession> {
        self.session.as_ref()
    }

    /// Load a new source image, discarding any previous session and its mask.
    pub fn set_image(&mut self, source: &Image<u8, 4>) -> Result<(), ImageError> {
        self.session = Some(BlurSession::new(source, &self.config)?);
        Ok(())
    }

    /// Paint a polyline, in working pixels, into the mask.
    ///
    /// Returns `false` if no image has been set.
    pub fn paint_stroke(&mut self, points: &[Point]) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.paint_stroke(points);
                true
            }
            None => false,
        }
    }

    /// Start an interactive stroke. Returns `false` if no image has been set.
    pub fn begin_stroke(&mut self, point: Point) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.begin_stroke(point);
                true
            }
            None => false,
        }
    }

    /// Continue the current stroke. Returns `false` if there is no stroke to continue.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.extend_stroke(point))
    }

    /// Finish the current stroke.
    pub fn end_stroke(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.end_stroke();
        }
    }

    /// The composited preview, or `None` if no image has been set.
    pub fn render(&self) -> Option<Image<u8, 4>> {
        let session = self.session.as_ref()?;
        match session.render() {
            Ok(image) => Some(image),
            Err(err) => {
                log::error!("failed to render blur session: {err}");
                None
            }
        }
    }

    /// Produce the final edited image.
    ///
    /// # Errors
    ///
    /// Returns [`CompositorError::NotInitialized`] if no image has been set.
    pub fn export_result(&self) -> Result<Image<u8, 4>, CompositorError> {
        let session = self
            .session
            .as_ref()
            .ok_or(CompositorError::NotInitialized)?;
        Ok(session.export_result()?)
    }
}
