//! Slide content model
//!
//! This module defines the immutable slide data the coordinator presents:
//! a [`Slide`] is an already-decoded image handle plus a title, and a
//! [`SlideDeck`] is the fixed, ordered collection of slides for one
//! presentation session.
//!
//! The deck performs bounds checking only; it never wraps indices. The
//! wrap-around policy (returning to slide 0 after the last slide) belongs
//! to the transition coordinator. Decks are immutable after construction
//! and safe to share across threads behind an `Arc`.

use crate::error::{Result, SlideLoopError};
use std::fmt;
use std::sync::Arc;

/// Opaque reference to an already-decoded image resource
///
/// The core never interprets the handle; the presentation layer resolves it
/// to actual pixels. Cloning is cheap (shared backing storage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle(Arc<str>);

impl ImageHandle {
    /// Create a handle from a resource identifier (asset key, path, URL, ...)
    pub fn new(resource: impl AsRef<str>) -> Self {
        Self(Arc::from(resource.as_ref()))
    }

    /// The underlying resource identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One unit of presentation content: an image and its title
///
/// Created once at deck construction and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    image: ImageHandle,
    title: String,
}

impl Slide {
    /// Create a new slide
    pub fn new(image: ImageHandle, title: impl Into<String>) -> Self {
        Self {
            image,
            title: title.into(),
        }
    }

    /// The slide's image handle
    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    /// The slide's title text
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Immutable ordered collection of slides with bounds-checked access
#[derive(Debug, Clone)]
pub struct SlideDeck {
    slides: Arc<[Slide]>,
}

impl SlideDeck {
    /// Build a deck from a list of slides
    ///
    /// An empty deck is representable (the input is caller data); the
    /// coordinator rejects it at construction instead.
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides: slides.into(),
        }
    }

    /// Number of slides in the deck
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Bounds-checked slide access
    pub fn get(&self, index: usize) -> Result<&Slide> {
        self.slides
            .get(index)
            .ok_or(SlideLoopError::IndexOutOfBounds {
                index,
                len: self.slides.len(),
            })
    }

    /// Iterate over the slides in order
    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }
}
