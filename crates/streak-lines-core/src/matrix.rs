//! Frame tiling.
//!
//! Detection can run on tiles of a frame instead of the whole frame. Each
//! [`ImageMatrixElement`] remembers where it sits in the parent frame and the
//! lines found inside it (in tile-local coordinates).

use crate::{GrayImage, GrayImageView, Line};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Rectangular tile of a frame.
///
/// Equality and hashing only look at the tile geometry, never at pixel data
/// or lines, so caches keyed by tile keep working across frames.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageMatrixElement {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    #[serde(skip)]
    pub image: Option<GrayImage>,
    #[serde(default)]
    pub lines: Option<Vec<Line>>,
}

impl ImageMatrixElement {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            image: None,
            lines: None,
        }
    }

    /// Copy this tile's pixels out of the parent frame.
    pub fn crop_from(&mut self, frame: &GrayImageView<'_>) {
        self.image = Some(frame.crop(self.x, self.y, self.width, self.height));
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    /// Detected lines moved from tile-local into parent frame coordinates.
    pub fn frame_lines(&self) -> Vec<Line> {
        let (dx, dy) = (self.x as f64, self.y as f64);
        self.lines
            .iter()
            .flatten()
            .map(|line| {
                let (p1, p2) = line.two_points();
                Line::from_points_with_votes(
                    p1.translated(dx, dy),
                    p2.translated(dx, dy),
                    line.votes,
                )
            })
            .collect()
    }
}

impl PartialEq for ImageMatrixElement {
    fn eq(&self, other: &Self) -> bool {
        (self.x, self.y, self.width, self.height)
            == (other.x, other.y, other.width, other.height)
    }
}

impl Eq for ImageMatrixElement {}

impl Hash for ImageMatrixElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.x, self.y, self.width, self.height).hash(state);
    }
}

/// Row-major tiling of a `width × height` frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageMatrix {
    pub width: usize,
    pub height: usize,
    pub max_element_size: usize,
    pub elements: Vec<ImageMatrixElement>,
}

impl ImageMatrix {
    /// Tiles are at most `max_element_size` on a side; the last row and column
    /// take whatever remains. A zero `max_element_size` yields a single tile.
    pub fn new(width: usize, height: usize, max_element_size: usize) -> Self {
        let step = if max_element_size == 0 {
            width.max(height).max(1)
        } else {
            max_element_size
        };

        let mut elements = Vec::new();
        for y in (0..height).step_by(step) {
            for x in (0..width).step_by(step) {
                elements.push(ImageMatrixElement::new(
                    x,
                    y,
                    step.min(width - x),
                    step.min(height - y),
                ));
            }
        }

        Self {
            width,
            height,
            max_element_size,
            elements,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Tile containing pixel `(x, y)`.
    pub fn element_at(&self, x: usize, y: usize) -> Option<&ImageMatrixElement> {
        self.elements.iter().find(|e| e.contains(x, y))
    }
}
