use image::RgbaImage;

use crate::compose::composite::{copy_in_place, paste_masked_in_place};
use crate::foundation::core::{Canvas, Offset};
use crate::foundation::error::{StampError, StampResult};

/// One positioned image in a [`LayerStack`].
#[derive(Clone, Debug)]
pub struct Layer {
    /// Straight-alpha RGBA8 pixels.
    pub image: RgbaImage,
    /// Placement of the image's top-left corner on the canvas.
    pub offset: Offset,
}

impl Layer {
    /// Create a layer.
    pub fn new(image: RgbaImage, offset: Offset) -> Self {
        Self { image, offset }
    }
}

/// Ordered layers painted bottom (index 0) to top onto a fixed-size canvas.
#[derive(Clone, Debug)]
pub struct LayerStack {
    canvas: Canvas,
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Create an empty stack for a canvas of the given dimensions.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            layers: Vec::new(),
        }
    }

    /// Declared canvas dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Layers in paint order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Return `true` when the stack holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Append a layer on top of the stack (painted last).
    pub fn add_layer(&mut self, image: RgbaImage, offset: Offset) {
        self.layers.push(Layer::new(image, offset));
    }

    /// Insert a layer before `index`, shifting later layers up.
    pub fn insert_layer(&mut self, index: usize, image: RgbaImage, offset: Offset) -> StampResult<()> {
        if index > self.layers.len() {
            return Err(StampError::validation(format!(
                "layer index {index} out of range for stack of {}",
                self.layers.len()
            )));
        }
        self.layers.insert(index, Layer::new(image, offset));
        Ok(())
    }

    /// Insert a layer beneath every existing layer.
    pub fn insert_at_bottom(&mut self, image: RgbaImage, offset: Offset) {
        self.layers.insert(0, Layer::new(image, offset));
    }

    /// Remove and return the layer at `index`.
    pub fn remove_layer(&mut self, index: usize) -> StampResult<Layer> {
        if index >= self.layers.len() {
            return Err(StampError::validation(format!(
                "layer index {index} out of range for stack of {}",
                self.layers.len()
            )));
        }
        Ok(self.layers.remove(index))
    }

    /// Flatten the stack into one image of the declared canvas size.
    ///
    /// The bottom layer is copied onto a transparent canvas as-is; every later layer is painted
    /// over it masked by its own alpha. Returns `None` for an empty stack.
    pub fn merge(&self) -> Option<RgbaImage> {
        let (base, rest) = self.layers.split_first()?;

        let mut out = RgbaImage::new(self.canvas.width, self.canvas.height);
        copy_in_place(&mut out, &base.image, base.offset);
        for layer in rest {
            paste_masked_in_place(&mut out, &layer.image, layer.offset);
        }
        Some(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layer.rs"]
mod tests;
