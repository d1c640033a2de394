#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl<'a> GrayImageView<'a> {
    /// Pixel value, `None` outside the frame.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// `data.len()` matches the declared dimensions.
    pub fn is_consistent(&self) -> bool {
        self.width
            .checked_mul(self.height)
            .is_some_and(|n| n == self.data.len())
    }

    pub fn to_owned_image(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }

    /// Copy the `width × height` region at `(x, y)`, clipped to the frame.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> GrayImage {
        let x0 = x.min(self.width);
        let y0 = y.min(self.height);
        let w = x0.saturating_add(width).min(self.width) - x0;
        let h = y0.saturating_add(height).min(self.height) - y0;

        let mut data = Vec::with_capacity(w * h);
        for row in y0..y0 + h {
            let start = row * self.width + x0;
            data.extend_from_slice(&self.data[start..start + w]);
        }
        GrayImage {
            width: w,
            height: h,
            data,
        }
    }
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }
}
