/// A detected face's bounding box in pixel coordinates.
///
/// The raw coordinates double as the face's identity across frames:
/// records are keyed on the exact `(x, y, width, height)` tuple, so a
/// box that moves by a single pixel counts as a brand-new face. Real
/// re-identification is out of scope for this demo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box area in pixels. Degenerate boxes report zero.
    pub fn area(&self) -> i64 {
        let w = i64::from(self.width.max(0));
        let h = i64::from(self.height.max(0));
        w * h
    }

    /// The box intersected with a `frame_width` x `frame_height` frame.
    ///
    /// Detectors may report boxes that extend past the frame edges;
    /// pixel access goes through the clamped form.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> FaceBox {
        let fw = frame_width as i32;
        let fh = frame_height as i32;
        let x1 = self.x.clamp(0, fw);
        let y1 = self.y.clamp(0, fh);
        let x2 = (self.x + self.width).clamp(0, fw);
        let y2 = (self.y + self.height).clamp(0, fh);
        FaceBox::new(x1, y1, x2 - x1, y2 - y1)
    }
}
