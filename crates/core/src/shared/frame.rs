use ndarray::ArrayView3;

/// Number of channels in every captured frame.
pub const FRAME_CHANNELS: usize = 3;

/// A single captured frame: contiguous RGB bytes in row-major order.
///
/// Capture adapters convert from their native pixel format (e.g. OpenCV's
/// BGR) before constructing a `Frame`; everything downstream assumes RGB.
/// Frames are immutable once captured.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * FRAME_CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// A uniformly colored frame. Handy for tests and warm-up runs.
    pub fn filled(value: u8, width: u32, height: u32, index: usize) -> Self {
        let len = (width as usize) * (height as usize) * FRAME_CHANNELS;
        Self::new(vec![value; len], width, height, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        let shape = (self.height as usize, self.width as usize, FRAME_CHANNELS);
        ArrayView3::from_shape(shape, &self.data)
            .expect("Frame data length must match dimensions")
    }
}
