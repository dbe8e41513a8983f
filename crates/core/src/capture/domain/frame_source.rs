use crate::shared::frame::Frame;

/// Geometry and rate reported by a stream when it opens. `fps` is 0.0
/// when the backend cannot tell (common for webcams).
#[derive(Clone, Debug, PartialEq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

/// Reads frames from a live camera or a video file.
///
/// Implementations handle device/codec details; the session loop pulls
/// frames one at a time and never sees the backend.
pub trait FrameSource: Send {
    /// Opens the stream and reports its geometry.
    fn open(&mut self) -> Result<StreamInfo, Box<dyn std::error::Error>>;

    /// The next frame, or `Ok(None)` when the stream has ended
    /// (file exhausted or device gone). Not an error: end of input is
    /// an expected terminal condition.
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the device or file handle.
    fn close(&mut self);
}
