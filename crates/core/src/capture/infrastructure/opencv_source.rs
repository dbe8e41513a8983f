use std::path::PathBuf;

use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE};
use thiserror::Error;

use crate::capture::domain::frame_source::{FrameSource, StreamInfo};
use crate::shared::frame::Frame;
use crate::shared::mat_convert::{self, MatConvertError};

/// Consecutive failed grabs tolerated on a live camera before the
/// device is considered gone (~1 second at 30 fps).
const MAX_EMPTY_GRABS: u32 = 30;

/// Where frames come from: a webcam by index, or a video file.
#[derive(Clone, Debug)]
pub enum VideoInput {
    Camera(i32),
    File(PathBuf),
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to open camera {0}")]
    CameraOpen(i32),
    #[error("failed to open video file {0}")]
    FileOpen(PathBuf),
    #[error("frame grab failed: {0}")]
    Grab(#[source] opencv::Error),
    #[error("frame conversion failed: {0}")]
    Convert(#[from] MatConvertError),
    #[error("opencv error: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// OpenCV-backed [`FrameSource`] for webcams and video files.
pub struct OpencvFrameSource {
    input: VideoInput,
    capture: Option<VideoCapture>,
    next_index: usize,
}

impl OpencvFrameSource {
    pub fn camera(index: i32) -> Self {
        Self::new(VideoInput::Camera(index))
    }

    pub fn file(path: PathBuf) -> Self {
        Self::new(VideoInput::File(path))
    }

    pub fn new(input: VideoInput) -> Self {
        Self {
            input,
            capture: None,
            next_index: 0,
        }
    }

    fn open_capture(&self) -> Result<VideoCapture, CaptureError> {
        match &self.input {
            VideoInput::Camera(index) => {
                log::info!("opening camera {index}");
                let mut cap = VideoCapture::new(*index, videoio::CAP_ANY)?;
                if !cap.is_opened()? {
                    return Err(CaptureError::CameraOpen(*index));
                }
                // Keep the driver buffer short so annotations track the
                // live image instead of a stale one.
                let _ = cap.set(CAP_PROP_BUFFERSIZE, 1.0);
                Ok(cap)
            }
            VideoInput::File(path) => {
                log::info!("opening video file {}", path.display());
                let cap = VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)?;
                if !cap.is_opened()? {
                    return Err(CaptureError::FileOpen(path.clone()));
                }
                Ok(cap)
            }
        }
    }

    fn is_live(&self) -> bool {
        matches!(self.input, VideoInput::Camera(_))
    }
}

impl FrameSource for OpencvFrameSource {
    fn open(&mut self) -> Result<StreamInfo, Box<dyn std::error::Error>> {
        let cap = self.open_capture()?;
        let info = StreamInfo {
            width: cap.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32,
            height: cap.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32,
            fps: cap.get(videoio::CAP_PROP_FPS)?,
        };
        self.capture = Some(cap);
        self.next_index = 0;
        Ok(info)
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let live = self.is_live();
        let Some(cap) = self.capture.as_mut() else {
            return Ok(None);
        };

        let mut mat = Mat::default();
        let mut empty_grabs = 0;
        loop {
            let grabbed = cap.read(&mut mat).map_err(CaptureError::Grab)?;
            if grabbed && !mat.empty() {
                break;
            }
            // A file that stops producing frames is simply finished; a
            // camera gets a few retries for transient stalls.
            if !live {
                return Ok(None);
            }
            empty_grabs += 1;
            if empty_grabs >= MAX_EMPTY_GRABS {
                log::warn!("camera produced no frames after {empty_grabs} grabs, stopping");
                return Ok(None);
            }
            log::warn!("empty camera grab, retrying");
        }

        let frame = mat_convert::mat_to_rgb_frame(&mat, self.next_index)
            .map_err(CaptureError::Convert)?;
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) {
        if let Some(mut cap) = self.capture.take() {
            let _ = cap.release();
            log::debug!("capture released after {} frames", self.next_index);
        }
    }
}
