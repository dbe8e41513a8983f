use opencv::core::{self, Mat, Scalar};
use opencv::prelude::*;
use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum MatConvertError {
    #[error("expected an 8-bit 3-channel mat, got type {0}")]
    UnsupportedFormat(i32),
    #[error("mat data is not continuous")]
    NotContinuous,
    #[error("opencv error: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// Converts an OpenCV BGR mat into an RGB [`Frame`].
///
/// OpenCV captures and decodes in BGR; the rest of the pipeline works
/// in RGB, so the swap happens here and nowhere else.
pub fn mat_to_rgb_frame(mat: &Mat, index: usize) -> Result<Frame, MatConvertError> {
    if mat.typ() != core::CV_8UC3 {
        return Err(MatConvertError::UnsupportedFormat(mat.typ()));
    }
    if !mat.is_continuous() {
        return Err(MatConvertError::NotContinuous);
    }

    let bgr = mat.data_bytes()?;
    let mut rgb = Vec::with_capacity(bgr.len());
    for px in bgr.chunks_exact(3) {
        rgb.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    Ok(Frame::new(rgb, mat.cols() as u32, mat.rows() as u32, index))
}

/// Converts an RGB [`Frame`] back into a BGR mat for OpenCV consumers
/// (the face detector input and the preview window).
pub fn rgb_frame_to_bgr_mat(frame: &Frame) -> Result<Mat, MatConvertError> {
    let rows = frame.height() as i32;
    let cols = frame.width() as i32;
    let mut mat = Mat::new_rows_cols_with_default(rows, cols, core::CV_8UC3, Scalar::all(0.0))?;

    let rgb = frame.data();
    for y in 0..rows {
        for x in 0..cols {
            let i = ((y as usize) * (cols as usize) + (x as usize)) * 3;
            let px = mat.at_2d_mut::<core::Vec3b>(y, x)?;
            *px = core::Vec3b::from([rgb[i + 2], rgb[i + 1], rgb[i]]);
        }
    }
    Ok(mat)
}
