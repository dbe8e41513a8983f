use opencv::core::{Point, Rect, Scalar};
use opencv::prelude::*;
use opencv::{highgui, imgproc};

use crate::display::domain::frame_display::{DisplayCommand, FrameDisplay};
use crate::shared::annotation::FaceAnnotation;
use crate::shared::frame::Frame;
use crate::shared::mat_convert;

pub const WINDOW_NAME: &str = "MoodTune";

const QUIT_KEY: i32 = b'q' as i32;
const ESC_KEY: i32 = 27;

/// Vertical gap between the box's top edge and its first label.
const LABEL_OFFSET: i32 = 40;
/// Vertical gap between stacked labels.
const LABEL_STEP: i32 = 30;

const FONT_SCALE: f64 = 0.8;
const THICKNESS: i32 = 2;

/// OpenCV-window [`FrameDisplay`]: green boxes, labels stacked above
/// each face, 'q' or Esc to quit.
pub struct HighguiDisplay;

impl HighguiDisplay {
    fn draw(&self, frame: &Frame, annotations: &[FaceAnnotation]) -> opencv::Result<Mat> {
        let mut canvas = mat_convert::rgb_frame_to_bgr_mat(frame)
            .map_err(|e| opencv::Error::new(opencv::core::StsError, e.to_string()))?;
        let green = Scalar::new(0.0, 255.0, 0.0, 0.0);

        for annotation in annotations {
            let face = annotation.face_box.clamp_to(frame.width(), frame.height());
            if face.area() > 0 {
                imgproc::rectangle(
                    &mut canvas,
                    Rect::new(face.x, face.y, face.width, face.height),
                    green,
                    THICKNESS,
                    imgproc::LINE_8,
                    0,
                )?;
            }
            for (i, label) in annotation.labels().iter().enumerate() {
                let y = annotation.face_box.y - LABEL_OFFSET - LABEL_STEP * i as i32;
                imgproc::put_text(
                    &mut canvas,
                    label,
                    Point::new(annotation.face_box.x, y),
                    imgproc::FONT_HERSHEY_SIMPLEX,
                    FONT_SCALE,
                    green,
                    THICKNESS,
                    imgproc::LINE_AA,
                    false,
                )?;
            }
        }
        Ok(canvas)
    }
}

impl FrameDisplay for HighguiDisplay {
    fn show(
        &mut self,
        frame: &Frame,
        annotations: &[FaceAnnotation],
    ) -> Result<DisplayCommand, Box<dyn std::error::Error>> {
        let canvas = self.draw(frame, annotations)?;
        highgui::imshow(WINDOW_NAME, &canvas)?;

        let key = highgui::wait_key(1)?;
        if key == QUIT_KEY || key == ESC_KEY {
            return Ok(DisplayCommand::Quit);
        }
        Ok(DisplayCommand::Continue)
    }
}

impl Drop for HighguiDisplay {
    fn drop(&mut self) {
        let _ = highgui::destroy_all_windows();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::face_box::FaceBox;

    // Only draw() is covered here; imshow needs a window system.

    #[test]
    fn test_draw_preserves_frame_geometry() {
        let display = HighguiDisplay;
        let frame = Frame::filled(10, 64, 48, 0);
        let annotations = [FaceAnnotation::stabilizing(FaceBox::new(5, 40, 20, 20))];
        let canvas = display.draw(&frame, &annotations).unwrap();
        assert_eq!(canvas.cols(), 64);
        assert_eq!(canvas.rows(), 48);
    }

    #[test]
    fn test_draw_marks_the_box_edge_green() {
        let display = HighguiDisplay;
        let frame = Frame::filled(0, 64, 64, 0);
        let annotations = [FaceAnnotation::stabilizing(FaceBox::new(10, 10, 20, 20))];
        let canvas = display.draw(&frame, &annotations).unwrap();
        let px = canvas.at_2d::<opencv::core::Vec3b>(10, 10).unwrap();
        assert_eq!((px[0], px[1], px[2]), (0, 255, 0));
    }

    #[test]
    fn test_draw_tolerates_degenerate_boxes() {
        let display = HighguiDisplay;
        let frame = Frame::filled(0, 32, 32, 0);
        let annotations = [
            FaceAnnotation::stabilizing(FaceBox::new(-100, -100, 10, 10)),
            FaceAnnotation::stabilizing(FaceBox::new(0, 0, 0, 0)),
        ];
        assert!(display.draw(&frame, &annotations).is_ok());
    }
}
