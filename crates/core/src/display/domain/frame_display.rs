use crate::shared::annotation::FaceAnnotation;
use crate::shared::frame::Frame;

/// What the session loop should do after a frame was presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayCommand {
    Continue,
    /// The user pressed the quit key.
    Quit,
}

/// Presents annotated frames and surfaces the quit keypress.
///
/// `show` blocks only for the UI toolkit's minimal event pump; the
/// loop's pacing comes from the frame source itself.
pub trait FrameDisplay: Send {
    fn show(
        &mut self,
        frame: &Frame,
        annotations: &[FaceAnnotation],
    ) -> Result<DisplayCommand, Box<dyn std::error::Error>>;
}

/// Display that draws nothing and never quits.
///
/// Used for headless runs (the session then ends with the source) and
/// by tests that do not care about rendering.
pub struct NullDisplay;

impl FrameDisplay for NullDisplay {
    fn show(
        &mut self,
        _frame: &Frame,
        _annotations: &[FaceAnnotation],
    ) -> Result<DisplayCommand, Box<dyn std::error::Error>> {
        Ok(DisplayCommand::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_display_always_continues() {
        let mut display = NullDisplay;
        let frame = Frame::filled(0, 2, 2, 0);
        for _ in 0..3 {
            let command = display.show(&frame, &[]).unwrap();
            assert_eq!(command, DisplayCommand::Continue);
        }
    }
}
