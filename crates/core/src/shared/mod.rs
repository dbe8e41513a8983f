pub mod annotation;
pub mod constants;
pub mod emotion;
pub mod face_box;
pub mod frame;
pub mod generation;
pub mod mat_convert;
