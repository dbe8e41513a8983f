pub mod age_estimator;
pub mod look_comments;
pub mod stabilization_tracker;
