pub mod model_resolver;
pub mod yunet_fer_detector;
