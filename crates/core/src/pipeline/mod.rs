pub mod live_session_use_case;
pub mod session_logger;
