use crate::backend::vertex::DEFAULT_LOCATION;
use crate::prompt::{DEFAULT_QUOTE_END, DEFAULT_QUOTE_START};

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn location() -> String {
    DEFAULT_LOCATION.to_string()
}

pub(crate) fn quote_start() -> String {
    DEFAULT_QUOTE_START.to_string()
}

pub(crate) fn quote_end() -> String {
    DEFAULT_QUOTE_END.to_string()
}
