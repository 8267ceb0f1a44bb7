use super::constants::*;

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn api_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

pub(crate) fn api_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
