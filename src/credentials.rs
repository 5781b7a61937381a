use log::debug;

pub const DEFAULT_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Reads the API key from `var`. An unset, empty or blank variable counts as absent.
pub fn resolve_api_key(var: &str) -> Option<String> {
    let key = std::env::var(var).ok();
    debug!("{var} is {}", key_state(key.as_deref()));
    usable_key(key)
}

fn key_state(value: Option<&str>) -> &'static str {
    match value {
        None => "not set",
        Some(key) if key.trim().is_empty() => "set but blank",
        Some(_) => "set",
    }
}

fn usable_key(value: Option<String>) -> Option<String> {
    value.filter(|key| !key.trim().is_empty())
}
