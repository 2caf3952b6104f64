/// Backend API version prefix appended to the page origin.
const API_VERSION_PATH: &str = "/api/v1";

/// Local development backend.
const DEV_API_URL: &str = "http://0.0.0.0:8871/api/v1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvConfig {
    pub api_url: String,
    pub authorized_storage_key: String,
    pub token_storage_key: String,

    /// Keep a stored session across reloads instead of clearing it at startup.
    pub keep_session: bool,
}

impl EnvConfig {
    /// Builds the configuration from a key lookup, `window.ENV` in the browser.
    ///
    /// Both `API_URL` and `api_url` spellings are accepted.
    pub fn from_lookup(origin: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("API_URL")
            .or_else(|| lookup("api_url"))
            .unwrap_or_else(|| match origin {
                Some(origin) if !origin.is_empty() && origin != "null" => {
                    format!("{}{}", origin.trim_end_matches('/'), API_VERSION_PATH)
                }
                _ => DEV_API_URL.to_string(),
            });

        let keep_session = lookup("KEEP_SESSION")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            api_url,
            authorized_storage_key: lookup("AUTHORIZED_STORAGE_KEY")
                .unwrap_or_else(|| "authorized".to_string()),
            token_storage_key: lookup("TOKEN_STORAGE_KEY").unwrap_or_else(|| "token".to_string()),
            keep_session,
        }
    }

    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::from_lookup(None, |_| None);
        };

        let origin = window.location().origin().ok();
        let env = window
            .get("ENV")
            .filter(|env| !env.is_undefined() && env.is_object());

        Self::from_lookup(origin.as_deref(), |key| {
            let env = env.as_ref()?;
            let value = js_sys::Reflect::get(env, &key.into()).ok()?;
            value
                .as_string()
                .or_else(|| value.as_bool().map(|b| b.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(map: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |k| map.get(k).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults_use_page_origin() {
        let c = EnvConfig::from_lookup(Some("https://notes.example.com"), |_| None);
        assert_eq!(c.api_url, "https://notes.example.com/api/v1");
        assert_eq!(c.authorized_storage_key, "authorized");
        assert_eq!(c.token_storage_key, "token");
        assert!(!c.keep_session);
    }

    #[test]
    fn test_defaults_without_origin_use_dev_backend() {
        let c = EnvConfig::from_lookup(None, |_| None);
        assert_eq!(c.api_url, DEV_API_URL);

        let c = EnvConfig::from_lookup(Some("null"), |_| None);
        assert_eq!(c.api_url, DEV_API_URL);
    }

    #[test]
    fn test_env_overrides() {
        let c = EnvConfig::from_lookup(
            Some("https://notes.example.com"),
            lookup_in(HashMap::from([
                ("api_url", "http://localhost:9000/api/v1"),
                ("TOKEN_STORAGE_KEY", "nn_token"),
                ("KEEP_SESSION", "true"),
            ])),
        );
        assert_eq!(c.api_url, "http://localhost:9000/api/v1");
        assert_eq!(c.token_storage_key, "nn_token");
        assert!(c.keep_session);
    }

    #[test]
    fn test_upper_case_api_url_wins() {
        let c = EnvConfig::from_lookup(
            None,
            lookup_in(HashMap::from([("API_URL", "http://a"), ("api_url", "http://b")])),
        );
        assert_eq!(c.api_url, "http://a");
    }
}
