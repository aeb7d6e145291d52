use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Absolute `https://` URL for a path on the site host.
pub fn full_url(host: &str, path: &str) -> String {
    let host = host.strip_suffix('/').unwrap_or(host);
    let host = host.strip_prefix("https://").unwrap_or(host);
    let path = path.strip_prefix('/').unwrap_or(path);

    format!("https://{}/{}", host, path)
}

/// Expands `<?# FullUrl path="/posts/foo" /?>` directives inline.
pub struct FullUrlShortcode<'a> {
    pub host: &'a str,
}

impl<'a> FullUrlShortcode<'a> {
    pub fn new(host: &'a str) -> Self {
        FullUrlShortcode { host }
    }

    pub fn execute(&self, args: &[(&str, &str)]) -> String {
        let path = args.iter()
            .find(|(key, _)| *key == "path")
            .map(|(_, value)| *value)
            .unwrap_or("");
        full_url(self.host, path)
    }

    pub fn expand<'t>(&self, text: &'t str) -> Cow<'t, str> {
        lazy_static! {
            static ref SHORTCODE_REGEX: Regex = Regex::new(
                r#"<\?#\s*FullUrl(?P<args>(?:\s+\w+\s*=\s*"[^"]*")*)\s*/?\?>"#
            ).unwrap();
            static ref ARG_REGEX: Regex = Regex::new(
                r#"(?P<key>\w+)\s*=\s*"(?P<value>[^"]*)""#
            ).unwrap();
        }

        SHORTCODE_REGEX.replace_all(text, |caps: &Captures| {
            let raw_args = caps.name("args").map_or("", |m| m.as_str());
            let args: Vec<(&str, &str)> = ARG_REGEX.captures_iter(raw_args)
                .filter_map(|arg| match (arg.name("key"), arg.name("value")) {
                    (Some(key), Some(value)) => Some((key.as_str(), value.as_str())),
                    _ => None,
                })
                .collect();
            self.execute(&args)
        })
    }
}
