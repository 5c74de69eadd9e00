//! URL encoding/decoding utilities

use std::collections::HashMap;

/// Decodes a percent-encoded string
///
/// `+` is left alone, as share-link producers use `%20` for spaces.
/// Returns the original string if decoding fails.
///
/// # Examples
/// ```
/// use v2ray_to_clash::utils::url::url_decode;
///
/// assert_eq!(url_decode("Hello%20World%21"), "Hello World!");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Parses a `key=value&key2=value2` query into a map of decoded pairs.
///
/// Values are percent-decoded, a key without `=` maps to an empty string and
/// a later duplicate key overrides an earlier one.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (url_decode(key), url_decode(value)),
            None => (url_decode(pair), String::new()),
        })
        .collect()
}

/// Parts of a `scheme://authority?query#fragment` link body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkParts<'a> {
    pub authority: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

/// Splits a link body (scheme already removed) into authority, query and
/// raw fragment. The `/` of a `/?query` suffix is dropped.
pub fn split_link(body: &str) -> LinkParts<'_> {
    let (before_hash, fragment) = match body.split_once('#') {
        Some((before, fragment)) => (before, Some(fragment)),
        None => (body, None),
    };
    let (authority, query) = match before_hash.split_once('?') {
        Some((authority, query)) => (authority, Some(query)),
        None => (before_hash, None),
    };

    let authority = match query {
        Some(_) => authority.strip_suffix('/').unwrap_or(authority),
        None => authority,
    };

    LinkParts {
        authority,
        query,
        fragment,
    }
}

/// Splits `host[:port]`, accepting bracketed IPv6 literals.
///
/// The returned host has brackets removed; the port is returned unparsed.
pub fn split_host_port(input: &str) -> (&str, Option<&str>) {
    if let Some(rest) = input.strip_prefix('[') {
        if let Some((host, after)) = rest.split_once(']') {
            return (host, after.strip_prefix(':'));
        }
    }

    match input.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (input, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_decode_keeps_plus() {
        assert_eq!(url_decode("a+b%2Fc"), "a+b/c");
    }

    #[test]
    fn test_url_decode_invalid_utf8_returns_input() {
        assert_eq!(url_decode("%FF"), "%FF");
    }

    #[test]
    fn test_parse_query() {
        let params = parse_query("type=ws&path=%2Fws%3Fed%3D2048&flag&host=a=b");
        assert_eq!(params["type"], "ws");
        assert_eq!(params["path"], "/ws?ed=2048");
        assert_eq!(params["flag"], "");
        assert_eq!(params["host"], "a=b");
    }

    #[test]
    fn test_split_link() {
        let parts = split_link("id@host:443/?type=ws#My%20Node");
        assert_eq!(parts.authority, "id@host:443");
        assert_eq!(parts.query, Some("type=ws"));
        assert_eq!(parts.fragment, Some("My%20Node"));

        let parts = split_link("id@host:443#name");
        assert_eq!(parts.authority, "id@host:443");
        assert_eq!(parts.query, None);
        assert_eq!(parts.fragment, Some("name"));
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("example.com:443"), ("example.com", Some("443")));
        assert_eq!(split_host_port("example.com"), ("example.com", None));
        assert_eq!(split_host_port("[2001:db8::1]:8388"), ("2001:db8::1", Some("8388")));
        assert_eq!(split_host_port("[2001:db8::1]"), ("2001:db8::1", None));
    }
}
