use crate::traits::error::{MockSocketError, Result};

/// Normalize an endpoint string into the registry key form
///
/// The key is scheme + host + path: the scheme must be `ws` or `wss`
/// (matched case-insensitively, stored lowercase), the host is lowercased,
/// and a missing path becomes `/`. Anything after the host (path, query)
/// is kept verbatim. Normalization happens exactly once — sockets and
/// servers store the result and the bridge compares keys by string
/// equality, never re-deriving them per lookup.
///
/// # Errors
/// * `InvalidUrl` - the endpoint does not start with `ws://` or `wss://`
pub fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    let rest = strip_scheme(trimmed, "ws://")
        .map(|rest| ("ws", rest))
        .or_else(|| strip_scheme(trimmed, "wss://").map(|rest| ("wss", rest)));

    let (scheme, rest) = match rest {
        Some(parts) => parts,
        None => return Err(MockSocketError::InvalidUrl(trimmed.to_string())),
    };

    if rest.is_empty() {
        return Err(MockSocketError::InvalidUrl(trimmed.to_string()));
    }

    let (host, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };

    Ok(format!("{}://{}{}", scheme, host.to_lowercase(), path))
}

fn strip_scheme<'a>(url: &'a str, scheme: &str) -> Option<&'a str> {
    if url.len() >= scheme.len() && url[..scheme.len()].eq_ignore_ascii_case(scheme) {
        Some(&url[scheme.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_root_path() {
        assert_eq!(normalize_url("ws://localhost:8080").unwrap(), "ws://localhost:8080/");
    }

    #[test]
    fn test_keeps_path_verbatim() {
        assert_eq!(
            normalize_url("wss://Example.com/Chat/room?x=1").unwrap(),
            "wss://example.com/Chat/room?x=1"
        );
    }

    #[test]
    fn test_scheme_case_insensitive() {
        assert_eq!(normalize_url("WS://HOST/path").unwrap(), "ws://host/path");
    }

    #[test]
    fn test_rejects_http_scheme() {
        let err = normalize_url("http://example.com").unwrap_err();
        assert!(matches!(err, MockSocketError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_schemeless_and_hostless() {
        assert!(normalize_url("example.com").is_err());
        assert!(normalize_url("ws://").is_err());
    }

    #[test]
    fn test_equal_keys_for_equivalent_endpoints() {
        // Exactly the property the registry relies on.
        assert_eq!(
            normalize_url("ws://Host:9000").unwrap(),
            normalize_url("ws://host:9000/").unwrap()
        );
    }
}
