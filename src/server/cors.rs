//! Origin matching for the gRPC-Web CORS layer.

/// Whether `origin` (the browser's `Origin` header) matches one of `allowed`.
///
/// An allowed entry matches the whole origin. An entry without a port also
/// matches that origin on any port, so `http://localhost` admits
/// `http://localhost:5173` but never `http://localhost.evil.example`.
pub fn is_origin_allowed(origin: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|entry| matches_entry(origin, entry))
}

fn matches_entry(origin: &str, entry: &str) -> bool {
    let entry = entry.trim().trim_end_matches('/');
    if entry.is_empty() {
        return false;
    }
    if origin.eq_ignore_ascii_case(entry) {
        return true;
    }
    if has_port(entry) {
        return false;
    }

    let (Some(prefix), Some(rest)) = (origin.get(..entry.len()), origin.get(entry.len()..)) else {
        return false;
    };
    prefix.eq_ignore_ascii_case(entry)
        && rest
            .strip_prefix(':')
            .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

fn has_port(origin: &str) -> bool {
    let authority = origin
        .split_once("://")
        .map(|(_, authority)| authority)
        .unwrap_or(origin);
    // Skip the brackets of an IPv6 literal
    let host_end = authority.rfind(']').map(|i| i + 1).unwrap_or(0);
    authority[host_end..].contains(':')
}
