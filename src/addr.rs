//! Host and port splitting.

/// Split `host:port` or `[host]:port` into host and port.
///
/// Returns `None` when the input has no port separator, when an unbracketed
/// host contains a colon (a bare IPv6 literal), or when brackets are
/// unbalanced. The port may be empty (`"host:"`). Brackets around the host
/// are removed.
///
/// # Examples
/// ```
/// use hostmatch::split_host_port;
///
/// assert_eq!(split_host_port("example.com:80"), Some(("example.com", "80")));
/// assert_eq!(split_host_port("[::1]:443"), Some(("::1", "443")));
/// assert_eq!(split_host_port("example.com"), None);
/// assert_eq!(split_host_port("::1"), None);
/// ```
pub fn split_host_port(hostport: &str) -> Option<(&str, &str)> {
    let colon = hostport.rfind(':')?;

    let (host, host_start, host_end) = if hostport.starts_with('[') {
        let end = hostport.find(']')?;
        // The only thing allowed between ']' and the port is the colon.
        if end + 1 != colon {
            return None;
        }
        (&hostport[1..end], 1, end + 1)
    } else {
        let host = &hostport[..colon];
        if host.contains(':') {
            return None;
        }
        (host, 0, 0)
    };

    if hostport[host_start..].contains('[') || hostport[host_end..].contains(']') {
        return None;
    }

    Some((host, &hostport[colon + 1..]))
}

/// Split `host[:port]`, falling back to the whole input as host with an
/// empty port when it cannot be split.
pub(crate) fn host_and_port(hostport: &str) -> (&str, &str) {
    split_host_port(hostport).unwrap_or((hostport, ""))
}
