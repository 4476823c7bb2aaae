//! Share links: a dashboard configuration folded into a URL query string so
//! one person can hand a working read-only dashboard to another. The link
//! carries the same two opaque strings the config file does; whoever opens it
//! connects to the same backend.

/// Build a share link from a base URL and the two connection strings.
pub fn build_share_link(base: &str, endpoint: &str, access_key: &str) -> String {
    format!(
        "{base}?endpoint={}&key={}",
        percent_encode(endpoint),
        percent_encode(access_key)
    )
}

/// Extract `(endpoint, access_key)` from a share link.
///
/// Returns `None` unless both parameters are present — a half-specified link
/// is treated as no link at all, falling back to env/file configuration.
pub fn parse_share_link(link: &str) -> Option<(String, String)> {
    let query = link.split_once('?').map_or(link, |(_, q)| q);

    let mut endpoint = None;
    let mut key = None;
    for pair in query.split('&') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        match name {
            "endpoint" => endpoint = Some(percent_decode(value)),
            "key"      => key = Some(percent_decode(value)),
            _          => {} // unknown params are fine, ignore them
        }
    }

    Some((endpoint?, key?))
}

/// RFC 3986 percent-encoding of everything outside the unreserved set.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn percent_decode(s: &str) -> String {
    let mut out = Vec::with_capacity(s.len());
    let mut bytes = s.bytes();
    while let Some(b) = bytes.next() {
        match b {
            b'%' => {
                let hi = bytes.next();
                let lo = bytes.next();
                let decoded = hi.zip(lo).and_then(|(h, l)| {
                    let hex = [h, l];
                    let hex = std::str::from_utf8(&hex).ok()?;
                    u8::from_str_radix(hex, 16).ok()
                });
                match decoded {
                    Some(v) => out.push(v),
                    // Malformed escape: keep it verbatim rather than guess.
                    None => {
                        out.push(b'%');
                        out.extend(hi);
                        out.extend(lo);
                    }
                }
            }
            b'+' => out.push(b' '),
            _ => out.push(b),
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
