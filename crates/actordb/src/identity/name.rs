use std::net::Ipv6Addr;

///
/// normalize_user_name
///
/// Canonical comparison form of a user name.
///
/// Surrounding whitespace is trimmed and IP literals are rewritten into
/// their single canonical spelling. Other names keep their case.
/// Returns `None` when nothing is left after trimming.
///
#[must_use]
pub fn normalize_user_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(canonical_ip(trimmed).unwrap_or_else(|| trimmed.to_string()))
}

/// True when `name` has the shape of an IPv4 or IPv6 literal.
#[must_use]
pub fn is_ip_name(name: &str) -> bool {
    canonical_ip(name.trim()).is_some()
}

///
/// canonical_ip
///
/// IPv4: dotted quad without leading zeros.
/// IPv6: all eight groups expanded, uppercase hex, no leading zeros.
///
#[must_use]
pub fn canonical_ip(input: &str) -> Option<String> {
    if let Some(octets) = parse_ipv4(input) {
        let parts: Vec<String> = octets.iter().map(u8::to_string).collect();
        return Some(parts.join("."));
    }

    let v6: Ipv6Addr = input.parse().ok()?;
    let groups: Vec<String> = v6
        .segments()
        .iter()
        .map(|segment| format!("{segment:X}"))
        .collect();

    Some(groups.join(":"))
}

// Dotted quad; octets may carry leading zeros ("010.0.0.1").
fn parse_ipv4(input: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = input.split('.');

    for octet in &mut octets {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse().ok()?;
    }

    parts.next().is_none().then_some(octets)
}
