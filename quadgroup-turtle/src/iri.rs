//! RFC 3986 reference resolution for IRIs.

/// Check whether a reference starts with a URI scheme (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`).
pub fn has_scheme(reference: &str) -> bool {
    let Some(colon_pos) = reference.find(':') else {
        return false;
    };
    let mut chars = reference[..colon_pos].chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        }
        _ => false,
    }
}

/// Resolve `reference` against an absolute `base` IRI (RFC 3986 Section 5.2).
///
/// References that already carry a scheme are returned unchanged.
pub fn resolve(base: &str, reference: &str) -> String {
    if has_scheme(reference) {
        return reference.to_string();
    }

    let (reference, fragment) = split_fragment(reference);
    let base = Components::parse(split_fragment(base).0);

    let (authority, path, query) = if let Some(rest) = reference.strip_prefix("//") {
        let (authority, path_query) = split_authority(rest);
        let (path, query) = split_query(path_query);
        (Some(authority), remove_dot_segments(path), query)
    } else if reference.is_empty() {
        (base.authority, base.path.to_string(), base.query)
    } else if let Some(query) = reference.strip_prefix('?') {
        (base.authority, base.path.to_string(), Some(query))
    } else {
        let (path, query) = split_query(reference);
        let target = if path.starts_with('/') {
            remove_dot_segments(path)
        } else {
            remove_dot_segments(&merge(&base, path))
        };
        (base.authority, target, query)
    };

    let mut result = String::with_capacity(base.scheme.len() + path.len() + 8);
    result.push_str(base.scheme);
    result.push(':');
    if let Some(authority) = authority {
        result.push_str("//");
        result.push_str(authority);
    }
    result.push_str(&path);
    if let Some(query) = query {
        result.push('?');
        result.push_str(query);
    }
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }
    result
}

struct Components<'a> {
    scheme: &'a str,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
}

impl<'a> Components<'a> {
    fn parse(iri: &'a str) -> Self {
        let (scheme, rest) = match iri.find(':') {
            Some(pos) => (&iri[..pos], &iri[pos + 1..]),
            None => ("", iri),
        };
        let (authority, path_query) = match rest.strip_prefix("//") {
            Some(after) => {
                let (authority, path_query) = split_authority(after);
                (Some(authority), path_query)
            }
            None => (None, rest),
        };
        let (path, query) = split_query(path_query);
        Self {
            scheme,
            authority,
            path,
            query,
        }
    }
}

/// RFC 3986 Section 5.2.3
fn merge(base: &Components<'_>, path: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        format!("/{}", path)
    } else {
        let dir = match base.path.rfind('/') {
            Some(pos) => &base.path[..=pos],
            None => "",
        };
        format!("{}{}", dir, path)
    }
}

fn split_fragment(s: &str) -> (&str, Option<&str>) {
    match s.find('#') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    }
}

fn split_query(s: &str) -> (&str, Option<&str>) {
    match s.find('?') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    }
}

/// Authority ends at the first `/` or `?` (fragments are split off earlier).
fn split_authority(s: &str) -> (&str, &str) {
    let end = s.find(['/', '?']).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// RFC 3986 Section 5.2.4
fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len().saturating_sub(1);

    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {
                if i == last {
                    output.push("");
                }
            }
            ".." => {
                // Never pop the empty segment that carries a leading slash
                if output.len() > 1 || output.first().is_some_and(|s| !s.is_empty()) {
                    output.pop();
                }
                if i == last {
                    output.push("");
                }
            }
            s => output.push(s),
        }
    }

    let result = output.join("/");
    if path.starts_with('/') && !result.starts_with('/') {
        format!("/{}", result)
    } else {
        result
    }
}
