//! Address parsing and relative resolution.
//!
//! Addresses are kept close to what the user or the listing supplied: the
//! scheme and host are lowercased, literal spaces are percent-encoded, and
//! nothing else is rewritten.

use std::fmt;

/// A parsed absolute address: `scheme://host[:port]/path[?query][#fragment]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Address {
    /// Parse an absolute address.
    ///
    /// Returns `None` for relative references, blank input, control
    /// characters, invalid ports and hosts that are not plain names.
    /// `file://` addresses may omit the host.
    pub fn parse(input: &str) -> Option<Self> {
        let input = sanitize(input)?;
        let (scheme, rest) = input.split_once("://")?;
        if !is_scheme(scheme) {
            return None;
        }
        let scheme = scheme.to_ascii_lowercase();

        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (authority, remainder) = rest.split_at(authority_end);
        // Credentials are never part of a media address.
        let authority = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
        let (host, port) = match authority.split_once(':') {
            Some((host, "")) => (host, None),
            Some((host, port)) => (host, Some(port.parse::<u16>().ok()?)),
            None => (authority, None),
        };
        if !host.chars().all(is_host_char) || (host.is_empty() && scheme != "file") {
            return None;
        }

        let (path, query, fragment) = split_path_query_fragment(remainder);
        let path = if path.is_empty() { "/".to_string() } else { path };

        Some(Self {
            scheme,
            host: host.to_ascii_lowercase(),
            port,
            path,
            query,
            fragment,
        })
    }

    /// Resolve `reference` against this address.
    ///
    /// Handles absolute addresses, protocol-relative (`//host/...`),
    /// fragment-only, query-only, absolute-path and relative-path
    /// references. A reference with a scheme other than `scheme://` (e.g.
    /// `mailto:`) does not resolve.
    pub fn resolve(&self, reference: &str) -> Option<Self> {
        if reference.trim().is_empty() {
            return Some(self.clone());
        }
        let reference = sanitize(reference)?;

        if has_scheme(&reference) {
            return Self::parse(&reference);
        }

        if let Some(rest) = reference.strip_prefix("//") {
            return Self::parse(&format!("{}://{rest}", self.scheme));
        }

        if let Some(fragment) = reference.strip_prefix('#') {
            return Some(Self {
                fragment: Some(fragment.to_string()),
                ..self.clone()
            });
        }

        if reference.starts_with('?') {
            let (_, query, fragment) = split_path_query_fragment(&reference);
            return Some(Self {
                query,
                fragment,
                ..self.clone()
            });
        }

        let (path, query, fragment) = split_path_query_fragment(&reference);
        let path = if path.starts_with('/') {
            normalize_path(&path)
        } else {
            normalize_path(&format!("{}{path}", self.directory()))
        };

        Some(Self {
            scheme: self.scheme.clone(),
            host: self.host.clone(),
            port: self.port,
            path,
            query,
            fragment,
        })
    }

    /// Directory part of the path, up to and including the last `/`.
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(i) => &self.path[..=i],
            None => "/",
        }
    }

    /// This address with its last path segment, query and fragment removed.
    pub fn parent(&self) -> Self {
        Self {
            scheme: self.scheme.clone(),
            host: self.host.clone(),
            port: self.port,
            path: self.directory().to_string(),
            query: None,
            fragment: None,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Directory address of an absolute address: `http://h/dir/a.mp4` becomes
/// `http://h/dir/`. `None` when `address` does not parse.
pub fn directory_of(address: &str) -> Option<String> {
    Address::parse(address).map(|a| a.parent().to_string())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim, reject control characters and percent-encode literal spaces.
fn sanitize(input: &str) -> Option<String> {
    let input = input.trim();
    let unusable = |c: char| c.is_control() || (c.is_whitespace() && c != ' ');
    if input.is_empty() || input.chars().any(unusable) {
        return None;
    }
    Some(input.replace(' ', "%20"))
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// True when `reference` starts with `scheme:`.
fn has_scheme(reference: &str) -> bool {
    reference
        .split_once(':')
        .is_some_and(|(scheme, _)| is_scheme(scheme))
}

fn is_host_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

fn split_path_query_fragment(s: &str) -> (String, Option<String>, Option<String>) {
    let (s, fragment) = match s.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment.to_string())),
        None => (s, None),
    };
    let (path, query) = match s.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (s.to_string(), None),
    };
    (path, query, fragment)
}

/// Collapse `.` and `..` segments. A trailing `/` (or a trailing `.`/`..`
/// segment) keeps the result a directory.
fn normalize_path(path: &str) -> String {
    let is_directory = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");
    let mut segments: Vec<&str> = Vec::new();

    for seg in path.split('/') {
        match seg {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            s => segments.push(s),
        }
    }

    let mut out = format!("/{}", segments.join("/"));
    if is_directory && !segments.is_empty() {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_address() {
        let addr = Address::parse("HTTP://NAS.local:8080/movies/a.mp4?t=1#top").unwrap();
        assert_eq!(addr.scheme, "http");
        assert_eq!(addr.host, "nas.local");
        assert_eq!(addr.port, Some(8080));
        assert_eq!(addr.path, "/movies/a.mp4");
        assert_eq!(addr.query.as_deref(), Some("t=1"));
        assert_eq!(addr.fragment.as_deref(), Some("top"));
        assert_eq!(addr.to_string(), "http://nas.local:8080/movies/a.mp4?t=1#top");
    }

    #[test]
    fn parse_without_path_gets_root() {
        let addr = Address::parse("http://host").unwrap();
        assert_eq!(addr.path, "/");
        assert_eq!(addr.to_string(), "http://host/");
    }

    #[test]
    fn parse_file_address_without_host() {
        let addr = Address::parse("file:///srv/media/clip.webm").unwrap();
        assert_eq!(addr.host, "");
        assert_eq!(addr.path, "/srv/media/clip.webm");
    }

    #[test]
    fn parse_drops_credentials() {
        let addr = Address::parse("http://user:pw@host/x").unwrap();
        assert_eq!(addr.host, "host");
        assert_eq!(addr.port, None);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Address::parse("").is_none());
        assert!(Address::parse("   ").is_none());
        assert!(Address::parse("movies/a.mp4").is_none());
        assert!(Address::parse("http://").is_none());
        assert!(Address::parse("http://host:port/").is_none());
        assert!(Address::parse("http://host:99999/").is_none());
        assert!(Address::parse("http://ho st/").is_none());
        assert!(Address::parse("http://host/a\nb.mp4").is_none());
        assert!(Address::parse("1http://host/").is_none());
    }

    #[test]
    fn parse_encodes_spaces_in_path() {
        let addr = Address::parse(" http://host/My Movie.mp4 ").unwrap();
        assert_eq!(addr.path, "/My%20Movie.mp4");
    }

    #[test]
    fn resolve_relative_name() {
        let base = Address::parse("http://host/dir/").unwrap();
        assert_eq!(base.resolve("clip.mp4").unwrap().to_string(), "http://host/dir/clip.mp4");

        let base = Address::parse("http://host/dir/index.html").unwrap();
        assert_eq!(base.resolve("clip.mp4").unwrap().path, "/dir/clip.mp4");
    }

    #[test]
    fn resolve_keeps_directory_slash() {
        let base = Address::parse("http://host/dir/").unwrap();
        assert_eq!(base.resolve("sub/").unwrap().path, "/dir/sub/");
        assert_eq!(base.resolve("..").unwrap().path, "/");
        assert_eq!(base.resolve("./").unwrap().path, "/dir/");
    }

    #[test]
    fn resolve_dot_segments() {
        let base = Address::parse("http://host/a/b/c.html").unwrap();
        assert_eq!(base.resolve("../../d.mp4").unwrap().path, "/d.mp4");
        assert_eq!(base.resolve("/x/../y.mp4").unwrap().path, "/y.mp4");
        assert_eq!(base.resolve("../../../../d.mp4").unwrap().path, "/d.mp4");
    }

    #[test]
    fn resolve_absolute_and_protocol_relative() {
        let base = Address::parse("https://host/dir/").unwrap();
        let abs = base.resolve("http://other/a.mp4").unwrap();
        assert_eq!(abs.host, "other");
        assert_eq!(abs.scheme, "http");

        let rel = base.resolve("//cdn.host/a.mp4").unwrap();
        assert_eq!(rel.scheme, "https");
        assert_eq!(rel.host, "cdn.host");
    }

    #[test]
    fn resolve_query_and_fragment_only() {
        let base = Address::parse("http://host/list?sort=name#x").unwrap();
        let q = base.resolve("?sort=size").unwrap();
        assert_eq!(q.path, "/list");
        assert_eq!(q.query.as_deref(), Some("sort=size"));
        assert_eq!(q.fragment, None);

        let f = base.resolve("#y").unwrap();
        assert_eq!(f.query.as_deref(), Some("sort=name"));
        assert_eq!(f.fragment.as_deref(), Some("y"));
    }

    #[test]
    fn resolve_other_schemes_fail() {
        let base = Address::parse("http://host/").unwrap();
        assert!(base.resolve("mailto:me@host").is_none());
        assert!(base.resolve("javascript:void(0)").is_none());
    }

    #[test]
    fn resolve_blank_is_self() {
        let base = Address::parse("http://host/dir/").unwrap();
        assert_eq!(base.resolve("  ").unwrap(), base);
    }

    #[test]
    fn directory_keeps_trailing_slash() {
        let addr = Address::parse("http://host/a/b/Clip.MP4").unwrap();
        assert_eq!(addr.directory(), "/a/b/");
        assert_eq!(Address::parse("http://host/a/").unwrap().directory(), "/a/");
        assert_eq!(Address::parse("http://host").unwrap().directory(), "/");
    }

    #[test]
    fn directory_of_strips_last_segment() {
        assert_eq!(
            directory_of("http://host/dir/a.mp4?x=1").as_deref(),
            Some("http://host/dir/")
        );
        assert_eq!(directory_of("http://host/dir/").as_deref(), Some("http://host/dir/"));
        assert_eq!(directory_of("http://host").as_deref(), Some("http://host/"));
        assert_eq!(directory_of("not an address"), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_and_resolve_never_panic(s in "\\PC{0,40}") {
                let _ = Address::parse(&s);
                let base = Address::parse("http://host/dir/").unwrap();
                let _ = base.resolve(&s);
            }

            #[test]
            fn plain_name_resolves_inside_base_directory(
                name in "[a-zA-Z0-9_-]{1,16}(\\.[a-z0-9]{1,4})?"
            ) {
                let base = Address::parse("http://host/media/tv/").unwrap();
                let resolved = base.resolve(&name).unwrap();
                prop_assert_eq!(resolved.directory(), "/media/tv/");
                prop_assert_eq!(resolved.to_string(), format!("http://host/media/tv/{name}"));
            }
        }
    }
}
