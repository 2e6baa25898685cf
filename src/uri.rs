//! Deep-link construction.
//!
//! Query text is percent-encoded as a URI component: everything outside
//! `A-Z a-z 0-9 - _ . ~ ! ' ( ) *` is escaped, so a space is `%20` rather
//! than `+`.

/// Sub-delimiters that stay literal in a URI component.
const KEPT: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

pub fn encode(component: &str) -> String {
    let mut encoded = urlencoding::encode(component).into_owned();
    for (escaped, literal) in KEPT {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, literal);
        }
    }
    encoded
}

#[derive(Debug, Default, Clone)]
pub struct UriBuilder {
    scheme: String,
    authority: Option<String>,
    path: String,
    query: Vec<(String, String)>,
}

impl UriBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    pub fn authority(mut self, authority: &str) -> Self {
        self.authority = Some(authority.to_string());
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn append_query_parameter(mut self, key: &str, value: &str) -> Self {
        self.query.push((encode(key), encode(value)));
        self
    }

    pub fn build(&self) -> String {
        let mut uri = format!("{}:", self.scheme);
        if let Some(authority) = &self.authority {
            uri.push_str("//");
            uri.push_str(authority);
        }
        uri.push_str(&self.path);
        for (i, (key, value)) in self.query.iter().enumerate() {
            uri.push(if i == 0 { '?' } else { '&' });
            uri.push_str(key);
            uri.push('=');
            uri.push_str(value);
        }
        uri
    }
}
