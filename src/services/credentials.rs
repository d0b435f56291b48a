//! TMDB credential pool.

/// A single TMDB credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as a Bearer header.
    Bearer(String),
}

impl Credential {
    /// Bearer tokens start with "eyJ" (base64 encoded JWT header).
    pub fn parse(value: &str) -> Self {
        let value = value.trim().to_string();
        if value.starts_with("eyJ") {
            Credential::Bearer(value)
        } else {
            Credential::ApiKey(value)
        }
    }

    /// Short form safe to print.
    pub fn masked(&self) -> String {
        let raw = match self {
            Credential::ApiKey(k) | Credential::Bearer(k) => k,
        };
        let tail = raw
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| &raw[i..])
            .unwrap_or(raw.as_str());
        format!("****{}", tail)
    }
}

/// Interchangeable credentials handed out round-robin.
#[derive(Debug, Clone, Default)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
    next_index: usize,
}

impl CredentialPool {
    /// Build a pool, dropping blanks and duplicates while keeping order.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut credentials: Vec<Credential> = Vec::new();
        for key in keys {
            let key = key.as_ref().trim();
            if key.is_empty() {
                continue;
            }
            let credential = Credential::parse(key);
            if !credentials.contains(&credential) {
                credentials.push(credential);
            }
        }

        Self {
            credentials,
            next_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }

    /// Next credential in rotation, or `None` for an empty pool.
    pub fn next_credential(&mut self) -> Option<&Credential> {
        if self.credentials.is_empty() {
            return None;
        }
        let index = self.next_index % self.credentials.len();
        self.next_index = (index + 1) % self.credentials.len();
        self.credentials.get(index)
    }
}
