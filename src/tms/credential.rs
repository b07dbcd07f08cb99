use reqwest::RequestBuilder;

/// An optional bearer secret for outbound requests.
///
/// When a secret is configured it is attached as `Authorization: Bearer ...`;
/// otherwise requests go out without an `Authorization` header at all.
#[derive(Clone, Default)]
pub struct BearerCredential {
    secret: Option<String>,
}

impl BearerCredential {
    /// Credential from an optional secret. Empty secrets count as absent.
    pub fn new(secret: Option<impl Into<String>>) -> Self {
        let secret: Option<String> = secret.map(Into::into).filter(|s| !s.is_empty());
        Self { secret }
    }

    /// A credential that never attaches a header.
    pub fn none() -> Self {
        Self { secret: None }
    }

    /// Whether a secret is configured.
    pub fn is_present(&self) -> bool {
        self.secret.is_some()
    }

    /// Attach the `Authorization` header if a secret is present.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.secret {
            Some(secret) => request.bearer_auth(secret),
            None => request,
        }
    }
}

impl std::fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = if self.is_present() { "Some(***)" } else { "None" };
        f.debug_struct("BearerCredential")
            .field("secret", &format_args!("{}", shown))
            .finish()
    }
}
