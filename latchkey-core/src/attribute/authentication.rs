//! Authentication schemes for internet credentials.

/// How an internet credential authenticates against its server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthenticationType {
    Ntlm,
    Msn,
    Dpa,
    Rpa,
    HttpBasic,
    HttpDigest,
    HtmlForm,
    #[default]
    Default,
}

impl AuthenticationType {
    pub const ALL: [AuthenticationType; 8] = [
        Self::Ntlm,
        Self::Msn,
        Self::Dpa,
        Self::Rpa,
        Self::HttpBasic,
        Self::HttpDigest,
        Self::HtmlForm,
        Self::Default,
    ];

    pub fn as_raw(&self) -> &'static str {
        match self {
            Self::Ntlm => "ntlm",
            Self::Msn => "msna",
            Self::Dpa => "dpaa",
            Self::Rpa => "rpaa",
            Self::HttpBasic => "http",
            Self::HttpDigest => "httd",
            Self::HtmlForm => "form",
            Self::Default => "dflt",
        }
    }

    /// Unknown codes yield `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|auth| auth.as_raw() == raw)
    }
}
