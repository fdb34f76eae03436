//! Internet protocols recognised by the store.

use std::fmt;
use std::str::FromStr;

/// Protocol of an internet credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InternetProtocol {
    Ftp,
    FtpAccount,
    Http,
    Irc,
    Nntp,
    Pop3,
    Smtp,
    Socks,
    Imap,
    Ldap,
    AppleTalk,
    Afp,
    Telnet,
    Ssh,
    Ftps,
    #[default]
    Https,
    HttpProxy,
    HttpsProxy,
    FtpProxy,
    Smb,
    Rtsp,
    RtspProxy,
    Daap,
    Eppc,
    Ipp,
    Nntps,
    Ldaps,
    TelnetS,
    Imaps,
    Ircs,
    Pop3S,
}

/// (variant, backend code, lowercase name)
const TABLE: [(InternetProtocol, &str, &str); 31] = [
    (InternetProtocol::Ftp, "ftp ", "ftp"),
    (InternetProtocol::FtpAccount, "ftpa", "ftp-account"),
    (InternetProtocol::Http, "http", "http"),
    (InternetProtocol::Irc, "irc ", "irc"),
    (InternetProtocol::Nntp, "nntp", "nntp"),
    (InternetProtocol::Pop3, "pop3", "pop3"),
    (InternetProtocol::Smtp, "smtp", "smtp"),
    (InternetProtocol::Socks, "sox ", "socks"),
    (InternetProtocol::Imap, "imap", "imap"),
    (InternetProtocol::Ldap, "ldap", "ldap"),
    (InternetProtocol::AppleTalk, "atlk", "appletalk"),
    (InternetProtocol::Afp, "afp ", "afp"),
    (InternetProtocol::Telnet, "teln", "telnet"),
    (InternetProtocol::Ssh, "ssh ", "ssh"),
    (InternetProtocol::Ftps, "ftps", "ftps"),
    (InternetProtocol::Https, "htps", "https"),
    (InternetProtocol::HttpProxy, "htpx", "http-proxy"),
    (InternetProtocol::HttpsProxy, "htsx", "https-proxy"),
    (InternetProtocol::FtpProxy, "ftpx", "ftp-proxy"),
    (InternetProtocol::Smb, "smb ", "smb"),
    (InternetProtocol::Rtsp, "rtsp", "rtsp"),
    (InternetProtocol::RtspProxy, "rtsx", "rtsp-proxy"),
    (InternetProtocol::Daap, "daap", "daap"),
    (InternetProtocol::Eppc, "eppc", "eppc"),
    (InternetProtocol::Ipp, "ipp ", "ipp"),
    (InternetProtocol::Nntps, "ntps", "nntps"),
    (InternetProtocol::Ldaps, "ldps", "ldaps"),
    (InternetProtocol::TelnetS, "tels", "telnets"),
    (InternetProtocol::Imaps, "imps", "imaps"),
    (InternetProtocol::Ircs, "ircs", "ircs"),
    (InternetProtocol::Pop3S, "pops", "pop3s"),
];

impl InternetProtocol {
    /// The four-character backend code. Some codes are space padded.
    pub fn as_raw(&self) -> &'static str {
        self.entry().1
    }

    /// Parse a backend code. Unknown codes yield `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        TABLE.iter().find(|(_, code, _)| *code == raw).map(|(p, _, _)| *p)
    }

    /// Lowercase human-readable name, e.g. `"https"`.
    pub fn name(&self) -> &'static str {
        self.entry().2
    }

    /// All protocols in table order.
    pub fn all() -> impl Iterator<Item = InternetProtocol> {
        TABLE.iter().map(|(p, _, _)| *p)
    }

    fn entry(&self) -> &'static (InternetProtocol, &'static str, &'static str) {
        // Rows are in declaration order.
        &TABLE[*self as usize]
    }
}

impl fmt::Display for InternetProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a protocol name.
#[derive(Debug, thiserror::Error)]
#[error("unknown internet protocol: {0}")]
pub struct UnknownProtocol(pub String);

impl FromStr for InternetProtocol {
    type Err = UnknownProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        TABLE
            .iter()
            .find(|(_, _, name)| *name == lower)
            .map(|(p, _, _)| *p)
            .ok_or(UnknownProtocol(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_protocol_raw_roundtrip() {
        for protocol in InternetProtocol::all() {
            assert_eq!(InternetProtocol::from_raw(protocol.as_raw()), Some(protocol));
        }
    }

    #[test]
    fn test_table_in_declaration_order() {
        for (index, (protocol, _, _)) in TABLE.iter().enumerate() {
            assert_eq!(*protocol as usize, index);
        }
    }

    #[test]
    fn test_protocol_codes_unique() {
        let codes: HashSet<_> = InternetProtocol::all().map(|p| p.as_raw()).collect();
        assert_eq!(codes.len(), TABLE.len());
        assert!(codes.iter().all(|c| c.len() == 4));
    }

    #[test]
    fn test_protocol_unknown_raw_is_none() {
        assert_eq!(InternetProtocol::from_raw("gopr"), None);
        assert_eq!(InternetProtocol::from_raw("ftp"), None);
    }

    #[test]
    fn test_protocol_from_name() {
        assert_eq!("HTTPS".parse::<InternetProtocol>().unwrap(), InternetProtocol::Https);
        assert_eq!("ssh".parse::<InternetProtocol>().unwrap(), InternetProtocol::Ssh);
        assert!("gopher".parse::<InternetProtocol>().is_err());
    }

    #[test]
    fn test_default_is_https() {
        assert_eq!(InternetProtocol::default().as_raw(), "htps");
    }
}
