//! Store item classes.

use std::fmt;

/// The store-level class an item belongs to.
///
/// The class decides which attribute groups are meaningful: `server`,
/// `port` and `protocol` only apply to [`Kind::Internet`], `service` to
/// [`Kind::Application`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Internet password.
    Internet,
    /// Generic (application) password.
    Application,
    Certificate,
    Key,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Self::Internet, Self::Application, Self::Certificate, Self::Key];

    /// The canonical class code sent to the backend.
    pub fn as_raw(&self) -> &'static str {
        match self {
            Self::Internet => "inet",
            Self::Application => "genp",
            Self::Certificate => "cert",
            Self::Key => "keys",
        }
    }

    /// Parse a class code read back from the backend.
    ///
    /// Unknown codes yield `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_raw() == raw)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Internet => "internet",
            Self::Application => "application",
            Self::Certificate => "certificate",
            Self::Key => "key",
        };
        f.write_str(name)
    }
}
