use std::path::{Path, PathBuf};

/// Account and location of a `\\server\share` network share
#[derive(Debug, Clone)]
pub struct SmbCredentials {
    unc: PathBuf,
    domain: Option<String>,
    user: Option<String>,
    pub(crate) password: Option<String>,
}

impl SmbCredentials {
    /// `server` may be given with or without its leading `\\`; `share` may use either separator
    pub fn new<S: AsRef<str>>(server: S, share: S) -> Self {
        let server = server.as_ref().trim_start_matches('\\');
        let share = share.as_ref().trim_matches(|c| c == '\\' || c == '/');
        Self {
            unc: PathBuf::from(format!("\\\\{}\\{}", server, share.replace('/', "\\"))),
            domain: None,
            user: None,
            password: None,
        }
    }

    /// Connect as `username` instead of the current session user
    pub fn username<S: AsRef<str>>(mut self, username: S) -> Self {
        self.user = Some(username.as_ref().to_string());
        self
    }

    pub fn password<S: AsRef<str>>(mut self, password: S) -> Self {
        self.password = Some(password.as_ref().to_string());
        self
    }

    /// Windows domain the user belongs to
    pub fn domain<S: AsRef<str>>(mut self, domain: S) -> Self {
        self.domain = Some(domain.as_ref().to_string());
        self
    }

    pub fn unc_path(&self) -> &Path {
        self.unc.as_path()
    }

    /// Account name as expected by `WNetAddConnection2W`, `DOMAIN\user` when a domain is set
    pub(crate) fn account(&self) -> Option<String> {
        let user = self.user.as_deref()?;
        Some(match self.domain.as_deref() {
            Some(domain) => format!("{}\\{}", domain, user),
            None => user.to_string(),
        })
    }
}
