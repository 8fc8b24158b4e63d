//! Caller identity and admin resolution

use shared::models::UserInfo;

/// Caller of the current request
///
/// An empty `email` means the platform supplied no identity.
///
/// # Example
///
/// ```
/// use guide_server::auth::CurrentUser;
///
/// let admins = vec!["Owner@Example.com".to_string()];
/// let user = CurrentUser::new("owner@example.com", &admins);
/// assert!(user.is_admin);
/// assert!(user.can_modify("someone@example.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    pub email: String,
    pub is_admin: bool,
}

impl CurrentUser {
    /// Resolve the admin flag against the configured list (case-insensitive)
    pub fn new(email: impl Into<String>, admin_emails: &[String]) -> Self {
        let email = email.into();
        let is_admin = !email.is_empty()
            && admin_emails
                .iter()
                .any(|admin| admin.eq_ignore_ascii_case(&email));
        Self { email, is_admin }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.email.is_empty()
    }

    /// Whether the caller wrote the row owned by `owner_email`
    pub fn is_owner(&self, owner_email: &str) -> bool {
        !self.is_anonymous() && self.email.eq_ignore_ascii_case(owner_email.trim())
    }

    /// Owners and admins may modify a row
    pub fn can_modify(&self, owner_email: &str) -> bool {
        self.is_admin || self.is_owner(owner_email)
    }

    pub fn info(&self) -> UserInfo {
        UserInfo {
            email: self.email.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Extract the email from an identity header value
///
/// The proxy sends `accounts.google.com:alice@example.com`; the part
/// before the last `:` names the issuer and is dropped.
pub fn parse_identity_header(raw: &str) -> String {
    let value = raw.trim();
    value
        .rsplit_once(':')
        .map(|(_, email)| email)
        .unwrap_or(value)
        .trim()
        .to_string()
}
