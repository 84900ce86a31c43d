//! Building a username/password token from request headers.

use realm_sdk::UsernamePasswordToken;

/// Header carrying the identity name.
pub const USER_HEADER: &str = "User";

/// Header carrying the secret.
pub const PASSWORD_HEADER: &str = "Password";

/// Build a token from request headers.
///
/// `header` looks a header up by name; how names are matched (e.g.
/// case-insensitively) is up to the caller's header map. Returns `None`
/// unless both headers are present, in which case the host should move on
/// to the next realm rather than fail the request.
#[must_use]
pub fn extract_token<'a, F>(header: F) -> Option<UsernamePasswordToken>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let username = header(USER_HEADER)?;
    let password = header(PASSWORD_HEADER)?;
    Some(UsernamePasswordToken::new(username, password))
}
