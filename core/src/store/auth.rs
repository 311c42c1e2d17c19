//! Login flag.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub is_logged_in: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    SetIsLoggedIn(bool),
}

pub fn reduce(_state: &AuthState, action: &AuthAction) -> AuthState {
    match action {
        AuthAction::SetIsLoggedIn(flag) => AuthState { is_logged_in: *flag },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        assert!(!AuthState::default().is_logged_in);
    }

    #[test]
    fn set_is_logged_in_overwrites() {
        let on = reduce(&AuthState::default(), &AuthAction::SetIsLoggedIn(true));
        assert!(on.is_logged_in);
        let off = reduce(&on, &AuthAction::SetIsLoggedIn(false));
        assert!(!off.is_logged_in);
    }
}
