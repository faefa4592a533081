//! Action names of the single `?action=` endpoint.
//!
//! Shared by the router and the HTTP gateway so both sides agree on the
//! wire names.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetGameInfo,
    GetReviews,
    Login,
    Register,
    CreateReview,
    UpdateReview,
    DeleteReview,
    UpdateGameInfo,
}

impl Action {
    pub const ALL: [Self; 8] = [
        Self::GetGameInfo,
        Self::GetReviews,
        Self::Login,
        Self::Register,
        Self::CreateReview,
        Self::UpdateReview,
        Self::DeleteReview,
        Self::UpdateGameInfo,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetGameInfo => "get_game_info",
            Self::GetReviews => "get_reviews",
            Self::Login => "login",
            Self::Register => "register",
            Self::CreateReview => "create_review",
            Self::UpdateReview => "update_review",
            Self::DeleteReview => "delete_review",
            Self::UpdateGameInfo => "update_game_info",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == raw)
    }

    /// Whether the action addresses a single review via the `id` query param.
    #[must_use]
    pub fn takes_review_id(self) -> bool {
        matches!(self, Self::UpdateReview | Self::DeleteReview)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_inverts_as_str() {
        for action in Action::ALL {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn parse_unknown_is_none() {
        assert_eq!(Action::parse(""), None);
        assert_eq!(Action::parse("drop_tables"), None);
        assert_eq!(Action::parse("LOGIN"), None);
    }

    #[test]
    fn only_review_mutations_take_id() {
        let with_id: Vec<Action> = Action::ALL.into_iter().filter(|a| a.takes_review_id()).collect();
        assert_eq!(with_id, vec![Action::UpdateReview, Action::DeleteReview]);
    }
}
