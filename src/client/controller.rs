//! Page controller: local state plus the user actions that mutate it.
//!
//! DESIGN
//! ======
//! The controller owns the gateway and the session store. Every action
//! talks to the gateway, then updates local state and queues a `Notice`
//! for the caller to display. Reviews are re-fetched after any mutation
//! rather than patched locally.
//!
//! Admin-only actions are refused locally when the current user is not an
//! admin; the server itself does not re-check.
//!
//! ERROR HANDLING
//! ==============
//! Gateway failures never propagate: they are logged and turned into a
//! destructive notice. Initial loads fail silently (logged only).

use super::gateway::{ContentGateway, GatewayError};
use super::session::SessionStore;
use crate::models::{Credentials, GameInfo, MAX_RATING, NewReview, Review, User, rating_in_range, visible_reviews};

pub const DEFAULT_DRAFT_RATING: i32 = MAX_RATING;

// =============================================================================
// NOTICES
// =============================================================================

/// Transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub destructive: bool,
}

impl Notice {
    fn info(title: &str) -> Self {
        Self { title: title.to_owned(), destructive: false }
    }

    fn error(title: &str) -> Self {
        Self { title: title.to_owned(), destructive: true }
    }
}

pub mod messages {
    pub const WELCOME: &str = "Welcome!";
    pub const WELCOME_ADMIN: &str = "Welcome, administrator!";
    pub const LOGIN_FAILED: &str = "Invalid username or password";
    pub const LOGIN_ERROR: &str = "Login failed";
    pub const REGISTERED: &str = "Registration successful!";
    pub const REGISTER_FAILED: &str = "Registration failed";
    pub const LOGGED_OUT: &str = "You have signed out";
    pub const SIGN_IN_REQUIRED: &str = "You need to sign in first";
    pub const ADMIN_REQUIRED: &str = "Administrator access required";
    pub const INVALID_RATING: &str = "Rating must be between 1 and 5 stars";
    pub const EMPTY_COMMENT: &str = "Review text must not be empty";
    pub const REVIEW_PUBLISHED: &str = "Review published";
    pub const REVIEW_PENDING: &str = "Review sent for moderation";
    pub const REVIEW_FAILED: &str = "Failed to submit review";
    pub const REVIEW_APPROVED: &str = "Review approved";
    pub const REVIEW_DELETED: &str = "Review deleted";
    pub const GAME_INFO_SAVED: &str = "Game info updated";
    pub const GAME_INFO_FAILED: &str = "Failed to save game info";
    pub const GENERIC_ERROR: &str = "Something went wrong";
}

// =============================================================================
// UI STATE
// =============================================================================

/// Open/closed flags for every dialog on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dialogs {
    pub login: bool,
    /// Login dialog shows the registration form instead.
    pub register_mode: bool,
    pub review: bool,
    pub admin_panel: bool,
    pub edit_game_info: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: i32,
    pub comment: String,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self { rating: DEFAULT_DRAFT_RATING, comment: String::new() }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct Controller<G, S> {
    gateway: G,
    session: S,
    user: Option<User>,
    reviews: Vec<Review>,
    game_info: Option<GameInfo>,
    dialogs: Dialogs,
    /// Set when an anonymous visitor asked to write a review; the review
    /// dialog opens right after they authenticate.
    review_after_auth: bool,
    pub login_form: Credentials,
    pub register_form: Credentials,
    pub review_draft: ReviewDraft,
    pub edit_draft: GameInfo,
    notices: Vec<Notice>,
}

impl<G: ContentGateway, S: SessionStore> Controller<G, S> {
    pub fn new(gateway: G, session: S) -> Self {
        Self {
            gateway,
            session,
            user: None,
            reviews: Vec::new(),
            game_info: None,
            dialogs: Dialogs::default(),
            review_after_auth: false,
            login_form: Credentials::default(),
            register_form: Credentials::default(),
            review_draft: ReviewDraft::default(),
            edit_draft: GameInfo::default(),
            notices: Vec::new(),
        }
    }

    /// Load game info and reviews, then restore the cached identity.
    pub async fn init(&mut self) {
        self.load_game_info().await;
        self.load_reviews().await;
        self.user = self.session.load();
        if let Some(user) = &self.user {
            tracing::debug!(user_id = user.id, "restored cached session");
        }
    }

    pub async fn load_game_info(&mut self) {
        match self.gateway.get_game_info().await {
            Ok(Some(info)) => self.game_info = Some(info),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "loading game info failed"),
        }
    }

    pub async fn load_reviews(&mut self) {
        match self.gateway.get_reviews().await {
            Ok(reviews) => self.reviews = reviews,
            Err(e) => tracing::warn!(error = %e, "loading reviews failed"),
        }
    }

    // -------------------------------------------------------------------------
    // read access
    // -------------------------------------------------------------------------

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn game_info(&self) -> Option<&GameInfo> {
        self.game_info.as_ref()
    }

    /// Every fetched review, approved or not.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Reviews the current viewer may see.
    pub fn visible_reviews(&self) -> Vec<&Review> {
        visible_reviews(&self.reviews, self.user.as_ref())
    }

    /// Unapproved reviews; empty for non-admins.
    pub fn pending_reviews(&self) -> Vec<&Review> {
        if !self.is_admin() {
            return Vec::new();
        }
        self.reviews.iter().filter(|r| !r.is_approved).collect()
    }

    pub fn dialogs(&self) -> Dialogs {
        self.dialogs
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    // -------------------------------------------------------------------------
    // authentication
    // -------------------------------------------------------------------------

    pub fn open_login_dialog(&mut self) {
        self.dialogs.login = true;
    }

    /// Closing the dialog abandons any pending "write review" intent.
    pub fn close_login_dialog(&mut self) {
        self.dialogs.login = false;
        self.review_after_auth = false;
    }

    pub fn toggle_register_mode(&mut self) {
        self.dialogs.register_mode = !self.dialogs.register_mode;
    }

    pub async fn login(&mut self) {
        match self.gateway.login(&self.login_form).await {
            Ok(user) => {
                let greeting = if user.is_admin { messages::WELCOME_ADMIN } else { messages::WELCOME };
                self.sign_in(user);
                self.notify(Notice::info(greeting));
            }
            Err(e @ GatewayError::Status { .. }) => {
                tracing::warn!(error = %e, "login rejected");
                self.notify(Notice::error(messages::LOGIN_FAILED));
            }
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                self.notify(Notice::error(messages::LOGIN_ERROR));
            }
        }
    }

    pub async fn register(&mut self) {
        match self.gateway.register(&self.register_form).await {
            Ok(user) => {
                self.sign_in(user);
                self.notify(Notice::info(messages::REGISTERED));
            }
            Err(e) => {
                tracing::warn!(error = %e, "registration failed");
                self.notify(Notice::error(messages::REGISTER_FAILED));
            }
        }
    }

    fn sign_in(&mut self, user: User) {
        if let Err(e) = self.session.save(&user) {
            tracing::warn!(error = %e, "caching session failed");
        }
        tracing::info!(user_id = user.id, is_admin = user.is_admin, "signed in");
        self.user = Some(user);
        self.dialogs.login = false;
        self.login_form = Credentials::default();
        self.register_form = Credentials::default();

        if self.review_after_auth {
            self.review_after_auth = false;
            self.dialogs.review = true;
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "clearing session cache failed");
        }
        self.user = None;
        self.review_after_auth = false;
        self.dialogs.review = false;
        self.dialogs.admin_panel = false;
        self.dialogs.edit_game_info = false;
        self.notify(Notice::info(messages::LOGGED_OUT));
    }

    // -------------------------------------------------------------------------
    // reviews
    // -------------------------------------------------------------------------

    /// "Write a review" button: anonymous visitors are sent to the login
    /// dialog first.
    pub fn click_write_review(&mut self) {
        if self.user.is_none() {
            self.review_after_auth = true;
            self.dialogs.login = true;
        } else {
            self.dialogs.review = true;
        }
    }

    pub fn close_review_dialog(&mut self) {
        self.dialogs.review = false;
    }

    pub async fn submit_review(&mut self) {
        let Some(user) = self.user.clone() else {
            self.notify(Notice::error(messages::SIGN_IN_REQUIRED));
            return;
        };
        if !rating_in_range(self.review_draft.rating) {
            self.notify(Notice::error(messages::INVALID_RATING));
            return;
        }
        if self.review_draft.comment.trim().is_empty() {
            self.notify(Notice::error(messages::EMPTY_COMMENT));
            return;
        }

        let new_review = NewReview {
            user_id: user.id,
            rating: self.review_draft.rating,
            comment: self.review_draft.comment.clone(),
            is_admin: user.is_admin,
        };

        match self.gateway.create_review(&new_review).await {
            Ok(_) => {
                self.load_reviews().await;
                self.dialogs.review = false;
                self.review_draft = ReviewDraft::default();
                let title = if user.is_admin { messages::REVIEW_PUBLISHED } else { messages::REVIEW_PENDING };
                self.notify(Notice::info(title));
            }
            Err(e) => {
                tracing::warn!(error = %e, "review submission failed");
                self.notify(Notice::error(messages::REVIEW_FAILED));
            }
        }
    }

    fn require_admin(&mut self) -> bool {
        if self.is_admin() {
            return true;
        }
        self.notify(Notice::error(messages::ADMIN_REQUIRED));
        false
    }

    pub async fn approve_review(&mut self, id: i64) {
        if !self.require_admin() {
            return;
        }
        let result = self.gateway.update_review(id, true).await;
        self.finish_moderation(id, result, messages::REVIEW_APPROVED).await;
    }

    pub async fn delete_review(&mut self, id: i64) {
        if !self.require_admin() {
            return;
        }
        let result = self.gateway.delete_review(id).await;
        self.finish_moderation(id, result, messages::REVIEW_DELETED).await;
    }

    async fn finish_moderation(&mut self, id: i64, result: Result<(), GatewayError>, success: &str) {
        match result {
            Ok(()) => {
                self.load_reviews().await;
                self.notify(Notice::info(success));
            }
            Err(e) => {
                tracing::warn!(review_id = id, error = %e, "moderation failed");
                self.notify(Notice::error(messages::GENERIC_ERROR));
            }
        }
    }

    // -------------------------------------------------------------------------
    // admin panel and game info
    // -------------------------------------------------------------------------

    pub fn open_admin_panel(&mut self) {
        if self.require_admin() {
            self.dialogs.admin_panel = true;
        }
    }

    pub fn close_admin_panel(&mut self) {
        self.dialogs.admin_panel = false;
    }

    /// Prefill the edit draft from the current record. Does nothing until
    /// game info has loaded.
    pub fn open_edit_dialog(&mut self) {
        if !self.require_admin() {
            return;
        }
        if let Some(info) = &self.game_info {
            self.edit_draft = info.clone();
            self.dialogs.edit_game_info = true;
        }
    }

    pub fn close_edit_dialog(&mut self) {
        self.dialogs.edit_game_info = false;
    }

    pub async fn save_game_info(&mut self) {
        if !self.require_admin() {
            return;
        }
        match self.gateway.update_game_info(&self.edit_draft).await {
            Ok(()) => {
                self.load_game_info().await;
                self.dialogs.edit_game_info = false;
                self.notify(Notice::info(messages::GAME_INFO_SAVED));
            }
            Err(e) => {
                tracing::warn!(error = %e, "saving game info failed");
                self.notify(Notice::error(messages::GAME_INFO_FAILED));
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
