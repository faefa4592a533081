//! Headless page view.
//!
//! `render` projects controller state into plain values: what the header
//! shows, which buttons exist, the review cards and the admin panel rows.
//! A front end only has to draw a `PageView`; every gating decision is made
//! here.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::controller::{Controller, Dialogs};
use super::gateway::ContentGateway;
use super::session::SessionStore;
use crate::models::{GameInfo, MAX_RATING, Review};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Fixed feature highlights shown under the game section.
pub static HIGHLIGHTS: [Highlight; 4] = [
    Highlight {
        title: "Endless replayability",
        description: "Every run is unique thanks to procedural generation",
    },
    Highlight { title: "700+ items", description: "A huge pool of items with unique effects" },
    Highlight { title: "100+ bosses", description: "Fight a wide range of dangerous enemies" },
    Highlight { title: "Multiple endings", description: "Uncover every secret and achievement" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub header: HeaderView,
    /// `None` until game info has loaded.
    pub game: Option<GameView>,
    pub highlights: &'static [Highlight],
    pub reviews: Vec<ReviewCard>,
    /// Present only while an admin has the panel open.
    pub admin_panel: Option<AdminPanelView>,
    pub dialogs: Dialogs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    /// Signed-in username, if any.
    pub username: Option<String>,
    pub admin_badge: bool,
    pub show_login: bool,
    pub show_logout: bool,
    pub show_admin_button: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub info: GameInfo,
    pub show_edit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCard {
    pub id: i64,
    pub username: String,
    pub stars: String,
    pub comment: String,
    pub date: String,
    pub pending: bool,
    pub show_approve: bool,
    pub show_delete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPanelView {
    /// Every review, approved or not.
    pub rows: Vec<ReviewCard>,
    pub pending_count: usize,
}

// =============================================================================
// RENDER
// =============================================================================

#[must_use]
pub fn render<G: ContentGateway, S: SessionStore>(controller: &Controller<G, S>) -> PageView {
    let is_admin = controller.is_admin();
    let user = controller.user();

    let header = HeaderView {
        username: user.map(|u| u.username.clone()),
        admin_badge: is_admin,
        show_login: user.is_none(),
        show_logout: user.is_some(),
        show_admin_button: is_admin,
    };

    let game = controller
        .game_info()
        .map(|info| GameView { info: info.clone(), show_edit: is_admin });

    let reviews = controller
        .visible_reviews()
        .into_iter()
        .map(|r| review_card(r, is_admin, DATE_FORMAT))
        .collect();

    let admin_panel = (is_admin && controller.dialogs().admin_panel).then(|| AdminPanelView {
        rows: controller
            .reviews()
            .iter()
            .map(|r| review_card(r, true, DATE_TIME_FORMAT))
            .collect(),
        pending_count: controller.pending_reviews().len(),
    });

    PageView {
        header,
        game,
        highlights: &HIGHLIGHTS,
        reviews,
        admin_panel,
        dialogs: controller.dialogs(),
    }
}

fn review_card(review: &Review, moderator: bool, format: &[BorrowedFormatItem<'_>]) -> ReviewCard {
    ReviewCard {
        id: review.id,
        username: review.username.clone(),
        stars: star_string(review.rating),
        comment: review.comment.clone(),
        date: review.created_at.format(format).unwrap_or_default(),
        pending: !review.is_approved,
        show_approve: moderator && !review.is_approved,
        show_delete: moderator,
    }
}

/// Filled stars for `rating`, hollow stars up to five. Out-of-range ratings
/// are clamped.
#[must_use]
pub fn star_string(rating: i32) -> String {
    let filled = usize::try_from(rating.clamp(0, MAX_RATING)).unwrap_or(0);
    let total = usize::try_from(MAX_RATING).unwrap_or(5);
    let mut stars = "★".repeat(filled);
    stars.push_str(&"☆".repeat(total - filled));
    stars
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
