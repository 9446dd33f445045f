//! Games offered on the start screen.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One entry in the game list.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub coming_soon: bool,
}

impl GameCard {
    #[must_use]
    pub fn action_label(&self) -> &'static str {
        if self.coming_soon {
            "Coming Soon"
        } else {
            "Play Game"
        }
    }

    /// Heading line: icon followed by title.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} {}", self.icon, self.title)
    }
}

pub const CATALOG: &[GameCard] = &[
    GameCard {
        icon: "🐍",
        title: "Snake Game",
        description: "Snake game with multiple difficulties and game modes including obstacles and portals.",
        coming_soon: false,
    },
    GameCard {
        icon: "🚧",
        title: "Coming Soon",
        description: "An exciting new game is under construction. Stay tuned!",
        coming_soon: true,
    },
];

/// Cards that can actually be launched.
pub fn playable() -> impl Iterator<Item = &'static GameCard> {
    CATALOG.iter().filter(|card| !card.coming_soon)
}

/// Cuts `text` to at most `max_width` display columns, ending with `…` when shortened.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push('…');
    out
}
