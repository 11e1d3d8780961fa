// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Wishlists and the private reveal.
//!
//! A wishlist is an ordered list of free-text items owned by one participant.
//! After matching, each giver looks up their own identifier to learn who they
//! give to and what that person asked for.

use crate::assignment::Assignment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered free-text wishlist items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist(Vec<String>);

impl Wishlist {
    /// Parse one item per line: items are trimmed and blank lines dropped.
    pub fn parse(text: &str) -> Self {
        Self(
            text.lines()
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Items joined one per line, the inverse of [`Wishlist::parse`] for parsed lists.
    pub fn to_text(&self) -> String {
        self.0.join("\n")
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Wishlists keyed by owner identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishlistBook(BTreeMap<String, Wishlist>);

impl WishlistBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `owner`'s wishlist, replacing any previous one.
    pub fn set(&mut self, owner: impl Into<String>, wishlist: Wishlist) {
        self.0.insert(owner.into(), wishlist);
    }

    pub fn get(&self, owner: &str) -> Option<&Wishlist> {
        self.0.get(owner)
    }
}

/// What a giver sees when they open their envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reveal {
    /// `None` while no assignment includes this giver.
    pub recipient: Option<String>,
    pub wishlist: Wishlist,
}

/// Look up `giver`'s recipient and that recipient's wishlist.
///
/// A giver missing from the assignment gets no recipient and an empty list;
/// a recipient who never saved a wishlist gets an empty one.
pub fn reveal(assignment: &Assignment, giver: &str, wishlists: &WishlistBook) -> Reveal {
    match assignment.receiver_of(giver) {
        None => Reveal {
            recipient: None,
            wishlist: Wishlist::default(),
        },
        Some(recipient) => Reveal {
            recipient: Some(recipient.to_string()),
            wishlist: wishlists.get(recipient).cloned().unwrap_or_default(),
        },
    }
}
