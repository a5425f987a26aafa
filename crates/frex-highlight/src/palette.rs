//! Deterministic role colors.
//!
//! Roles are sorted and dealt palette slots in order, skipping the slot reserved for the frame
//! trigger, so the same role set always gets the same colors.

use std::collections::{BTreeMap, BTreeSet};

use frex_config::ThemeName;

/// A background color for each theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleColor {
    /// Background on light themes.
    pub light: &'static str,
    /// Background on dark themes.
    pub dark: &'static str,
}

impl RoleColor {
    /// A color from its light and dark backgrounds.
    pub const fn new(light: &'static str, dark: &'static str) -> Self {
        Self { light, dark }
    }

    /// The color for `theme`.
    pub fn for_theme(&self, theme: ThemeName) -> &'static str {
        match theme {
            ThemeName::Light => self.light,
            ThemeName::Dark => self.dark,
        }
    }
}

/// Palette slot reserved for the frame trigger.
pub const TRIGGER_SLOT: usize = 5;

/// Role colors. Slot [`TRIGGER_SLOT`] is only ever used for triggers.
pub const PALETTE: [RoleColor; 16] = [
    RoleColor::new("#D2E3FC", "#1E3A5F"),
    RoleColor::new("#C8E6C9", "#1B4D2A"),
    RoleColor::new("#FEF0C3", "#5C4B12"),
    RoleColor::new("#F9DEDC", "#5F2522"),
    RoleColor::new("#EADDFF", "#3F2A6B"),
    RoleColor::new("#FFB74D", "#B35C00"),
    RoleColor::new("#C4E9E4", "#1C4A44"),
    RoleColor::new("#FCE4EC", "#5E2439"),
    RoleColor::new("#DDE8E8", "#2F4545"),
    RoleColor::new("#FFDDBE", "#5E3A17"),
    RoleColor::new("#E1F5FE", "#0D3C55"),
    RoleColor::new("#F0F4C3", "#4A4F12"),
    RoleColor::new("#D7CCC8", "#4E342E"),
    RoleColor::new("#E6EE9C", "#505B0F"),
    RoleColor::new("#B2DFDB", "#00483F"),
    RoleColor::new("#F8BBD0", "#6A1B3A"),
];

/// Color for roles missing from a map.
pub const FALLBACK: RoleColor = RoleColor::new("#E0E0E0", "#424242");

/// Role -> color assignment for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleColorMap {
    /// Assigned colors.
    colors: BTreeMap<String, RoleColor>,
}

impl RoleColorMap {
    /// The color of `role`, or the neutral fallback.
    pub fn get(&self, role: &str) -> RoleColor {
        self.colors.get(role).copied().unwrap_or(FALLBACK)
    }

    /// The trigger color.
    pub fn trigger(&self) -> RoleColor {
        PALETTE[TRIGGER_SLOT]
    }

    /// Returns true if `role` has an assigned color.
    pub fn contains(&self, role: &str) -> bool {
        self.colors.contains_key(role)
    }

    /// Roles and colors in role order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RoleColor)> {
        self.colors.iter().map(|(role, color)| (role.as_str(), *color))
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if no roles are assigned.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Assigns colors to a set of roles.
///
/// The result depends only on the set of distinct roles, not their order or multiplicity.
pub fn color_map_for<I, S>(roles: I) -> RoleColorMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sorted: BTreeSet<String> = roles
        .into_iter()
        .map(|role| role.as_ref().to_string())
        .filter(|role| !role.is_empty())
        .collect();

    let slots = PALETTE.len();
    let mut index = 0;
    let mut colors = BTreeMap::new();
    for role in sorted {
        if index % slots == TRIGGER_SLOT {
            index += 1;
        }
        colors.insert(role, PALETTE[index % slots]);
        index += 1;
        if index % slots == TRIGGER_SLOT {
            index += 1;
        }
    }
    RoleColorMap { colors }
}
