//! Ability categories and the opposite-category rule.
//!
//! Each category maps to exactly one opposite. The rule is deliberately
//! asymmetric: supporting abilities are countered by offensive ones, but the
//! opposite of offensive is defensive, so `opposite(opposite(c)) == c` does
//! not hold for [`AbilityCategory::Supporting`].

use tracing::warn;

/// Classification of an ability, also used as the category label of task nodes.
///
/// Labels parse case-insensitively, either as the display label
/// (`"Offensive Action"`) or as the short form (`"offensive"`).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum AbilityCategory {
    #[default]
    #[strum(to_string = "Offensive Action", serialize = "offensive")]
    Offensive,
    #[strum(to_string = "Defensive Action", serialize = "defensive")]
    Defensive,
    #[strum(to_string = "Supporting Action", serialize = "supporting")]
    Supporting,
}

impl AbilityCategory {
    /// Every category, in the order designers pick them.
    pub const ALL: [Self; 3] = [Self::Offensive, Self::Defensive, Self::Supporting];

    pub const fn opposite(self) -> Self {
        match self {
            Self::Offensive => Self::Defensive,
            Self::Defensive => Self::Offensive,
            Self::Supporting => Self::Offensive,
        }
    }

    /// Display label, e.g. `"Defensive Action"`.
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Whether `label` parses to this category, in either accepted form.
    pub fn matches_label(self, label: &str) -> bool {
        label.trim().parse::<Self>().is_ok_and(|parsed| parsed == self)
    }

    /// Parses a label, falling back to the default category when unknown.
    pub fn parse_lossy(label: &str) -> Self {
        label.trim().parse().unwrap_or_else(|_| {
            warn!(
                target: "dbt::category",
                label,
                "Unknown category label, using default"
            );
            Self::default()
        })
    }
}

/// Label-level opposite: returns the label of the opposite category.
///
/// Unknown labels map to the default category's label.
pub fn opposite_label(label: &str) -> &'static str {
    match label.trim().parse::<AbilityCategory>() {
        Ok(category) => category.opposite().label(),
        Err(_) => {
            warn!(
                target: "dbt::category",
                label,
                "Unknown category label, returning default opposite"
            );
            AbilityCategory::default().label()
        }
    }
}
