use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical variant category.
///
/// Declaration order matches the alphabetical order of the serialized names,
/// so a `BTreeMap<Category, _>` iterates (and serializes) sorted by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Alpha,
    Beta,
    Delta,
    Epsilon,
    Eta,
    Gamma,
    Iota,
    Kappa,
    Lambda,
    Mu,
    Omicron,
    #[serde(rename = "non_who")]
    NonWho,
    #[serde(rename = "unknown")]
    Unknown,
}

/// The WHO-named variants, sorted by name.
pub const WHO_VARIANTS: [Category; 11] = [
    Category::Alpha,
    Category::Beta,
    Category::Delta,
    Category::Epsilon,
    Category::Eta,
    Category::Gamma,
    Category::Iota,
    Category::Kappa,
    Category::Lambda,
    Category::Mu,
    Category::Omicron,
];

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Alpha => "Alpha",
            Category::Beta => "Beta",
            Category::Delta => "Delta",
            Category::Epsilon => "Epsilon",
            Category::Eta => "Eta",
            Category::Gamma => "Gamma",
            Category::Iota => "Iota",
            Category::Kappa => "Kappa",
            Category::Lambda => "Lambda",
            Category::Mu => "Mu",
            Category::Omicron => "Omicron",
            Category::NonWho => "non_who",
            Category::Unknown => "unknown",
        }
    }

    /// Case-insensitive exact match against the WHO names.
    pub fn from_who_name(name: &str) -> Option<Category> {
        WHO_VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(name))
    }

    /// Maps a raw sequencing cluster label onto its canonical category.
    ///
    /// `"B.1.617.2 (Delta, VOC)"` becomes `Delta`; a label that does not
    /// resolve to a WHO name (e.g. `"XBB.1.5"`) becomes `NonWho`.
    pub fn from_cluster_label(raw: &str) -> Category {
        Category::from_who_name(canonical_label(raw)).unwrap_or(Category::NonWho)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts the short name from a cluster label.
///
/// When the label carries a non-empty parenthesized group, the part before the
/// first comma inside the parentheses is used (`"Other"` if that part is
/// blank). Otherwise the label is returned unchanged.
pub fn canonical_label(raw: &str) -> &str {
    if let (Some(start), Some(end)) = (raw.find('('), raw.find(')')) {
        if end > start + 1 {
            let inner = &raw[start + 1..end];
            let head = inner.split(',').next().unwrap_or_default().trim();
            return if head.is_empty() { "Other" } else { head };
        }
    }
    raw
}
