//! Dashboard layout declarations

use super::panel::{Panel, SOURCE_PANEL};

/// The ordered set of panels declared active.
///
/// The source panel is implicit: it always comes first when the layout is
/// rendered, and is never stored. Duplicates are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    panels: Vec<Panel>,
}

impl Layout {
    /// A layout holding only the source panel
    pub fn source_only() -> Self {
        Self::default()
    }

    pub fn new(panels: Vec<Panel>) -> Self {
        Self { panels }
    }

    /// Build a layout from requested panel names.
    ///
    /// Unknown names are dropped and returned alongside the layout so the
    /// caller can report them. Order is preserved; nothing is deduplicated.
    pub fn from_requested<I, S>(requested: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut panels = Vec::new();
        let mut dropped = Vec::new();

        for name in requested {
            let name = name.as_ref();
            match Panel::parse(name) {
                Some(panel) => panels.push(panel),
                None => dropped.push(name.to_string()),
            }
        }

        (Self { panels }, dropped)
    }

    /// The spawned panels, without the source panel
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Whether the layout is only the source panel
    pub fn is_source_only(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panel names as declared to the debugger, source first
    pub fn names(&self) -> Vec<&'static str> {
        std::iter::once(SOURCE_PANEL)
            .chain(self.panels.iter().map(|p| p.as_str()))
            .collect()
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.names().join(" "))
    }
}
