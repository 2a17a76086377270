//! Widget lifecycle.

use std::fmt;

/// Mount lifecycle of a rating widget.
///
/// ```text
/// Unmounted -> Mounting -> Mounted -> Unmounting -> Unmounted
/// ```
///
/// Handles register while `Mounting`; taps are accepted only while `Mounted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    #[default]
    Unmounted,
    /// Star elements are registering their animation handles.
    Mounting,
    /// Interactive.
    Mounted,
    /// Handles are being released.
    Unmounting,
}

impl Lifecycle {
    pub fn is_mounted(self) -> bool {
        matches!(self, Self::Mounted)
    }

    /// Whether animation handles may register now.
    pub fn accepts_handles(self) -> bool {
        matches!(self, Self::Mounting)
    }

    /// Whether the widget is attached to a host at all.
    pub fn is_attached(self) -> bool {
        matches!(self, Self::Mounting | Self::Mounted)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifecycle::Unmounted => "unmounted",
            Lifecycle::Mounting => "mounting",
            Lifecycle::Mounted => "mounted",
            Lifecycle::Unmounting => "unmounting",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_unmounted() {
        assert_eq!(Lifecycle::default(), Lifecycle::Unmounted);
    }

    #[test]
    fn test_predicates() {
        assert!(Lifecycle::Mounted.is_mounted());
        assert!(!Lifecycle::Mounting.is_mounted());
        assert!(Lifecycle::Mounting.accepts_handles());
        assert!(!Lifecycle::Mounted.accepts_handles());
        assert!(Lifecycle::Mounting.is_attached());
        assert!(!Lifecycle::Unmounting.is_attached());
    }
}
