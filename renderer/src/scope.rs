use docblox::block::tag::Visibility;

/// Lowest visibility that still gets rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Threshold {
    /// Public members only.
    Public = 0,
    /// Public and protected members.
    #[default]
    Protected = 1,
    /// Everything, private members included.
    Private = 2,
}

impl Threshold {
    pub fn admits(self, visibility: Visibility) -> bool {
        match visibility {
            Visibility::Public => true,
            Visibility::Protected => self >= Threshold::Protected,
            Visibility::Private => self >= Threshold::Private,
        }
    }
}

/// Whether the blocks being rendered sit inside a `@class`, `@module` or
/// `@interface`. Threaded from one block to the next within a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    inside: bool,
}

impl Scope {
    pub fn enter(self) -> Scope {
        Scope { inside: true }
    }

    pub fn exit(self) -> Scope {
        Scope { inside: false }
    }

    pub fn is_inside(self) -> bool {
        self.inside
    }

    /// Header depth for a block: members of a scope sit one level below the
    /// block that opened it.
    pub fn depth(self, base: u8, opens_scope: bool) -> usize {
        let base = usize::from(clamp_level(base));
        if self.inside && !opens_scope { base + 1 } else { base }
    }
}

/// Header levels outside 1..=6 fall back to 1.
pub fn clamp_level(level: u8) -> u8 {
    if (1..=6).contains(&level) { level } else { 1 }
}
