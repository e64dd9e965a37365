use std::fmt;

/// Sound effects started by moving sector planes
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SfxName {
    /// Stone grinding, played every few tics while a plane is moving
    Stnmov,
    /// Plane reached its destination
    Pstop,
}

impl SfxName {
    /// The lump name of the sound, without the `DS` prefix
    pub const fn name(&self) -> &'static str {
        match self {
            SfxName::Stnmov => "stnmov",
            SfxName::Pstop => "pstop",
        }
    }
}

impl fmt::Display for SfxName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
