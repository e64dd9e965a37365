/// Flags stored in `LineDef::flags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDefFlags {
    /// Solid, is an obstacle.
    Blocking = 1,
    /// Blocks monsters only.
    BlockMonsters = 1 << 1,
    /// Backside will not be present at all if not two sided.
    TwoSided = 1 << 2,
    /// upper texture unpegged
    UnpegTop = 1 << 3,
    /// lower texture unpegged
    UnpegBottom = 1 << 4,
    /// In AutoMap: don't map as two sided: IT'S A SECRET!
    Secret = 1 << 5,
    /// Sound rendering: don't let sound cross two of these.
    BlockSound = 1 << 6,
    /// Don't draw on the automap at all.
    DontDraw = 1 << 7,
    /// Set if already seen, thus drawn in automap.
    Draw = 1 << 8,
}

impl LineDefFlags {
    pub const fn bit(self) -> u32 {
        self as u32
    }

    pub const fn is_set(self, flags: u32) -> bool {
        flags & self as u32 != 0
    }
}
