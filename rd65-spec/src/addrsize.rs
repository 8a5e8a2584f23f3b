//! Segment address sizes

use std::fmt;

/// Address size attribute of a segment.
///
/// `Default` means the target's natural size; it is never rendered as an
/// explicit qualifier on the `.segment` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddrSize {
    Default,
    /// 8-bit (zeropage/direct)
    Zeropage,
    /// 16-bit
    Absolute,
    /// 24-bit (segmented)
    Far,
    /// 32-bit
    Long,
}

impl AddrSize {
    /// Qualifier text used after `.segment "name":`.
    ///
    /// `Default` has a nominal value only: the engine omits the
    /// qualifier entirely for the default size rather than emitting
    /// `: default`.
    pub fn to_str(self) -> &'static str {
        match self {
            AddrSize::Default => "default",
            AddrSize::Zeropage => "zeropage",
            AddrSize::Absolute => "absolute",
            AddrSize::Far => "far",
            AddrSize::Long => "long",
        }
    }
}

impl fmt::Display for AddrSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
