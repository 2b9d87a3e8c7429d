//! Display adapters used when rendering identifiers and payloads in logs.

use core::fmt::{Display, Error as FmtError, Formatter};

/// Renders a slice of displayable elements as `[ a, b, c ]`.
pub struct PrettySlice<'a, T>(pub &'a [T]);

impl<'a, T: Display> Display for PrettySlice<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "[ ")?;
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, " ]")
    }
}

/// Renders at most `PREVIEW_LEN` bytes of a payload as lowercase hex,
/// followed by the total length when the payload is truncated.
pub struct PrettyBytes<'a>(pub &'a [u8]);

const PREVIEW_LEN: usize = 16;

impl<'a> Display for PrettyBytes<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        for byte in self.0.iter().take(PREVIEW_LEN) {
            write!(f, "{byte:02x}")?;
        }
        if self.0.len() > PREVIEW_LEN {
            write!(f, "..({} bytes)", self.0.len())?;
        }
        Ok(())
    }
}
