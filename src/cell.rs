use std::num::NonZero;

use crate::color::ColorId;

/// One grid position as seen by the builder, before node ids exist.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum LatticeCell {
    Shape { color: ColorId, terminates: bool },
    Multipass { required_passes: NonZero<usize> },
    #[default]
    Absent,
}

impl LatticeCell {
    /// The character this cell reads as in the `width:height:cells` encoding.
    pub(crate) fn display_char(&self) -> char {
        match *self {
            Self::Shape { color, terminates: false } => (b'a' + color as u8) as char,
            Self::Shape { color, terminates: true } => (b'A' + color as u8) as char,
            Self::Multipass { required_passes } => {
                char::from_digit(required_passes.get() as u32, 10).unwrap()
            }
            Self::Absent => '_',
        }
    }
}
