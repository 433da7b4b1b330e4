/// Identifier of a path group.
///
/// Every shape node carries one; a solved puzzle contains exactly one path
/// per color, connecting that color's two terminators.
pub type ColorId = usize;
