use serde::{Deserialize, Serialize};

/// Topological dimension of a geometry or of an intersection set.
///
/// The ordering `Empty < Zero < One < Two` is load-bearing: relation
/// matrices accumulate cells by pointwise maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Dimension {
    Empty,
    Zero,
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Dimension::Empty < Dimension::Zero);
        assert!(Dimension::Zero < Dimension::One);
        assert!(Dimension::One < Dimension::Two);
        assert_eq!(Dimension::One.max(Dimension::Zero), Dimension::One);
    }
}
