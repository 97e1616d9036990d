use std::cmp::Ordering;

/// Three-way comparison contract shared by every ordered structure in the
/// crate. Returns `Less` when `x` sorts before `y`, `Equal` on ties and
/// `Greater` otherwise.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Ready-made comparator for types with a total order.
pub fn natural_order<T: Ord>(x: &T, y: &T) -> Ordering {
    x.cmp(y)
}

/// Comparator producing the reverse of the natural order.
pub fn reverse_order<T: Ord>(x: &T, y: &T) -> Ordering {
    y.cmp(x)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn natural_order_is_three_way() {
        assert_eq!(natural_order(&1, &2), Ordering::Less);
        assert_eq!(natural_order(&2, &2), Ordering::Equal);
        assert_eq!(natural_order(&3, &2), Ordering::Greater);
    }

    #[test]
    fn reverse_order_flips_natural_order() {
        assert_eq!(reverse_order(&1, &2), Ordering::Greater);
        assert_eq!(reverse_order(&2, &2), Ordering::Equal);
        assert_eq!(reverse_order(&3, &2), Ordering::Less);
    }
}
