/// The base trait for any value that can live in a variable's domain.
///
/// This is a marker trait with a blanket implementation: anything cloneable,
/// debuggable, equatable, orderable and hashable qualifies. `Ord` is required
/// so discrete domains can be kept in an ordered set, which in turn gives
/// every enumeration in the crate (domain iteration, Cartesian products,
/// value branching during search) a deterministic ascending order.
pub trait Value: Clone + std::fmt::Debug + Eq + Ord + std::hash::Hash + 'static {}
impl<T> Value for T where T: Clone + std::fmt::Debug + Eq + Ord + std::hash::Hash + 'static {}
