/// A marker trait for types that can be used as SQL parameters.
///
/// This trait is used as a bound on the parameter type in SQL fragments.
/// `Send + Sync` lets compiled statements cross thread boundaries.
pub trait SQLParam: Clone + core::fmt::Debug + Send + Sync {}
