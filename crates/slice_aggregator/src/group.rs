use std::fmt;
use std::ops::{Add, Neg};
use std::sync::Arc;

/// Values that can be aggregated: an additive group.
///
/// `a - b` is always computed as `a + (-b)`, so only `+` and unary `-` are
/// required. The additive identity and the test for it are supplied at
/// runtime through [`Zero`].
pub trait Value: Clone + Add<Output = Self> + Neg<Output = Self> {}

impl<T> Value for T where T: Clone + Add<Output = T> + Neg<Output = T> {}

type Factory<V> = Arc<dyn Fn() -> V + Send + Sync>;
type Test<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;

/// The additive identity of a value type, together with the test for it.
///
/// A fresh zero is produced on every [`Zero::make`] call, so composite zeros
/// (vectors and the like) are never shared between table slots.
pub struct Zero<V> {
    factory: Factory<V>,
    test: Test<V>,
}

impl<V> Zero<V> {
    pub fn new<F, T>(factory: F, test: T) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        T: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            test: Arc::new(test),
        }
    }

    /// Replaces the zero test, keeping the factory.
    pub fn with_test<T>(self, test: T) -> Self
    where
        T: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self {
            factory: self.factory,
            test: Arc::new(test),
        }
    }

    pub fn make(&self) -> V {
        (self.factory)()
    }

    pub fn is_zero(&self, value: &V) -> bool {
        (self.test)(value)
    }
}

impl<V> Zero<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Zero given as a plain value; the test is `==` against it.
    pub fn of(zero: V) -> Self {
        let reference = zero.clone();
        Self::new(move || zero.clone(), move |v| *v == reference)
    }
}

impl<V> Zero<V>
where
    V: PartialEq + Send + Sync + 'static,
{
    /// Zero given as a factory; the test is `==` against one zero made here.
    ///
    /// The reference zero is only read, never handed out.
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
    {
        let reference = factory();
        Self::new(factory, move |v| *v == reference)
    }
}

impl<V> Default for Zero<V>
where
    V: Default + Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::of(V::default())
    }
}

impl<V> Clone for Zero<V> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            test: Arc::clone(&self.test),
        }
    }
}

impl<V> fmt::Debug for Zero<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zero").finish_non_exhaustive()
    }
}
