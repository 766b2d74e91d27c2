use serde::Serialize;

/// Converts one domain value into its public representation.
///
/// Any `Fn(T) -> O` where `O: Serialize` is a transformer, so handlers can pass
/// a closure or a plain function.
pub trait Transformer<T> {
    type Output: Serialize;

    fn transform(&self, item: T) -> Self::Output;

    fn transform_all(&self, items: Vec<T>) -> Vec<Self::Output> {
        items.into_iter().map(|item| self.transform(item)).collect()
    }
}

impl<T, O, F> Transformer<T> for F
where
    F: Fn(T) -> O,
    O: Serialize,
{
    type Output = O;

    fn transform(&self, item: T) -> O {
        self(item)
    }
}
