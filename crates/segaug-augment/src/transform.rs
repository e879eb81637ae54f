use std::marker::PhantomData;

use rand::RngCore;

use crate::error::AugmentError;

/// A randomized operation turning an input of type `I` into an output of type `O`.
///
/// Transforms are configured at construction and hold no mutable state: every
/// random decision is drawn from the generator passed to [`Transform::apply`],
/// so seeding the generator makes a whole pipeline reproducible.
///
/// Steps with matching types are chained with [`Transform::then`].
pub trait Transform<I, O = I>: Send + Sync {
    /// Applies the transformation to the input.
    fn apply(&self, input: I, rng: &mut dyn RngCore) -> Result<O, AugmentError>;

    /// Chain `next` after this transform.
    #[inline]
    fn then<T, M>(self, next: T) -> Chain<Self, T, O>
    where
        Self: Sized,
        T: Transform<O, M>,
        O: Send,
        M: Send,
    {
        Chain {
            first: self,
            second: next,
            _marker: PhantomData,
        }
    }
}

/// A chain of two transforms (`A` -> `B`)
///
/// `M` is the type passed from `A` to `B`.
#[derive(Debug)]
pub struct Chain<A, B, M> {
    first: A,
    second: B,
    _marker: PhantomData<fn() -> M>,
}

impl<A, B, M> Chain<A, B, M> {
    /// Creates a new transform chain.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }

    /// The first transform of the chain.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The second transform of the chain.
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<I, M, O, A, B> Transform<I, O> for Chain<A, B, M>
where
    A: Transform<I, M>,
    B: Transform<M, O>,
    M: Send,
{
    fn apply(&self, input: I, rng: &mut dyn RngCore) -> Result<O, AugmentError> {
        let mid = self.first.apply(input, rng)?;
        self.second.apply(mid, rng)
    }
}
