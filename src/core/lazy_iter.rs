use crate::error::{Error, Result};

/// Produces elements one at a time for a [`LazyIter`].
pub trait Producer {
    type Item;

    /// Computes the next element, or `None` once the sequence is exhausted.
    ///
    /// Must eventually return `None`; it is never called again afterwards.
    fn compute_next(&mut self) -> Option<Self::Item>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    // an element has been computed and not yet taken
    Ready,
    // nothing buffered, the producer has to be asked
    NotReady,
    Done,
    // the producer panicked mid-computation
    Failed,
}

/// Pull-based iterator that only runs its producer when an element is asked for.
pub struct LazyIter<P: Producer> {
    producer: P,
    state: State,
    next: Option<P::Item>,
}

impl<P: Producer> LazyIter<P> {
    pub fn new(producer: P) -> Self {
        LazyIter {
            producer,
            state: State::NotReady,
            next: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn has_next(&mut self) -> Result<bool> {
        match self.state {
            State::Failed => Err(Error::IteratorFailed),
            State::Done => Ok(false),
            State::Ready => Ok(true),
            State::NotReady => Ok(self.try_to_compute_next()),
        }
    }

    fn try_to_compute_next(&mut self) -> bool {
        // stays Failed if compute_next unwinds
        self.state = State::Failed;
        match self.producer.compute_next() {
            Some(item) => {
                self.next = Some(item);
                self.state = State::Ready;
                true
            }
            None => {
                self.state = State::Done;
                false
            }
        }
    }

    /// Returns the next element without consuming it.
    pub fn peek(&mut self) -> Result<&P::Item> {
        if !self.has_next()? {
            return Err(Error::NoSuchElement);
        }
        self.next.as_ref().ok_or(Error::NoSuchElement)
    }

    /// Takes the next element; asking past the end is `NoSuchElement`.
    pub fn take_next(&mut self) -> Result<P::Item> {
        if !self.has_next()? {
            return Err(Error::NoSuchElement);
        }
        self.state = State::NotReady;
        self.next.take().ok_or(Error::NoSuchElement)
    }
}

impl<P: Producer> Iterator for LazyIter<P> {
    type Item = P::Item;

    /// # Panics
    ///
    /// If an earlier `compute_next` call panicked.
    fn next(&mut self) -> Option<P::Item> {
        match self.take_next() {
            Ok(item) => Some(item),
            Err(Error::NoSuchElement) => None,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Adapts a closure into a [`Producer`].
pub struct FromFn<F>(F);

impl<T, F> Producer for FromFn<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;

    fn compute_next(&mut self) -> Option<T> {
        (self.0)()
    }
}

pub fn from_fn<T, F>(f: F) -> LazyIter<FromFn<F>>
where
    F: FnMut() -> Option<T>,
{
    LazyIter::new(FromFn(f))
}
