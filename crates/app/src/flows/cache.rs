//! Cart cache
//!
//! One entry per cart id. Every fetch takes a [`FetchTicket`] before it goes
//! out; every mutation invalidates the entry and bumps its generation. A
//! response is stored only if its ticket is from the current generation and
//! newer than whatever is already stored, so a slow response can never
//! overwrite a fresher one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::domain::carts::models::{Cart, CartId};

/// Issued when a fetch starts; handed back when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    cart: CartId,
    generation: u64,
    sequence: u64,
}

#[derive(Debug, Default)]
struct Entry {
    generation: u64,
    stored_sequence: u64,
    cart: Option<Cart>,
}

#[derive(Debug, Default)]
struct Inner {
    next_sequence: u64,
    entries: FxHashMap<CartId, Entry>,
}

#[derive(Debug, Default)]
pub struct CartCache {
    inner: Mutex<Inner>,
}

impl CartCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record that a fetch for `cart` is about to go out.
    pub fn begin_fetch(&self, cart: CartId) -> FetchTicket {
        let mut inner = self.lock();

        inner.next_sequence += 1;
        let sequence = inner.next_sequence;
        let generation = inner.entries.entry(cart).or_default().generation;

        FetchTicket {
            cart,
            generation,
            sequence,
        }
    }

    /// Store a fetched cart. Returns `false` when the response was stale and dropped.
    pub fn complete(&self, ticket: FetchTicket, cart: Cart) -> bool {
        let mut inner = self.lock();
        let entry = inner.entries.entry(ticket.cart).or_default();

        if ticket.generation != entry.generation || ticket.sequence <= entry.stored_sequence {
            debug!(cart = %ticket.cart, "discarding stale cart response");

            return false;
        }

        entry.stored_sequence = ticket.sequence;
        entry.cart = Some(cart);

        true
    }

    /// Forget the stored cart and outdate every fetch already in flight.
    pub fn invalidate(&self, cart: CartId) {
        let mut inner = self.lock();
        let entry = inner.entries.entry(cart).or_default();

        entry.generation += 1;
        entry.cart = None;
    }

    /// Latest stored cart, if any.
    #[must_use]
    pub fn get(&self, cart: CartId) -> Option<Cart> {
        self.lock()
            .entries
            .get(&cart)
            .and_then(|entry| entry.cart.clone())
    }
}
