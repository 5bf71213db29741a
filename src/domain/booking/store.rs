use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use uuid::Uuid;

use crate::domain::booking::record::{Booking, BookingStatus};
use crate::domain::ids::PrincipalId;
use crate::error::{Error, Result};

/// Durable storage of booking records, an external collaborator behind a
/// narrow interface. A deployment backs this with whatever persistence it
/// chooses; the engine only needs insert, status update and listing.
pub trait BookingStore: std::fmt::Debug + Send + Sync {
    fn insert(&self, booking: &Booking) -> Result<()>;
    fn update_status(&self, id: &Uuid, status: BookingStatus) -> Result<()>;
    fn get(&self, id: &Uuid) -> Option<Booking>;
    fn list_all(&self) -> Vec<Booking>;
    fn list_owned_by(&self, owner: &PrincipalId) -> Vec<Booking>;
}

/// Process-local store, the default for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    inner: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_newest_first(mut bookings: Vec<Booking>) -> Vec<Booking> {
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        bookings
    }
}

impl BookingStore for InMemoryBookingStore {
    fn insert(&self, booking: &Booking) -> Result<()> {
        let mut guard = self.inner.write().unwrap();
        guard.insert(booking.id, booking.clone());
        Ok(())
    }

    fn update_status(&self, id: &Uuid, status: BookingStatus) -> Result<()> {
        let mut guard = self.inner.write().unwrap();
        let booking = guard.get_mut(id).ok_or_else(|| Error::NotFound(format!("booking '{}'", id)))?;
        booking.status = status;
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Option<Booking> {
        let guard = self.inner.read().unwrap();
        guard.get(id).cloned()
    }

    fn list_all(&self) -> Vec<Booking> {
        let guard = self.inner.read().unwrap();
        Self::sorted_newest_first(guard.values().cloned().collect())
    }

    fn list_owned_by(&self, owner: &PrincipalId) -> Vec<Booking> {
        let guard = self.inner.read().unwrap();
        Self::sorted_newest_first(guard.values().filter(|b| b.owner == *owner).cloned().collect())
    }
}
