//! Ordered band container with change notifications
//!
//! The collection is owned by the host application. It records what happened
//! to it (membership changes and per-band property changes) as a queue of
//! [`CollectionEvent`]s that the edit session drains in
//! [`EditSession::sync`](crate::session::EditSession::sync).

use crate::band::Band;

/// Frame and timeline length used to order bands for their "Band N" labels
pub const LABEL_REFERENCE_FRAME: u32 = 0;
pub const LABEL_REFERENCE_TOTAL_FRAMES: u32 = 60;

/// Identifier of a band inside one collection
///
/// Ids are never reused, so two equal bands can still be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BandId(u64);

impl std::fmt::Display for BandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something that happened to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionEvent {
    Added(BandId),
    Removed(BandId),
    /// A band's values changed through [`BandCollection::update`]
    PropertyChanged(BandId),
}

impl CollectionEvent {
    pub fn band(&self) -> BandId {
        match *self {
            Self::Added(id) | Self::Removed(id) | Self::PropertyChanged(id) => id,
        }
    }

    /// Whether the event changes which bands are in the collection
    pub fn is_membership_change(&self) -> bool {
        matches!(self, Self::Added(_) | Self::Removed(_))
    }
}

/// Mutable, ordered, duplicate-permitting set of bands
#[derive(Debug, Clone)]
pub struct BandCollection {
    entries: Vec<(BandId, Band)>,
    next_id: u64,
    events: Vec<CollectionEvent>,
}

impl Default for BandCollection {
    /// A collection seeded with one flat 500 Hz band
    fn default() -> Self {
        let mut band = Band::peak(500.0, 0.0);
        band.label = "Band 1".to_string();
        Self::with_bands([band])
    }
}

impl BandCollection {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            events: Vec::new(),
        }
    }

    /// Build a collection from existing bands without queuing notifications
    pub fn with_bands(bands: impl IntoIterator<Item = Band>) -> Self {
        let mut collection = Self::new();
        for band in bands {
            let id = collection.allocate_id();
            collection.entries.push((id, band));
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bands in collection order
    pub fn iter(&self) -> impl Iterator<Item = (BandId, &Band)> + '_ {
        self.entries.iter().map(|(id, band)| (*id, band))
    }

    pub fn ids(&self) -> Vec<BandId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    pub fn get(&self, id: BandId) -> Option<&Band> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, band)| band)
    }

    pub fn contains(&self, id: BandId) -> bool {
        self.position(id).is_some()
    }

    /// Index of a band in collection order
    pub fn position(&self, id: BandId) -> Option<usize> {
        self.entries.iter().position(|(i, _)| *i == id)
    }

    /// Append a band
    pub fn push(&mut self, band: Band) -> BandId {
        let id = self.allocate_id();
        self.entries.push((id, band));
        self.events.push(CollectionEvent::Added(id));
        id
    }

    /// Remove a band, returning it
    pub fn remove(&mut self, id: BandId) -> Option<Band> {
        let index = self.position(id)?;
        let (_, band) = self.entries.remove(index);
        self.events.push(CollectionEvent::Removed(id));
        Some(band)
    }

    /// Mutate a band and queue a property-change notification for it
    pub fn update<R>(&mut self, id: BandId, f: impl FnOnce(&mut Band) -> R) -> Option<R> {
        let index = self.position(id)?;
        let result = f(&mut self.entries[index].1);
        self.events.push(CollectionEvent::PropertyChanged(id));
        Some(result)
    }

    /// Drain queued notifications, oldest first
    pub fn take_events(&mut self) -> Vec<CollectionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Rename every band "Band N" by ascending frequency at the reference frame
    ///
    /// Ties keep collection order. Labels are presentation only, so no
    /// property-change notifications are queued.
    pub fn relabel(&mut self) {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            let fa = self.entries[a]
                .1
                .frequency_at(LABEL_REFERENCE_FRAME, LABEL_REFERENCE_TOTAL_FRAMES);
            let fb = self.entries[b]
                .1
                .frequency_at(LABEL_REFERENCE_FRAME, LABEL_REFERENCE_TOTAL_FRAMES);
            fa.total_cmp(&fb)
        });
        for (rank, index) in order.into_iter().enumerate() {
            self.entries[index].1.label = format!("Band {}", rank + 1);
        }
    }

    fn allocate_id(&mut self) -> BandId {
        let id = BandId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_remove_queue_events() {
        let mut bands = BandCollection::new();
        let a = bands.push(Band::peak(100.0, 0.0));
        let b = bands.push(Band::peak(100.0, 0.0));
        assert_ne!(a, b);
        assert_eq!(bands.len(), 2);

        assert!(bands.remove(a).is_some());
        assert!(bands.remove(a).is_none());

        assert_eq!(
            bands.take_events(),
            vec![
                CollectionEvent::Added(a),
                CollectionEvent::Added(b),
                CollectionEvent::Removed(a),
            ]
        );
        assert!(!bands.has_pending_events());
    }

    #[test]
    fn test_update_queues_property_change() {
        let mut bands = BandCollection::new();
        let id = bands.push(Band::peak(100.0, 0.0));
        bands.take_events();

        let stored = bands.update(id, |band| {
            band.enabled = false;
            band.enabled
        });
        assert_eq!(stored, Some(false));
        assert_eq!(bands.take_events(), vec![CollectionEvent::PropertyChanged(id)]);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut bands = BandCollection::new();
        let a = bands.push(Band::default());
        bands.remove(a);
        let b = bands.push(Band::default());
        assert_ne!(a, b);
    }

    #[test]
    fn test_relabel_orders_by_frequency() {
        let mut bands = BandCollection::with_bands([
            Band::peak(500.0, 0.0),
            Band::peak(100.0, 0.0),
            Band::peak(2000.0, 0.0),
        ]);
        bands.relabel();

        let labels: Vec<&str> = bands.iter().map(|(_, b)| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Band 2", "Band 1", "Band 3"]);
        assert!(!bands.has_pending_events());
    }

    #[test]
    fn test_relabel_uses_first_keyframe() {
        let mut late_low = Band::peak(5000.0, 0.0);
        late_low.frequency.add_keyframe(1.0, 30.0);
        let mut bands = BandCollection::with_bands([late_low, Band::peak(1000.0, 0.0)]);
        bands.relabel();

        let labels: Vec<&str> = bands.iter().map(|(_, b)| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Band 2", "Band 1"]);
    }

    #[test]
    fn test_default_collection_has_one_band() {
        let bands = BandCollection::default();
        assert_eq!(bands.len(), 1);
        let (_, band) = bands.iter().next().unwrap();
        assert_eq!(band.label, "Band 1");
        assert_eq!(band.frequency_at(0, 1), 500.0);
    }
}
