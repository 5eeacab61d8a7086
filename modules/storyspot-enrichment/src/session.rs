//! The single pending map selection carried from the map view to the
//! story form.

use storyspot_common::store::{load_json, save_json, SELECTED_LOCATION_KEY};
use storyspot_common::{KeyValueStore, Location, StorySpotError};
use tracing::{info, warn};

/// Replace the pending selection.
pub fn save_selection(store: &dyn KeyValueStore, location: &Location) -> Result<(), StorySpotError> {
    save_json(store, SELECTED_LOCATION_KEY, location)?;
    info!(
        latitude = location.latitude,
        longitude = location.longitude,
        "Location selected"
    );
    Ok(())
}

/// The pending selection, if any. An unreadable record counts as none.
pub fn load_selection(store: &dyn KeyValueStore) -> Option<Location> {
    load_json(store, SELECTED_LOCATION_KEY)
}

/// Consume the pending selection: return it and remove it from the store.
pub fn take_selection(store: &dyn KeyValueStore) -> Option<Location> {
    let location = load_selection(store)?;
    clear_selection(store);
    Some(location)
}

pub fn clear_selection(store: &dyn KeyValueStore) {
    if let Err(e) = store.remove(SELECTED_LOCATION_KEY) {
        warn!(error = %e, "Failed to clear selected location");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyspot_common::MemoryStore;

    #[test]
    fn selection_round_trip_and_take() {
        let store = MemoryStore::new();
        assert!(load_selection(&store).is_none());

        let loc = Location::new(38.7223, -9.1393).with_city("Lisbon");
        save_selection(&store, &loc).unwrap();
        assert_eq!(load_selection(&store), Some(loc.clone()));

        assert_eq!(take_selection(&store), Some(loc));
        assert!(load_selection(&store).is_none());
    }

    #[test]
    fn new_selection_replaces_old() {
        let store = MemoryStore::new();
        save_selection(&store, &Location::new(1.0, 2.0)).unwrap();
        save_selection(&store, &Location::new(3.0, 4.0)).unwrap();
        assert_eq!(load_selection(&store).unwrap().latitude, 3.0);
    }
}
