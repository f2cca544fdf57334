use std::collections::BTreeMap;

use tracing::warn;

use crate::db::models::CustomerWithAssignment;
use crate::storage::location::StorageSlot;

/// Derived read model mapping each occupied slot to its current occupant.
///
/// Rebuilt from the full roster on every query path that needs it; the
/// uniqueness constraints make double occupancy impossible under normal
/// operation, but if the backing data ever disagrees the index still answers
/// deterministically (most recent assignment wins) and logs the collision
/// instead of hiding it.
pub struct OccupancyIndex {
    by_slot: BTreeMap<StorageSlot, CustomerWithAssignment>,
}

impl OccupancyIndex {
    pub fn build(roster: &[CustomerWithAssignment]) -> Self {
        let mut occupied: Vec<(StorageSlot, &CustomerWithAssignment)> = roster
            .iter()
            .filter_map(|record| {
                let assignment = record.storage_location.as_ref()?;
                Some((assignment.slot(), record))
            })
            .collect();
        occupied.sort_by(|(_, a), (_, b)| {
            let assigned_at =
                |r: &CustomerWithAssignment| r.storage_location.as_ref().map(|s| s.created_at);
            assigned_at(b).cmp(&assigned_at(a))
        });

        let mut by_slot: BTreeMap<StorageSlot, CustomerWithAssignment> = BTreeMap::new();
        for (slot, record) in occupied {
            if let Some(winner) = by_slot.get(&slot) {
                warn!(
                    slot = %slot,
                    kept = %winner.customer.id,
                    ignored = %record.customer.id,
                    "two customers recorded on the same slot, keeping the most recent assignment"
                );
                continue;
            }
            by_slot.insert(slot, record.clone());
        }
        Self { by_slot }
    }

    pub fn occupant_of(&self, slot: StorageSlot) -> Option<&CustomerWithAssignment> {
        self.by_slot.get(&slot)
    }

    pub fn is_occupied(&self, slot: StorageSlot) -> bool {
        self.by_slot.contains_key(&slot)
    }

    /// Occupied slots in grid order, for rendering the storage map.
    pub fn all_occupied(&self) -> impl Iterator<Item = StorageSlot> + '_ {
        self.by_slot.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use super::*;
    use crate::db::models::{Customer, CustomerStatus, StorageAssignment};
    use crate::storage::location::Section;

    fn record(name: &str, slot: Option<StorageSlot>, assigned_at: OffsetDateTime) -> CustomerWithAssignment {
        let id = Uuid::new_v4();
        CustomerWithAssignment {
            customer: Customer {
                id,
                name: name.to_string(),
                license_plate: format!("{name}-1"),
                summer_tire_size: None,
                winter_tire_size: None,
                phone: "0401234567".to_string(),
                email: format!("{name}@example.com"),
                status: CustomerStatus::Active,
                created_at: assigned_at,
                updated_at: assigned_at,
            },
            storage_location: slot.map(|s| StorageAssignment {
                id: Uuid::new_v4(),
                customer_id: id,
                hotel: s.hotel as i16,
                section: s.section,
                shelf: s.shelf as i16,
                created_at: assigned_at,
            }),
        }
    }

    fn slot(hotel: u8, section: Section, shelf: u8) -> StorageSlot {
        StorageSlot::new(hotel, section, shelf).unwrap()
    }

    #[test]
    fn maps_each_assigned_customer_to_its_slot() {
        let now = OffsetDateTime::now_utc();
        let roster = vec![
            record("virtanen", Some(slot(1, Section::A, 1)), now),
            record("korhonen", Some(slot(2, Section::B, 3)), now),
            record("makinen", None, now),
        ];
        let index = OccupancyIndex::build(&roster);

        assert_eq!(
            index
                .occupant_of(slot(1, Section::A, 1))
                .map(|r| r.customer.name.as_str()),
            Some("virtanen")
        );
        assert!(index.is_occupied(slot(2, Section::B, 3)));
        assert!(!index.is_occupied(slot(4, Section::C, 6)));
        assert_eq!(index.all_occupied().count(), 2);
    }

    #[test]
    fn newest_assignment_wins_on_double_occupancy() {
        let now = OffsetDateTime::now_utc();
        let contested = slot(3, Section::A, 2);
        let roster = vec![
            record("older", Some(contested), now - Duration::hours(2)),
            record("newer", Some(contested), now),
        ];
        let index = OccupancyIndex::build(&roster);

        assert_eq!(
            index
                .occupant_of(contested)
                .map(|r| r.customer.name.as_str()),
            Some("newer")
        );
        assert_eq!(index.all_occupied().count(), 1);
    }

    #[test]
    fn empty_roster_occupies_nothing() {
        let index = OccupancyIndex::build(&[]);
        assert!(StorageSlot::all().all(|s| !index.is_occupied(s)));
    }
}
