//! The static catalog the server starts with. Entities are created once
//! here and never deleted; only their held-seat sets change afterwards.

use crate::entity::{BusTrip, MovieScreening, ServiceEntity};

/// Prices are integer VND per seat.
pub fn catalog() -> Vec<ServiceEntity> {
    vec![
        ServiceEntity::Bus(BusTrip::new(
            "XE001",
            "Hà Nội - Hải Phòng",
            "08:00",
            "10:30",
            120000,
            40,
        )),
        ServiceEntity::Bus(BusTrip::new(
            "XE002",
            "TP.HCM - Đà Lạt",
            "06:00",
            "12:00",
            200000,
            35,
        )),
        ServiceEntity::Bus(BusTrip::new(
            "XE003",
            "Hà Nội - Sapa",
            "22:00",
            "06:00+1",
            300000,
            30,
        )),
        ServiceEntity::Movie(MovieScreening::new(
            "PHIM001",
            "Avengers: Endgame",
            "19:30",
            "181 phút",
            "CGV Vincom",
            80000,
            100,
        )),
        ServiceEntity::Movie(MovieScreening::new(
            "PHIM002",
            "Spider-Man: No Way Home",
            "14:00",
            "148 phút",
            "Lotte Cinema",
            75000,
            80,
        )),
        ServiceEntity::Movie(MovieScreening::new(
            "PHIM003",
            "Fast & Furious 10",
            "21:00",
            "142 phút",
            "Galaxy Cinema",
            85000,
            90,
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let entities = catalog();
        let mut ids: Vec<&str> = entities.iter().map(|e| e.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), entities.len());
    }

    #[test]
    fn test_catalog_starts_empty() {
        for entity in catalog() {
            assert_eq!(entity.held_count(), 0);
            assert_eq!(entity.available(), entity.total_seats());
        }
    }
}
