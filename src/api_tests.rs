#[cfg(test)]
mod tests {
    use crate::api::{ArtistId, ShowId, VenueId};

    #[test]
    fn test_venue_id_new() {
        let id = VenueId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_venue_id_equality() {
        let id1 = VenueId::new(100);
        let id2 = VenueId::new(100);
        let id3 = VenueId::new(101);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_venue_id_ordering() {
        let id1 = VenueId::new(1);
        let id2 = VenueId::new(2);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_venue_id_from_i64() {
        let id = VenueId(999);
        assert_eq!(id.0, 999);
    }

    #[test]
    fn test_artist_id_new() {
        let id = ArtistId::new(55);
        assert_eq!(id.value(), 55);
    }

    #[test]
    fn test_artist_id_equality() {
        let id1 = ArtistId::new(200);
        let id2 = ArtistId::new(200);
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_show_id_new() {
        let id = ShowId::new(77);
        assert_eq!(id.value(), 77);
    }

    #[test]
    fn test_show_id_display() {
        assert_eq!(ShowId::new(7).to_string(), "7");
        assert_eq!(VenueId::new(12).to_string(), "12");
        assert_eq!(ArtistId::new(3).to_string(), "3");
    }

    #[test]
    fn test_all_ids_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(VenueId::new(1));
        set.insert(VenueId::new(2));
        set.insert(VenueId::new(1)); // Duplicate

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_id_conversion_to_i64() {
        let raw: i64 = VenueId::new(31).into();
        assert_eq!(raw, 31);
    }

    #[test]
    fn test_venue_id_zero() {
        let id = VenueId::new(0);
        assert_eq!(id.value(), 0);
    }
}
