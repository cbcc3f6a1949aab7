// ── Daily slot grid ──
//
// Fixed 30-minute labels from opening to closing. Static for the whole
// shop -- slots are not configurable per barber.

/// Every bookable slot label, opening to closing.
pub const SLOT_GRID: [&str; 20] = [
    "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "13:00", "13:30", "14:00",
    "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30", "18:00", "18:30", "19:00",
];

/// The full daily slot grid.
pub fn slot_grid() -> &'static [&'static str] {
    &SLOT_GRID
}

/// Whether a label is a valid slot on the grid.
pub fn is_on_grid(label: &str) -> bool {
    SLOT_GRID.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_spans_opening_to_closing() {
        assert_eq!(SLOT_GRID.first(), Some(&"09:30"));
        assert_eq!(SLOT_GRID.last(), Some(&"19:00"));
        assert_eq!(SLOT_GRID.len(), 20);
    }

    #[test]
    fn grid_membership() {
        assert!(is_on_grid("10:00"));
        assert!(!is_on_grid("09:00"));
        assert!(!is_on_grid("19:30"));
    }
}
