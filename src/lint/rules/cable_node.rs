use crate::lint::category::PrefixSet;
use crate::lint::{Finding, Rule};
use crate::types::{ObjectPathEntry, ResolvedTile};

/// A tile with cables should have at most one center node.
///
/// A cable is a center node when either end (`d1` or `d2`) is 0. Unset ends
/// take the cable defaults, `d1 = 0` and `d2 = 1`, so a bare cable is a
/// center node.
#[derive(Debug, Clone)]
pub struct DuplicateCenterCable {
    cables: PrefixSet,
    exempt: PrefixSet,
}

impl DuplicateCenterCable {
    pub const ID: &'static str = "duplicate-center-cable";
    pub const MESSAGE: &'static str = "tile has multiple center cable nodes";

    pub fn new(cables: PrefixSet, exempt: PrefixSet) -> Self {
        Self { cables, exempt }
    }
}

fn is_center_node(cable: &ObjectPathEntry) -> bool {
    let end_is_zero = |name: &str, default: f64| match cable.var(name) {
        Some(value) => value.as_number() == Some(0.0),
        None => default == 0.0,
    };
    end_is_zero("d1", 0.0) || end_is_zero("d2", 1.0)
}

impl Rule for DuplicateCenterCable {
    fn id(&self) -> &str {
        Self::ID
    }

    fn description(&self) -> &str {
        "more than one cable on a tile has a center node"
    }

    fn evaluate(&self, tile: &ResolvedTile<'_>) -> Vec<Finding> {
        // Long runs of reinforced window spawners conventionally carry two
        // center nodes.
        if self.exempt.any_in(tile) {
            return Vec::new();
        }

        let centers = self
            .cables
            .entries_in(tile)
            .filter(|cable| is_center_node(cable))
            .count();

        if centers > 1 {
            vec![Finding::new(Self::MESSAGE)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, TileKey, Value};

    fn rule() -> DuplicateCenterCable {
        DuplicateCenterCable::new(
            PrefixSet::new(["/obj/structure/cable"]),
            PrefixSet::new(["/obj/effect/spawner/window/reinforced"]),
        )
    }

    fn cable(d1: Option<i64>, d2: Option<i64>) -> ObjectPathEntry {
        let mut entry = ObjectPathEntry::new("/obj/structure/cable");
        if let Some(d1) = d1 {
            entry = entry.with_var("d1", Value::Number(d1.into()));
        }
        if let Some(d2) = d2 {
            entry = entry.with_var("d2", Value::Number(d2.into()));
        }
        entry
    }

    fn findings(entries: &[ObjectPathEntry]) -> Vec<Finding> {
        let key = TileKey::new("aa");
        let tile = ResolvedTile {
            coord: Coord::new(1, 1, 1),
            key: &key,
            entries,
        };
        rule().evaluate(&tile)
    }

    #[test]
    fn test_center_node_defaults() {
        assert!(is_center_node(&cable(None, None)));
        assert!(is_center_node(&cable(Some(0), Some(4))));
        assert!(is_center_node(&cable(Some(4), Some(0))));
        assert!(!is_center_node(&cable(Some(1), Some(2))));
        assert!(!is_center_node(&cable(Some(1), None)));
    }

    #[test]
    fn test_two_center_nodes() {
        let found = findings(&[cable(Some(0), Some(4)), cable(Some(0), Some(8))]);
        assert_eq!(found, vec![Finding::new(DuplicateCenterCable::MESSAGE)]);
    }

    #[test]
    fn test_subtype_cables_count() {
        let found = findings(&[
            ObjectPathEntry::new("/obj/structure/cable"),
            ObjectPathEntry::new("/obj/structure/cable/yellow"),
        ]);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_single_center_node() {
        assert!(findings(&[cable(Some(0), Some(4)), cable(Some(1), Some(2))]).is_empty());
        assert!(findings(&[cable(None, None)]).is_empty());
    }

    #[test]
    fn test_window_spawner_exempt() {
        let found = findings(&[
            ObjectPathEntry::new("/obj/effect/spawner/window/reinforced"),
            cable(Some(0), Some(4)),
            cable(Some(0), Some(8)),
        ]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_text_end_is_not_zero() {
        let odd = ObjectPathEntry::new("/obj/structure/cable")
            .with_var("d1", Value::Text("0".to_string()))
            .with_var("d2", Value::Number(2.into()));
        assert!(!is_center_node(&odd));
    }
}
