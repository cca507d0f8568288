use super::error::{Result, StateError};
use crate::world::facing::Facing;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// How a block links to its neighbor on one horizontal face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Short,
    /// Reserved. Round-trips through the codec but no resolver produces it yet.
    Tall,
}

impl ConnectionType {
    /// Packed code for an optional connection; 0 is "not connected".
    pub const fn code(connection: Option<ConnectionType>) -> u64 {
        match connection {
            None => 0,
            Some(ConnectionType::Short) => 1,
            Some(ConnectionType::Tall) => 2,
        }
    }

    /// Inverse of `code`. Unassigned codes read as "not connected".
    pub const fn from_code(code: u64) -> Option<ConnectionType> {
        match code {
            1 => Some(ConnectionType::Short),
            2 => Some(ConnectionType::Tall),
            _ => None,
        }
    }
}

/// Connection per horizontal face. A face without an entry is unconnected.
///
/// Slots are indexed by `Facing::horizontal_index`, so a vertical face can
/// never hold an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConnectionSet {
    slots: [Option<ConnectionType>; 4],
}

impl ConnectionSet {
    pub const fn new() -> Self {
        Self { slots: [None; 4] }
    }

    pub fn get(&self, face: Facing) -> Option<ConnectionType> {
        face.horizontal_index().and_then(|i| self.slots[i])
    }

    pub fn contains(&self, face: Facing) -> bool {
        self.get(face).is_some()
    }

    /// Set or clear the connection on `face`. Vertical faces are rejected.
    pub fn set(&mut self, face: Facing, connection: Option<ConnectionType>) -> Result<()> {
        let index = face.horizontal_index().ok_or_else(|| {
            StateError::domain(
                "connections",
                format!("face can only be north, east, south or west, got {}", face.name()),
            )
        })?;
        self.slots[index] = connection;
        Ok(())
    }

    /// Builder form of `set` for horizontal faces.
    pub fn with(mut self, face: Facing, connection: ConnectionType) -> Result<Self> {
        self.set(face, Some(connection))?;
        Ok(self)
    }

    /// Connected faces in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Facing, ConnectionType)> + '_ {
        Facing::HORIZONTAL
            .into_iter()
            .zip(self.slots)
            .filter_map(|(face, slot)| slot.map(|connection| (face, connection)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Every distinct connection set (3^4 of them), for exhaustive checks.
    pub fn all() -> impl Iterator<Item = ConnectionSet> {
        (0..81u32).map(|mut n| {
            let mut set = ConnectionSet::new();
            for slot in &mut set.slots {
                *slot = ConnectionType::from_code(u64::from(n % 3));
                n /= 3;
            }
            set
        })
    }

    pub(crate) fn slots(&self) -> &[Option<ConnectionType>; 4] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Option<ConnectionType>; 4] {
        &mut self.slots
    }
}

impl Serialize for ConnectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (face, connection) in self.iter() {
            map.serialize_entry(&face, &connection)?;
        }
        map.end()
    }
}
