use skycast_weather::{PlaceDescriptor, UnitSystem};

/// Per-session dashboard state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current_place: Option<PlaceDescriptor>,
    pub current_unit: UnitSystem,
}

impl SessionState {
    pub fn new(unit: UnitSystem) -> Self {
        Self {
            current_place: None,
            current_unit: unit,
        }
    }

    pub fn current_place_name(&self) -> Option<&str> {
        self.current_place.as_ref().map(|p| p.name())
    }
}
