//! Seasonal events selectable through `ActiveEvent`.

use serde::Serialize;

use crate::error::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventStatus {
    Working,
    ComingSoon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventDefinition {
    pub name: &'static str,
    pub status: EventStatus,
    pub description: &'static str,
}

impl EventDefinition {
    /// Picker label; events that are not live yet are marked.
    pub fn label(&self) -> String {
        match self.status {
            EventStatus::Working => self.name.to_string(),
            EventStatus::ComingSoon => format!("{} (Coming Soon)", self.name),
        }
    }
}

const fn working(name: &'static str, description: &'static str) -> EventDefinition {
    EventDefinition {
        name,
        status: EventStatus::Working,
        description,
    }
}

pub static EVENTS: &[EventDefinition] = &[
    working("None", "No active event"),
    working("WinterWonderland", "Winter holiday event - cosmetics and bonuses"),
    working("WinterWonderland2", "Winter 2nd year event"),
    working("WinterWonderland3", "Winter 3rd year event"),
    working("WinterWonderland4", "Winter 4th year event"),
    working("WinterWonderland5", "Winter 5th year event"),
    working("WinterWonderland6", "Winter 6th year event"),
    working("WinterWonderland7", "Winter 7th year event"),
    working("Easter", "Eggcellent Adventure - Easter egg hunt themes"),
    working("SummerBash", "Summer vacation event - beach themes"),
    working("FearEvolved", "Fear Evolved/Fear Ascended - Halloween spooky creatures"),
    working("TurkeyTrial", "Turkey Trial - Thanksgiving event with challenges"),
    working("LoveEvolved", "Love Evolved - Valentine breeding event bonuses"),
    working("Birthday", "Birthday/Anniversary event - celebration bonuses"),
    working("EvolutionEvent", "Evolution Event - creature variant spawns"),
    working("ExtraLife", "Extra Life event - charity event bonuses"),
    working("ARKaeology", "ARKaeology - artifact discovery event"),
    working("ARKdependenceDay", "ARKdependence Day - July 4th themed event"),
];

/// Exact-name lookup; the server matches event names verbatim.
pub fn find(name: &str) -> Result<&'static EventDefinition, SettingsError> {
    EVENTS
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| SettingsError::UnknownEvent(name.to_string()))
}

/// Events ordered by name, as shown in pickers.
pub fn sorted() -> Vec<&'static EventDefinition> {
    let mut events: Vec<_> = EVENTS.iter().collect();
    events.sort_by(|a, b| a.name.cmp(b.name));
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_an_event() {
        assert_eq!(find("None").unwrap().status, EventStatus::Working);
        assert!(matches!(find("none"), Err(SettingsError::UnknownEvent(_))));
    }

    #[test]
    fn sorted_by_name() {
        let names: Vec<&str> = sorted().iter().map(|e| e.name).collect();
        assert_eq!(names.len(), 18);
        assert_eq!(names[0], "ARKaeology");
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn coming_soon_label() {
        let event = EventDefinition {
            name: "Homecoming",
            status: EventStatus::ComingSoon,
            description: "",
        };
        assert_eq!(event.label(), "Homecoming (Coming Soon)");
        assert_eq!(find("Easter").unwrap().label(), "Easter");
    }
}
