use std::fmt;
use serde_json::Value;
use crate::error::TrackerError;

const ENDPOINT: &str = "astros";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RosterEntry {
    pub(crate) craft: String,
    pub(crate) name: String,
}

/// People currently in space, in the order the endpoint lists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RosterSnapshot {
    pub(crate) count: usize,
    pub(crate) entries: Vec<RosterEntry>,
}

fn text_field(person: &Value, index: usize, field: &str) -> Result<String, TrackerError> {
    person.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| TrackerError::missing(ENDPOINT, format!("people[{index}].{field}")))
}

///
/// Reads `number` and the `people` list of an astros response.
///
/// The declared count must match the number of people listed.
///
pub(crate) fn parse_roster(json: &Value) -> Result<RosterSnapshot, TrackerError> {
    let declared = json.get("number")
        .ok_or_else(|| TrackerError::missing(ENDPOINT, "number"))?;
    let declared = declared.as_u64()
        .ok_or_else(|| TrackerError::invalid(ENDPOINT, "number", declared))?;

    let people = json.get("people")
        .ok_or_else(|| TrackerError::missing(ENDPOINT, "people"))?;
    let people = people.as_array()
        .ok_or_else(|| TrackerError::invalid(ENDPOINT, "people", people))?;

    let entries = people.iter()
        .enumerate()
        .map(|(index, person)| -> Result<RosterEntry, TrackerError> {
            Ok(RosterEntry {
                craft: text_field(person, index, "craft")?,
                name: text_field(person, index, "name")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if usize::try_from(declared).ok() != Some(entries.len()) {
        return Err(TrackerError::CountMismatch { declared, actual: entries.len() });
    }

    Ok(RosterSnapshot { count: entries.len(), entries })
}

impl fmt::Display for RosterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of Astronauts:{}", self.count)?;
        for entry in &self.entries {
            writeln!(f, "Spacecraft:{}---Name:{}", entry.craft, entry.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    fn crew(size: usize) -> Value {
        let people: Vec<Value> = (0..size)
            .map(|i| json!({"name": format!("Astronaut {i}"), "craft": if i % 2 == 0 { "ISS" } else { "Tiangong" }}))
            .collect();
        json!({"message": "success", "number": size, "people": people})
    }

    #[test]
    fn test_summary() {
        let json = json!({"number": 2, "people": [
            {"name": "A", "craft": "ISS"},
            {"name": "B", "craft": "ISS"},
        ]});
        let roster = parse_roster(&json).unwrap();

        assert_eq!(roster.to_string(),
                   "Number of Astronauts:2\nSpacecraft:ISS---Name:A\nSpacecraft:ISS---Name:B\n");
    }

    #[test]
    fn test_order_preserved() {
        for size in [0, 1, 7] {
            let roster = parse_roster(&crew(size)).unwrap();
            assert_eq!(roster.count, size);
            assert_eq!(roster.entries.len(), size);

            for (i, entry) in roster.entries.iter().enumerate() {
                assert_eq!(entry.name, format!("Astronaut {i}"));
            }

            let summary = roster.to_string();
            assert_eq!(summary.lines().count(), size + 1);
            assert_eq!(summary.lines().next().unwrap(), format!("Number of Astronauts:{size}"));
        }
    }

    #[test]
    fn test_duplicates_kept() {
        let json = json!({"number": 2, "people": [
            {"name": "Same", "craft": "ISS"},
            {"name": "Same", "craft": "ISS"},
        ]});

        assert_eq!(parse_roster(&json).unwrap().entries.len(), 2);
    }

    #[test]
    fn test_count_mismatch() {
        let json = json!({"number": 3, "people": [{"name": "A", "craft": "ISS"}]});

        assert!(matches!(parse_roster(&json),
                         Err(TrackerError::CountMismatch { declared: 3, actual: 1 })));
    }

    #[test]
    fn test_missing_fields() {
        let err = parse_roster(&json!({"people": []})).unwrap_err();
        assert!(matches!(err, TrackerError::MissingField { field, .. } if field == "number"));

        let err = parse_roster(&json!({"number": 1, "people": [{"name": "A"}]})).unwrap_err();
        assert!(matches!(err, TrackerError::MissingField { field, .. } if field == "people[0].craft"));
    }

    #[test]
    fn test_idempotent() {
        let json = crew(3);
        assert_eq!(parse_roster(&json).unwrap(), parse_roster(&json).unwrap());
    }
}
