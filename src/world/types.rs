use super::*;

pub(crate) const IDENTITY_QUATERNION: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
pub(crate) const UNIT_SCALE: [f64; 3] = [1.0, 1.0, 1.0];

/// One record of the world's `entities` array. Fields this tool never looks at are kept verbatim.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub(crate) struct Entity(pub Value);

impl Entity {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn blueprint(&self) -> Option<&str> {
        self.0.get("blueprint").and_then(Value::as_str)
    }

    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }
}

/// The parsed world file. Root keys other than `entities` keep their values and position.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WorldDocument {
    pub(super) root: Map<String, Value>,
    pub entities: Vec<Entity>,
}

impl WorldDocument {
    pub fn find(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == Some(id))
    }
}

impl serde::Serialize for WorldDocument {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.root.len()))?;
        for (key, value) in &self.root {
            if key == "entities" {
                map.serialize_entry(key, &self.entities)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// A validated transforms-file item.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transform {
    pub id: Option<String>,
    pub position: [f64; 3],
    pub quaternion: Option<[f64; 4]>,
    pub scale: Option<[f64; 3]>,
    pub pinned: Option<bool>,
    pub props: Option<Map<String, Value>>,
    pub state: Option<Map<String, Value>>,
}

pub(crate) fn vector_value<const N: usize>(v: &[f64; N]) -> Value {
    Value::Array(v.iter().copied().map(number_value).collect())
}

// Whole numbers go back out as integers so `[1,2,3]` doesn't become `[1.0,2.0,3.0]`.
// `-0.0` stays a float; `as i64` would drop the sign.
fn number_value(n: f64) -> Value {
    let negative_zero = n == 0.0 && n.is_sign_negative();
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 && !negative_zero {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
