//! Named shader uniforms.

/// A texture bound to a sampler uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    /// Texture unit the sampler reads from.
    pub unit: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Texture(TextureRef),
}

impl UniformValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// Insertion-ordered uniform map.
///
/// Only a handful of entries ever exist, so lookups are linear.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UniformSet {
    entries: Vec<(String, UniformValue)>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: UniformValue) -> Self {
        self.set(name, value);
        self
    }

    /// Inserts or replaces `name`.
    pub fn set(&mut self, name: &str, value: UniformValue) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.set(name, UniformValue::Float(value));
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(UniformValue::as_float)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut set = UniformSet::new()
            .with("time", UniformValue::Float(1.0))
            .with("resolution", UniformValue::Vec2([0.0, 0.0]));
        set.set_float("time", 2.5);
        assert_eq!(set.len(), 2);
        assert_eq!(set.float("time"), Some(2.5));
        assert_eq!(set.iter().next().map(|(n, _)| n), Some("time"));
        assert_eq!(set.float("resolution"), None);
        assert!(!set.contains("uProgress"));
    }
}
