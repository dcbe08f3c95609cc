//! Configuration types for Tessera diagrams.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every section falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`DiagramConfig`] - Settings applied by a [`ClassDiagram`](crate::ClassDiagram).
//! - [`ClassDefaults`] - Name and box size of classes created without explicit values.
//!
//! # Example
//!
//! ```
//! # use tessera::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.diagram().class_defaults().name(), "defaultName");
//! ```

use serde::Deserialize;

use tessera_core::{
    class::{ClassEntity, DEFAULT_CLASS_NAME, DEFAULT_CLASS_SIZE},
    geometry::Size,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagram configuration section.
    #[serde(default)]
    diagram: DiagramConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given diagram configuration.
    pub fn new(diagram: DiagramConfig) -> Self {
        Self { diagram }
    }

    /// Returns the diagram configuration.
    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }
}

/// Settings applied by a class diagram container.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagramConfig {
    /// Defaults for classes created without explicit values.
    #[serde(default)]
    class_defaults: ClassDefaults,
}

impl DiagramConfig {
    pub fn new(class_defaults: ClassDefaults) -> Self {
        Self { class_defaults }
    }

    /// Returns the defaults used for new classes.
    pub fn class_defaults(&self) -> &ClassDefaults {
        &self.class_defaults
    }
}

/// Name and box size of classes created without explicit values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassDefaults {
    name: String,
    width: u32,
    height: u32,
}

impl Default for ClassDefaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_CLASS_NAME.to_string(),
            width: DEFAULT_CLASS_SIZE.width(),
            height: DEFAULT_CLASS_SIZE.height(),
        }
    }
}

impl ClassDefaults {
    /// Creates class defaults with the given name and box size.
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            width: size.width(),
            height: size.height(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Builds a fresh class entity from these defaults, positioned at the origin.
    pub fn build(&self) -> ClassEntity {
        ClassEntity::new(self.name.as_str()).with_size(self.size())
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::geometry::{AnchorType, Point};

    use super::*;

    #[test]
    fn test_default_matches_class_defaults() {
        let defaults = ClassDefaults::default();
        let class = defaults.build();

        assert_eq!(defaults.name(), "defaultName");
        assert_eq!(defaults.size(), Size::new(10, 10));
        assert_eq!(class.name(), "defaultName");
        assert_eq!(class.anchor(AnchorType::Down), Point::new(5, 10));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [diagram.class_defaults]
            width = 120
            "#,
        )
        .expect("valid configuration");

        let defaults = config.diagram().class_defaults();
        assert_eq!(defaults.name(), "defaultName");
        assert_eq!(defaults.size(), Size::new(120, 10));
    }

    #[test]
    fn test_deserialize_empty_config() {
        let config: AppConfig = toml::from_str("").expect("empty configuration is valid");
        assert_eq!(config.diagram().class_defaults(), &ClassDefaults::default());
    }

    #[test]
    fn test_custom_defaults_build() {
        let defaults = ClassDefaults::new("Untitled", Size::new(80, 40));
        let class = defaults.build();

        assert_eq!(class.name(), "Untitled");
        assert_eq!(class.anchor(AnchorType::Right), Point::new(80, 20));
    }
}
