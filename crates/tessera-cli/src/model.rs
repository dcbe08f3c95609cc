//! Loading class diagrams from TOML model descriptions.
//!
//! A model description lists classes and the relationships between them.
//! Classes and relationship endpoints refer to each other by class name:
//!
//! ```toml
//! [[class]]
//! name = "Animal"
//! methods = [{ name = "speak", type = "void" }]
//!
//! [[class]]
//! name = "Dog"
//! parent = "Animal"
//! x = 50
//! y = 50
//! width = 40
//! height = 20
//! methods = [
//!     { name = "bark", type = "void" },
//!     { name = "speak", visibility = "public", type = "void" },
//! ]
//!
//! [[relationship]]
//! from = "Dog"
//! to = "Animal"
//! from_anchor = "up"
//! to_anchor = "down"
//! kind = "inheritance"
//! ```
//!
//! Omitted class names and sizes fall back to the configured class defaults.
//! The description is only read; nothing is ever written back.

use std::collections::HashMap;

use log::{debug, info};
use serde::Deserialize;
use toml::Spanned;

use tessera::{
    ClassDiagram, TesseraError,
    class::ClassEntity,
    config::DiagramConfig,
    geometry::{AnchorType, Point, Size},
    identifier::ClassId,
    member::{Member, MemberKind, Visibility},
    relationship::{Relationship, RelationshipKind},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelFile {
    #[serde(default, rename = "class")]
    classes: Vec<ClassDecl>,
    #[serde(default, rename = "relationship")]
    relationships: Vec<RelationshipDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassDecl {
    name: Option<Spanned<String>>,
    parent: Option<Spanned<String>>,
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
    width: Option<u32>,
    height: Option<u32>,
    #[serde(default)]
    interface: bool,
    #[serde(default)]
    fields: Vec<MemberDecl>,
    #[serde(default)]
    methods: Vec<MemberDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemberDecl {
    name: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(rename = "type")]
    data_type: Option<String>,
}

impl MemberDecl {
    fn to_member(&self, kind: MemberKind) -> Member {
        let member = Member::new(self.name.as_str(), self.visibility, kind);
        match &self.data_type {
            Some(data_type) => member.with_data_type(data_type.as_str()),
            None => member,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RelationshipDecl {
    from: Spanned<String>,
    to: Spanned<String>,
    #[serde(default = "default_from_anchor")]
    from_anchor: AnchorType,
    #[serde(default = "default_to_anchor")]
    to_anchor: AnchorType,
    #[serde(default)]
    from_cardinality: String,
    #[serde(default)]
    to_cardinality: String,
    #[serde(default)]
    kind: RelationshipKind,
}

fn default_from_anchor() -> AnchorType {
    AnchorType::Right
}

fn default_to_anchor() -> AnchorType {
    AnchorType::Left
}

/// Builds a class diagram from the TOML model description in `source`.
///
/// Classes are added in declaration order, so a class's declaration order
/// is its positional index. Parents and relationship endpoints may refer to
/// classes declared later in the file.
///
/// # Errors
///
/// Returns [`TesseraError::Model`] when the description is not valid TOML,
/// does not match the expected layout, declares a class name twice, or
/// refers to a class name that is not declared.
pub fn build_diagram(source: &str, config: &DiagramConfig) -> Result<ClassDiagram, TesseraError> {
    let model: ModelFile = toml::from_str(source).map_err(|err| {
        TesseraError::new_model_error(err.message().to_string(), err.span(), source)
    })?;

    let mut diagram = ClassDiagram::with_config(config.clone());
    let mut names: HashMap<&str, ClassId> = HashMap::new();
    let mut ids = Vec::with_capacity(model.classes.len());

    for decl in &model.classes {
        let id = diagram.add_class(class_from_decl(decl, config));
        if let Some(name) = &decl.name {
            if names.insert(name.get_ref().as_str(), id).is_some() {
                return Err(TesseraError::new_model_error(
                    format!("class `{}` is declared more than once", name.get_ref()),
                    Some(name.span()),
                    source,
                ));
            }
        }
        ids.push(id);
    }

    let lookup = |name: &Spanned<String>| {
        names.get(name.get_ref().as_str()).copied().ok_or_else(|| {
            TesseraError::new_model_error(
                format!("unknown class `{}`", name.get_ref()),
                Some(name.span()),
                source,
            )
        })
    };

    for (decl, &id) in model.classes.iter().zip(&ids) {
        if let Some(parent) = &decl.parent {
            let parent_id = lookup(parent)?;
            diagram.set_parent(id, parent_id)?;
        }
    }

    for decl in &model.relationships {
        let relationship = Relationship::new(
            lookup(&decl.from)?,
            decl.from_anchor,
            lookup(&decl.to)?,
            decl.to_anchor,
            decl.kind,
        )
        .with_cardinalities(decl.from_cardinality.as_str(), decl.to_cardinality.as_str());
        let id = diagram.add_relationship(relationship)?;
        debug!(relationship:% = id, kind:% = decl.kind; "Added relationship");
    }

    info!(
        classes = diagram.len(),
        relationships = model.relationships.len();
        "Model loaded"
    );
    Ok(diagram)
}

fn class_from_decl(decl: &ClassDecl, config: &DiagramConfig) -> ClassEntity {
    let defaults = config.class_defaults();
    let mut class = defaults.build();
    if let Some(name) = &decl.name {
        class.set_name(name.get_ref().as_str());
    }
    let size = Size::new(
        decl.width.unwrap_or(defaults.size().width()),
        decl.height.unwrap_or(defaults.size().height()),
    );

    class
        .with_position(Point::new(decl.x, decl.y))
        .with_size(size)
        .with_interface(decl.interface)
        .with_fields(decl.fields.iter().map(|field| field.to_member(MemberKind::Field)))
        .with_methods(decl.methods.iter().map(|method| method.to_member(MemberKind::Method)))
}

#[cfg(test)]
mod tests {
    use tessera::config::ClassDefaults;

    use super::*;

    fn build(source: &str) -> Result<ClassDiagram, TesseraError> {
        build_diagram(source, &DiagramConfig::default())
    }

    fn model_error(result: Result<ClassDiagram, TesseraError>) -> (String, Option<String>) {
        match result {
            Err(TesseraError::Model { message, span, src }) => {
                (message, span.map(|span| src[span].to_string()))
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("model should have been rejected"),
        }
    }

    #[test]
    fn test_builds_classes_in_declaration_order() {
        let diagram = build(
            r#"
            [[class]]
            name = "Dog"
            parent = "Animal"
            x = 50
            y = 50
            width = 40
            height = 20
            methods = [{ name = "speak", type = "void" }, { name = "bark" }]

            [[class]]
            name = "Animal"
            interface = true
            fields = [{ name = "age", visibility = "private", type = "int" }]
            methods = [{ name = "speak", type = "void" }]
            "#,
        )
        .expect("valid model");

        assert_eq!(diagram.len(), 2);
        let dog = diagram.class_id_at(0).expect("dog is first");
        assert_eq!(diagram.parent_index_of(dog), Some(1));
        assert_eq!(diagram.class_at(0).anchor(AnchorType::Right), Point::new(90, 60));

        let animal = diagram.class_at(1);
        assert!(animal.is_interface());
        assert_eq!(animal.fields()[0].to_string(), "-age: int");

        let overrides = diagram
            .overridden_methods(dog)
            .expect("dog is in the diagram")
            .expect("dog has a parent");
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn test_defaults_fill_missing_name_and_size() {
        let config = DiagramConfig::new(ClassDefaults::new("Untitled", Size::new(80, 40)));
        let diagram = build_diagram("[[class]]\nwidth = 20\n", &config).expect("valid model");

        let class = diagram.class_at(0);
        assert_eq!(class.name(), "Untitled");
        assert_eq!(class.size(), Size::new(20, 40));
    }

    #[test]
    fn test_relationship_defaults() {
        let diagram = build(
            r#"
            [[class]]
            name = "A"
            [[class]]
            name = "B"
            [[relationship]]
            from = "A"
            to = "B"
            "#,
        )
        .expect("valid model");

        let (_, relationship) = diagram.relationships().next().expect("one relationship");
        assert_eq!(relationship.kind(), RelationshipKind::Association);
        assert_eq!(relationship.from_anchor(), AnchorType::Right);
        assert_eq!(relationship.to_anchor(), AnchorType::Left);
        assert_eq!(relationship.from_cardinality(), "");
    }

    #[test]
    fn test_unknown_parent_is_reported_with_span() {
        let (message, snippet) = model_error(build(
            r#"
            [[class]]
            name = "Dog"
            parent = "Wolf"
            "#,
        ));

        assert_eq!(message, "unknown class `Wolf`");
        assert_eq!(snippet.as_deref(), Some("\"Wolf\""));
    }

    #[test]
    fn test_unknown_relationship_endpoint_is_reported() {
        let (message, _) = model_error(build(
            r#"
            [[class]]
            name = "A"
            [[relationship]]
            from = "A"
            to = "Ghost"
            "#,
        ));

        assert_eq!(message, "unknown class `Ghost`");
    }

    #[test]
    fn test_duplicate_class_name_is_rejected() {
        let (message, _) = model_error(build(
            r#"
            [[class]]
            name = "A"
            [[class]]
            name = "A"
            "#,
        ));

        assert_eq!(message, "class `A` is declared more than once");
    }

    #[test]
    fn test_invalid_toml_is_a_model_error() {
        let (_, snippet) = model_error(build("[[class]]\nname = \n"));
        assert!(snippet.is_some());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let (message, _) = model_error(build("[[class]]\nname = \"A\"\ncolour = \"red\"\n"));
        assert!(message.contains("colour"));
    }
}
