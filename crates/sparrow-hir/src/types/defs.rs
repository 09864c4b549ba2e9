//! Type shapes.

use std::fmt;

use smol_str::SmolStr;

use crate::decls::{Attribute, EffectSpecifiers};

/// How a collection type was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceForm {
    /// `[T]`, `[K: V]`
    Bracket,
    /// `Array<T>`, `Dictionary<K, V>`, `Set<T>`
    Generic,
}

/// The syntactic shape of a type expression.
///
/// Every variant except [`EntityType::Empty`] records whether the type is
/// optional (`T?` or `T!`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntityType {
    /// A named type: `Int`, `Swift.String`, `Box<T>`.
    Simple {
        /// The type text as written.
        name: SmolStr,
        /// Whether the type is optional.
        optional: bool,
    },
    /// A tuple with two or more elements.
    Tuple {
        /// The elements in order.
        elements: Vec<Parameter>,
        /// Whether the tuple is optional.
        optional: bool,
    },
    /// A function type.
    Closure(ClosureType),
    /// `[T]` or `Array<T>`.
    Array {
        /// Element type.
        element: Box<EntityType>,
        /// How the type was spelled.
        form: SurfaceForm,
        /// Whether the array is optional.
        optional: bool,
    },
    /// `[K: V]` or `Dictionary<K, V>`.
    Dictionary {
        /// Key type.
        key: Box<EntityType>,
        /// Value type.
        value: Box<EntityType>,
        /// How the type was spelled.
        form: SurfaceForm,
        /// Whether the dictionary is optional.
        optional: bool,
    },
    /// `Set<T>`.
    Set {
        /// Element type.
        element: Box<EntityType>,
        /// How the type was spelled.
        form: SurfaceForm,
        /// Whether the set is optional.
        optional: bool,
    },
    /// `Result<Success, Failure>`.
    Result {
        /// Success type.
        success: Box<EntityType>,
        /// Failure type.
        failure: Box<EntityType>,
        /// Whether the result is optional.
        optional: bool,
    },
    /// `Void` or `()`.
    Void {
        /// Whether the type is optional.
        optional: bool,
    },
    /// No type, or a shape outside this classification.
    #[default]
    Empty,
}

/// A function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureType {
    /// Input parameters.
    pub input: Vec<Parameter>,
    /// Output type.
    pub output: Box<EntityType>,
    /// `async`/`throws` text.
    pub effects: EffectSpecifiers,
    /// Marked `@escaping` by an enclosing attributed type.
    pub is_escaping: bool,
    /// Wrapped in an optional.
    pub optional: bool,
}

impl ClosureType {
    /// Returns `true` for `()` or `(Void)` input.
    #[must_use]
    pub fn is_void_input(&self) -> bool {
        match self.input.as_slice() {
            [] => true,
            [only] => matches!(only.ty, EntityType::Void { .. }),
            _ => false,
        }
    }

    /// Returns `true` for `Void` or `()` output.
    #[must_use]
    pub fn is_void_output(&self) -> bool {
        matches!(*self.output, EntityType::Void { .. })
    }

    /// Returns `true` if the closure is `async`.
    #[must_use]
    pub fn is_async(&self) -> bool {
        self.effects.async_specifier.is_some()
    }

    /// Returns `true` if the closure throws.
    #[must_use]
    pub fn is_throwing(&self) -> bool {
        self.effects.throws_specifier.is_some()
    }
}

impl EntityType {
    /// A non-optional simple type.
    #[must_use]
    pub fn simple(name: impl Into<SmolStr>) -> Self {
        Self::Simple {
            name: name.into(),
            optional: false,
        }
    }

    /// A non-optional `Void`.
    #[must_use]
    pub fn void() -> Self {
        Self::Void { optional: false }
    }

    /// Returns `true` if the type is optional.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Simple { optional, .. }
            | Self::Tuple { optional, .. }
            | Self::Array { optional, .. }
            | Self::Dictionary { optional, .. }
            | Self::Set { optional, .. }
            | Self::Result { optional, .. }
            | Self::Void { optional } => *optional,
            Self::Closure(closure) => closure.optional,
            Self::Empty => false,
        }
    }

    /// Returns `true` for [`EntityType::Empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The recorded surface form of a collection type.
    #[must_use]
    pub fn surface_form(&self) -> Option<SurfaceForm> {
        match self {
            Self::Array { form, .. } | Self::Dictionary { form, .. } | Self::Set { form, .. } => {
                Some(*form)
            }
            _ => None,
        }
    }

    /// Marks the type optional when `optional` is set. `Empty` stays empty.
    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        if !optional {
            return self;
        }
        match &mut self {
            Self::Simple { optional, .. }
            | Self::Tuple { optional, .. }
            | Self::Array { optional, .. }
            | Self::Dictionary { optional, .. }
            | Self::Set { optional, .. }
            | Self::Result { optional, .. }
            | Self::Void { optional } => *optional = true,
            Self::Closure(closure) => closure.optional = true,
            Self::Empty => {}
        }
        self
    }

    /// The same type with every collection surface form replaced, nested
    /// element, key, value, tuple and closure types included.
    ///
    /// Parameter `type_text` keeps its original spelling.
    #[must_use]
    pub fn with_form(mut self, new_form: SurfaceForm) -> Self {
        match &mut self {
            Self::Array { element, form, .. } | Self::Set { element, form, .. } => {
                *form = new_form;
                reform(element, new_form);
            }
            Self::Dictionary {
                key, value, form, ..
            } => {
                *form = new_form;
                reform(key, new_form);
                reform(value, new_form);
            }
            Self::Result {
                success, failure, ..
            } => {
                reform(success, new_form);
                reform(failure, new_form);
            }
            Self::Tuple { elements, .. } => {
                for element in elements {
                    reform(&mut element.ty, new_form);
                }
            }
            Self::Closure(closure) => {
                for parameter in &mut closure.input {
                    reform(&mut parameter.ty, new_form);
                }
                reform(&mut closure.output, new_form);
            }
            Self::Simple { .. } | Self::Void { .. } | Self::Empty => {}
        }
        self
    }
}

fn reform(ty: &mut EntityType, form: SurfaceForm) {
    *ty = std::mem::take(ty).with_form(form);
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { name, .. } => write!(f, "{name}")?,
            Self::Tuple { elements, .. } => {
                write!(f, "(")?;
                write_parameters(f, elements)?;
                write!(f, ")")?;
            }
            Self::Closure(closure) => {
                if closure.is_escaping {
                    write!(f, "@escaping ")?;
                }
                if closure.optional {
                    write!(f, "(")?;
                }
                write!(f, "(")?;
                write_parameters(f, &closure.input)?;
                write!(f, ")")?;
                if let Some(effect) = &closure.effects.async_specifier {
                    write!(f, " {effect}")?;
                }
                if let Some(effect) = &closure.effects.throws_specifier {
                    write!(f, " {effect}")?;
                }
                write!(f, " -> {}", closure.output)?;
                if closure.optional {
                    write!(f, ")")?;
                }
            }
            Self::Array { element, form, .. } => match form {
                SurfaceForm::Bracket => write!(f, "[{element}]")?,
                SurfaceForm::Generic => write!(f, "Array<{element}>")?,
            },
            Self::Dictionary {
                key, value, form, ..
            } => match form {
                SurfaceForm::Bracket => write!(f, "[{key}: {value}]")?,
                SurfaceForm::Generic => write!(f, "Dictionary<{key}, {value}>")?,
            },
            Self::Set { element, .. } => write!(f, "Set<{element}>")?,
            Self::Result {
                success, failure, ..
            } => write!(f, "Result<{success}, {failure}>")?,
            Self::Void { .. } => write!(f, "Void")?,
            Self::Empty => return Ok(()),
        }
        if self.is_optional() {
            write!(f, "?")?;
        }
        Ok(())
    }
}

fn write_parameters(f: &mut fmt::Formatter<'_>, parameters: &[Parameter]) -> fmt::Result {
    for (index, parameter) in parameters.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        if let Some(label) = &parameter.label {
            write!(f, "{label}: ")?;
        }
        write!(f, "{}", parameter.ty)?;
        if parameter.is_variadic {
            write!(f, "...")?;
        }
    }
    Ok(())
}

/// A function or subscript parameter, tuple element, closure input or enum
/// associated value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameter {
    /// External label; `None` when omitted or written `_`.
    pub label: Option<SmolStr>,
    /// Internal name; the label when only one name is written.
    pub name: Option<SmolStr>,
    /// Classified type.
    pub ty: EntityType,
    /// Type text as written.
    pub type_text: Option<String>,
    /// `T...`
    pub is_variadic: bool,
    /// `inout T`
    pub is_inout: bool,
    /// Default value text.
    pub default_value: Option<String>,
    /// Attributes on the parameter or its type.
    pub attributes: Vec<Attribute>,
    /// The label was written as `_`.
    pub is_label_omitted: bool,
}

impl Parameter {
    /// Returns `true` if the parameter type is optional.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.ty.is_optional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_optional_leaves_empty_alone() {
        assert_eq!(EntityType::Empty.with_optional(true), EntityType::Empty);
        assert!(EntityType::simple("Int").with_optional(true).is_optional());
        assert!(!EntityType::simple("Int").with_optional(false).is_optional());
    }

    #[test]
    fn test_display() {
        let dictionary = EntityType::Dictionary {
            key: Box::new(EntityType::simple("String")),
            value: Box::new(EntityType::simple("Int").with_optional(true)),
            form: SurfaceForm::Bracket,
            optional: true,
        };
        assert_eq!(dictionary.to_string(), "[String: Int?]?");
        assert_eq!(
            dictionary.with_form(SurfaceForm::Generic).to_string(),
            "Dictionary<String, Int?>?"
        );
    }

    #[test]
    fn test_with_form_reaches_nested_collections() {
        let bracket_array = |element| EntityType::Array {
            element: Box::new(element),
            form: SurfaceForm::Bracket,
            optional: false,
        };
        let closure = EntityType::Closure(ClosureType {
            input: vec![Parameter {
                ty: bracket_array(EntityType::simple("Int")),
                ..Parameter::default()
            }],
            output: Box::new(EntityType::Dictionary {
                key: Box::new(EntityType::simple("String")),
                value: Box::new(bracket_array(EntityType::simple("Double"))),
                form: SurfaceForm::Bracket,
                optional: false,
            }),
            effects: EffectSpecifiers::default(),
            is_escaping: false,
            optional: false,
        });
        assert_eq!(closure.to_string(), "([Int]) -> [String: [Double]]");
        assert_eq!(
            closure.with_form(SurfaceForm::Generic).to_string(),
            "(Array<Int>) -> Dictionary<String, Array<Double>>"
        );

        let nested = bracket_array(bracket_array(EntityType::simple("Int")));
        let EntityType::Array { element, form, .. } = nested.with_form(SurfaceForm::Generic) else {
            panic!("expected array");
        };
        assert_eq!(form, SurfaceForm::Generic);
        assert_eq!(element.surface_form(), Some(SurfaceForm::Generic));
    }

    #[test]
    fn test_void_input_and_output() {
        let closure = ClosureType {
            input: vec![Parameter {
                ty: EntityType::void(),
                ..Parameter::default()
            }],
            output: Box::new(EntityType::void()),
            effects: EffectSpecifiers::default(),
            is_escaping: false,
            optional: false,
        };
        assert!(closure.is_void_input());
        assert!(closure.is_void_output());
        assert!(!closure.is_async());
    }
}
