// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_parser::{
    Pos, Positioned,
    types::{BaseType, Field, InputValueDefinition, TypeKind},
};
use async_graphql_value::{ConstValue, Name, Number, Value, indexmap::IndexMap};

use crate::{
    schema::Schema, type_normalization::underlying_type,
    validation::validation_error::ValidationError,
};

pub struct ArgumentValidator<'a> {
    schema: &'a Schema,
    variables: &'a HashMap<Name, ConstValue>,
    field: &'a Positioned<Field>,
}

impl<'a> ArgumentValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        variables: &'a HashMap<Name, ConstValue>,
        field: &'a Positioned<Field>,
    ) -> Self {
        Self {
            schema,
            variables,
            field,
        }
    }

    /// Validations performed:
    /// - Ensure that all required arguments are provided
    /// - Ensure that there are no stray arguments (arguments that are not defined in the field)
    /// - Ensure that each argument is compatible with its declared type
    pub(super) fn validate(
        &self,
        field_argument_definitions: &[&InputValueDefinition],
    ) -> Result<IndexMap<String, ConstValue>, ValidationError> {
        self.validate_arguments(
            field_argument_definitions,
            &self.field.node.arguments,
            false,
        )
    }

    fn validate_arguments(
        &self,
        field_argument_definitions: &[&InputValueDefinition],
        field_arguments: &[(Positioned<Name>, Positioned<Value>)],
        from_variable: bool,
    ) -> Result<IndexMap<String, ConstValue>, ValidationError> {
        let field_name = self.field.node.name.node.as_str();

        // Stray arguments tracking: 1. Maintain a map of all the arguments supplied in the query
        let mut field_arguments: IndexMap<_, _> = field_arguments
            .iter()
            .filter_map(|(name, value)| {
                // Clients that send back a previously queried object as an input tend to include
                // its `__typename`. That is not a stray argument.
                if name.node == "__typename" {
                    None
                } else {
                    Some((&name.node, value))
                }
            })
            .collect();

        let validated_arguments = field_argument_definitions
            .iter()
            .filter_map(|argument_definition| {
                let argument_name = &argument_definition.name.node;
                // Stray arguments tracking: 2. Remove the argument being processed
                let argument_value = field_arguments.shift_remove(argument_name);

                self.validate_argument(argument_definition, argument_value, from_variable)
                    .map(|argument_value| {
                        argument_value
                            .map(|argument_value| (argument_name.to_string(), argument_value))
                    })
            })
            .collect::<Result<_, _>>()?;

        // Stray arguments tracking: 3. Anything left is not defined by the field
        if !field_arguments.is_empty() {
            let stray_arguments = field_arguments
                .keys()
                .map(|name| name.to_string())
                .collect::<Vec<_>>();

            Err(ValidationError::StrayArguments(
                stray_arguments,
                field_name.to_string(),
                self.field.pos,
            ))
        } else {
            Ok(validated_arguments)
        }
    }

    /// Validate a single argument
    ///
    /// Validations performed:
    /// - If the argument is a variable, the variable is defined
    /// - A null value is specified only for a nullable argument
    /// - Scalars match the expected type (Int must fit in 32 bits, custom scalars must coerce)
    /// - Enum values are members of the enum
    /// - Objects match the expected shape (recursively)
    /// - Lists match the expected shape (a single value is accepted as a one-element list)
    ///
    /// Returns `None` for an absent nullable argument without a default value.
    fn validate_argument(
        &self,
        argument_definition: &InputValueDefinition,
        argument_value: Option<&Positioned<Value>>,
        from_variable: bool,
    ) -> Option<Result<ConstValue, ValidationError>> {
        let Some(value) = argument_value else {
            return match &argument_definition.default_value {
                Some(default_value) => Some(Ok(default_value.node.clone())),
                None if argument_definition.ty.node.nullable => None,
                None => Some(Err(ValidationError::RequiredArgumentNotFound(
                    argument_definition.name.node.to_string(),
                    self.field.pos,
                ))),
            };
        };

        if let BaseType::List(element_type) = &argument_definition.ty.node.base
            && !matches!(
                value.node,
                Value::List(_) | Value::Null | Value::Variable(_)
            )
        {
            let element_definition = InputValueDefinition {
                ty: Positioned::new(element_type.as_ref().clone(), value.pos),
                ..argument_definition.clone()
            };
            return self
                .validate_argument(&element_definition, Some(value), from_variable)
                .map(|element| element.map(|element| ConstValue::List(vec![element])));
        }

        let validated = match &value.node {
            Value::Variable(name) => {
                return match self.variables.get(name) {
                    Some(resolved_variable) => self.validate_argument(
                        argument_definition,
                        Some(&Positioned::new(
                            resolved_variable.clone().into_value(),
                            value.pos,
                        )),
                        true,
                    ),
                    None => Some(Err(ValidationError::VariableNotFound(
                        name.to_string(),
                        value.pos,
                    ))),
                };
            }
            Value::Null => self.validate_null_argument(argument_definition, value.pos),
            Value::Object(object) => {
                self.validate_object_argument(argument_definition, object, value.pos, from_variable)
            }
            Value::List(elems) => {
                self.validate_list_argument(argument_definition, elems, value.pos, from_variable)
            }
            _ if self.custom_scalar(argument_definition) => {
                self.validate_custom_scalar_argument(argument_definition, &value.node, value.pos)
            }
            Value::Number(number) => {
                self.validate_number_argument(argument_definition, number, value.pos)
            }
            Value::String(string) => self.validate_string_argument(
                argument_definition,
                string,
                value.pos,
                from_variable,
            ),
            Value::Boolean(boolean) => {
                self.validate_boolean_argument(argument_definition, *boolean, value.pos)
            }
            Value::Enum(e) => self.validate_enum_argument(argument_definition, e, value.pos),
            Value::Binary(_) => Err(self.type_mismatch(argument_definition, "Binary", value.pos)),
        };

        Some(validated)
    }

    fn validate_null_argument(
        &self,
        argument_definition: &InputValueDefinition,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        let ty = &argument_definition.ty.node;

        if ty.nullable {
            Ok(ConstValue::Null)
        } else {
            Err(ValidationError::RequiredArgumentNotFound(
                argument_definition.name.node.to_string(),
                pos,
            ))
        }
    }

    fn validate_number_argument(
        &self,
        argument_definition: &InputValueDefinition,
        number: &Number,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        match underlying_type(&argument_definition.ty.node).as_str() {
            "Int" | "ID" if number.is_f64() => {
                Err(self.type_mismatch(argument_definition, "Float", pos))
            }
            "Int" => number
                .as_i64()
                .and_then(|value| i32::try_from(value).ok())
                .map(|value| ConstValue::Number(value.into()))
                .ok_or_else(|| ValidationError::IntOutOfRange {
                    value: number.to_string(),
                    pos,
                }),
            "ID" => Ok(ConstValue::String(number.to_string())),
            "Float" => Ok(ConstValue::Number(number.clone())),
            _ => Err(self.type_mismatch(argument_definition, "Number", pos)),
        }
    }

    fn validate_boolean_argument(
        &self,
        argument_definition: &InputValueDefinition,
        boolean: bool,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        match underlying_type(&argument_definition.ty.node).as_str() {
            "Boolean" => Ok(ConstValue::Boolean(boolean)),
            _ => Err(self.type_mismatch(argument_definition, "Boolean", pos)),
        }
    }

    /// Strings are accepted for `String` and `ID`. Variables carry enum values as strings, so
    /// those are also accepted for enums.
    fn validate_string_argument(
        &self,
        argument_definition: &InputValueDefinition,
        string: &str,
        pos: Pos,
        from_variable: bool,
    ) -> Result<ConstValue, ValidationError> {
        let underlying = underlying_type(&argument_definition.ty.node);

        match underlying.as_str() {
            "String" | "ID" => Ok(ConstValue::String(string.to_string())),
            _ if from_variable && self.is_enum(underlying.as_str()) => {
                self.validate_enum_argument(argument_definition, &Name::new(string), pos)
            }
            _ => Err(self.type_mismatch(argument_definition, "String", pos)),
        }
    }

    fn validate_enum_argument(
        &self,
        argument_definition: &InputValueDefinition,
        value: &Name,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        let underlying = underlying_type(&argument_definition.ty.node);

        if !self.is_enum(underlying.as_str()) {
            Err(self.type_mismatch(argument_definition, "Enum", pos))
        } else if self.schema.is_enum_value(underlying.as_str(), value.as_str()) {
            Ok(ConstValue::Enum(value.clone()))
        } else {
            Err(ValidationError::InvalidEnumValue {
                value: value.to_string(),
                enum_name: underlying.to_string(),
                pos,
            })
        }
    }

    fn validate_custom_scalar_argument(
        &self,
        argument_definition: &InputValueDefinition,
        value: &Value,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        let underlying = underlying_type(&argument_definition.ty.node);
        let invalid_value = |message: String| ValidationError::InvalidScalarValue {
            argument_name: argument_definition.name.node.to_string(),
            type_name: underlying.to_string(),
            message,
            pos,
        };

        let coerce = self
            .schema
            .scalar_coercion(underlying.as_str())
            .ok_or_else(|| invalid_value("no coercion available".to_string()))?;
        let value = value
            .clone()
            .into_const()
            .ok_or_else(|| invalid_value("unexpected variable".to_string()))?;

        coerce(&value).map_err(invalid_value)
    }

    /// Recursively validate an object argument
    fn validate_object_argument(
        &self,
        argument_definition: &InputValueDefinition,
        entries: &IndexMap<Name, Value>,
        pos: Pos,
        from_variable: bool,
    ) -> Result<ConstValue, ValidationError> {
        let ty = &argument_definition.ty.node;
        let underlying = underlying_type(ty);

        let input_object_type = match self
            .schema
            .get_type_definition(underlying.as_str())
            .map(|td| &td.kind)
        {
            Some(TypeKind::InputObject(input_object_type)) => Ok(input_object_type),
            _ => Err(ValidationError::InvalidArgumentType {
                argument_name: argument_definition.name.node.to_string(),
                expected_type: ty.to_string(),
                actual_type: "Object".to_string(),
                pos,
            }),
        }?;

        let field_arguments: Vec<_> = entries
            .iter()
            .map(|(name, v)| {
                (
                    Positioned::new(name.clone(), pos),
                    Positioned::new(v.clone(), pos),
                )
            })
            .collect();

        let validated_arguments = self.validate_arguments(
            &input_object_type
                .fields
                .iter()
                .map(|d| &d.node)
                .collect::<Vec<_>>(),
            &field_arguments,
            from_variable,
        )?;

        Ok(ConstValue::Object(
            validated_arguments
                .into_iter()
                .map(|(name, value)| (Name::new(name), value))
                .collect(),
        ))
    }

    fn validate_list_argument(
        &self,
        argument_definition: &InputValueDefinition,
        elems: &[Value],
        pos: Pos,
        from_variable: bool,
    ) -> Result<ConstValue, ValidationError> {
        let ty = &argument_definition.ty.node;

        match &ty.base {
            BaseType::Named(name) => Err(ValidationError::InvalidArgumentType {
                argument_name: argument_definition.name.node.to_string(),
                expected_type: name.to_string(),
                actual_type: "List".to_string(),
                pos,
            }),
            BaseType::List(elem_type) => {
                // Peel off the list type to get the element type
                let elem_argument_definition = InputValueDefinition {
                    ty: Positioned::new(elem_type.as_ref().clone(), pos),
                    ..argument_definition.clone()
                };

                let validated_elems = elems
                    .iter()
                    .map(|elem| {
                        self.validate_argument(
                            &elem_argument_definition,
                            Some(&Positioned::new(elem.clone(), pos)),
                            from_variable,
                        )
                        .unwrap_or(Ok(ConstValue::Null))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(ConstValue::List(validated_elems))
            }
        }
    }

    fn custom_scalar(&self, argument_definition: &InputValueDefinition) -> bool {
        self.schema
            .scalar_coercion(underlying_type(&argument_definition.ty.node).as_str())
            .is_some()
    }

    fn is_enum(&self, type_name: &str) -> bool {
        matches!(
            self.schema.get_type_definition(type_name).map(|td| &td.kind),
            Some(TypeKind::Enum(_))
        )
    }

    fn type_mismatch(
        &self,
        argument_definition: &InputValueDefinition,
        actual_type: &str,
        pos: Pos,
    ) -> ValidationError {
        ValidationError::InvalidArgumentType {
            argument_name: argument_definition.name.node.to_string(),
            expected_type: underlying_type(&argument_definition.ty.node).to_string(),
            actual_type: actual_type.to_string(),
            pos,
        }
    }
}
