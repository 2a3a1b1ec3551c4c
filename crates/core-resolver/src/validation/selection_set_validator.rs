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
    types::{
        Directive, Field, FieldDefinition, FragmentDefinition, FragmentSpread, Selection,
        SelectionSet, TypeCondition, TypeDefinition, TypeKind,
    },
};
use async_graphql_value::{ConstValue, Name, Value, indexmap::IndexMap};

use crate::{
    schema::Schema,
    type_normalization::{named_type, underlying_type},
    validation::{field::ValidatedField, validation_error::ValidationError},
};

use super::arguments_validator::ArgumentValidator;

/// Check applied to every field, leaves included: `(depth, position)`.
pub(super) type SelectionDepthCheck<'a> = dyn Fn(usize, Pos) -> Result<(), ValidationError> + 'a;

/// Context for validating a selection set.
pub struct SelectionSetValidator<'a> {
    schema: &'a Schema,
    /// The parent type of this field.
    container_type: &'a TypeDefinition,
    variables: &'a HashMap<Name, ConstValue>,
    fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    /// Fragments being expanded to reach this selection set (to detect cycles).
    fragment_trail: Vec<Name>,
}

impl<'a> SelectionSetValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        container_type: &'a TypeDefinition,
        variables: &'a HashMap<Name, ConstValue>,
        fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
        fragment_trail: Vec<Name>,
    ) -> Self {
        Self {
            schema,
            container_type,
            variables,
            fragment_definitions,
            fragment_trail,
        }
    }

    /// Validate selection set.
    ///
    /// Validations performed:
    /// - Each field is defined in the `container_type`
    /// - Leaf fields have no subselection and object fields have one
    /// - Each fragment referred is defined, applies to the container type, and doesn't spread
    ///   itself
    /// - Arguments to each field are valid (see [ArgumentValidator] for more details)
    /// - Fields with the same output name select the same field with the same arguments
    ///
    /// Errors from sibling fields are accumulated.
    ///
    /// # Returns
    ///   A vector of validated fields (fragments are inlined and same-named fields merged)
    pub(super) fn validate(
        &self,
        selection_set: &Positioned<SelectionSet>,
        depth: usize,
        selection_depth_check: &SelectionDepthCheck<'_>,
    ) -> Result<Vec<ValidatedField>, Vec<ValidationError>> {
        let mut fields = vec![];
        let mut errors = vec![];

        for selection in &selection_set.node.items {
            match self.validate_selection(selection, depth, selection_depth_check) {
                Ok(selected) => fields.extend(selected),
                Err(selection_errors) => errors.extend(selection_errors),
            }
        }

        if errors.is_empty() {
            merge_fields(fields).map_err(|error| vec![error])
        } else {
            Err(errors)
        }
    }

    fn validate_selection(
        &self,
        selection: &Positioned<Selection>,
        depth: usize,
        selection_depth_check: &SelectionDepthCheck<'_>,
    ) -> Result<Vec<ValidatedField>, Vec<ValidationError>> {
        match &selection.node {
            Selection::Field(field) => {
                if self.skipped(&field.node.directives)? {
                    Ok(vec![])
                } else {
                    self.validate_field(field, depth, selection_depth_check)
                        .map(|field| vec![field])
                }
            }
            Selection::FragmentSpread(fragment_spread) => {
                if self.skipped(&fragment_spread.node.directives)? {
                    return Ok(vec![]);
                }

                let fragment_name = &fragment_spread.node.fragment_name.node;
                if self.fragment_trail.contains(fragment_name) {
                    return Err(vec![ValidationError::FragmentCycle(
                        fragment_name.to_string(),
                        fragment_spread.pos,
                    )]);
                }

                let fragment_definition = self
                    .fragment_definition(fragment_spread)
                    .map_err(|error| vec![error])?;
                self.check_type_condition(
                    Some(&fragment_definition.type_condition),
                    fragment_spread.pos,
                )?;

                let mut fragment_trail = self.fragment_trail.clone();
                fragment_trail.push(fragment_name.clone());

                Self::new(
                    self.schema,
                    self.container_type,
                    self.variables,
                    self.fragment_definitions,
                    fragment_trail,
                )
                .validate(
                    &fragment_definition.selection_set,
                    depth,
                    selection_depth_check,
                )
            }
            Selection::InlineFragment(inline_fragment) => {
                if self.skipped(&inline_fragment.node.directives)? {
                    return Ok(vec![]);
                }

                self.check_type_condition(
                    inline_fragment.node.type_condition.as_ref(),
                    inline_fragment.pos,
                )?;

                self.validate(
                    &inline_fragment.node.selection_set,
                    depth,
                    selection_depth_check,
                )
            }
        }
    }

    fn validate_field(
        &self,
        field: &Positioned<Field>,
        depth: usize,
        selection_depth_check: &SelectionDepthCheck<'_>,
    ) -> Result<ValidatedField, Vec<ValidationError>> {
        let field_name = field.node.name.node.as_str();
        let has_selection = !field.node.selection_set.node.items.is_empty();

        selection_depth_check(depth, field.pos).map_err(|e| vec![e])?;

        // Special treatment for the __typename field, since it is not declared as a field of any
        // type
        if field_name == "__typename" {
            return if !field.node.arguments.is_empty() {
                Err(vec![ValidationError::StrayArguments(
                    field
                        .node
                        .arguments
                        .iter()
                        .map(|arg| arg.0.node.to_string())
                        .collect(),
                    field_name.to_string(),
                    field.pos,
                )])
            } else if has_selection {
                Err(vec![ValidationError::ScalarWithField(
                    field_name.to_string(),
                    field.pos,
                )])
            } else {
                Ok(ValidatedField {
                    alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
                    name: field.node.name.node.clone(),
                    arguments: IndexMap::new(),
                    subfields: vec![],
                    pos: field.pos,
                    ty: named_type("String", false),
                })
            };
        }

        let field_definition = self.get_field_definition(field).map_err(|e| vec![e])?;
        let field_type_name = underlying_type(&field_definition.ty.node);
        let field_type_definition = self
            .schema
            .get_type_definition(field_type_name.as_str())
            .ok_or_else(|| {
                vec![ValidationError::InvalidFieldType(
                    field_type_name.to_string(),
                    field.pos,
                )]
            })?;

        let is_leaf = matches!(
            field_type_definition.kind,
            TypeKind::Scalar | TypeKind::Enum(_)
        );
        if is_leaf && has_selection {
            return Err(vec![ValidationError::ScalarWithField(
                field_name.to_string(),
                field.pos,
            )]);
        }
        if !is_leaf && !has_selection {
            return Err(vec![ValidationError::ObjectWithoutSubfields(
                field_name.to_string(),
                field_definition.ty.node.to_string(),
                field.pos,
            )]);
        }
        let mut errors = vec![];

        let argument_definitions = field_definition
            .arguments
            .iter()
            .map(|argument| &argument.node)
            .collect::<Vec<_>>();
        let arguments = match ArgumentValidator::new(self.schema, self.variables, field)
            .validate(&argument_definitions)
        {
            Ok(arguments) => arguments,
            Err(error) => {
                errors.push(error);
                IndexMap::new()
            }
        };

        let subfields = if has_selection {
            let subfield_validator = Self::new(
                self.schema,
                field_type_definition,
                self.variables,
                self.fragment_definitions,
                self.fragment_trail.clone(),
            );

            match subfield_validator.validate(
                &field.node.selection_set,
                depth + 1,
                selection_depth_check,
            ) {
                Ok(subfields) => subfields,
                Err(subfield_errors) => {
                    errors.extend(subfield_errors);
                    vec![]
                }
            }
        } else {
            vec![]
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedField {
            alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
            name: field.node.name.node.clone(),
            arguments,
            subfields,
            pos: field.pos,
            ty: field_definition.ty.node.clone(),
        })
    }

    /// Evaluate `@skip(if:)` and `@include(if:)`. Other directives are ignored.
    fn skipped(
        &self,
        directives: &[Positioned<Directive>],
    ) -> Result<bool, Vec<ValidationError>> {
        let mut skipped = false;

        for directive in directives {
            let negate = match directive.node.name.node.as_str() {
                "skip" => false,
                "include" => true,
                _ => continue,
            };

            let condition = directive
                .node
                .arguments
                .iter()
                .find(|(name, _)| name.node == "if")
                .map(|(_, value)| value);

            let condition = match condition.map(|value| &value.node) {
                Some(Value::Boolean(value)) => *value,
                Some(Value::Variable(name)) => match self.variables.get(name) {
                    Some(ConstValue::Boolean(value)) => *value,
                    Some(_) => {
                        return Err(vec![ValidationError::InvalidArgumentType {
                            argument_name: "if".to_string(),
                            expected_type: "Boolean".to_string(),
                            actual_type: "non-Boolean".to_string(),
                            pos: directive.pos,
                        }]);
                    }
                    None => {
                        return Err(vec![ValidationError::VariableNotFound(
                            name.to_string(),
                            directive.pos,
                        )]);
                    }
                },
                Some(_) => {
                    return Err(vec![ValidationError::InvalidArgumentType {
                        argument_name: "if".to_string(),
                        expected_type: "Boolean".to_string(),
                        actual_type: "non-Boolean".to_string(),
                        pos: directive.pos,
                    }]);
                }
                None => {
                    return Err(vec![ValidationError::RequiredArgumentNotFound(
                        "if".to_string(),
                        directive.pos,
                    )]);
                }
            };

            skipped |= condition != negate;
        }

        Ok(skipped)
    }

    fn check_type_condition(
        &self,
        type_condition: Option<&Positioned<TypeCondition>>,
        pos: Pos,
    ) -> Result<(), Vec<ValidationError>> {
        match type_condition {
            Some(type_condition)
                if type_condition.node.on.node != self.container_type.name.node =>
            {
                Err(vec![ValidationError::FragmentTypeMismatch(
                    type_condition.node.on.node.to_string(),
                    self.container_type.name.node.to_string(),
                    pos,
                )])
            }
            _ => Ok(()),
        }
    }

    fn fragment_definition(
        &self,
        fragment: &Positioned<FragmentSpread>,
    ) -> Result<&'a FragmentDefinition, ValidationError> {
        self.fragment_definitions
            .get(&fragment.node.fragment_name.node)
            .map(|v| &v.node)
            .ok_or_else(|| {
                ValidationError::FragmentDefinitionNotFound(
                    fragment.node.fragment_name.node.as_str().to_string(),
                    fragment.pos,
                )
            })
    }

    fn get_field_definition(
        &self,
        field: &Positioned<Field>,
    ) -> Result<&'a FieldDefinition, ValidationError> {
        let field_definition = match &self.container_type.kind {
            TypeKind::Object(object_type) => object_type
                .fields
                .iter()
                .find(|f| f.node.name.node == field.node.name.node)
                .map(|f| &f.node),
            _ => None,
        };

        field_definition.ok_or_else(|| {
            ValidationError::InvalidField(
                field.node.name.node.as_str().to_owned(),
                self.container_type.name.node.to_string(),
                field.pos,
            )
        })
    }
}

/// Merge fields with the same output name (such as `venue { id } venue { name }`) into one field.
fn merge_fields(fields: Vec<ValidatedField>) -> Result<Vec<ValidatedField>, ValidationError> {
    let mut merged: IndexMap<String, ValidatedField> = IndexMap::new();

    for field in fields {
        let output_name = field.output_name();
        match merged.get_mut(&output_name) {
            Some(existing) => {
                if existing.name != field.name || existing.arguments != field.arguments {
                    return Err(ValidationError::FieldMergeConflict(output_name, field.pos));
                }
                let subfields = std::mem::take(&mut existing.subfields)
                    .into_iter()
                    .chain(field.subfields)
                    .collect();
                existing.subfields = merge_fields(subfields)?;
            }
            None => {
                merged.insert(output_name, field);
            }
        }
    }

    Ok(merged.into_values().collect())
}
