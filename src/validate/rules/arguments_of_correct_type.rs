use super::super::{ValidationContext, ValidationRule};
use crate::schema::{Schema, SchemaType, TypeRef};
use crate::{ast::*, visit::*};

/// Validates that every argument literal matches the input type its field declares.
///
/// The coercion walk mirrors the shape of input types: non-null wrappers unwrap after
/// rejecting `null`, lists recurse per element, input objects recurse per provided field
/// and reject unknown ones, enums must name a declared value, and scalars consult the
/// scalar's literal parser. Variables are exempt here since their values only exist at
/// execution time, and arguments without a declaration are left to
/// [`super::KnownArgumentNames`].
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Values-of-Correct-Type)
#[derive(Default)]
pub struct ArgumentsOfCorrectType;

impl<'a> ValidationRule<'a> for ArgumentsOfCorrectType {}

impl<'a> Visitor<'a, ValidationContext<'a>> for ArgumentsOfCorrectType {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
    ) -> VisitFlow {
        if field.arguments.is_empty() {
            return VisitFlow::Next;
        }
        let schema_field = match ctx.parent_field(field.name) {
            Some(schema_field) => schema_field,
            None => return VisitFlow::Next,
        };
        for argument in field.arguments.children.iter() {
            let input_field = match schema_field.get_argument(argument.name) {
                Some(input_field) => input_field,
                None => continue,
            };
            if let Err(message) =
                check_value(ctx.schema, argument.name, input_field.input_type, &argument.value)
            {
                return ctx.add_error(message);
            }
        }
        VisitFlow::Next
    }
}

fn check_value<'a>(
    schema: &Schema<'a>,
    argument: &str,
    expected: &TypeRef<'a>,
    value: &Value<'a>,
) -> Result<(), String> {
    match *expected {
        TypeRef::NonNullType(inner) => {
            if matches!(value, Value::Null) {
                Err(format!("Argument \"{}\" must not be null", argument))
            } else {
                check_value(schema, argument, inner, value)
            }
        }
        // Null is valid in any nullable position, and variable values are only known at
        // execution time
        _ if matches!(value, Value::Null | Value::Variable(_)) => Ok(()),
        TypeRef::ListType(inner) => match value {
            Value::List(list) => {
                for element in list.children.iter() {
                    check_value(schema, argument, inner, element)?;
                }
                Ok(())
            }
            _ => Err(format!("Argument \"{}\" expected a list value", argument)),
        },
        TypeRef::Type(name) => match schema.get_type(name) {
            Some(SchemaType::Scalar(scalar)) => {
                if scalar.parse_literal(value) {
                    Ok(())
                } else {
                    Err(format!(
                        "Argument \"{}\" has an invalid value for scalar \"{}\"",
                        argument, scalar.name
                    ))
                }
            }
            Some(SchemaType::Enum(schema_enum)) => match value {
                Value::Enum(enum_value) if schema_enum.values.contains(enum_value.value) => Ok(()),
                _ => Err(format!(
                    "Argument \"{}\" has an invalid value for enum \"{}\"",
                    argument, schema_enum.name
                )),
            },
            Some(SchemaType::InputObject(input_object)) => match value {
                Value::Object(object) => {
                    for field in object.children.iter() {
                        match input_object.get_field(field.name) {
                            Some(input_field) => {
                                check_value(schema, argument, input_field.input_type, &field.value)?
                            }
                            None => {
                                return Err(format!(
                                    "Unknown field \"{}\" on input object \"{}\"",
                                    field.name, input_object.name
                                ))
                            }
                        }
                    }
                    Ok(())
                }
                _ => Err(format!(
                    "Argument \"{}\" expected an input object value",
                    argument
                )),
            },
            // Output kinds in argument position and unknown type names are schema defects
            // that argument literals can't be judged against
            _ => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use indoc::indoc;

    fn schema(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse_sdl(
            ctx,
            indoc! {r#"
                type Query {
                  pick(x: Int!): Int
                  search(filter: Filter, tags: [String!], kind: Kind): String
                }
                input Filter {
                  name: String
                  nested: Filter
                }
                enum Kind { DOG CAT }
            "#},
        )
        .unwrap()
    }

    #[test]
    fn valid_literals() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            r#"{
                pick(x: 1)
                search(filter: { name: "a", nested: { name: "b" } }, tags: ["x", "y"], kind: DOG)
            }"#,
        )
        .unwrap();
        ArgumentsOfCorrectType::validate(&ctx, schema(&ctx), document).unwrap();
    }

    #[test]
    fn variables_and_nulls_pass() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            "query ($x: Int!, $f: Filter) { pick(x: $x) search(filter: $f, kind: null) }",
        )
        .unwrap();
        ArgumentsOfCorrectType::validate(&ctx, schema(&ctx), document).unwrap();
    }

    #[test]
    fn scalar_mismatch() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ pick(x: \"one\") }").unwrap();
        let error = ArgumentsOfCorrectType::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert!(error.message().contains("invalid value for scalar \"Int\""));
    }

    #[test]
    fn null_for_non_null() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ pick(x: null) }").unwrap();
        ArgumentsOfCorrectType::validate(&ctx, schema(&ctx), document).unwrap_err();
    }

    #[test]
    fn list_mismatch() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ search(tags: \"x\") }").unwrap();
        let error = ArgumentsOfCorrectType::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert!(error.message().contains("expected a list value"));

        let document = Document::parse(&ctx, "{ search(tags: [1]) }").unwrap();
        ArgumentsOfCorrectType::validate(&ctx, schema(&ctx), document).unwrap_err();
    }

    #[test]
    fn unknown_input_object_field() {
        let ctx = ASTContext::new();
        let document =
            Document::parse(&ctx, "{ search(filter: { nickname: \"a\" }) }").unwrap();
        let error = ArgumentsOfCorrectType::validate(&ctx, schema(&ctx), document).unwrap_err();
        assert_eq!(
            error.message(),
            "Unknown field \"nickname\" on input object \"Filter\""
        );
    }

    #[test]
    fn enum_mismatch() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ search(kind: FISH) }").unwrap();
        ArgumentsOfCorrectType::validate(&ctx, schema(&ctx), document).unwrap_err();

        let document = Document::parse(&ctx, "{ search(kind: \"DOG\") }").unwrap();
        ArgumentsOfCorrectType::validate(&ctx, schema(&ctx), document).unwrap_err();
    }
}
