use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::hash_map::DefaultHashBuilder;
use hashbrown::{HashMap, HashSet};

use crate::ast::{ASTContext, FragmentDefinition};
use crate::error::{Error, ErrorType, Result};
use crate::schema::{Schema, SchemaField, SchemaType};
use crate::visit::VisitFlow;

/// One frame of the type stack: the schema type governing the current node's children, or
/// the explicit marker that the schema defines no type for this position.
///
/// Rules reading the stack must tolerate [`TypeFrame::Absent`]; a rule that cannot consult
/// a type abstains rather than failing.
#[derive(Debug, Clone, Copy)]
pub enum TypeFrame<'a> {
    Resolved(SchemaType<'a>),
    Absent,
}

/// The `ValidationContext` carries all state that accumulates while one document is
/// walked against one schema.
///
/// The context is owned by a single walk and lives exactly for one call to the validator.
/// Rules observe each other exclusively through it: the fragment index is populated before
/// any definition subtree is entered, operation names and the anonymous-operation flag are
/// recorded as operations are passed, fragment spreads mark the fragments they use, and
/// the type stack tracks the type environment at each depth.
pub struct ValidationContext<'a> {
    pub arena: &'a Bump,
    pub schema: &'a Schema<'a>,
    /// All fragment definitions of the document by name, indexed at document enter.
    pub fragments: HashMap<&'a str, &'a FragmentDefinition<'a>, DefaultHashBuilder, &'a Bump>,
    /// Names of operations passed so far during the walk.
    pub operation_names: Vec<'a, &'a str>,
    /// Whether an anonymous operation was passed during the walk.
    pub has_anonymous_operation: bool,
    /// Names of fragments referenced by any fragment spread passed so far.
    pub used_fragments: HashSet<&'a str, DefaultHashBuilder, &'a Bump>,
    /// The stack of type environments for the current traversal path.
    pub type_stack: Vec<'a, TypeFrame<'a>>,
    error: Option<&'a str>,
}

impl<'a> ValidationContext<'a> {
    /// Create a new `ValidationContext` given an AST context and the schema to validate
    /// against.
    pub fn new(ctx: &'a ASTContext, schema: &'a Schema<'a>) -> Self {
        ValidationContext {
            arena: &ctx.arena,
            schema,
            fragments: HashMap::new_in(&ctx.arena),
            operation_names: Vec::new_in(&ctx.arena),
            has_anonymous_operation: false,
            used_fragments: HashSet::new_in(&ctx.arena),
            type_stack: Vec::new_in(&ctx.arena),
            error: None,
        }
    }

    /// Record a validation error and signal the walk to abort.
    ///
    /// Validation is fail-fast: only the first recorded error survives, and rules return
    /// the `VisitFlow::Break` this method hands back to unwind the traversal immediately.
    pub fn add_error<S: AsRef<str>>(&mut self, message: S) -> VisitFlow {
        if self.error.is_none() {
            self.error = Some(self.arena.alloc_str(message.as_ref()));
        }
        VisitFlow::Break
    }

    /// Push a new type environment for the node that's being entered.
    #[inline]
    pub fn push_frame(&mut self, frame: TypeFrame<'a>) {
        self.type_stack.push(frame);
    }

    /// Pop the type environment of the node that's being left.
    #[inline]
    pub fn pop_frame(&mut self) {
        self.type_stack.pop();
    }

    /// The frame governing the current node's children.
    #[inline]
    pub fn current_frame(&self) -> Option<TypeFrame<'a>> {
        self.type_stack.last().copied()
    }

    /// The resolved type governing the current node's children, if any.
    #[inline]
    pub fn current_type(&self) -> Option<SchemaType<'a>> {
        match self.current_frame() {
            Some(TypeFrame::Resolved(of_type)) => Some(of_type),
            _ => None,
        }
    }

    /// The resolved type one frame below the top of the stack.
    ///
    /// While a field, fragment spread, or inline fragment is being entered, its own frame
    /// has already been pushed; this returns the type the selection appears on.
    #[inline]
    pub fn parent_type(&self) -> Option<SchemaType<'a>> {
        match self.type_stack.len().checked_sub(2) {
            Some(index) => match self.type_stack[index] {
                TypeFrame::Resolved(of_type) => Some(of_type),
                TypeFrame::Absent => None,
            },
            None => None,
        }
    }

    /// Looks up a field's definition on the parent type of the field that's currently
    /// being entered.
    #[inline]
    pub fn parent_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.parent_type().and_then(|parent| parent.field(name))
    }

    /// Convert the context into a result carrying the first error the walk recorded, if
    /// any.
    pub fn into_result(self) -> Result<()> {
        match self.error {
            None => Ok(()),
            Some(message) => Err(Error::new(message, Some(ErrorType::Validation))),
        }
    }
}
