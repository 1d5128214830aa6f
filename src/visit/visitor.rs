use super::compose::ComposedVisitor;
use crate::ast::*;

/// A visitor signal that is returned from [Visitor] callbacks to alter the flow of
/// traversal.
///
/// The default callbacks all return `VisitFlow::Next`, which continues the depth-first
/// traversal. The other signals may be used to skip over a node in an `enter_` callback or
/// to abort traversal entirely without visiting any more AST Nodes.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum VisitFlow {
    /// Continue visiting nodes as usual.
    Next,
    /// Abort the traversal without performing any subsequent visits.
    Break,
    /// Skip over the current node without performing any deeper traversal.
    /// (Only applies to `enter_` callbacks)
    Skip,
}

/// Trait for a visitor that carries methods that are called as callbacks while AST nodes
/// implementing the visitor pattern are traversed.
///
/// While the AST is traversed in depth-first order, callbacks that are prefixed with
/// `enter_` are called from top-to-bottom while the traversal is recursing, while callbacks
/// that are prefixed with `leave_` are called from bottom-to-top while the traversal is
/// returning.
///
/// All callbacks have a default no-op implementation that returns `VisitFlow::Next`. The
/// [`VisitFlow`] signals are returned from callbacks to alter the traversal and either
/// continue it (`Next`), skip over a node during an `enter_` callback (`Skip`), or abort
/// traversal entirely (`Break`).
///
/// A visitor may define a custom context structure that is passed to the `visit` method.
/// By default the context is an empty unit `()`.
pub trait Visitor<'a, Context = ()>: Sized {
    /// Combines two visitors into one that will run both in a single traversal.
    ///
    /// Both visitors must accept the same `Context` type.
    #[inline]
    fn compose<V: Visitor<'a, Context>>(self, other: V) -> ComposedVisitor<'a, Context, Self, V> {
        ComposedVisitor::new(self, other)
    }

    /// Called when a [Document] is visited and before its child nodes are visited.
    fn enter_document(&mut self, _ctx: &mut Context, _document: &'a Document<'a>) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [Document] and its child nodes were visited.
    fn leave_document(&mut self, _ctx: &mut Context, _document: &'a Document<'a>) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when an [`OperationDefinition`] node is visited and before its child nodes
    /// are visited.
    fn enter_operation(
        &mut self,
        _ctx: &mut Context,
        _operation: &'a OperationDefinition<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after an [`OperationDefinition`] and its child nodes were visited.
    fn leave_operation(
        &mut self,
        _ctx: &mut Context,
        _operation: &'a OperationDefinition<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [`FragmentDefinition`] node is visited and before its child nodes are
    /// visited.
    fn enter_fragment(
        &mut self,
        _ctx: &mut Context,
        _fragment: &'a FragmentDefinition<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [`FragmentDefinition`] node and its child nodes were visited.
    fn leave_fragment(
        &mut self,
        _ctx: &mut Context,
        _fragment: &'a FragmentDefinition<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [`VariableDefinition`] node is visited and before its child nodes are
    /// visited.
    fn enter_variable_definition(
        &mut self,
        _ctx: &mut Context,
        _var_def: &'a VariableDefinition<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [`VariableDefinition`] node and its child nodes were visited.
    fn leave_variable_definition(
        &mut self,
        _ctx: &mut Context,
        _var_def: &'a VariableDefinition<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [`SelectionSet`] node is visited and before its child nodes are
    /// visited.
    fn enter_selection_set(
        &mut self,
        _ctx: &mut Context,
        _selection_set: &'a SelectionSet<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [`SelectionSet`] node and its child nodes were visited.
    fn leave_selection_set(
        &mut self,
        _ctx: &mut Context,
        _selection_set: &'a SelectionSet<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [`FragmentSpread`] node is visited and before its child nodes are
    /// visited.
    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut Context,
        _fragment_spread: &'a FragmentSpread<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [`FragmentSpread`] node and its child nodes were visited.
    fn leave_fragment_spread(
        &mut self,
        _ctx: &mut Context,
        _fragment_spread: &'a FragmentSpread<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when an [`InlineFragment`] node is visited and before its child nodes are
    /// visited.
    fn enter_inline_fragment(
        &mut self,
        _ctx: &mut Context,
        _inline_fragment: &'a InlineFragment<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after an [`InlineFragment`] node and its child nodes were visited.
    fn leave_inline_fragment(
        &mut self,
        _ctx: &mut Context,
        _inline_fragment: &'a InlineFragment<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [Field] node is visited and before its child nodes are visited.
    fn enter_field(&mut self, _ctx: &mut Context, _field: &'a Field<'a>) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [Field] node and its child nodes were visited.
    fn leave_field(&mut self, _ctx: &mut Context, _field: &'a Field<'a>) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [Directive] node is visited and before its child nodes are visited.
    fn enter_directive(&mut self, _ctx: &mut Context, _directive: &'a Directive<'a>) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [Directive] node and its child nodes were visited.
    fn leave_directive(&mut self, _ctx: &mut Context, _directive: &'a Directive<'a>) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when an [Argument] node is visited and before its child nodes are visited.
    fn enter_argument(&mut self, _ctx: &mut Context, _argument: &'a Argument<'a>) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after an [Argument] node and its child nodes were visited.
    fn leave_argument(&mut self, _ctx: &mut Context, _argument: &'a Argument<'a>) -> VisitFlow {
        VisitFlow::Next
    }
}

/// Trait for visiting AST Nodes of a GraphQL language document in depth-first order using a
/// custom visitor.
///
/// The visitor must implement the [Visitor] trait which may also define a custom context
/// structure that is passed to the `visit` method.
pub trait VisitNode<'a>: Sized {
    /// Visit a GraphQL AST node tree recursively in depth-first order with a given visitor.
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V)
        -> VisitFlow;
}

impl<'a> VisitNode<'a> for Argument<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_argument(ctx, self) {
            VisitFlow::Next => visitor.leave_argument(ctx, self),
            flow => flow,
        }
    }
}

impl<'a> VisitNode<'a> for Arguments<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        for argument in self.children.iter() {
            if argument.visit(ctx, visitor) == VisitFlow::Break {
                return VisitFlow::Break;
            }
        }
        VisitFlow::Next
    }
}

impl<'a> VisitNode<'a> for Directive<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_directive(ctx, self) {
            VisitFlow::Next => {
                if self.arguments.visit(ctx, visitor) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
                visitor.leave_directive(ctx, self)
            }
            flow => flow,
        }
    }
}

impl<'a> VisitNode<'a> for Directives<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        for directive in self.children.iter() {
            if directive.visit(ctx, visitor) == VisitFlow::Break {
                return VisitFlow::Break;
            }
        }
        VisitFlow::Next
    }
}

impl<'a> VisitNode<'a> for VariableDefinition<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_variable_definition(ctx, self) {
            VisitFlow::Next => {
                if self.directives.visit(ctx, visitor) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
                visitor.leave_variable_definition(ctx, self)
            }
            flow => flow,
        }
    }
}

impl<'a> VisitNode<'a> for VariableDefinitions<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        for var_def in self.children.iter() {
            if var_def.visit(ctx, visitor) == VisitFlow::Break {
                return VisitFlow::Break;
            }
        }
        VisitFlow::Next
    }
}

impl<'a> VisitNode<'a> for Field<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_field(ctx, self) {
            VisitFlow::Next => {
                if self.arguments.visit(ctx, visitor) == VisitFlow::Break
                    || self.directives.visit(ctx, visitor) == VisitFlow::Break
                    || self.selection_set.visit(ctx, visitor) == VisitFlow::Break
                {
                    return VisitFlow::Break;
                }
                visitor.leave_field(ctx, self)
            }
            flow => flow,
        }
    }
}

impl<'a> VisitNode<'a> for FragmentSpread<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_fragment_spread(ctx, self) {
            VisitFlow::Next => {
                if self.directives.visit(ctx, visitor) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
                visitor.leave_fragment_spread(ctx, self)
            }
            flow => flow,
        }
    }
}

impl<'a> VisitNode<'a> for InlineFragment<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_inline_fragment(ctx, self) {
            VisitFlow::Next => {
                if self.directives.visit(ctx, visitor) == VisitFlow::Break
                    || self.selection_set.visit(ctx, visitor) == VisitFlow::Break
                {
                    return VisitFlow::Break;
                }
                visitor.leave_inline_fragment(ctx, self)
            }
            flow => flow,
        }
    }
}

impl<'a> VisitNode<'a> for SelectionSet<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_selection_set(ctx, self) {
            VisitFlow::Next => {
                for selection in self.selections.iter() {
                    let flow = match selection {
                        Selection::Field(field) => field.visit(ctx, visitor),
                        Selection::FragmentSpread(spread) => spread.visit(ctx, visitor),
                        Selection::InlineFragment(fragment) => fragment.visit(ctx, visitor),
                    };
                    if flow == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                }
                visitor.leave_selection_set(ctx, self)
            }
            flow => flow,
        }
    }
}

impl<'a> VisitNode<'a> for FragmentDefinition<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_fragment(ctx, self) {
            VisitFlow::Next => {
                if self.directives.visit(ctx, visitor) == VisitFlow::Break
                    || self.selection_set.visit(ctx, visitor) == VisitFlow::Break
                {
                    return VisitFlow::Break;
                }
                visitor.leave_fragment(ctx, self)
            }
            flow => flow,
        }
    }
}

impl<'a> VisitNode<'a> for OperationDefinition<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_operation(ctx, self) {
            VisitFlow::Next => {
                if self.variable_definitions.visit(ctx, visitor) == VisitFlow::Break
                    || self.directives.visit(ctx, visitor) == VisitFlow::Break
                    || self.selection_set.visit(ctx, visitor) == VisitFlow::Break
                {
                    return VisitFlow::Break;
                }
                visitor.leave_operation(ctx, self)
            }
            flow => flow,
        }
    }
}

impl<'a> VisitNode<'a> for Document<'a> {
    #[inline]
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        match visitor.enter_document(ctx, self) {
            VisitFlow::Next => {
                for definition in self.definitions.iter() {
                    let flow = match definition {
                        Definition::Operation(operation) => operation.visit(ctx, visitor),
                        Definition::Fragment(fragment) => fragment.visit(ctx, visitor),
                    };
                    if flow == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                }
                visitor.leave_document(ctx, self)
            }
            flow => flow,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ast::ParseNode;

    #[derive(Debug, PartialEq, Default)]
    pub(crate) struct CountVisitor {
        pub(crate) in_operation: usize,
        pub(crate) in_fragment: usize,
        pub(crate) in_selection_set: usize,
        pub(crate) in_fragment_spread: usize,
        pub(crate) in_inline_fragment: usize,
        pub(crate) in_field: usize,
        pub(crate) out_field: usize,
        pub(crate) in_directive: usize,
        pub(crate) in_argument: usize,
    }

    impl<'a> Visitor<'a, ()> for CountVisitor {
        fn enter_operation(
            &mut self,
            _: &mut (),
            _operation: &'a OperationDefinition<'a>,
        ) -> VisitFlow {
            self.in_operation += 1;
            VisitFlow::Next
        }
        fn enter_fragment(
            &mut self,
            _: &mut (),
            _fragment: &'a FragmentDefinition<'a>,
        ) -> VisitFlow {
            self.in_fragment += 1;
            VisitFlow::Next
        }
        fn enter_selection_set(
            &mut self,
            _: &mut (),
            _selection_set: &'a SelectionSet<'a>,
        ) -> VisitFlow {
            self.in_selection_set += 1;
            VisitFlow::Next
        }
        fn enter_fragment_spread(
            &mut self,
            _: &mut (),
            _fragment_spread: &'a FragmentSpread<'a>,
        ) -> VisitFlow {
            self.in_fragment_spread += 1;
            VisitFlow::Next
        }
        fn enter_inline_fragment(
            &mut self,
            _: &mut (),
            _inline_fragment: &'a InlineFragment<'a>,
        ) -> VisitFlow {
            self.in_inline_fragment += 1;
            VisitFlow::Next
        }
        fn enter_field(&mut self, _: &mut (), _field: &'a Field<'a>) -> VisitFlow {
            self.in_field += 1;
            VisitFlow::Next
        }
        fn leave_field(&mut self, _: &mut (), _field: &'a Field<'a>) -> VisitFlow {
            self.out_field += 1;
            VisitFlow::Next
        }
        fn enter_directive(&mut self, _: &mut (), _directive: &'a Directive<'a>) -> VisitFlow {
            self.in_directive += 1;
            VisitFlow::Next
        }
        fn enter_argument(&mut self, _: &mut (), _argument: &'a Argument<'a>) -> VisitFlow {
            self.in_argument += 1;
            VisitFlow::Next
        }
    }

    #[test]
    fn counts_nodes() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "query A { a b(x: 1) @skip(if: true) { c } ... on T { d } ...F } fragment F on T { e }",
        )
        .unwrap();

        let mut visitor = CountVisitor::default();
        ast.visit(&mut (), &mut visitor);

        assert_eq!(
            visitor,
            CountVisitor {
                in_operation: 1,
                in_fragment: 1,
                // Every operation, field, inline fragment, and fragment definition carries
                // a selection set node, including empty ones
                in_selection_set: 8,
                in_fragment_spread: 1,
                in_inline_fragment: 1,
                in_field: 5,
                out_field: 5,
                in_directive: 1,
                in_argument: 2,
            }
        );
    }

    #[test]
    fn skip_prunes_subtrees() {
        struct SkipFragments {
            fields: usize,
        }
        impl<'a> Visitor<'a> for SkipFragments {
            fn enter_fragment(
                &mut self,
                _: &mut (),
                _fragment: &'a FragmentDefinition<'a>,
            ) -> VisitFlow {
                VisitFlow::Skip
            }
            fn enter_field(&mut self, _: &mut (), _field: &'a Field<'a>) -> VisitFlow {
                self.fields += 1;
                VisitFlow::Next
            }
        }

        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "{ a } fragment F on T { b c }").unwrap();
        let mut visitor = SkipFragments { fields: 0 };
        ast.visit(&mut (), &mut visitor);
        assert_eq!(visitor.fields, 1);
    }

    #[test]
    fn break_aborts() {
        struct BreakOnField;
        impl<'a> Visitor<'a> for BreakOnField {
            fn enter_field(&mut self, _: &mut (), _field: &'a Field<'a>) -> VisitFlow {
                VisitFlow::Break
            }
        }

        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "{ a b }").unwrap();
        assert_eq!(ast.visit(&mut (), &mut BreakOnField), VisitFlow::Break);
    }
}
