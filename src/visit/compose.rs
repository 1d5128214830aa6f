use std::marker::PhantomData;

use super::visitor::{VisitFlow, Visitor};
use crate::ast::*;

/// This structure implements the `Visitor` trait and runs two child Visitors in one
/// traversal, calling callbacks on both of them.
///
/// When one visitor skips over a subtree the other continues as usual, and the skipping
/// visitor stops receiving callbacks until the traversal returns to the depth at which it
/// skipped. A `Break` from either visitor aborts the composed traversal as a whole.
///
/// Visitors may be composed indefinitely since a Composed Visitor can be passed into
/// another Composed Visitor, as long as all visitors accept the same `Context` type.
pub struct ComposedVisitor<'a, Context, A: Visitor<'a, Context>, B: Visitor<'a, Context>> {
    pub a: A,
    pub b: B,
    depth: usize,
    skipped_a: Option<usize>,
    skipped_b: Option<usize>,
    _marker: PhantomData<&'a Context>,
}

impl<'a, C, A: Visitor<'a, C>, B: Visitor<'a, C>> ComposedVisitor<'a, C, A, B> {
    /// Composes two input visitors into one Composed Visitor.
    #[inline]
    pub fn new(a: A, b: B) -> ComposedVisitor<'a, C, A, B> {
        ComposedVisitor {
            a,
            b,
            depth: 0,
            skipped_a: None,
            skipped_b: None,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    fn compose_enter<Node>(
        &mut self,
        fn_a: fn(&mut A, &mut C, &'a Node) -> VisitFlow,
        fn_b: fn(&mut B, &mut C, &'a Node) -> VisitFlow,
        ctx: &mut C,
        node: &'a Node,
    ) -> VisitFlow {
        let mut skip_a = self.skipped_a.is_some();
        if !skip_a {
            match fn_a(&mut self.a, ctx, node) {
                VisitFlow::Break => return VisitFlow::Break,
                VisitFlow::Skip => {
                    self.skipped_a = Some(self.depth);
                    skip_a = true;
                }
                VisitFlow::Next => {}
            }
        }

        let mut skip_b = self.skipped_b.is_some();
        if !skip_b {
            match fn_b(&mut self.b, ctx, node) {
                VisitFlow::Break => return VisitFlow::Break,
                VisitFlow::Skip => {
                    self.skipped_b = Some(self.depth);
                    skip_b = true;
                }
                VisitFlow::Next => {}
            }
        }

        if skip_a && skip_b {
            // The subtree won't be entered at all, so markers set at this depth are undone
            // while markers from enclosing nodes stay until their own leave callback.
            if self.skipped_a == Some(self.depth) {
                self.skipped_a = None;
            }
            if self.skipped_b == Some(self.depth) {
                self.skipped_b = None;
            }
            VisitFlow::Skip
        } else {
            self.depth += 1;
            VisitFlow::Next
        }
    }

    #[inline(always)]
    fn compose_leave<Node>(
        &mut self,
        fn_a: fn(&mut A, &mut C, &'a Node) -> VisitFlow,
        fn_b: fn(&mut B, &mut C, &'a Node) -> VisitFlow,
        ctx: &mut C,
        node: &'a Node,
    ) -> VisitFlow {
        self.depth -= 1;

        match self.skipped_a {
            Some(depth) if depth == self.depth => self.skipped_a = None,
            Some(_) => {}
            None => {
                if fn_a(&mut self.a, ctx, node) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
            }
        }

        match self.skipped_b {
            Some(depth) if depth == self.depth => self.skipped_b = None,
            Some(_) => {}
            None => {
                if fn_b(&mut self.b, ctx, node) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
            }
        }

        VisitFlow::Next
    }
}

macro_rules! composed_hooks {
    ($($enter:ident / $leave:ident: $node:ident),+ $(,)?) => {
        $(
            #[inline]
            fn $enter(&mut self, ctx: &mut C, node: &'a $node<'a>) -> VisitFlow {
                self.compose_enter(A::$enter, B::$enter, ctx, node)
            }

            #[inline]
            fn $leave(&mut self, ctx: &mut C, node: &'a $node<'a>) -> VisitFlow {
                self.compose_leave(A::$leave, B::$leave, ctx, node)
            }
        )+
    };
}

impl<'a, C, A: Visitor<'a, C>, B: Visitor<'a, C>> Visitor<'a, C> for ComposedVisitor<'a, C, A, B> {
    composed_hooks!(
        enter_document / leave_document: Document,
        enter_operation / leave_operation: OperationDefinition,
        enter_fragment / leave_fragment: FragmentDefinition,
        enter_variable_definition / leave_variable_definition: VariableDefinition,
        enter_selection_set / leave_selection_set: SelectionSet,
        enter_fragment_spread / leave_fragment_spread: FragmentSpread,
        enter_inline_fragment / leave_inline_fragment: InlineFragment,
        enter_field / leave_field: Field,
        enter_directive / leave_directive: Directive,
        enter_argument / leave_argument: Argument,
    );
}
