// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{EnvironmentIndex, Realm};
use crate::ecmascript::{scripts_and_modules::ScriptOrModule, types::Object};

/// ### [code evaluation state](https://tc39.es/ecma262/#table-additional-state-components-for-ecmascript-code-execution-contexts)
///
/// ECMAScript code execution contexts have the additional state components
/// listed below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ECMAScriptCodeEvaluationState {
    /// ### LexicalEnvironment
    ///
    /// Identifies the Environment Record used to resolve identifier references
    /// made by code within this execution context.
    pub lexical_environment: EnvironmentIndex,

    /// ### VariableEnvironment
    ///
    /// Identifies the Environment Record that holds bindings created by
    /// VariableStatements within this execution context.
    pub variable_environment: EnvironmentIndex,

    /// Whether the code being evaluated is strict mode code.
    pub is_strict_mode: bool,
}

/// ### [9.4 Execution Contexts](https://tc39.es/ecma262/#sec-execution-contexts)
///
/// An execution context is a specification device that is used to track the
/// runtime evaluation of code by an ECMAScript implementation. At any point in
/// time, there is at most one execution context per agent that is actually
/// executing code. This is known as the agent's running execution context. All
/// references to the running execution context in this specification denote
/// the running execution context of the surrounding agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    /// ### code evaluation state
    ///
    /// Any state needed to perform, suspend, and resume evaluation of the code
    /// associated with this execution context. `None` for built-in functions
    /// and jobs that have not entered ECMAScript code.
    pub ecmascript_code: Option<ECMAScriptCodeEvaluationState>,

    /// ### Function
    ///
    /// If this execution context is evaluating the code of a function object,
    /// then the value of this component is that function object. If the
    /// context is evaluating the code of a Script or Module, the value is
    /// null.
    pub function: Option<Object>,

    /// ### Realm
    ///
    /// The Realm Record from which associated code accesses ECMAScript
    /// resources.
    pub realm: Realm,

    /// ### ScriptOrModule
    ///
    /// The Module Record or Script Record from which associated code
    /// originates. If there is no originating script or module, as is the case
    /// for the original execution context created in
    /// InitializeHostDefinedRealm, the value is null.
    pub script_or_module: Option<ScriptOrModule>,

    /// ### Generator
    ///
    /// The generator that this execution context is evaluating, if any.
    /// Suspension itself is driven by the evaluator.
    pub generator: Option<Object>,
}

impl ExecutionContext {
    /// A context with no code state, as used for built-in functions and the
    /// host's top-level context.
    pub fn new(realm: Realm) -> Self {
        Self {
            ecmascript_code: None,
            function: None,
            realm,
            script_or_module: None,
            generator: None,
        }
    }
}

/// ### [execution context stack](https://tc39.es/ecma262/#execution-context-stack)
///
/// The execution context stack is used to track execution contexts. The
/// running execution context is always the top element of this stack.
#[derive(Debug, Default, Clone)]
pub struct ExecutionContextStack {
    contexts: Vec<ExecutionContext>,
}

impl ExecutionContextStack {
    pub fn push(&mut self, context: ExecutionContext) {
        self.contexts.push(context);
    }

    /// Returns `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<ExecutionContext> {
        self.contexts.pop()
    }

    /// The running execution context, if any.
    pub fn peek(&self) -> Option<&ExecutionContext> {
        self.contexts.last()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Pops contexts until at most `len` remain.
    pub fn truncate(&mut self, len: usize) {
        self.contexts.truncate(len);
    }

    /// Iterates from the running context towards the bottom of the stack.
    pub fn iter(&self) -> impl Iterator<Item = &ExecutionContext> {
        self.contexts.iter().rev()
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::heap::RealmIndex;

    fn context(n: usize) -> ExecutionContext {
        ExecutionContext::new(Realm(RealmIndex::from_index(n)))
    }

    #[test]
    fn empty_stack_signals_empty() {
        let mut stack = ExecutionContextStack::default();
        assert!(stack.is_empty());
        assert!(stack.peek().is_none());
        assert!(stack.pop().is_none());
    }

    #[test]
    fn running_context_is_the_top() {
        let mut stack = ExecutionContextStack::default();
        stack.push(context(0));
        stack.push(context(1));
        assert_eq!(stack.peek(), Some(&context(1)));
        assert_eq!(stack.iter().count(), 2);
        assert_eq!(stack.iter().last(), Some(&context(0)));
        stack.truncate(1);
        assert_eq!(stack.peek(), Some(&context(0)));
    }

    proptest! {
        #[test]
        fn balanced_push_pop_empties_the_stack(n in 0usize..64) {
            let mut stack = ExecutionContextStack::default();
            for i in 0..n {
                stack.push(context(i));
            }
            prop_assert_eq!(stack.len(), n);
            for i in (0..n).rev() {
                prop_assert_eq!(stack.pop(), Some(context(i)));
            }
            prop_assert!(stack.peek().is_none());
            prop_assert!(stack.is_empty());
        }
    }
}
