// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Agent, JsError, agent::HostHooks};

#[derive(Debug)]
pub struct DefaultHostHooks;

impl HostHooks for DefaultHostHooks {
    /// ### [9.5.4 HostReportErrors ( errorList )](https://html.spec.whatwg.org/multipage/webappapis.html#report-the-exception)
    ///
    /// Errors are logged; the agent keeps running.
    fn report_error(&self, agent: &mut Agent, error: JsError) {
        let message = error.to_string(agent);
        log::error!("uncaught exception in agent {:?}: {message}", agent.signifier());
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::{
        agent::{ExceptionType, Options},
        initialize_default_realm,
    };

    #[test]
    fn reporting_does_not_disturb_the_agent() {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        let depth = agent.execution_context_stack().len();
        let error = agent.throw_exception_with_static_message(ExceptionType::Error, "reported");
        DefaultHostHooks.report_error(&mut agent, error);
        assert_eq!(agent.execution_context_stack().len(), depth);
    }
}
