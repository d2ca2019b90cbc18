//! Recording executor for unit tests.

use crate::executor::Executor;
use crate::invocation::Invocation;
use crate::GitStampError;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Records every command line it receives and answers with a canned result.
#[derive(Debug, Clone)]
pub(crate) struct StubExecutor {
    calls: Arc<Mutex<Vec<String>>>,
    response: Result<String, (Option<i32>, String)>,
}

impl StubExecutor {
    pub(crate) fn returning(output: &str) -> Self {
        Self {
            calls: Arc::default(),
            response: Ok(output.to_string()),
        }
    }

    pub(crate) fn failing(code: i32, stderr: &str) -> Self {
        Self {
            calls: Arc::default(),
            response: Err((Some(code), stderr.to_string())),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, invocation: &Invocation) -> crate::Result<String> {
        let line = invocation.to_string();
        self.calls.lock().unwrap().push(line.clone());
        match &self.response {
            Ok(output) => Ok(output.clone()),
            Err((code, stderr)) => Err(GitStampError::CommandFailed {
                command: line,
                code: *code,
                stderr: stderr.clone(),
            }),
        }
    }
}

impl Executor for StubExecutor {
    fn execute(&self, invocation: &Invocation) -> crate::Result<String> {
        self.respond(invocation)
    }

    fn execute_async(
        &self,
        invocation: Invocation,
    ) -> impl Future<Output = crate::Result<String>> + Send {
        let result = self.respond(&invocation);
        async move {
            tokio::task::yield_now().await;
            result
        }
    }
}
