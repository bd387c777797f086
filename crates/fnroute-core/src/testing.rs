use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use fnroute_model::{NAMESPACE_SEPARATOR, ReadySet};

use crate::{directory::EndpointDirectory, error::DirectoryError};

/// Directory fake answering from a script, then repeating a fallback reply.
pub(crate) struct ScriptedDirectory {
    script: Mutex<VecDeque<Result<ReadySet, DirectoryError>>>,
    fallback: Result<ReadySet, DirectoryError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedDirectory {
    pub(crate) fn new(
        script: Vec<Result<ReadySet, DirectoryError>>,
        fallback: Result<ReadySet, DirectoryError>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn ready(addresses: &[&str]) -> Self {
        Self::new(Vec::new(), Ok(ReadySet::from_addresses(addresses.iter().copied())))
    }

    pub(crate) fn never_ready() -> Self {
        Self::new(Vec::new(), Ok(ReadySet::new()))
    }

    pub(crate) fn failing(err: DirectoryError) -> Self {
        Self::new(Vec::new(), Err(err))
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl EndpointDirectory for ScriptedDirectory {
    async fn fetch(&self, namespace: &str, function: &str) -> Result<ReadySet, DirectoryError> {
        self.calls
            .lock()
            .unwrap()
            .push((namespace.to_string(), function.to_string()));

        // The lister must only ever see the bare function name.
        if function.contains(NAMESPACE_SEPARATOR) {
            return Err(DirectoryError::InvalidResponse(format!(
                "can not look up function name with a dot: {function}"
            )));
        }

        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}
