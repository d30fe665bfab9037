//! Shared utilities for the deliberation phases.
//!
//! Contains the call normalization every phase relies on (timeouts, errors
//! and blank output all become "no text") and the per-agent fan-out.

use crate::config::CouncilParams;
use crate::ports::completion::CompletionService;
use council_domain::{AgentId, Message, truncate};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Run one completion call, normalizing every failure to `None`.
///
/// Transport errors, timeouts and blank output are all treated alike; the
/// cause is only logged.
pub(crate) async fn complete_text<C>(
    service: &C,
    agent: &AgentId,
    messages: &[Message],
    max_output_tokens: u32,
    timeout: Option<Duration>,
) -> Option<String>
where
    C: CompletionService + ?Sized,
{
    let call = service.complete(agent, messages, max_output_tokens);
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(agent = %agent, "Completion timed out after {:?}", limit);
                return None;
            }
        },
        None => call.await,
    };

    match result {
        Ok(text) if text.trim().is_empty() => {
            warn!(agent = %agent, "Completion returned empty content");
            None
        }
        Ok(text) => {
            debug!(agent = %agent, "Completion: {}", truncate(&text, 150));
            Some(text)
        }
        Err(e) => {
            warn!(agent = %agent, "Completion failed: {}", e);
            None
        }
    }
}

/// Issue one call per agent and return the outcomes in request order.
///
/// `on_call` runs just before an agent's call is issued. `on_resolved` runs
/// once per agent as soon as its outcome is known, always in request order:
/// with `params.parallel` the calls run concurrently on a [`JoinSet`] and an
/// outcome is reported once every earlier request has resolved too. Dropping
/// the returned future aborts every call still in flight.
pub(crate) async fn fan_out<C>(
    service: &Arc<C>,
    requests: Vec<(AgentId, Vec<Message>)>,
    max_output_tokens: u32,
    params: &CouncilParams,
    on_call: impl Fn(&AgentId),
    mut on_resolved: impl FnMut(&AgentId, Option<&str>),
) -> Vec<(AgentId, Option<String>)>
where
    C: CompletionService + 'static,
{
    let timeout = params.call_timeout;

    if !params.parallel {
        let mut outcomes = Vec::with_capacity(requests.len());
        for (agent, messages) in requests {
            on_call(&agent);
            let text =
                complete_text(service.as_ref(), &agent, &messages, max_output_tokens, timeout).await;
            on_resolved(&agent, text.as_deref());
            outcomes.push((agent, text));
        }
        return outcomes;
    }

    let mut join_set = JoinSet::new();
    for (index, (agent, messages)) in requests.iter().cloned().enumerate() {
        on_call(&agent);
        let service = Arc::clone(service);
        join_set.spawn(async move {
            let text =
                complete_text(service.as_ref(), &agent, &messages, max_output_tokens, timeout).await;
            (index, text)
        });
    }

    let mut slots: Vec<Option<Option<String>>> = vec![None; requests.len()];
    let mut reported = 0;
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, text)) => slots[index] = Some(text),
            Err(e) => warn!("Task join error: {}", e),
        }
        while let Some(Some(text)) = slots.get(reported) {
            on_resolved(&requests[reported].0, text.as_deref());
            reported += 1;
        }
    }

    // A task that died without reporting counts as a failed call
    for (index, slot) in slots.iter_mut().enumerate().skip(reported) {
        let text = slot.get_or_insert(None);
        on_resolved(&requests[index].0, text.as_deref());
    }

    requests
        .into_iter()
        .map(|(agent, _)| agent)
        .zip(slots.into_iter().map(Option::flatten))
        .collect()
}

/// Race `work` against cancellation.
///
/// Returns `None` when the token fires first; `work` is dropped, which
/// aborts its in-flight calls.
pub(crate) async fn until_cancelled<T>(
    token: &CancellationToken,
    work: impl Future<Output = T>,
) -> Option<T> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        output = work => Some(output),
    }
}
