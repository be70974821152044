//! Fetchers that combine [`crate::api::JwchClient`] requests with [`crate::parser`].

pub mod calendar;
pub mod course;
pub mod mark;
pub mod notice;
pub mod room;
pub mod user;

use std::future::Future;

use anyhow::Context;
use itertools::Itertools;
use serde::Serialize;
use tokio::sync::oneshot;

use crate::schema::FormState;

/// Postback that selects a term on pages with a term drop-down.
#[derive(Debug, Serialize)]
pub(crate) struct TermForm<'a> {
    #[serde(flatten)]
    state: &'a FormState,
    #[serde(rename = "ctl00$ContentPlaceHolder1$DDL_xnxq")]
    term: &'a str,
    #[serde(rename = "ctl00$ContentPlaceHolder1$BT_submit")]
    submit: &'static str,
}
impl<'a> TermForm<'a> {
    pub(crate) fn new(state: &'a FormState, term: &'a str) -> Self {
        Self {
            state,
            term,
            submit: "确定",
        }
    }
}

/// Runs every job on its own task and collects the results in submission order.
///
/// The first error in that order is returned as soon as it is received.
/// Jobs that are still running are not cancelled and finish in the background.
pub async fn gather_in_order<T, F>(jobs: impl IntoIterator<Item = F>) -> anyhow::Result<Vec<T>>
where
    T: Send + 'static,
    F: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    let receivers = jobs
        .into_iter()
        .map(|job| {
            let (tx, rx) = oneshot::channel();
            tokio::spawn(async move {
                // The receiver is gone once an earlier job has failed.
                let _ = tx.send(job.await);
            });
            rx
        })
        .collect_vec();
    let mut results = Vec::with_capacity(receivers.len());
    for rx in receivers {
        results.push(rx.await.context("A worker exited without reporting")??);
    }
    Ok(results)
}
